//! Interaction events delivered to the control.
//!
//! Mirrors the small slice of browser event data the switcher reacts to:
//! clicks and key presses, each aimed at a target node.

use crate::node::NodeId;

/// Kind of interaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    KeyDown,
}

/// Abstract key value, independent of any windowing or browser binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Up arrow key
    ArrowUp,
    /// Down arrow key
    ArrowDown,
    /// Escape key
    Escape,
    /// Enter/Return key
    Enter,
    /// Tab key
    Tab,
    /// Regular character key
    Char(char),
    /// Any other named key, kept verbatim
    Other(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` style name.
    ///
    /// Accepts the legacy `Up`/`Down`/`Esc` spellings.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }
}

/// A single interaction event aimed at a node in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    kind: EventKind,
    target: NodeId,
    key: Option<Key>,
    default_prevented: bool,
}

impl DomEvent {
    /// Click on `target`
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
            default_prevented: false,
        }
    }

    /// Key press while `target` has focus
    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key),
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Key for `KeyDown` events, `None` for clicks
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
