//! Key event handlers for the open dropdown

use switcher_core::prelude::*;
use switcher_dom::{DomEvent, Key};

use super::EventOutcome;
use crate::control::StyleSwitcherControl;

/// Navigation requested by a key press inside the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DropdownNav {
    FocusNext,
    FocusPrevious,
    Close,
}

/// Convert a key to a dropdown navigation action
pub(crate) fn nav_for_key(key: &Key) -> Option<DropdownNav> {
    match key {
        Key::ArrowDown => Some(DropdownNav::FocusNext),
        Key::ArrowUp => Some(DropdownNav::FocusPrevious),
        Key::Escape => Some(DropdownNav::Close),
        _ => None,
    }
}

/// Index to focus next among `len` options, wrapping in both directions.
///
/// Without a focused option, next starts at the first and previous at the last.
pub(crate) fn cycle_focus(current: Option<usize>, len: usize, nav: DropdownNav) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (nav, current) {
        (DropdownNav::FocusNext, Some(i)) => Some((i + 1) % len),
        (DropdownNav::FocusNext, None) => Some(0),
        (DropdownNav::FocusPrevious, Some(i)) => Some((i + len - 1) % len),
        (DropdownNav::FocusPrevious, None) => Some(len - 1),
        (DropdownNav::Close, _) => current,
    }
}

impl StyleSwitcherControl {
    /// Keydown listener scoped to the open dropdown
    pub(crate) fn handle_dropdown_key(&mut self, event: &mut DomEvent) -> EventOutcome {
        let Some(nav) = event.key().and_then(nav_for_key) else {
            return EventOutcome::Ignored;
        };
        let Some(attachment) = self.attachment.as_mut() else {
            return EventOutcome::Ignored;
        };
        if !attachment.open {
            return EventOutcome::Ignored;
        }

        let in_dropdown = attachment
            .document
            .borrow()
            .contains(attachment.dropdown, event.target());
        if !in_dropdown {
            return EventOutcome::Ignored;
        }

        match nav {
            DropdownNav::Close => {
                if let Err(e) = attachment.set_open(false) {
                    error!("Failed to close style list: {}", e);
                }
                if let Err(e) = attachment.focus(attachment.toggle) {
                    warn!("Failed to return focus to the toggle: {}", e);
                }
                EventOutcome::Closed
            }
            DropdownNav::FocusNext | DropdownNav::FocusPrevious => {
                let options = attachment.rendered_options();
                let focused = attachment.document.borrow().focused();
                let current = options.iter().position(|node| Some(*node) == focused);

                let Some(next) = cycle_focus(current, options.len(), nav) else {
                    return EventOutcome::Ignored;
                };
                event.prevent_default();
                if let Err(e) = attachment.focus(options[next]) {
                    warn!("Failed to focus style option: {}", e);
                    return EventOutcome::Ignored;
                }
                EventOutcome::FocusMoved
            }
        }
    }
}
