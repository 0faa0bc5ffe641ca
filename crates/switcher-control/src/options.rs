//! Construction options for the style switcher.
//!
//! The second construction argument is either a bare default-style title or a
//! full [`ControlOptions`] structure. [`SwitcherOptions`] models that choice
//! and is resolved once when the control is built.

use std::fmt;

use switcher_dom::DomEvent;

/// Called before the dropdown opens; returning `true` keeps it closed
pub type OpenListener = Box<dyn Fn(&DomEvent) -> bool>;

/// Called before a clicked style is applied; returning `true` vetoes it
pub type SelectListener = Box<dyn Fn(&DomEvent) -> bool>;

/// Called after a clicked style was applied, with the new style's URI
pub type ChangeListener = Box<dyn Fn(&DomEvent, &str)>;

/// Optional user callbacks. Absent listeners are skipped.
#[derive(Default)]
pub struct EventListeners {
    pub on_open: Option<OpenListener>,
    pub on_select: Option<SelectListener>,
    pub on_change: Option<ChangeListener>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(mut self, listener: impl Fn(&DomEvent) -> bool + 'static) -> Self {
        self.on_open = Some(Box::new(listener));
        self
    }

    pub fn on_select(mut self, listener: impl Fn(&DomEvent) -> bool + 'static) -> Self {
        self.on_select = Some(Box::new(listener));
        self
    }

    pub fn on_change(mut self, listener: impl Fn(&DomEvent, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Run `on_open`; true means the open was vetoed
    pub(crate) fn open_vetoed(&self, event: &DomEvent) -> bool {
        self.on_open.as_ref().is_some_and(|listener| listener(event))
    }

    /// Run `on_select`; true means the selection was vetoed
    pub(crate) fn select_vetoed(&self, event: &DomEvent) -> bool {
        self.on_select
            .as_ref()
            .is_some_and(|listener| listener(event))
    }

    pub(crate) fn notify_change(&self, event: &DomEvent, uri: &str) {
        if let Some(listener) = &self.on_change {
            listener(event, uri);
        }
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("on_open", &self.on_open.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// Full configuration form of the second construction argument
#[derive(Debug, Default)]
pub struct ControlOptions {
    /// Title of the style marked active on attach
    pub default_style: Option<String>,
    pub event_listeners: EventListeners,
}

impl ControlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_style(mut self, title: impl Into<String>) -> Self {
        self.default_style = Some(title.into());
        self
    }

    pub fn event_listeners(mut self, listeners: EventListeners) -> Self {
        self.event_listeners = listeners;
        self
    }
}

/// Either a bare default-style title or a full configuration
#[derive(Debug)]
pub enum SwitcherOptions {
    DefaultStyle(String),
    Config(ControlOptions),
}

impl SwitcherOptions {
    /// Split into the configured default title and the listeners.
    ///
    /// An empty title counts as unset.
    pub(crate) fn resolve(self) -> (Option<String>, EventListeners) {
        let (title, listeners) = match self {
            SwitcherOptions::DefaultStyle(title) => (Some(title), EventListeners::default()),
            SwitcherOptions::Config(options) => (options.default_style, options.event_listeners),
        };
        (title.filter(|t| !t.is_empty()), listeners)
    }
}

impl From<&str> for SwitcherOptions {
    fn from(title: &str) -> Self {
        SwitcherOptions::DefaultStyle(title.to_string())
    }
}

impl From<String> for SwitcherOptions {
    fn from(title: String) -> Self {
        SwitcherOptions::DefaultStyle(title)
    }
}

impl From<ControlOptions> for SwitcherOptions {
    fn from(options: ControlOptions) -> Self {
        SwitcherOptions::Config(options)
    }
}
