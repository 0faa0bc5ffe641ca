//! Map Style Switcher Library
//!
//! A dropdown control for switching a map widget between visual styles.

// Crate re-exports
pub use switcher_control as control;
pub use switcher_core as core;
pub use switcher_dom as dom;

// Re-export main entry points
pub use switcher_control::{
    load_config, ControlOptions, EventListeners, EventOutcome, HostMap, StyleSwitcherControl,
    SwitcherConfig, SwitcherOptions,
};
pub use switcher_core::{Error, Result, StyleDefinition, StyleSet};
pub use switcher_dom::{Document, DocumentHandle, DomEvent, Key};
