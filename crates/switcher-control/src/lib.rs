//! # switcher-control - Map Style Switcher Control
//!
//! A dropdown control that lets the user switch a host map between named
//! visual styles. The control builds its markup in a [`switcher_dom`]
//! document, binds to a [`HostMap`] on attach and reacts to clicks and key
//! presses routed through [`StyleSwitcherControl::handle_event`].
//!
//! ## Public API
//!
//! - [`StyleSwitcherControl`] - Construction, lifecycle and programmatic API
//! - [`SwitcherOptions`] / [`ControlOptions`] / [`EventListeners`] - Default
//!   style and `on_open` / `on_select` / `on_change` hooks
//! - [`HostMap`] - The one capability the control needs from a map
//! - [`EventOutcome`] - What the control did with an event
//! - [`SwitcherConfig`] / [`load_config`] - TOML-backed style lists
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use switcher_control::{HostMap, StyleSwitcherControl};
//! use switcher_core::Result;
//! use switcher_dom::{Document, DomEvent};
//!
//! struct Map;
//!
//! impl HostMap for Map {
//!     fn set_style(&self, _uri: &str) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let document = Document::new_handle();
//! let mut control = StyleSwitcherControl::default();
//! let map: Rc<dyn HostMap> = Rc::new(Map);
//! control.on_add(&document, Some(map))?;
//!
//! let dark = control.option_node(0).unwrap();
//! control.handle_event(&mut DomEvent::click(dark));
//! assert_eq!(control.current_style().unwrap().title(), "Dark");
//! # Ok::<(), switcher_core::Error>(())
//! ```

pub(crate) mod attachment;
pub mod config;
pub mod control;
pub mod handler;
pub mod host;
pub mod options;

pub use attachment::{
    ACTIVE_CLASS, CONTROL_CLASS, CONTROL_GROUP_CLASS, STYLE_LIST_CLASS, TOGGLE_CLASS,
    TOGGLE_ICON_CLASS, TOGGLE_LABEL, URI_ATTRIBUTE,
};
pub use config::{load_config, parse_config, SwitcherConfig};
pub use control::{ControlPosition, StyleSwitcherControl};
pub use handler::EventOutcome;
pub use host::HostMap;
pub use options::{
    ChangeListener, ControlOptions, EventListeners, OpenListener, SelectListener, SwitcherOptions,
};
