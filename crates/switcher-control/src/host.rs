//! The host map collaborator.
//!
//! The switcher never talks to the rendering engine directly. Everything it
//! needs from the map is a single style-change call.

use switcher_core::prelude::*;

/// Map widget the switcher is attached to.
///
/// `set_style` receives the `uri` of the chosen [`switcher_core::StyleDefinition`]
/// and may fail; failures are logged by the control and never propagate out
/// of event handling.
#[cfg_attr(test, mockall::automock)]
pub trait HostMap {
    fn set_style(&self, uri: &str) -> Result<()>;
}
