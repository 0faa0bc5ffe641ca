//! Configuration file parsing for the style switcher
//!
//! Supports a TOML file listing the offered styles and the default title:
//!
//! ```toml
//! default_style = "Dark"
//!
//! [[styles]]
//! title = "Dark"
//! uri = "mapbox://styles/mapbox/dark-v10"
//! ```

pub mod loader;
pub mod types;

pub use loader::{load_config, parse_config};
pub use types::SwitcherConfig;
