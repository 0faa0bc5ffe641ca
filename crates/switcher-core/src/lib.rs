//! # switcher-core - Core Domain Types
//!
//! Foundation crate for the map style switcher. Provides style definitions,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Styles (`style`)
//! - [`StyleDefinition`] - A titled style and the URI handed to the host map
//! - [`StyleSet`] - Ordered list of styles, defaulting to the five built-ins
//! - [`css_safe_class()`] - Derive a class name from a style title
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use switcher_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod style;

/// Prelude for common imports used throughout all switcher crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use style::{
    css_safe_class, StyleDefinition, StyleSet, BUILTIN_STYLES, FALLBACK_DEFAULT_STYLE,
};
