//! Configuration types for the style switcher

use serde::{Deserialize, Serialize};
use switcher_core::{StyleDefinition, StyleSet};

/// Contents of a switcher configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwitcherConfig {
    /// Title of the style marked active on attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_style: Option<String>,

    /// Offered styles, in display order; empty means the built-ins
    #[serde(default)]
    pub styles: Vec<StyleDefinition>,
}

impl SwitcherConfig {
    /// Configured styles, or `None` to fall back to the built-ins
    pub fn style_set(&self) -> Option<StyleSet> {
        if self.styles.is_empty() {
            None
        } else {
            Some(StyleSet::new(self.styles.clone()))
        }
    }
}
