//! Loader for switcher configuration files

use std::path::Path;

use super::types::SwitcherConfig;
use switcher_core::prelude::*;

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<SwitcherConfig> {
    toml::from_str(content).map_err(|e| Error::config_invalid(e.to_string()))
}

/// Load configuration from a TOML file.
///
/// A missing or malformed file is an error; there is no silent fallback.
pub fn load_config(path: &Path) -> Result<SwitcherConfig> {
    if !path.exists() {
        return Err(Error::config_not_found(path));
    }

    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        "Loaded switcher config from {:?} ({} styles)",
        path,
        config.styles.len()
    );
    Ok(config)
}
