//! # Configuration
//!
//! Run options come from three layers, lowest precedence first: built-in
//! defaults, an optional YAML file, and command-line flags.
//!
//! ```yaml
//! default_region: cn-hangzhou
//! concurrent: true
//! settings:
//!   ram_access_keys_rotation_interval: 90
//! ```

use std::path::Path;

use anyhow::{Context, Result};

use cspm_engine::RunOptions;

/// Load run options from a YAML file, or defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<RunOptions> {
    let Some(path) = path else {
        return Ok(RunOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    // An empty file is a valid config: every field has a default.
    if text.trim().is_empty() {
        return Ok(RunOptions::default());
    }
    let options: RunOptions = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(config = %path.display(), "loaded run options");
    Ok(options)
}
