//! Configuration file handling
//!
//! The tool reads a single JSON file from the working directory holding the
//! provider credential, the default content address for created records, and
//! the mapping of zone aliases to provider zone ids. The file is loaded once
//! per run and the resulting [`DeployConfig`] is passed explicitly to
//! whichever component needs it.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Fixed configuration file name, resolved against the working directory
pub const CONFIG_FILE_NAME: &str = "api-access.json";

/// Provider configuration loaded from [`CONFIG_FILE_NAME`]
#[derive(Clone, Deserialize)]
pub struct DeployConfig {
    /// Provider API credential
    /// ⚠️ NEVER log this value
    pub key: String,

    /// Default content address for created records (the hosting machine)
    pub hosting: String,

    /// Zone alias → provider zone id
    pub zones: HashMap<String, String>,
}

// Custom Debug implementation that hides the API credential
impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("key", &"<REDACTED>")
            .field("hosting", &self.hosting)
            .field("zones", &self.zones)
            .finish()
    }
}

impl DeployConfig {
    /// Load and validate the configuration from `path`
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigMissing`] when the file does not exist
    /// - [`Error::ConfigInvalid`] when the file is not parseable JSON or a
    ///   required field is absent or empty
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigMissing);
        }

        let raw = std::fs::read_to_string(path)?;
        let config: DeployConfig =
            serde_json::from_str(&raw).map_err(|e| Error::config_invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(Error::config_invalid("API credential is empty"));
        }
        if self.hosting.is_empty() {
            return Err(Error::config_invalid("hosting address is empty"));
        }
        Ok(())
    }
}

/// Result of a [`regenerate`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenerateOutcome {
    /// A stub configuration file was written
    Created,
    /// A configuration file was already present, nothing was written
    AlreadyExists,
}

/// Write a stub configuration file at `path` if and only if none exists
///
/// The stub carries placeholder values and the full schema so it can be
/// filled in by hand. An existing file is never touched.
pub fn regenerate(path: &Path) -> Result<RegenerateOutcome> {
    if path.exists() {
        return Ok(RegenerateOutcome::AlreadyExists);
    }

    let stub = serde_json::json!({
        "key": "API_ACCESS_TOKEN",
        "hosting": "0.0.0.0",
        "zones": {
            "example.org": "API_ZONE_ID"
        }
    });

    std::fs::write(path, serde_json::to_string_pretty(&stub)?)?;
    Ok(RegenerateOutcome::Created)
}
