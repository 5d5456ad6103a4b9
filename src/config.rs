//! Configuration loading
//!
//! Settings are read from a TOML file with an optional `[claims]` section.
//!
//! # Example
//!
//! ```rust,ignore
//! use claims_inspector::config::load_config;
//!
//! let settings = load_config("inspector.toml")?;
//! let inspector = ClaimsInspector::with_config(&claims, &settings.inspector_config());
//! ```

use crate::claims::types::DEFAULT_ACCOUNT_CLIENT;
use crate::{ClaimsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectorSettings {
    /// Claim inspection section
    #[serde(default)]
    pub claims: Option<InspectorConfig>,
}

impl InspectorSettings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_config(path)
    }

    /// The `[claims]` section, or defaults when it is missing
    pub fn inspector_config(&self) -> InspectorConfig {
        self.claims.clone().unwrap_or_default()
    }
}

/// Settings for [`ClaimsInspector`](crate::ClaimsInspector)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// `resource_access` client whose roles are the account roles
    #[serde(default = "default_account_client")]
    pub account_client: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            account_client: default_account_client(),
        }
    }
}

fn default_account_client() -> String {
    DEFAULT_ACCOUNT_CLIENT.to_string()
}

/// Load settings from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<InspectorSettings> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ClaimsError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

    let settings = toml::from_str(&content)
        .map_err(|e| ClaimsError::Config(format!("Failed to parse TOML config: {}", e)))?;
    tracing::debug!("Loaded inspector settings from {}", path.display());
    Ok(settings)
}
