//! Cleanup configuration
//!
//! Loaded once at startup from a YAML file:
//!
//! ```yaml
//! namespace: apps
//! prefixFilter: cache-
//! sufixFilter: -tmp
//! ```
//!
//! Every field is optional. A missing or unparseable file falls back to
//! the defaults (all namespaces, no filters).

use crate::cleanup::filter::NameFilter;
use crate::domain::ports::NamespaceScope;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Default config file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Configuration for one cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleanupConfig {
    /// Namespace to clean; empty means all namespaces
    pub namespace: String,
    /// Only claims whose name starts with this are considered
    pub prefix_filter: String,
    /// Only claims whose name ends with this are considered
    #[serde(rename = "sufixFilter", alias = "suffixFilter")]
    pub suffix_filter: String,
}

impl CleanupConfig {
    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let buf = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty document deserializes to unit, not a mapping
        if buf.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&buf).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file, substituting defaults when it is missing or malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                debug!(?path, ?config, "Loaded cleanup config");
                config
            }
            Err(e) => {
                warn!("Failed to read config file, loading defaults. {}", e);
                Self::default()
            }
        }
    }

    /// Namespace scope for listing claims and workloads
    pub fn scope(&self) -> NamespaceScope {
        NamespaceScope::from_config(&self.namespace)
    }

    /// Name filter built from the prefix and suffix fields
    pub fn name_filter(&self) -> NameFilter {
        NameFilter::new()
            .with_prefix(&self.prefix_filter)
            .with_suffix(&self.suffix_filter)
    }
}
