//! Server configuration - loaded from YAML, every field has a default so the
//! server also runs with no config file at all.

use serde::{Deserialize, Serialize};

/// Where and how the user document is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON document holding all users.
    #[serde(default = "default_store_path")]
    pub path: String,
    /// Write indented JSON so the file stays hand-inspectable.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_store_path() -> String {
    "data/users.json".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            pretty: default_pretty(),
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:3000".
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            storage: StorageConfig::default(),
        }
    }
}
