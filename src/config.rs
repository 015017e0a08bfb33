use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fs::File, io::BufReader, path::Path};

/// Deployment settings of a persistor instance.
///
/// Missing fields take the module's defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistorConfig {
    /// Event bus address the persistor answers on.
    pub address: String,
    pub db_name: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Serve requests from in-memory collections instead of a live store.
    pub fake: bool,
}

impl Default for PersistorConfig {
    fn default() -> Self {
        Self {
            address: "vertx.mongopersistor".to_string(),
            db_name: "default_db".to_string(),
            host: "localhost".to_string(),
            port: 27017,
            username: None,
            password: None,
            fake: false,
        }
    }
}

impl PersistorConfig {
    /// In-memory config with every other field at its default.
    pub fn fake() -> Self {
        Self {
            fake: true,
            ..Self::default()
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to decode config file {}", path.display()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("Invalid persistor config")
    }
}
