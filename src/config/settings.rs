use std::time::Duration;

use serde::{Deserialize, Serialize};

use config::{Config, ConfigError, Environment};

/// Which backing store the registry runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub registry_backend: RegistryBackend,
    /// JSONL journal of access decisions; `None` keeps the log in memory only.
    pub event_log_path: Option<String>,
    pub grant_secs: u64,
    pub cooldown_secs: u64,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Defaults mirror a single-door deployment
            .set_default("db_path", "sezam.db")?
            .set_default("registry_backend", "sqlite")?
            .set_default("grant_secs", 3)?
            .set_default("cooldown_secs", 1)?
            .set_default("log_level", "info")?
            // Environment variables with the SEZAM_ prefix override defaults
            .add_source(Environment::with_prefix("SEZAM"))
            .build()?;

        cfg.try_deserialize()
    }

    pub fn grant_duration(&self) -> Duration {
        Duration::from_secs(self.grant_secs)
    }

    pub fn cooldown_duration(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: "sezam.db".to_string(),
            registry_backend: RegistryBackend::Sqlite,
            event_log_path: None,
            grant_secs: 3,
            cooldown_secs: 1,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}
