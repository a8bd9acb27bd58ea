//! Server configuration, read from the `[server]` table of `mixform.toml`.

use std::path::{Path, PathBuf};

use mixform_eval::EvaluatorConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "mixform.toml";

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of `<name>.json` schema documents. Unset keeps schemas in
    /// memory for the lifetime of the process.
    pub schema_dir: Option<PathBuf>,
    /// Install the "decimal" digit-chain demo schema at startup.
    pub seed_demo: bool,
    pub demo_depth: usize,
    /// Override for the evaluator's closure pass cap.
    pub max_passes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            schema_dir: None,
            seed_demo: false,
            demo_depth: 4,
            max_passes: None,
        }
    }
}

/// Raw TOML layout; everything lives under `[server]`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Loads config from `path`.
    /// Falls back to defaults when the file is missing or does not parse.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// Parses a config document. `max_passes = 0` is replaced by the
    /// evaluator's default cap.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config = toml::from_str::<ConfigFile>(contents)?.server;
        if config.max_passes == Some(0) {
            warn!("Ignoring max_passes = 0, using the evaluator's default cap");
            config.max_passes = None;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            max_passes: self.max_passes,
        }
    }
}
