use std::path::Path;

use config::{Config, Environment, File, Map};
use serde::Deserialize;

use crate::error::AppError;

/// Optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chaos-escape.toml";

const ENV_PREFIX: &str = "CHAOS_ESCAPE";

/// Server settings, layered as defaults < config file < environment.
///
/// Environment variables use the `CHAOS_ESCAPE_` prefix, e.g.
/// `CHAOS_ESCAPE_MONGODB_URI` or `CHAOS_ESCAPE_DEMO_MODE=true`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Shared secret required by the admin editors.
    pub service_token: String,
    /// Run on the in-memory catalog instead of MongoDB.
    pub demo_mode: bool,
    /// Insert the demo catalog on startup when it is missing.
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// Load from `chaos-escape.toml` (if present) and the process environment.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE), None)
    }

    /// Load from an explicit file. `env` replaces the process environment
    /// when given, which keeps tests independent of the host.
    pub fn load_from(path: &Path, env: Option<Map<String, String>>) -> Result<Self, AppError> {
        let settings = Config::builder()
            .set_default("mongodb_uri", "mongodb://localhost:27017")?
            .set_default("mongodb_database", "chaos_escape")?
            .set_default("service_token", "dev-token")?
            .set_default("demo_mode", false)?
            .set_default("seed_demo_data", false)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        if config.service_token.trim().is_empty() {
            return Err(AppError::Config("service_token must not be empty".into()));
        }
        Ok(config)
    }

    /// Whether demo data should be inserted at startup.
    pub fn should_seed(&self) -> bool {
        self.demo_mode || self.seed_demo_data
    }
}
