use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Location of the JSON document holding every session and submission.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Campus identifiers allowed to log in. Each one is also its own username.
    pub campuses: Vec<String>,
    /// Password shared by every campus.
    pub shared_password: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

pub const DEFAULT_CAMPUSES: &[&str] = &[
    "Toulouse",
    "Paris",
    "Lyon",
    "Marseille",
    "Bordeaux",
    "Lille",
    "Nantes",
    "Montpellier",
    "Strasbourg",
    "Rennes",
];

impl AppConfig {
    /// Load from `EVALBOARD_CONFIG`, or `config/config` when unset.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("EVALBOARD_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    /// Load defaults, then the optional file at `config_path`, then the environment.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("storage.path", "data/db.json")?
            .set_default(
                "auth.campuses",
                DEFAULT_CAMPUSES
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>(),
            )?
            .set_default("auth.shared_password", "demo")?
            .set_default("auth.jwt_secret", "change-me")?
            .set_default("auth.session_ttl_hours", 24)?
            .add_source(File::with_name(config_path).required(false))
            // Override from environment (e.g., EVALBOARD__AUTH__SHARED_PASSWORD)
            .add_source(Environment::with_prefix("EVALBOARD").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
