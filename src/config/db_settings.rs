use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::config::traits::Env;

/// Remote profile store connection. `database_url` is optional: without it
/// the local record store is the only (and authoritative) backend.
#[derive(Debug, Clone, Deserialize)]
pub struct DbSettings {
    pub database_url: Option<String>,
}

impl Env for DbSettings {
    fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Loading .env file

        let settings = Config::builder()
            .add_source(Environment::default())
            .build()?;

        settings.try_deserialize()
    }
}
