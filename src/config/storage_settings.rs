use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::config::traits::Env;

/// Object storage endpoints. Both URLs unset means uploads are disabled and
/// profile images stay inline.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub storage_base_url: Option<String>,
    pub storage_public_url: Option<String>,
    #[serde(default = "default_bucket")]
    pub storage_bucket: String,
}

fn default_bucket() -> String {
    "profile-images".to_string()
}

impl Env for StorageSettings {
    fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .add_source(Environment::default())
            .build()?;

        settings.try_deserialize()
    }
}
