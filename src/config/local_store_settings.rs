use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::config::traits::Env;

#[derive(Debug, Clone, Deserialize)]
pub struct LocalStoreSettings {
    /// Directory holding the `user` and `users` record files.
    #[serde(default = "default_local_store_dir")]
    pub local_store_dir: String,
}

fn default_local_store_dir() -> String {
    "./data".to_string()
}

impl Env for LocalStoreSettings {
    fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .add_source(Environment::default())
            .build()?;

        settings.try_deserialize()
    }
}
