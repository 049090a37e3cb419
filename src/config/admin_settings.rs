use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::config::traits::Env;

/// Credentials of the single distinguished admin identity. Seeded into the
/// roster at startup; the login short-circuit consults the same pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    pub admin_mobile: String,
    pub admin_password: String,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

impl Env for AdminSettings {
    fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .add_source(Environment::default())
            .build()?;

        settings.try_deserialize()
    }
}
