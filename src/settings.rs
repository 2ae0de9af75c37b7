use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    // env vars always arrive as strings
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

/// Defaults, then `configuration.toml` if present, then `TRIVIA__SECTION__KEY`
/// environment variables (a `.env` file is loaded first).
pub fn get_settings() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();
    let builder = Config::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("__")
                .separator("__"),
        );
    build_settings(builder)
}

fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    builder
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?
        .build()?
        .try_deserialize()
}
