//! # configs
//!
//! Layered settings: built-in defaults, then `config/default.toml`, then
//! `config/local.toml`, then `TAGBOARD_<SECTION>__<KEY>` environment
//! variables (a `.env` file is loaded first).

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// May carry credentials; redacted in Debug output
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    /// Loads settings from every source.
    pub fn load() -> Result<Self, ConfigError> {
        // Runs before logging is configured, so a missing file stays silent.
        dotenvy::dotenv().ok();

        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("TAGBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        Ok(config.try_deserialize()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite:tagboard.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("log.filter", "info")?
            .set_default("log.format", "pretty")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_are_complete() {
        let config = Settings::defaults().unwrap().build().unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url.expose_secret(), "sqlite:tagboard.db?mode=rwc");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.log.format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = Settings::defaults()
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .set_override("log.format", "json")
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn database_url_is_redacted() {
        let config = Settings::defaults()
            .unwrap()
            .set_override("database.url", "sqlite:secret.db")
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert!(!format!("{:?}", settings.database).contains("secret.db"));
    }

    #[test]
    fn load_succeeds_without_env_file_or_subscriber() {
        let settings = Settings::load().unwrap();

        assert!(settings.database.max_connections > 0);
    }
}
