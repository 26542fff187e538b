//! Settings of the `finora` binary.
//!
//! Values are layered: built-in defaults, then an optional `settings.toml`
//! in the working directory, then `FINORA__SECTION__KEY` environment
//! variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            defaults()?
                .add_source(File::with_name("settings").required(false))
                .add_source(Environment::with_prefix("FINORA").separator("__")),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("app.level", "info")?
        .set_default("server.port", 3000)?
        .set_default("server.database", "memory")?
        .set_default("auth.token_ttl_hours", 1)
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Settings::from_builder(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn defaults_fill_the_gaps() {
        let settings = parse("[auth]\njwt_secret = \"s\"\n").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.bind, None);
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.auth.token_ttl_hours, 1);
    }

    #[test]
    fn sqlite_path_is_read() {
        let settings = parse(
            "[server]\nport = 8080\ndatabase = { sqlite = \"finora.db\" }\n[auth]\njwt_secret = \"s\"\n",
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.server.database,
            Database::Sqlite("finora.db".to_string())
        );
    }

    #[test]
    fn jwt_secret_is_required() {
        assert!(parse("").is_err());
    }
}
