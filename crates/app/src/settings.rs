//! Handles settings for the application. Configuration is read from
//! `settings.toml` (or the file passed with `--config`) and can be
//! overridden with `PARTNERBOOK_*` environment variables, e.g.
//! `PARTNERBOOK_SERVER__PORT=8080`.
//!
//! See `settings.toml` for the configuration.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use engine::{EngineError, Partners};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "partnerbook", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
    /// IANA name used to read plain `YYYY-MM-DD` dates.
    pub timezone: Option<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::Sqlite("partnerbook.db".to_string()),
            timezone: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PartnerEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub partners: Vec<PartnerEntry>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(path).required(args.config.is_some()))
            .add_source(
                Environment::with_prefix("PARTNERBOOK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Some(port) = args.port {
            settings.server.port = port;
        }
        Ok(settings)
    }

    /// Configured partners; the built-in pair when none are listed.
    pub fn partners(&self) -> Result<Partners, EngineError> {
        if self.partners.is_empty() {
            return Ok(Partners::default());
        }
        Partners::from_entries(
            self.partners
                .iter()
                .map(|p| (p.id.as_str(), p.name.as_str())),
        )
    }
}
