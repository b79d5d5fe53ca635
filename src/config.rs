use std::env;
use std::path::PathBuf;

use crate::errors::Error;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_DB_PATH: &str = "data/achievements.db";
const DEFAULT_HEALTH_PORT: u16 = 8080;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub api_base: String,
    pub db_path: PathBuf,
    pub health_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| Error::Config("TELEGRAM_BOT_TOKEN is not set".into()))?;
        if bot_token.trim().is_empty() {
            return Err(Error::Config("TELEGRAM_BOT_TOKEN is empty".into()));
        }

        let api_base =
            env::var("TELEGRAM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let db_path = env::var("BOT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let health_port = env::var("HEALTH_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HEALTH_PORT);

        Ok(Self {
            bot_token,
            api_base,
            db_path,
            health_port,
        })
    }
}
