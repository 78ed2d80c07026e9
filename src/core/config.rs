use std::env;

use anyhow::{Context, Result};
use url::Url;

/// Default CORS origin: the deployed Mini App front-end.
const DEFAULT_ALLOWED_ORIGIN: &str = "https://boardstatuschallenge.netlify.app";

/// Default deep link that opens the Mini App inside Telegram.
const DEFAULT_MINIAPP_URL: &str = "https://t.me/status_boardbot/challenge";

/// Runtime configuration, loaded once at startup and passed to service
/// constructors. Nothing here is read from the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token (`BOT_TOKEN`)
    pub bot_token: String,
    /// Path to the SQLite database file (`DATABASE_PATH`, default `statusboard.sqlite`)
    pub database_path: String,
    /// Port the status HTTP API listens on (`WEB_PORT`, default 3000)
    pub web_port: u16,
    /// The single origin allowed by CORS (`ALLOWED_ORIGIN`)
    pub allowed_origin: String,
    /// Base URL the bot uses to reach the status API (`STATUS_API_URL`,
    /// defaults to the local server on `web_port`)
    pub status_api_url: Url,
    /// Deep link to the Mini App, used by /start and empty-state buttons
    /// (`MINIAPP_URL`)
    pub miniapp_url: Url,
    /// Path of the log file (`LOG_FILE_PATH`, default `statusboard.log`)
    pub log_file_path: String,
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    /// Only `BOT_TOKEN` is required when running the bot; `serve`-only mode
    /// tolerates a missing token.
    pub fn from_env() -> Result<Self> {
        let web_port = match env::var("WEB_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid WEB_PORT value: {raw}"))?,
            Err(_) => 3000,
        };

        let status_api_url = match env::var("STATUS_API_URL") {
            Ok(raw) => Url::parse(&raw).with_context(|| format!("Invalid STATUS_API_URL: {raw}"))?,
            Err(_) => Url::parse(&format!("http://127.0.0.1:{web_port}"))
                .context("Failed to build default STATUS_API_URL")?,
        };

        let miniapp_url = {
            let raw = env::var("MINIAPP_URL").unwrap_or_else(|_| DEFAULT_MINIAPP_URL.to_string());
            Url::parse(&raw).with_context(|| format!("Invalid MINIAPP_URL: {raw}"))?
        };

        Ok(Self {
            bot_token: env::var("BOT_TOKEN").unwrap_or_default(),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "statusboard.sqlite".to_string()),
            web_port,
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string()),
            status_api_url,
            miniapp_url,
            log_file_path: env::var("LOG_FILE_PATH").unwrap_or_else(|_| "statusboard.log".to_string()),
        })
    }
}
