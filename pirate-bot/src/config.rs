//! Minimal config: Telegram token, OpenAI key/model, optional URL overrides, log path.
//! Loaded from the environment: BOT_TOKEN, OPENAI_API_KEY, OPENAI_API_URL, OPENAI_MODEL,
//! TELEGRAM_API_URL, LOG_FILE.

use anyhow::Result;
use openai_gateway::DEFAULT_MODEL;
use std::env;

pub struct BotConfig {
    pub bot_token: String,
    /// None when OPENAI_API_KEY is unset. The process still starts; the runner logs the
    /// degraded state and every $question fails at the gateway with the auth placeholder.
    pub openai_api_key: Option<String>,
    pub openai_api_url: Option<String>,
    pub openai_model: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl BotConfig {
    /// Loads from environment. BOT_TOKEN is required unless `token` is given; everything
    /// else is optional.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        Ok(Self {
            bot_token,
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_api_url: env::var("OPENAI_API_URL").ok(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            telegram_api_url: env::var("TELEGRAM_API_URL").ok(),
            log_file: env::var("LOG_FILE").ok(),
        })
    }

}
