//! Startup wiring and REPL: builds the completion gateway, command handlers, and router,
//! resolves the bot's own identity, then hands each teloxide message to the router on
//! its own task.

use anyhow::Result;
use bot_core::{init_tracing, Bot as CoreBot, ToCoreMessage};
use bot_router::Router;
use command_handlers::{HelloHandler, QuestionHandler};
use openai_gateway::{CompletionClient, OpenAIGateway};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::BotConfig;

/// Builds the completion gateway from config. A missing key is logged and the gateway is
/// built with an empty key; every completion then fails with the auth placeholder instead
/// of aborting startup.
fn build_gateway(config: &BotConfig) -> Arc<dyn CompletionClient> {
    info!("Initializing OpenAI gateway");
    let api_key = match &config.openai_api_key {
        Some(key) => key.clone(),
        None => {
            error!("OPENAI_API_KEY not set; every $question will fail with an authentication error");
            String::new()
        }
    };
    let gateway = match &config.openai_api_url {
        Some(url) => OpenAIGateway::with_base_url(api_key, url.clone()),
        None => OpenAIGateway::new(api_key),
    };
    Arc::new(gateway.with_model(config.openai_model.clone()))
}

/// Builds the router over the given reply sink, gateway, and self id: greeting first,
/// then question, falling through to no-op. Exposed for integration tests.
pub fn build_router(
    bot: Arc<dyn CoreBot>,
    gateway: Arc<dyn CompletionClient>,
    self_user_id: Option<i64>,
) -> Router {
    Router::new(bot)
        .with_self_user_id(self_user_id)
        .add_handler(Arc::new(HelloHandler))
        .add_handler(Arc::new(QuestionHandler::new(gateway)))
}

/// Main entry: init logging, build the teloxide bot, gateway, and router, then run the
/// REPL. Each message is handled on its own task; the router never lets a failure
/// escape, so the REPL keeps running.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(config.log_file.as_deref())?;

    let bot = match &config.telegram_api_url {
        Some(url) => {
            teloxide::Bot::new(config.bot_token.clone()).set_api_url(reqwest::Url::parse(url)?)
        }
        None => teloxide::Bot::new(config.bot_token.clone()),
    };

    let gateway = build_gateway(&config);

    let self_user_id = match bot.get_me().await {
        Ok(me) => {
            info!(
                user_id = me.user.id.0,
                username = me.user.username.as_deref().unwrap_or(""),
                "Logged in"
            );
            Some(me.user.id.0 as i64)
        }
        Err(e) => {
            error!(error = %e, "get_me failed; self-message filter disabled");
            None
        }
    };

    let adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let router = build_router(adapter, gateway, self_user_id);

    info!("Bot started successfully");

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let router = router.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            tokio::spawn(async move {
                router.handle(&core_msg).await;
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
