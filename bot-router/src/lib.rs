//! # Message router
//!
//! Dispatches each inbound message: logs it, drops the bot's own messages, runs command
//! handlers in registration order (the first [`HandlerResponse::Reply`] wins), and sends
//! the reply back to the message's chat. Unrecognized content falls through with no
//! reply. Handler failures become a fixed error reply; nothing propagates out of
//! [`Router::handle`] and a failed send is only logged.

use bot_core::{Bot, Handler, HandlerResponse, Message};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Reply sent when a handler fails unexpectedly.
pub const UNEXPECTED_ERROR_REPLY: &str =
    "By the Kraken's beard! An unexpected bot error occurred!";

/// Ordered command dispatch over a reply sink. Stateless across messages; safe to clone
/// and share between concurrently running handler tasks.
#[derive(Clone)]
pub struct Router {
    bot: Arc<dyn Bot>,
    handlers: Vec<Arc<dyn Handler>>,
    self_user_id: Option<i64>,
}

impl Router {
    /// Creates a router with no handlers and no self-message filter.
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            handlers: Vec::new(),
            self_user_id: None,
        }
    }

    /// Appends a handler (evaluated in registration order).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Sets the bot's own user id; messages from this id are discarded without a reply.
    pub fn with_self_user_id(mut self, id: Option<i64>) -> Self {
        self.self_user_id = id;
        self
    }

    /// Handles one inbound message to completion. Every message is logged before any
    /// branching. Never returns an error: a handler failure is logged and answered with
    /// [`UNEXPECTED_ERROR_REPLY`], and a failed send is logged and dropped, so the event
    /// subscription never crashes.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) {
        info!(
            user_id = message.user.id,
            username = message.user.username.as_deref().unwrap_or(""),
            content = %message.content,
            "Message inbound"
        );

        if self.self_user_id == Some(message.user.id) {
            debug!(user_id = message.user.id, "Own message, discarding");
            return;
        }

        match self.dispatch(message).await {
            Ok(Some(reply)) => self.send(message, &reply).await,
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "Handler failed");
                self.send(message, UNEXPECTED_ERROR_REPLY).await;
            }
        }
    }

    /// Walks handlers in order; returns the first Reply, or None when all continue.
    async fn dispatch(&self, message: &Message) -> bot_core::Result<Option<String>> {
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            match handler.handle(message).await? {
                HandlerResponse::Reply(text) => {
                    info!(
                        user_id = message.user.id,
                        handler = %handler_name,
                        reply_len = text.len(),
                        "Handler replied"
                    );
                    return Ok(Some(text));
                }
                HandlerResponse::Continue => continue,
            }
        }
        debug!(user_id = message.user.id, "No handler matched");
        Ok(None)
    }

    async fn send(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send reply");
        }
    }
}
