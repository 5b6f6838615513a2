//! # Command handlers
//!
//! The bot's two commands. [`HelloHandler`] answers `$hello` with a fixed greeting.
//! [`QuestionHandler`] strips the `$question` token and forwards the body to the
//! completion gateway; an empty body is rejected without calling the gateway.
//! Both match their token case-sensitively at the start of the raw content.

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Message, Result};
use openai_gateway::CompletionClient;
use std::sync::Arc;
use tracing::info;

/// Literal prefix that triggers the greeting reply.
pub const HELLO_COMMAND: &str = "$hello";

/// Literal prefix that triggers a completion call.
pub const QUESTION_COMMAND: &str = "$question";

/// Fixed greeting reply.
pub const HELLO_REPLY: &str = "Hello";

/// Reply for a `$question` with an empty body.
pub const EMPTY_QUESTION_REPLY: &str = "Ye need to ask a *real* question!";

/// Returns the question body: everything after the FIRST occurrence of the question
/// token in the trimmed content, itself trimmed. Later occurrences of the token stay in
/// the body verbatim. None when the token is absent.
pub fn extract_question(content: &str) -> Option<String> {
    let mut parts = content.trim().splitn(2, QUESTION_COMMAND);
    parts.next();
    parts.next().map(|rest| rest.trim().to_string())
}

/// Answers `$hello` with the fixed greeting. Never calls the gateway.
pub struct HelloHandler;

#[async_trait]
impl Handler for HelloHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.content.starts_with(HELLO_COMMAND) {
            return Ok(HandlerResponse::Continue);
        }
        info!(user_id = message.user.id, "$hello detected, sending greeting");
        Ok(HandlerResponse::Reply(HELLO_REPLY.to_string()))
    }
}

/// Answers `$question <body>` by forwarding the body to the completion gateway and
/// replying with whatever text the gateway outcome maps to (answer or placeholder).
pub struct QuestionHandler {
    gateway: Arc<dyn CompletionClient>,
}

impl QuestionHandler {
    pub fn new(gateway: Arc<dyn CompletionClient>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Handler for QuestionHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.content.starts_with(QUESTION_COMMAND) {
            return Ok(HandlerResponse::Continue);
        }
        info!(
            user_id = message.user.id,
            "$question detected, attempting completion"
        );

        let question = match extract_question(&message.content) {
            Some(question) if !question.is_empty() => question,
            _ => return Ok(HandlerResponse::Reply(EMPTY_QUESTION_REPLY.to_string())),
        };

        info!(
            user_id = message.user.id,
            question = %question,
            "Parsed question, calling gateway"
        );
        let outcome = self.gateway.complete(&question).await;
        Ok(HandlerResponse::Reply(outcome.into_reply()))
    }
}
