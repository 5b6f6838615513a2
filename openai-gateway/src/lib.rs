//! # OpenAI completion gateway
//!
//! Thin wrapper around [async-openai] for a single-shot chat completion in the pirate
//! persona. No error crosses the gateway boundary: every call yields exactly one
//! [`CompletionOutcome`], and the two failure arms map to fixed user-facing replies.
//! Provides token masking for safe logging.

use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Fixed framing prepended to every question before it is sent to the model.
pub const PERSONA_FRAMING: &str = "Respond like a pirate to the following question: ";

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Reply sent when the provider rejects the credential (bad key, dead account, no quota).
pub const AUTH_FAILURE_REPLY: &str =
    "Garr! Me bank account be empty, matey! (Authentication Error)";

/// Reply sent for any other completion failure (network, provider error, empty response).
pub const GENERAL_FAILURE_REPLY: &str =
    "Shiver me timbers! The magic compass is broken! (OpenAI General Error)";

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11 chars, returns "***" to avoid leaking any part of the key.
/// Counts chars, not bytes, so a token with multi-byte characters never panics.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 11 {
        "***".to_string()
    } else {
        let head: String = token.chars().take(7).collect();
        let tail: String = token.chars().skip(len - 4).collect();
        format!("{}***{}", head, tail)
    }
}

/// Result of one completion call. Exactly one outcome per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The first choice's message content, unmodified.
    Answer(String),
    /// Credential rejected by the provider.
    AuthFailure,
    /// Any other failure.
    Failure,
}

impl CompletionOutcome {
    /// Maps the outcome to the text sent back to the chat: the answer verbatim, or the
    /// fixed placeholder for the failure arm.
    pub fn into_reply(self) -> String {
        match self {
            CompletionOutcome::Answer(text) => text,
            CompletionOutcome::AuthFailure => AUTH_FAILURE_REPLY.to_string(),
            CompletionOutcome::Failure => GENERAL_FAILURE_REPLY.to_string(),
        }
    }
}

/// True when the error means the credential itself was rejected: invalid or deactivated
/// key, or an unbilled account. Everything else is a general failure.
pub fn is_auth_error(error: &OpenAIError) -> bool {
    match error {
        OpenAIError::ApiError(api) => {
            matches!(
                api.code.as_deref(),
                Some("invalid_api_key")
                    | Some("account_deactivated")
                    | Some("insufficient_quota")
            ) || api.r#type.as_deref() == Some("insufficient_quota")
        }
        _ => false,
    }
}

/// Completion client interface: one question in, one outcome out. Object-safe so the
/// question handler can hold `Arc<dyn CompletionClient>` and tests can substitute mocks.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one completion request for `question` and returns its outcome. Never
    /// returns an error and never panics.
    async fn complete(&self, question: &str) -> CompletionOutcome;
}

/// OpenAI-backed [`CompletionClient`]. Stateless per call; safe to share via Arc.
#[derive(Clone)]
pub struct OpenAIGateway {
    /// Shared async-openai client used for all API calls.
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    model: String,
    /// API key stored only for logging (masked).
    api_key_for_logging: String,
}

impl OpenAIGateway {
    /// Builds a gateway using the given API key and the default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            api_key_for_logging,
        }
    }

    /// Builds a gateway with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            api_key_for_logging,
        }
    }

    /// Overrides the model identifier.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// One user-role turn: the fixed persona framing followed by the question verbatim.
    fn build_request(&self, question: &str) -> Result<CreateChatCompletionRequest, OpenAIError> {
        let message: ChatCompletionRequestMessage =
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!("{}{}", PERSONA_FRAMING, question))
                .build()?
                .into();
        CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(vec![message])
            .build()
    }
}

#[async_trait]
impl CompletionClient for OpenAIGateway {
    async fn complete(&self, question: &str) -> CompletionOutcome {
        info!(
            model = %self.model,
            api_key = %mask_token(&self.api_key_for_logging),
            question_len = question.len(),
            "OpenAI completion request"
        );

        let request = match self.build_request(question) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "Failed to build completion request");
                return CompletionOutcome::Failure;
            }
        };

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            debug!(request_json = %json, "OpenAI completion request JSON");
        }

        match self.client.chat().create(request).await {
            Ok(response) => {
                match response
                    .choices
                    .first()
                    .and_then(|choice| choice.message.content.clone())
                {
                    Some(text) => {
                        info!(response_len = text.len(), "OpenAI completion succeeded");
                        CompletionOutcome::Answer(text)
                    }
                    None => {
                        error!("OpenAI completion returned no content");
                        CompletionOutcome::Failure
                    }
                }
            }
            Err(e) if is_auth_error(&e) => {
                error!(
                    error = %e,
                    "OpenAI completion failed: authentication. Check key and billing"
                );
                CompletionOutcome::AuthFailure
            }
            Err(e) => {
                error!(error = %e, "OpenAI completion failed");
                CompletionOutcome::Failure
            }
        }
    }
}
