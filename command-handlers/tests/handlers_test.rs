//! Unit tests for [`HelloHandler`] and [`QuestionHandler`].
//!
//! Covers: token matching, first-occurrence parsing, empty-body rejection, gateway
//! invocation, and placeholder replies on gateway failure. Uses a recording
//! CompletionClient; does not call OpenAI.

use async_trait::async_trait;
use bot_core::{Chat, Handler, HandlerResponse, Message, User};
use chrono::Utc;
use command_handlers::{
    HelloHandler, QuestionHandler, EMPTY_QUESTION_REPLY, HELLO_REPLY,
};
use openai_gateway::{
    CompletionClient, CompletionOutcome, AUTH_FAILURE_REPLY, GENERAL_FAILURE_REPLY,
};
use std::sync::{Arc, Mutex};

/// Mock gateway: records every received question and returns a preset outcome.
struct RecordingGateway {
    outcome: CompletionOutcome,
    questions: Arc<Mutex<Vec<String>>>,
}

impl RecordingGateway {
    fn new(outcome: CompletionOutcome) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
        let questions = Arc::new(Mutex::new(Vec::new()));
        let gateway = Arc::new(Self {
            outcome,
            questions: questions.clone(),
        });
        (gateway, questions)
    }
}

#[async_trait]
impl CompletionClient for RecordingGateway {
    async fn complete(&self, question: &str) -> CompletionOutcome {
        self.questions.lock().unwrap().push(question.to_string());
        self.outcome.clone()
    }
}

fn make_message(content: &str) -> Message {
    Message {
        id: "msg_1".to_string(),
        user: User {
            id: 123,
            username: Some("user".to_string()),
            first_name: Some("User".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

// --- HelloHandler ---

/// **Test: $hello replies with the fixed greeting, regardless of trailing text.**
#[tokio::test]
async fn test_hello_replies_greeting() {
    let handler = HelloHandler;
    let response = handler.handle(&make_message("$hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(HELLO_REPLY.to_string()));

    let response = handler.handle(&make_message("$hello there")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(HELLO_REPLY.to_string()));
}

/// **Test: non-$hello content continues to the next handler.**
#[tokio::test]
async fn test_hello_continues_on_other_content() {
    let handler = HelloHandler;
    let response = handler.handle(&make_message("hello there")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
    // Case-sensitive: $Hello is not the command.
    let response = handler.handle(&make_message("$Hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
}

// --- QuestionHandler ---

/// **Test: $question forwards exactly the trimmed body to the gateway and replies with
/// the gateway's answer verbatim.**
#[tokio::test]
async fn test_question_forwards_body_and_replies_with_answer() {
    let (gateway, questions) =
        RecordingGateway::new(CompletionOutcome::Answer("Arr, 'tis wet.".to_string()));
    let handler = QuestionHandler::new(gateway);

    let response = handler
        .handle(&make_message("$question What is the sea?"))
        .await
        .unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply("Arr, 'tis wet.".to_string())
    );
    assert_eq!(
        questions.lock().unwrap().as_slice(),
        &["What is the sea?".to_string()]
    );
}

/// **Test: only the first $question token is the delimiter; nested tokens stay in the
/// body verbatim.**
#[tokio::test]
async fn test_question_nested_token_preserved() {
    let (gateway, questions) =
        RecordingGateway::new(CompletionOutcome::Answer("aye".to_string()));
    let handler = QuestionHandler::new(gateway);

    handler
        .handle(&make_message("$question $question nested"))
        .await
        .unwrap();

    assert_eq!(
        questions.lock().unwrap().as_slice(),
        &["$question nested".to_string()]
    );
}

/// **Test: $question with only whitespace after the token replies with the rejection
/// string; gateway is not invoked.**
#[tokio::test]
async fn test_question_empty_body_rejected() {
    let (gateway, questions) =
        RecordingGateway::new(CompletionOutcome::Answer("unused".to_string()));
    let handler = QuestionHandler::new(gateway);

    for content in ["$question", "$question   "] {
        let response = handler.handle(&make_message(content)).await.unwrap();
        assert_eq!(
            response,
            HandlerResponse::Reply(EMPTY_QUESTION_REPLY.to_string())
        );
    }
    assert!(questions.lock().unwrap().is_empty());
}

/// **Test: auth-classified gateway failure yields the authentication placeholder.**
#[tokio::test]
async fn test_question_auth_failure_placeholder() {
    let (gateway, _) = RecordingGateway::new(CompletionOutcome::AuthFailure);
    let handler = QuestionHandler::new(gateway);

    let response = handler
        .handle(&make_message("$question anything"))
        .await
        .unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply(AUTH_FAILURE_REPLY.to_string())
    );
}

/// **Test: any other gateway failure yields the general placeholder.**
#[tokio::test]
async fn test_question_general_failure_placeholder() {
    let (gateway, _) = RecordingGateway::new(CompletionOutcome::Failure);
    let handler = QuestionHandler::new(gateway);

    let response = handler
        .handle(&make_message("$question anything"))
        .await
        .unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply(GENERAL_FAILURE_REPLY.to_string())
    );
}

/// **Test: non-$question content continues to the next handler; gateway untouched.**
#[tokio::test]
async fn test_question_continues_on_other_content() {
    let (gateway, questions) =
        RecordingGateway::new(CompletionOutcome::Answer("unused".to_string()));
    let handler = QuestionHandler::new(gateway);

    let response = handler.handle(&make_message("hello there")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
    assert!(questions.lock().unwrap().is_empty());
}

/// **Test: two identical messages produce two independent gateway calls (no carried
/// state between invocations).**
#[tokio::test]
async fn test_question_stateless_across_calls() {
    let (gateway, questions) =
        RecordingGateway::new(CompletionOutcome::Answer("aye".to_string()));
    let handler = QuestionHandler::new(gateway);

    let first = handler
        .handle(&make_message("$question same thing"))
        .await
        .unwrap();
    let second = handler
        .handle(&make_message("$question same thing"))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(questions.lock().unwrap().len(), 2);
}
