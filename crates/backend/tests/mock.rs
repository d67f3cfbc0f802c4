//! Behavior of the deterministic mock backend

use tcore::{Backend, BackendOptions, CancelToken, CompletionRequest, Error, Message, SendRequest};
use tern_backend::Mock;

fn request_with(content: &str) -> CompletionRequest {
    CompletionRequest::new("mock-model-v1").with_messages(vec![Message::user(content)])
}

#[tokio::test]
async fn identical_input_yields_identical_reply() {
    let mock = Mock::new();
    let cancel = CancelToken::new();

    let first = mock
        .chat_completion(&request_with("Hello"), &cancel)
        .await
        .unwrap();
    let second = mock
        .chat_completion(&request_with("Hello"), &cancel)
        .await
        .unwrap();

    let reply = first.content().unwrap();
    assert!(!reply.is_empty());
    assert_eq!(reply, second.content().unwrap());
    assert_eq!(first.usage, second.usage);
}

#[tokio::test]
async fn joke_prompts_get_joke_replies() {
    let mock = Mock::new();
    let response = mock
        .chat_completion(
            &request_with("Hello! Can you tell me a joke?"),
            &CancelToken::new(),
        )
        .await
        .unwrap();

    assert!(response.content().unwrap().contains("dark mode"));
}

#[tokio::test]
async fn echoes_request_model_and_counts() {
    let mock = Mock::new();
    let request = CompletionRequest::new("test-model").with_messages(vec![
        Message::system("You are a helpful assistant."),
        Message::user("What is the answer?"),
    ]);
    let response = mock
        .chat_completion(&request, &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(response.model, "test-model");
    let reply = response.content().unwrap();
    assert!(reply.contains("test-model"));
    assert!(reply.contains("2 message(s)"));
    assert_eq!(
        response.usage.total_tokens,
        response.usage.prompt_tokens + response.usage.completion_tokens
    );
}

#[tokio::test]
async fn validates_before_generating() {
    let mock = Mock::new();
    let err = mock
        .chat_completion(&CompletionRequest::new("mock-model-v1"), &CancelToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = mock
        .chat_completion(
            &CompletionRequest::new("").with_messages(vec![Message::user("Hello")]),
            &CancelToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn cancelled_token_aborts() {
    let mock = Mock::new();
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = mock
        .chat_completion(&request_with("Hello"), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn always_available() {
    assert!(Mock::new().is_available(&CancelToken::new()).await);
}

#[tokio::test]
async fn configure_updates_default_model() {
    let mut mock = Mock::named("CustomMock");
    mock.configure(&BackendOptions::new().with_model("mock-model-v2"))
        .unwrap();

    assert_eq!(mock.name(), "CustomMock");
    assert_eq!(mock.default_model(), "mock-model-v2");

    let reply = mock
        .send_message(
            SendRequest::new(vec![Message::user("ping")]),
            &CancelToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(reply.model, "mock-model-v2");
}
