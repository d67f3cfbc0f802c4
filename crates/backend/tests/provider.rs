//! Dispatch through the provider enum

use tcore::{Backend, CancelToken, CompletionRequest, Message};
use tern_backend::{Mock, Provider};

#[tokio::test]
async fn dispatches_to_mock_variant() {
    let provider = Provider::Mock(Mock::named("offline"));
    assert_eq!(provider.name(), "offline");
    assert_eq!(provider.default_model(), "mock-model-v1");

    let request =
        CompletionRequest::new("mock-model-v1").with_messages(vec![Message::user("Hello")]);
    let response = provider
        .chat_completion(&request, &CancelToken::new())
        .await
        .unwrap();

    assert!(response.content().is_some());
    assert!(provider.is_available(&CancelToken::new()).await);
}
