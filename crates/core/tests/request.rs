//! Tests for the request module

use tern_core::{CompletionRequest, Error, Message, SendRequest};

#[test]
fn optional_fields_serialize_only_when_set() {
    let request = CompletionRequest::new("gpt-4").with_messages(vec![Message::user("Hello")]);
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("max_tokens").is_none());
    assert!(json.get("temperature").is_none());
    assert!(json.get("top_p").is_none());
    assert_eq!(json["stream"], false);
}

#[test]
fn zero_temperature_is_distinguishable_from_unset() {
    let request = CompletionRequest::new("gpt-4")
        .with_messages(vec![Message::user("Hello")])
        .with_temperature(0.0);
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["temperature"], 0.0);
}

#[test]
fn messages_serialize_with_lowercase_roles() {
    let request = CompletionRequest::new("gpt-4").with_messages(vec![
        Message::system("You are a helpful assistant."),
        Message::user("Hello"),
    ]);
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["role"], "user");
    assert_eq!(json["messages"][1]["content"], "Hello");
}

#[test]
fn validate_rejects_empty_model() {
    let request = CompletionRequest::new("").with_messages(vec![Message::user("Hello")]);
    assert!(matches!(request.validate(), Err(Error::Validation(_))));
}

#[test]
fn validate_rejects_empty_messages() {
    let request = CompletionRequest::new("gpt-4");
    assert!(matches!(request.validate(), Err(Error::Validation(_))));
}

#[test]
fn validate_accepts_complete_request() {
    let request = CompletionRequest::new("gpt-4").with_messages(vec![Message::user("Hello")]);
    assert!(request.validate().is_ok());
}

#[test]
fn send_request_model_defaults_to_none() {
    let request = SendRequest::new(vec![Message::user("Hello")]);
    assert!(request.model.is_none());

    let request = request.with_model("gpt-3.5-turbo");
    assert_eq!(request.model.as_deref(), Some("gpt-3.5-turbo"));
}
