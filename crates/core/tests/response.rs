//! Tests for the response module

use tern_core::{CompletionResponse, FinishReason, Role};

const OPENAI_RESPONSE_JSON: &str = include_str!("../templates/openai/response.json");

#[test]
fn parse_response() {
    let response: CompletionResponse = serde_json::from_str(OPENAI_RESPONSE_JSON).unwrap();
    assert_eq!(response.model, "gpt-4-0613");
    assert_eq!(response.created, 1703123456);
    assert_eq!(response.usage.total_tokens, 39);

    let choice = response.choices.first().unwrap();
    assert_eq!(choice.message.role, Role::Assistant);
    assert_eq!(choice.finish_reason, Some(FinishReason::Stop));
    assert!(response.content().unwrap().contains("dark mode"));
}

#[test]
fn parse_response_without_optional_meta() {
    let response: CompletionResponse = serde_json::from_str(
        r#"{
            "model": "gpt-4",
            "created": 1234567890,
            "choices": [{"message": {"role": "assistant", "content": "Hi"}}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        }"#,
    )
    .unwrap();

    assert_eq!(response.content(), Some("Hi"));
    assert_eq!(response.choices[0].index, 0);
    assert_eq!(response.choices[0].finish_reason, None);
    assert!(response.id.is_empty());
}

#[test]
fn content_is_none_without_choices() {
    let response: CompletionResponse = serde_json::from_str(
        r#"{
            "model": "gpt-4",
            "choices": [],
            "usage": {"prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0}
        }"#,
    )
    .unwrap();

    assert!(response.message().is_none());
    assert!(response.content().is_none());
}
