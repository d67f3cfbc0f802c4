//! Offline controller walkthrough against the mock backend.
//!
//! No network, no credentials. Run with:
//!
//! ```sh
//! cargo run -p tern-chat --example mock_testing
//! ```

use backend::Mock;
use tcore::{Backend, CancelToken, Message, SendRequest};
use tern_chat::{ChatRequest, Controller, ControllerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mock = Mock::named("CustomMock");
    let controller = Controller::new(mock.clone(), ControllerConfig::new(mock.default_model()));

    let conversation = controller.create(Some("You are a helpful assistant."));
    let cancel = CancelToken::new();
    for text in ["Hello!", "Tell me a joke.", "What else can you do?"] {
        println!("> {text}");
        let response = controller
            .send_message(ChatRequest::new(conversation.id, text), &cancel)
            .await?;
        println!("< {}\n", response.message.content);
    }

    // Same input twice, same reply twice.
    let request = SendRequest::new(vec![Message::user("Hello")]);
    let first = mock.send_message(request.clone(), &cancel).await?;
    let second = mock.send_message(request, &cancel).await?;
    println!("Deterministic replies: {}", first.content == second.content);

    let summary = controller.summary(conversation.id)?;
    println!(
        "Summary: {} messages ({} user, {} assistant), ~{} tokens",
        summary.message_count,
        summary.user_messages,
        summary.assistant_messages,
        summary.estimated_tokens
    );

    let stats = controller.stats();
    println!("Backend: {}", stats.backend_name);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
