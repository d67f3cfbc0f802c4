//! Multi-turn conversation through the controller.
//!
//! Picks the OpenAI backend when `OPENAI_API_KEY` is set and falls back
//! to the mock otherwise. Run with:
//!
//! ```sh
//! cargo run -p tern-chat --example conversation
//! ```

use backend::Provider;
use std::time::Duration;
use tcore::{Backend, CancelToken};
use tern_chat::{ChatRequest, Controller, ControllerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let _ = dotenvy::dotenv();

    let provider = Provider::from_env()?;
    println!("Backend: {}\n", provider.name());

    let config = ControllerConfig::new(provider.default_model())
        .with_max_tokens(150)
        .with_temperature(0.7);
    let controller = Controller::new(provider, config);

    let conversation = controller.create(Some("You are a helpful assistant."));
    println!("Created {}", conversation.id);

    let cancel = CancelToken::with_timeout(Duration::from_secs(60));
    for text in [
        "Hello! Can you tell me a joke?",
        "Nice. What is a haiku, in one sentence?",
    ] {
        println!("> {text}");
        let response = controller
            .send_message(ChatRequest::new(conversation.id, text), &cancel)
            .await?;
        println!("< {}\n", response.message.content);
    }

    let summary = controller.summary(conversation.id)?;
    println!(
        "Summary: {} messages ({} user, {} assistant), ~{} tokens",
        summary.message_count,
        summary.user_messages,
        summary.assistant_messages,
        summary.estimated_tokens
    );

    let stats = controller.stats();
    println!(
        "Stats: {} conversation(s) created, {} messages held, backend {}",
        stats.total_conversations, stats.total_messages, stats.backend_name
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
