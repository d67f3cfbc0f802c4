//! Basic example, direct backend use without the controller.
//!
//! Probes availability, sends a flat request, then a full completion,
//! and lists a few models from the catalogue.
//!
//! Requires OPENAI_API_KEY. Run with:
//! ```sh
//! cargo run -p tern-backend --example basic
//! ```

use std::time::Duration;
use tcore::{Backend, CancelToken, CompletionRequest, Message, SendRequest};
use tern_backend::{OpenAi, OpenAiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let _ = dotenvy::dotenv();
    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");
    let backend = OpenAi::new(OpenAiConfig::new(api_key))?;

    let cancel = CancelToken::with_timeout(Duration::from_secs(60));
    if !backend.is_available(&cancel).await {
        anyhow::bail!("backend is not available");
    }

    // Flat single-shot send using the default model.
    let reply = backend
        .send_message(
            SendRequest::new(vec![
                Message::system("You are a helpful assistant."),
                Message::user("Hello! Can you tell me a joke?"),
            ]),
            &cancel,
        )
        .await?;
    println!("Reply: {}", reply.content);
    println!("Tokens used: {} (model {})", reply.tokens_used, reply.model);

    // Full completion with explicit sampling parameters.
    let request = CompletionRequest::new("gpt-3.5-turbo")
        .with_messages(vec![Message::user("Write a haiku about the sea.")])
        .with_max_tokens(60)
        .with_temperature(0.7);
    let response = backend.chat_completion(&request, &cancel).await?;
    for choice in &response.choices {
        println!("Choice {}: {}", choice.index, choice.message.content);
    }
    println!(
        "Usage: prompt={} completion={} total={}",
        response.usage.prompt_tokens, response.usage.completion_tokens, response.usage.total_tokens
    );

    let models = backend.models(&cancel).await?;
    println!("{} models available, e.g.:", models.len());
    for model in models.iter().take(5) {
        println!("  {} (owned by {})", model.id, model.owned_by);
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
