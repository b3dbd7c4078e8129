//! Quick start: one-shot queries against kiro-cli
//!
//! Run with `cargo run --example quick_start`. Requires kiro-cli on PATH or
//! `KiroAgentOptions::with_cli_path`.

use anyhow::Result;
use futures::StreamExt;
use kiro_agent::{KiroAgentOptions, Message, query};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Simple Query ===");
    let mut messages = query("What is 2 + 2?", KiroAgentOptions::new()).await?;
    while let Some(message) = messages.next().await {
        let message = message?;
        if matches!(message, Message::Assistant { .. }) {
            println!("{}", message.text());
        }
    }

    println!("\n=== Query with Options ===");
    let options = KiroAgentOptions::new()
        .with_system_prompt("You are a helpful math tutor")
        .with_max_turns(1);

    let mut messages = query("Explain prime numbers", options).await?;
    while let Some(message) = messages.next().await {
        let message = message?;
        if matches!(message, Message::Assistant { .. }) {
            println!("{}", message.text());
        }
    }

    Ok(())
}
