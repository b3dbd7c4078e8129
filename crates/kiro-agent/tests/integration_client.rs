//! Integration tests for the multi-turn client

#![cfg(unix)]

mod common;

use futures::StreamExt;
use tempfile::TempDir;

use common::{fake_cli, responder_body};
use kiro_agent::{KiroAgentOptions, KiroClient};

#[tokio::test]
async fn test_multi_turn_conversation() {
    let dir = TempDir::new().unwrap();
    let cli = fake_cli(&dir, &responder_body());

    let mut client = KiroClient::new(KiroAgentOptions::new().with_cli_path(cli));
    client.start().await.unwrap();
    assert!(client.is_started());

    // One receive stream per session, fed across turns.
    let mut messages = client.receive();

    client.send_prompt("first question").await.unwrap();
    let answer = messages.next().await.unwrap().unwrap();
    assert_eq!(answer.text(), "ack");

    client.send_prompt("second question").await.unwrap();
    let answer = messages.next().await.unwrap().unwrap();
    assert_eq!(answer.text(), "ack");

    client.stop().await;
    assert!(!client.is_started());
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let cli = fake_cli(&dir, &responder_body());

    let mut client = KiroClient::new(KiroAgentOptions::new().with_cli_path(cli));
    client.start().await.unwrap();
    client.start().await.unwrap();
    assert!(client.is_started());

    client.stop().await;
}

#[tokio::test]
async fn test_restart_after_stop_gets_a_fresh_session() {
    let dir = TempDir::new().unwrap();
    let cli = fake_cli(&dir, &responder_body());

    let mut client = KiroClient::new(KiroAgentOptions::new().with_cli_path(cli));

    client.start().await.unwrap();
    client.stop().await;

    client.start().await.unwrap();
    let mut messages = client.receive();
    client.send_prompt("still there?").await.unwrap();
    let answer = messages.next().await.unwrap().unwrap();
    assert_eq!(answer.text(), "ack");

    client.stop().await;
}
