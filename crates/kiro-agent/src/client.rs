//! Multi-turn client
//!
//! Explicit-lifecycle wrapper around the transport for callers that want to
//! hold a conversation open across turns instead of the one-shot
//! [`query`](crate::query::query). `start` and `stop` are idempotent; a
//! stopped client can be started again and gets a fresh child process.

use serde_json::{Value, json};

use kiro_transport::{KiroAgentOptions, MessageStream, Result, SubprocessTransport};

/// Client for multi-turn conversations with the Kiro agent
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use kiro_agent::{KiroAgentOptions, KiroClient};
///
/// let mut client = KiroClient::new(KiroAgentOptions::new());
/// client.start().await?;
/// client.send_prompt("Summarize this repo").await?;
/// let mut messages = client.receive();
/// while let Some(message) = messages.next().await {
///     println!("{}", message?.text());
/// }
/// client.stop().await;
/// ```
pub struct KiroClient {
    options: KiroAgentOptions,
    transport: SubprocessTransport,
    started: bool,
}

impl KiroClient {
    /// Create a client; no process is spawned until [`start`](Self::start)
    pub fn new(options: KiroAgentOptions) -> Self {
        Self {
            options,
            transport: SubprocessTransport::new(),
            started: false,
        }
    }

    /// Spawn the child process. No-op if already started.
    ///
    /// Each start gets a fresh transport: process handles are never reused
    /// across sessions.
    pub async fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }

        let mut transport = SubprocessTransport::new();
        transport.start(&self.options).await?;
        self.transport = transport;
        self.started = true;
        Ok(())
    }

    /// Whether the client currently holds a live session
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Send a raw outbound record
    pub async fn send(&mut self, record: &Value) -> Result<()> {
        self.transport.send(record).await
    }

    /// Send a prompt as a user message
    pub async fn send_prompt(&mut self, prompt: impl Into<String>) -> Result<()> {
        self.send(&json!({"role": "user", "content": prompt.into()}))
            .await
    }

    /// The lazy stream of messages from the child
    ///
    /// Single-pass per session; see
    /// [`SubprocessTransport::receive`](kiro_transport::SubprocessTransport::receive).
    pub fn receive(&mut self) -> MessageStream {
        self.transport.receive()
    }

    /// Terminate the session. No-op if not started; never fails.
    pub async fn stop(&mut self) {
        if !self.started {
            return;
        }

        self.transport.stop().await;
        self.started = false;
    }
}
