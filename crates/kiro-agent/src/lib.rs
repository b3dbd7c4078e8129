//! Agent SDK for kiro-cli
//!
//! Drives the `kiro-cli` interactive agent as a child process and exposes
//! the exchange as a typed, asynchronous stream of messages.
//!
//! # Architecture
//!
//! The SDK is built on three layers:
//!
//! 1. **Protocol layer** (`kiro-protocol`): message model, line codec, parser
//! 2. **Transport layer** (`kiro-transport`): subprocess lifecycle and I/O
//! 3. **Agent layer** (this crate): the `query` one-shot and `KiroClient`
//!
//! # Usage Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use kiro_agent::{KiroAgentOptions, Message, query};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut messages = query("What is 2 + 2?", KiroAgentOptions::new()).await?;
//!     while let Some(message) = messages.next().await {
//!         if let Message::Assistant { .. } = message? {
//!             println!("got an answer");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The transport is shut down on every exit path: when the child closes its
//! output, when a fault surfaces mid-stream, and (via the kill-on-drop
//! backstop) when the caller abandons the stream early.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod query;

// Re-export commonly used types
pub use client::KiroClient;
pub use query::{QueryStream, query};

pub use kiro_protocol::{ContentBlock, Message, ProtocolError, TextBlock};
pub use kiro_transport::{
    KiroAgentOptions, MessageStream, Result, SubprocessTransport, TransportError,
};
