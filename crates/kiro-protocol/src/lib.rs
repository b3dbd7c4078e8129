//! Wire protocol for the Kiro Agent SDK
//!
//! This crate defines the data model and line-level codec for the protocol
//! spoken between the SDK and the `kiro-cli` child process. It is consumed by
//! `kiro-transport` (which owns the subprocess) and re-exported by
//! `kiro-agent`.
//!
//! # Type Organization
//!
//! - **Content types**: [`content`] - Text, tool use, tool results
//! - **Message types**: [`message`] - The three message roles
//! - **Line codec**: [`codec`] - One JSON record per newline-terminated line
//! - **Parser**: [`parser`] - Decoded records into typed messages
//! - **Error types**: [`error`] - Decode and parse failures
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Closed sum types**: Every role and block type is an enum variant,
//!   matched exhaustively; unknown discriminants fail loudly instead of
//!   being silently dropped
//! - **Serialization**: serde-based, internally tagged on `role` / `type`

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod content;
pub mod error;
pub mod message;
pub mod parser;

// Re-export commonly used types at crate level
pub use codec::{decode_line, encode_line};
pub use content::{ContentBlock, TextBlock};
pub use error::{ProtocolError, Result};
pub use message::Message;
pub use parser::parse_message;
