//! Subprocess transport for the Kiro Agent SDK
//!
//! Owns the `kiro-cli` child process for the lifetime of one session and
//! exchanges line-delimited JSON over its standard streams.
//!
//! # Architecture
//!
//! - **Options**: [`options`] - Session configuration, read-only after
//!   construction
//! - **Command builder**: [`command`] - Configuration to argument vector,
//!   plus CLI path resolution
//! - **Subprocess transport**: [`subprocess`] - Process lifecycle, message
//!   I/O, and the grace-then-kill shutdown escalation
//!
//! # Lifecycle
//!
//! One transport instance drives exactly one child process:
//! [`SubprocessTransport::start`], then [`SubprocessTransport::send`] and
//! [`SubprocessTransport::receive`], and always
//! [`SubprocessTransport::stop`] on the way out, whatever happened in
//! between. `stop` never fails and is idempotent.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod options;
pub mod subprocess;

// Re-export commonly used types
pub use command::{build_command, resolve_cli_path};
pub use error::{Result, TransportError};
pub use options::KiroAgentOptions;
pub use subprocess::{MessageStream, SubprocessTransport};
