//! Transport error types

use std::path::PathBuf;

use kiro_protocol::ProtocolError;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
///
/// None of these are retried internally: each request mutates conversational
/// state in the child, so a retry would need protocol-level idempotence this
/// transport does not have. The caller decides whether to start a new
/// session.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The resolved CLI executable does not exist or is not launchable
    #[error(
        "kiro-cli not found at {path:?}; install kiro-cli or point \
         KiroAgentOptions::cli_path at the executable"
    )]
    CliNotFound {
        /// The path that was attempted, after resolution.
        path: PathBuf,
    },

    /// `start` was called twice on the same instance
    #[error("transport already started; one instance drives one session")]
    AlreadyStarted,

    /// `send` or `receive` was invoked outside the Running state
    #[error("transport not started; call start() before send() or receive()")]
    NotStarted,

    /// A read or write on the child's pipes failed at the OS level
    ///
    /// The child is presumed dead; start a new session rather than retrying.
    #[error("failed to communicate with the CLI process: {0}")]
    ProcessIo(#[from] std::io::Error),

    /// The child exited during an active exchange
    #[error("CLI process exited unexpectedly (code: {code:?}){}", format_stderr(.stderr))]
    ProcessExit {
        /// Exit code, when the OS reported one (absent for signal deaths).
        code: Option<i32>,
        /// Tail of the child's diagnostic output, for context.
        stderr: String,
    },

    /// A received line failed to decode or parse
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("; stderr:\n{stderr}")
    }
}
