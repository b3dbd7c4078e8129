//! Subprocess management for the CLI child process
//!
//! Spawns `kiro-cli` with piped standard streams and exchanges line-delimited
//! JSON over stdin/stdout. Stderr is never parsed as protocol; it is
//! collected only to enrich failure diagnostics.

mod process;
mod transport;

pub use transport::{MessageStream, SubprocessTransport};
