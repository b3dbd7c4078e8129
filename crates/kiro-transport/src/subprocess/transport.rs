//! The subprocess transport state machine
//!
//! One transport instance owns one child process for one session. The
//! lifecycle is an explicit state machine rather than a nullable process
//! field, so "used before start" and "used after stop" are distinct,
//! statically reachable states.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdout};
use tokio::sync::Mutex;

use kiro_protocol::{Message, decode_line, encode_line, parse_message};

use crate::command::build_command;
use crate::error::{Result, TransportError};
use crate::options::KiroAgentOptions;
use crate::subprocess::process::{self, ChildProcess, StderrTail};

/// Default bound on how long `stop` waits for a cooperative exit
const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// How long the receive stream waits at end-of-output for the exit status
const EXIT_STATUS_WAIT: Duration = Duration::from_millis(200);

/// Lifecycle states of the transport
///
/// `Starting` and `Stopping` exist only within `start`/`stop`; `Faulted`
/// keeps the child handle so cleanup still happens, while the triggering
/// error has already been handed to the caller.
enum State {
    Idle,
    Starting,
    Running(ChildProcess),
    Stopping,
    Stopped,
    Faulted { child: Arc<Mutex<Child>> },
}

/// Transport that drives `kiro-cli` as a child process
///
/// Owns the process handle and its three standard streams for the lifetime
/// of one session. Not restartable: one instance, one child.
///
/// # Example
///
/// ```ignore
/// let mut transport = SubprocessTransport::new();
/// transport.start(&options).await?;
/// transport.send(&serde_json::json!({"role": "user", "content": "Hi"})).await?;
/// let mut messages = transport.receive();
/// while let Some(message) = messages.next().await {
///     println!("{:?}", message?);
/// }
/// transport.stop().await;
/// ```
pub struct SubprocessTransport {
    state: State,
    grace_period: Duration,
}

impl SubprocessTransport {
    /// Create a transport in the idle state
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Override how long `stop` waits for a cooperative exit before killing
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace_period = grace;
        self
    }

    /// Whether the transport currently holds a live session
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Spawn the CLI process and transition to Running
    ///
    /// Builds the argument vector from the options and spawns the child in
    /// the configured working directory (the caller's current directory when
    /// unset). Fails with [`TransportError::CliNotFound`] when the resolved
    /// executable cannot be located, and [`TransportError::AlreadyStarted`]
    /// when called twice on the same instance.
    pub async fn start(&mut self, options: &KiroAgentOptions) -> Result<()> {
        if !matches!(self.state, State::Idle) {
            return Err(TransportError::AlreadyStarted);
        }
        self.state = State::Starting;

        let argv = build_command(options);
        tracing::debug!(cli = %argv[0], args = ?&argv[1..], "spawning kiro-cli");

        match ChildProcess::spawn(&argv, options.cwd.as_deref()) {
            Ok(child) => {
                self.state = State::Running(child);
                Ok(())
            }
            Err(err) => {
                // Nothing was created; the instance is reusable for a
                // corrected configuration.
                self.state = State::Idle;
                Err(err)
            }
        }
    }

    /// Encode a record and write it to the child's stdin
    ///
    /// The write is flushed before returning, so the record is never left
    /// buffered. An OS-level write failure faults the transport; the child
    /// is presumed dead.
    pub async fn send(&mut self, record: &Value) -> Result<()> {
        let write_result = {
            let State::Running(session) = &mut self.state else {
                return Err(TransportError::NotStarted);
            };
            let line = encode_line(record)?;

            async {
                session.stdin.write_all(line.as_bytes()).await?;
                session.stdin.flush().await?;
                Ok::<_, std::io::Error>(())
            }
            .await
        };

        match write_result {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, "write to kiro-cli failed; transport faulted");
                self.fault();
                Err(TransportError::ProcessIo(err))
            }
        }
    }

    /// The lazy sequence of messages emitted by the child
    ///
    /// Single-pass and non-restartable: the stdout reader is consumed by the
    /// first call, and a second call yields a [`TransportError::NotStarted`]
    /// element. The sequence ends when the child closes its output; a child
    /// that died with a non-zero status surfaces as
    /// [`TransportError::ProcessExit`] instead of a silent end. Decode and
    /// parse failures are yielded at the failing element and fuse the
    /// stream, since framing past a bad line is unreliable.
    ///
    /// The returned stream does not borrow the transport, so `stop` may be
    /// called mid-iteration; killing the child closes the pipe and unblocks
    /// an in-flight read.
    pub fn receive(&mut self) -> MessageStream {
        let State::Running(session) = &mut self.state else {
            return MessageStream::not_started();
        };
        match session.stdout.take() {
            Some(reader) => MessageStream::live(
                reader,
                Arc::clone(&session.child),
                session.stderr_tail.clone(),
            ),
            None => MessageStream::not_started(),
        }
    }

    /// Shut the child down and transition to Stopped
    ///
    /// Idempotent and infallible: safe from any state, including before
    /// `start` and repeatedly. Closes the child's stdin, sends a graceful
    /// termination signal, waits up to the grace period, then kills. The
    /// process is reaped by the time this returns.
    pub async fn stop(&mut self) {
        let prior = std::mem::replace(&mut self.state, State::Stopping);

        let child = match prior {
            State::Running(session) => {
                // Close our end of the child's input first; a well-behaved
                // child exits on end-of-input before any signal lands.
                drop(session.stdin);
                Some(session.child)
            }
            State::Faulted { child } => Some(child),
            State::Idle | State::Starting | State::Stopping | State::Stopped => None,
        };

        if let Some(child) = child {
            tracing::debug!("stopping kiro-cli");
            process::graceful_terminate(&child, self.grace_period).await;
        }

        self.state = State::Stopped;
    }

    /// Running -> Faulted, keeping the child handle for cleanup
    fn fault(&mut self) {
        match std::mem::replace(&mut self.state, State::Stopping) {
            State::Running(session) => {
                self.state = State::Faulted {
                    child: Arc::clone(&session.child),
                };
            }
            other => self.state = other,
        }
    }
}

impl Default for SubprocessTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy, single-pass sequence of messages from the child
///
/// Yields one parsed [`Message`] per non-blank line of the child's output,
/// in emission order. Ends at end-of-output; faults fuse the stream after
/// being yielded. Messages yielded before a fault remain valid.
pub struct MessageStream {
    inner: BoxStream<'static, Result<Message>>,
}

enum ReadState {
    Open {
        reader: BufReader<ChildStdout>,
        child: Arc<Mutex<Child>>,
        stderr_tail: StderrTail,
    },
    Done,
}

impl MessageStream {
    fn not_started() -> Self {
        Self {
            inner: stream::once(async { Err::<Message, _>(TransportError::NotStarted) }).boxed(),
        }
    }

    fn live(
        reader: BufReader<ChildStdout>,
        child: Arc<Mutex<Child>>,
        stderr_tail: StderrTail,
    ) -> Self {
        let inner = stream::unfold(
            ReadState::Open {
                reader,
                child,
                stderr_tail,
            },
            |state| async move {
                let ReadState::Open {
                    mut reader,
                    child,
                    stderr_tail,
                } = state
                else {
                    return None;
                };

                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line).await {
                        Ok(0) => return end_of_output(&child, &stderr_tail).await,
                        Ok(_) => match decode_line(&line) {
                            // Blank separator line between records.
                            Ok(None) => continue,
                            Ok(Some(record)) => match parse_message(&record) {
                                Ok(message) => {
                                    return Some((
                                        Ok(message),
                                        ReadState::Open {
                                            reader,
                                            child,
                                            stderr_tail,
                                        },
                                    ));
                                }
                                Err(err) => return Some((Err(err.into()), ReadState::Done)),
                            },
                            Err(err) => return Some((Err(err.into()), ReadState::Done)),
                        },
                        Err(err) => {
                            return Some((Err(TransportError::ProcessIo(err)), ReadState::Done));
                        }
                    }
                }
            },
        )
        .boxed();

        Self { inner }
    }
}

/// Handle end-of-output: a clean end, or the child died mid-exchange
async fn end_of_output(
    child: &Arc<Mutex<Child>>,
    stderr_tail: &StderrTail,
) -> Option<(Result<Message>, ReadState)> {
    let status = {
        let mut child = child.lock().await;
        match tokio::time::timeout(EXIT_STATUS_WAIT, child.wait()).await {
            Ok(Ok(status)) => Some(status),
            // Still running (closed its output early) or unreapable; either
            // way there is no exit status to report.
            Ok(Err(_)) | Err(_) => None,
        }
    };

    match status {
        Some(status) if !status.success() => {
            let stderr = stderr_tail.wait_and_snapshot().await;
            tracing::warn!(code = ?status.code(), "kiro-cli exited mid-exchange");
            Some((
                Err(TransportError::ProcessExit {
                    code: status.code(),
                    stderr,
                }),
                ReadState::Done,
            ))
        }
        _ => None,
    }
}

impl Stream for MessageStream {
    type Item = Result<Message>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
