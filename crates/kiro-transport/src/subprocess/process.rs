//! Child process spawning and teardown

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex, watch};

use crate::error::{Result, TransportError};

const STDERR_TAIL_LINES: usize = 64;

/// Bound on waiting for the stderr collector to settle at error time
const STDERR_SETTLE: Duration = Duration::from_millis(100);

/// A spawned CLI process and its stream handles
///
/// The child handle is shared (receive stream and stop both need it); the
/// stdin writer belongs to `send` and the stdout reader is taken exactly
/// once by `receive`.
pub(crate) struct ChildProcess {
    pub(crate) child: Arc<Mutex<Child>>,
    pub(crate) stdin: BufWriter<ChildStdin>,
    pub(crate) stdout: Option<BufReader<ChildStdout>>,
    pub(crate) stderr_tail: StderrTail,
}

impl ChildProcess {
    /// Spawn the CLI with three piped standard streams
    ///
    /// The first element of `argv` is the program; a NotFound spawn failure
    /// maps to [`TransportError::CliNotFound`] naming that path. The child
    /// is killed on drop as a backstop, so an abandoned session cannot leak
    /// the process.
    pub(crate) fn spawn(argv: &[String], cwd: Option<&Path>) -> Result<Self> {
        let Some((program, args)) = argv.split_first() else {
            return Err(io_other("empty argument vector"));
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                TransportError::CliNotFound {
                    path: PathBuf::from(program),
                }
            } else {
                TransportError::ProcessIo(err)
            }
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io_other("child stdin was not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io_other("child stdout was not piped"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io_other("child stderr was not piped"))?;

        Ok(Self {
            child: Arc::new(Mutex::new(child)),
            stdin: BufWriter::new(stdin),
            stdout: Some(BufReader::new(stdout)),
            stderr_tail: StderrTail::collect(stderr),
        })
    }
}

fn io_other(message: &str) -> TransportError {
    TransportError::ProcessIo(std::io::Error::other(message.to_string()))
}

/// Bounded tail of the child's diagnostic output
///
/// Stderr is never parsed as protocol; the most recent lines are retained
/// only for inclusion in failure diagnostics.
#[derive(Clone)]
pub(crate) struct StderrTail {
    lines: Arc<StdMutex<VecDeque<String>>>,
    finished: watch::Receiver<bool>,
}

impl StderrTail {
    /// Spawn a background task draining the child's stderr into the tail
    fn collect(stderr: tokio::process::ChildStderr) -> Self {
        let lines: Arc<StdMutex<VecDeque<String>>> = Arc::new(StdMutex::new(VecDeque::new()));
        let (done_tx, finished) = watch::channel(false);
        let sink = Arc::clone(&lines);

        tokio::spawn(async move {
            let mut reader = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                tracing::trace!(line = %line, "kiro-cli stderr");
                let mut tail = sink.lock().expect("stderr tail lock");
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
            let _ = done_tx.send(true);
        });

        Self { lines, finished }
    }

    /// Snapshot the tail for an error report
    ///
    /// Waits briefly for the collector to drain the closed pipe, so output
    /// the child wrote just before dying is not lost to a race.
    pub(crate) async fn wait_and_snapshot(&self) -> String {
        let mut finished = self.finished.clone();
        if !*finished.borrow() {
            let _ = tokio::time::timeout(STDERR_SETTLE, finished.changed()).await;
        }

        let tail = self.lines.lock().expect("stderr tail lock");
        tail.iter().cloned().collect::<Vec<_>>().join("\n")
    }
}

/// Terminate the child: graceful signal, bounded wait, forced kill
///
/// Best-effort by design; failures here are swallowed because the caller has
/// already decided to abandon the process. The child is reaped before this
/// returns.
pub(crate) async fn graceful_terminate(child: &Arc<Mutex<Child>>, grace: Duration) {
    #[cfg(not(unix))]
    let _ = grace;

    let mut child = child.lock().await;

    if matches!(child.try_wait(), Ok(Some(_))) {
        return;
    }

    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            let pid = Pid::from_raw(i32::try_from(pid).unwrap_or(i32::MAX));
            let _ = kill(pid, Signal::SIGTERM);

            match tokio::time::timeout(grace, child.wait()).await {
                Ok(_) => return,
                Err(_) => {
                    tracing::warn!(
                        grace_ms = grace.as_millis() as u64,
                        "CLI ignored termination request; killing"
                    );
                }
            }
        }
    }

    if child.kill().await.is_err() {
        // Lost the race with the child exiting on its own.
        let _ = child.try_wait();
    }
}
