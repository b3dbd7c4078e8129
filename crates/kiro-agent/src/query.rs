//! One-shot query orchestration
//!
//! Composes the transport into the contractual sequence: start, send one
//! user message, stream every response, stop on the way out. The transport
//! is stopped exactly once however the exchange ends; a stream the caller
//! abandons early is reaped by the transport's kill-on-drop backstop.

use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::json;

use kiro_protocol::Message;
use kiro_transport::{KiroAgentOptions, MessageStream, Result, SubprocessTransport};

/// Execute a one-shot query against the Kiro agent
///
/// Spawns `kiro-cli`, sends the prompt as a user message, and returns the
/// lazy stream of responses. The stream ends when the child closes its
/// output; any transport or protocol fault is yielded at that point in the
/// stream and terminates it.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use kiro_agent::{KiroAgentOptions, query};
///
/// let mut messages = query("What is 2 + 2?", KiroAgentOptions::new()).await?;
/// while let Some(message) = messages.next().await {
///     println!("{}", message?.text());
/// }
/// ```
pub async fn query(
    prompt: impl Into<String>,
    options: KiroAgentOptions,
) -> Result<QueryStream> {
    let mut transport = SubprocessTransport::new();
    transport.start(&options).await?;
    tracing::debug!("one-shot query session started");

    let request = json!({"role": "user", "content": prompt.into()});
    if let Err(err) = transport.send(&request).await {
        // The child was already spawned; release it before surfacing.
        transport.stop().await;
        return Err(err);
    }

    let messages = transport.receive();
    Ok(QueryStream::drain(messages, transport))
}

/// Stream of responses to a [`query`], with transport shutdown built in
pub struct QueryStream {
    inner: BoxStream<'static, Result<Message>>,
}

impl std::fmt::Debug for QueryStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStream").finish_non_exhaustive()
    }
}

enum DrainState {
    Streaming {
        messages: MessageStream,
        transport: SubprocessTransport,
    },
    Finished,
}

impl QueryStream {
    fn drain(messages: MessageStream, transport: SubprocessTransport) -> Self {
        let inner = stream::unfold(
            DrainState::Streaming {
                messages,
                transport,
            },
            |state| async move {
                let DrainState::Streaming {
                    mut messages,
                    mut transport,
                } = state
                else {
                    return None;
                };

                match messages.next().await {
                    Some(Ok(message)) => Some((
                        Ok(message),
                        DrainState::Streaming {
                            messages,
                            transport,
                        },
                    )),
                    Some(Err(err)) => {
                        // Faults end the exchange; clean up before the
                        // caller even sees the error.
                        transport.stop().await;
                        Some((Err(err), DrainState::Finished))
                    }
                    None => {
                        transport.stop().await;
                        None
                    }
                }
            },
        )
        .boxed();

        Self { inner }
    }
}

impl Stream for QueryStream {
    type Item = Result<Message>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
