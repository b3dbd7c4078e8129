//! Error types for protocol operations

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while encoding, decoding, or parsing protocol lines
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A received line is not valid JSON. The raw line text is retained for
    /// diagnostics; stream framing is unreliable past this point.
    #[error("invalid JSON from CLI: {source} (raw line: {raw:?})")]
    Decode {
        /// The offending line, exactly as received (trailing whitespace
        /// stripped).
        raw: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An outbound record could not be serialized
    #[error("failed to encode outbound record: {0}")]
    Encode(#[source] serde_json::Error),

    /// A syntactically valid record carries a role this parser does not know
    #[error("unknown message role: {0:?}")]
    UnknownRole(String),

    /// A content block carries a type this parser does not know
    #[error("unknown content block type: {0:?}")]
    UnknownBlockType(String),

    /// A required field is absent from a record
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A record is structurally valid JSON but violates the message model
    #[error("invalid content: {0}")]
    InvalidContent(String),
}

impl ProtocolError {
    /// Convenience constructor for [`ProtocolError::MissingField`]
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }
}
