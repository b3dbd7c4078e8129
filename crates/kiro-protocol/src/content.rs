//! Content block types
//!
//! Represents the units of message payload: plain text, a tool invocation
//! request, or a tool invocation result. Each block carries a `type`
//! discriminant on the wire; the discriminant is derived from the variant and
//! never settable by the caller.

use serde::{Deserialize, Serialize};

/// A content block in a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content.
    Text {
        /// The text payload.
        text: String,
    },

    /// A request from the agent to invoke a tool.
    ToolUse {
        /// The unique identifier for this invocation, used to correlate the
        /// later result.
        id: String,
        /// The name of the tool to invoke.
        name: String,
        /// The tool input, as a free-form JSON object.
        #[serde(default)]
        input: serde_json::Value,
    },

    /// The result of a tool invocation.
    ToolResult {
        /// The `id` of the `tool_use` block this result is for.
        tool_use_id: String,
        /// The textual output of the tool.
        content: String,
        /// Whether the invocation failed.
        #[serde(default)]
        is_error: bool,
    },
}

/// A text-only content block
///
/// Used where the message model restricts content to text, such as user
/// messages and tool result messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename = "text")]
pub struct TextBlock {
    /// The text payload.
    pub text: String,
}

impl TextBlock {
    /// Create a new text block
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<TextBlock> for ContentBlock {
    fn from(block: TextBlock) -> Self {
        Self::Text { text: block.text }
    }
}

impl ContentBlock {
    /// Create a text content block
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a tool use content block
    pub fn tool_use(
        id: impl Into<String>,
        name: impl Into<String>,
        input: serde_json::Value,
    ) -> Self {
        Self::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Create a tool result content block
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Get the wire discriminant of this content block
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::ToolUse { .. } => "tool_use",
            Self::ToolResult { .. } => "tool_result",
        }
    }

    /// Check if this is a text block
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Check if this is a tool use block
    pub fn is_tool_use(&self) -> bool {
        matches!(self, Self::ToolUse { .. })
    }

    /// Extract text if this is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Extract invocation details if this is a tool use block
    pub fn as_tool_use(&self) -> Option<(&str, &str, &serde_json::Value)> {
        match self {
            Self::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}
