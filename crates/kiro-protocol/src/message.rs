//! Message types for the protocol
//!
//! The protocol has exactly three message roles. They form a closed sum type
//! tagged on `role`; the discriminant is derived from the variant and is not
//! a settable field, so a `Message` can never carry a role that contradicts
//! its shape.

use crate::content::{ContentBlock, TextBlock};
use serde::{Deserialize, Serialize};

/// A message exchanged with the CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// A message from the user. Content is restricted to text.
    User {
        /// Ordered text blocks.
        content: Vec<TextBlock>,
    },

    /// A message from the agent. May mix text and tool invocations.
    Assistant {
        /// Ordered content blocks.
        content: Vec<ContentBlock>,
    },

    /// The result of a tool invocation, correlated back to its request.
    ToolResult {
        /// The `id` of the `tool_use` block this result answers.
        tool_use_id: String,
        /// Ordered text blocks.
        content: Vec<TextBlock>,
    },
}

impl Message {
    /// Create a user message from a single piece of text
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: vec![TextBlock::new(text)],
        }
    }

    /// Create an assistant message
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self::Assistant { content }
    }

    /// Get the wire discriminant of this message
    pub fn role(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Assistant { .. } => "assistant",
            Self::ToolResult { .. } => "tool_result",
        }
    }

    /// Concatenate all text content in the message
    pub fn text(&self) -> String {
        match self {
            Self::User { content } | Self::ToolResult { content, .. } => content
                .iter()
                .map(|block| block.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Assistant { content } => content
                .iter()
                .filter_map(ContentBlock::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Get all tool invocations requested by an assistant message
    pub fn tool_uses(&self) -> Vec<(&str, &str, &serde_json::Value)> {
        match self {
            Self::Assistant { content } => {
                content.iter().filter_map(ContentBlock::as_tool_use).collect()
            }
            _ => Vec::new(),
        }
    }
}
