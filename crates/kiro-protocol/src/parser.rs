//! Message parsing
//!
//! Maps a generic decoded record into one [`Message`] variant. Parsing is
//! strict: missing required fields and unknown discriminants fail loudly
//! rather than substituting defaults or silently dropping the record, so
//! protocol drift surfaces as an error instead of vanishing data. The one
//! documented default is `is_error` on tool result blocks, which is false
//! when absent.

use crate::content::{ContentBlock, TextBlock};
use crate::error::{ProtocolError, Result};
use crate::message::Message;
use serde_json::Value;

/// Parse a decoded record into a typed [`Message`]
///
/// The record must carry a `role` discriminant of `"user"`, `"assistant"`,
/// or `"tool_result"`; anything else is [`ProtocolError::UnknownRole`].
pub fn parse_message(record: &Value) -> Result<Message> {
    let role = record
        .get("role")
        .and_then(Value::as_str)
        .ok_or_else(|| ProtocolError::missing("role"))?;

    match role {
        "user" => Ok(Message::User {
            content: parse_text_blocks(require(record, "content")?)?,
        }),
        "assistant" => Ok(Message::Assistant {
            content: parse_content_blocks(require(record, "content")?)?,
        }),
        "tool_result" => {
            let tool_use_id = record
                .get("tool_use_id")
                .and_then(Value::as_str)
                .ok_or_else(|| ProtocolError::missing("tool_use_id"))?
                .to_string();
            Ok(Message::ToolResult {
                tool_use_id,
                content: parse_text_blocks(require(record, "content")?)?,
            })
        }
        other => Err(ProtocolError::UnknownRole(other.to_string())),
    }
}

/// Parse a single content block by its `type` discriminant
pub fn parse_content_block(block: &Value) -> Result<ContentBlock> {
    let block_type = block
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ProtocolError::missing("type"))?;

    match block_type {
        "text" => {
            let text = block
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| ProtocolError::missing("text"))?;
            Ok(ContentBlock::text(text))
        }
        "tool_use" => {
            let id = block
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| ProtocolError::missing("id"))?;
            let name = block
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ProtocolError::missing("name"))?;
            let input = block
                .get("input")
                .ok_or_else(|| ProtocolError::missing("input"))?
                .clone();
            Ok(ContentBlock::tool_use(id, name, input))
        }
        "tool_result" => {
            let tool_use_id = block
                .get("tool_use_id")
                .and_then(Value::as_str)
                .ok_or_else(|| ProtocolError::missing("tool_use_id"))?;
            let content = block
                .get("content")
                .and_then(Value::as_str)
                .ok_or_else(|| ProtocolError::missing("content"))?;
            let is_error = block
                .get("is_error")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Ok(ContentBlock::ToolResult {
                tool_use_id: tool_use_id.to_string(),
                content: content.to_string(),
                is_error,
            })
        }
        other => Err(ProtocolError::UnknownBlockType(other.to_string())),
    }
}

fn parse_content_blocks(content: &Value) -> Result<Vec<ContentBlock>> {
    as_block_array(content)?.iter().map(parse_content_block).collect()
}

/// Parse content where the message model allows text blocks only
fn parse_text_blocks(content: &Value) -> Result<Vec<TextBlock>> {
    as_block_array(content)?
        .iter()
        .map(|block| match parse_content_block(block)? {
            ContentBlock::Text { text } => Ok(TextBlock { text }),
            other => Err(ProtocolError::InvalidContent(format!(
                "expected a text block, got {:?}",
                other.type_name()
            ))),
        })
        .collect()
}

fn as_block_array(content: &Value) -> Result<&Vec<Value>> {
    content.as_array().ok_or_else(|| {
        ProtocolError::InvalidContent("content must be an array of blocks".to_string())
    })
}

fn require<'a>(record: &'a Value, field: &str) -> Result<&'a Value> {
    record
        .get(field)
        .ok_or_else(|| ProtocolError::MissingField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_assistant_text() {
        let record = json!({
            "role": "assistant",
            "content": [{"type": "text", "text": "Hi"}]
        });

        let msg = parse_message(&record).unwrap();
        match msg {
            Message::Assistant { content } => {
                assert_eq!(content.len(), 1);
                assert_eq!(content[0].as_text(), Some("Hi"));
            }
            other => panic!("expected assistant message, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_assistant_with_tool_use() {
        let record = json!({
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Let me check"},
                {"type": "tool_use", "id": "toolu_01", "name": "Bash", "input": {"command": "ls"}}
            ]
        });

        let msg = parse_message(&record).unwrap();
        let uses = msg.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].1, "Bash");
    }

    #[test]
    fn test_parse_user_message() {
        let record = json!({
            "role": "user",
            "content": [{"type": "text", "text": "Hello"}]
        });

        let msg = parse_message(&record).unwrap();
        assert_eq!(msg, Message::user("Hello"));
    }

    #[test]
    fn test_parse_tool_result_message() {
        let record = json!({
            "role": "tool_result",
            "tool_use_id": "toolu_01",
            "content": [{"type": "text", "text": "file.txt"}]
        });

        let msg = parse_message(&record).unwrap();
        match msg {
            Message::ToolResult {
                tool_use_id,
                content,
            } => {
                assert_eq!(tool_use_id, "toolu_01");
                assert_eq!(content[0].text, "file.txt");
            }
            other => panic!("expected tool result message, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_role_fails_closed() {
        let record = json!({"role": "unknown", "content": []});
        let err = parse_message(&record).unwrap_err();
        match err {
            ProtocolError::UnknownRole(role) => assert_eq!(role, "unknown"),
            other => panic!("expected UnknownRole, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_block_type_fails_closed() {
        let record = json!({
            "role": "assistant",
            "content": [{"type": "video", "url": "x"}]
        });
        let err = parse_message(&record).unwrap_err();
        match err {
            ProtocolError::UnknownBlockType(kind) => assert_eq!(kind, "video"),
            other => panic!("expected UnknownBlockType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_role_field() {
        let err = parse_message(&json!({"content": []})).unwrap_err();
        assert!(matches!(err, ProtocolError::MissingField(_)));
    }

    #[test]
    fn test_tool_use_requires_all_fields() {
        let record = json!({
            "role": "assistant",
            "content": [{"type": "tool_use", "id": "toolu_01", "name": "Bash"}]
        });
        let err = parse_message(&record).unwrap_err();
        match err {
            ProtocolError::MissingField(field) => assert_eq!(field, "input"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_result_message_requires_correlation_id() {
        let record = json!({"role": "tool_result", "content": []});
        let err = parse_message(&record).unwrap_err();
        match err {
            ProtocolError::MissingField(field) => assert_eq!(field, "tool_use_id"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_result_block_is_error_defaults_false() {
        let record = json!({
            "role": "assistant",
            "content": [
                {"type": "tool_result", "tool_use_id": "toolu_01", "content": "done"}
            ]
        });
        let msg = parse_message(&record).unwrap();
        match msg {
            Message::Assistant { content } => {
                assert_eq!(
                    content[0],
                    ContentBlock::ToolResult {
                        tool_use_id: "toolu_01".to_string(),
                        content: "done".to_string(),
                        is_error: false,
                    }
                );
            }
            other => panic!("expected assistant message, got {other:?}"),
        }
    }

    #[test]
    fn test_user_content_restricted_to_text() {
        let record = json!({
            "role": "user",
            "content": [
                {"type": "tool_use", "id": "toolu_01", "name": "Bash", "input": {}}
            ]
        });
        let err = parse_message(&record).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidContent(_)));
    }

    #[test]
    fn test_content_must_be_array() {
        let record = json!({"role": "user", "content": "bare string"});
        let err = parse_message(&record).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidContent(_)));
    }
}
