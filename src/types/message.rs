//! Thread message types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata key under which a caller's external id is stored on a message.
pub const EXTERNAL_ID_KEY: &str = "messageId";

/// Conversation role.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
    System,
}

/// A message this crate sends to a thread or a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub role: Role,
    pub content: String,
    /// Caller-assigned identifier, stored as metadata for sent/unsent detection.
    pub id: Option<String>,
}

impl NewMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Wire form of a message being appended to a thread.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MessageBody {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl From<&NewMessage> for MessageBody {
    fn from(message: &NewMessage) -> Self {
        let mut metadata = HashMap::new();
        if let Some(id) = &message.id {
            metadata.insert(EXTERNAL_ID_KEY.to_string(), id.clone());
        }
        Self {
            role: message.role,
            content: message.content.clone(),
            metadata,
        }
    }
}

/// A message as stored by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    pub role: Role,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
}

impl ThreadMessage {
    /// The caller's external id, when the message carries a non-empty one.
    pub fn external_id(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .get(EXTERNAL_ID_KEY)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// First content block, if it is text.
    pub fn first_text(&self) -> Option<&TextContent> {
        match self.content.first()? {
            MessageContent::Text { text } => Some(text),
            MessageContent::Other => None,
        }
    }
}

/// A content block of a thread message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    /// Image files, image URLs, refusals, and anything newer.
    #[serde(other)]
    Other,
}

/// Text block with its citation annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// A page of results from a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_body_tags_external_id() {
        let body = MessageBody::from(&NewMessage::user("hi").with_id("ext-1"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"role": "user", "content": "hi", "metadata": {"messageId": "ext-1"}})
        );
    }

    #[test]
    fn message_body_without_id_omits_metadata() {
        let body = MessageBody::from(&NewMessage::assistant("ok"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"role": "assistant", "content": "ok"})
        );
    }

    #[test]
    fn thread_message_reads_text_and_external_id() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_1",
            "object": "thread.message",
            "thread_id": "thread_1",
            "role": "assistant",
            "created_at": 1_700_000_000,
            "content": [
                {"type": "text", "text": {"value": "Hello", "annotations": []}},
                {"type": "image_file", "image_file": {"file_id": "file_1"}}
            ],
            "metadata": {"messageId": "ext-9"}
        }))
        .unwrap();

        assert_eq!(message.external_id(), Some("ext-9"));
        assert_eq!(message.first_text().unwrap().value, "Hello");
        assert_eq!(message.content[1], MessageContent::Other);
    }

    #[test]
    fn empty_external_id_counts_as_absent() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_2",
            "role": "assistant",
            "content": [],
            "metadata": {"messageId": ""}
        }))
        .unwrap();

        assert_eq!(message.external_id(), None);
        assert!(message.first_text().is_none());
    }
}
