//! One-shot chat completion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::http::{bearer_headers, parse_json, shared_client};
use crate::client::OpenAiClient;
use crate::error::{Result, ThreadrunError};
use crate::types::{NewMessage, Role};
use crate::util::timeout::with_timeout;

pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-1106";

/// Message in a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&NewMessage> for ChatMessage {
    fn from(message: &NewMessage) -> Self {
        Self::new(message.role, message.content.clone())
    }
}

/// What to ask: a bare instruction or a full conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Sent as a single system message.
    Instruction(String),
    Messages(Vec<ChatMessage>),
}

impl Prompt {
    pub fn into_messages(self) -> Vec<ChatMessage> {
        match self {
            Self::Instruction(text) => vec![ChatMessage::new(Role::System, text)],
            Self::Messages(messages) => messages,
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::Instruction(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self::Instruction(text)
    }
}

impl From<Vec<ChatMessage>> for Prompt {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self::Messages(messages)
    }
}

/// Overrides for the completion request, applied key by key over the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    overrides: Map<String, Value>,
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override any request field, including ones without a typed setter.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub fn model(self, model: impl Into<String>) -> Self {
        self.set("model", model.into())
    }

    pub fn temperature(self, temperature: f64) -> Self {
        self.set("temperature", temperature)
    }

    pub fn max_tokens(self, max_tokens: u32) -> Self {
        self.set("max_tokens", max_tokens)
    }

    pub fn top_p(self, top_p: f64) -> Self {
        self.set("top_p", top_p)
    }

    pub fn frequency_penalty(self, penalty: f64) -> Self {
        self.set("frequency_penalty", penalty)
    }

    pub fn presence_penalty(self, penalty: f64) -> Self {
        self.set("presence_penalty", penalty)
    }

    /// Build the request body: defaults, then messages, then overrides.
    pub fn build_body(&self, messages: &[ChatMessage]) -> Result<Value> {
        let mut body = default_body();
        body.insert("messages".into(), serde_json::to_value(messages)?);
        for (key, value) in &self.overrides {
            body.insert(key.clone(), value.clone());
        }
        Ok(Value::Object(body))
    }
}

fn default_body() -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("model".into(), DEFAULT_COMPLETION_MODEL.into());
    body.insert("temperature".into(), 0.into());
    body.insert("max_tokens".into(), 300.into());
    body.insert("top_p".into(), 1.into());
    body.insert("frequency_penalty".into(), 0.5.into());
    body.insert("presence_penalty".into(), 0.into());
    body
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Ask for a single completion and return the first choice's text.
    pub async fn get_answer(
        &self,
        prompt: impl Into<Prompt>,
        options: &CompletionOptions,
    ) -> Result<String> {
        let messages = prompt.into().into_messages();
        let body = options.build_body(&messages)?;
        let url = self.url("chat/completions");
        let headers = bearer_headers(self.config());

        debug!(model = ?body.get("model"), messages = messages.len(), "start completion");

        let data: ChatCompletionResponse = with_timeout(self.config().timeout(), async {
            let response = shared_client()
                .post(url)
                .headers(headers)
                .json(&body)
                .send()
                .await?;
            parse_json(response).await
        })
        .await?;

        debug!("end completion");

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ThreadrunError::InvalidState("No choices in completion response".into()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn instruction_becomes_single_system_message() {
        let messages = Prompt::from("Summarise").into_messages();
        assert_eq!(messages, vec![ChatMessage::new(Role::System, "Summarise")]);
    }

    #[test]
    fn defaults_are_sent_without_overrides() {
        let body = CompletionOptions::new()
            .build_body(&[ChatMessage::new(Role::User, "hi")])
            .unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo-1106",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0,
                "max_tokens": 300,
                "top_p": 1,
                "frequency_penalty": 0.5,
                "presence_penalty": 0
            })
        );
    }

    #[test]
    fn overrides_replace_defaults_by_key() {
        let body = CompletionOptions::new()
            .model("gpt-4o-mini")
            .max_tokens(50)
            .set("response_format", json!({"type": "json_object"}))
            .build_body(&[])
            .unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 50);
        assert_eq!(body["temperature"], 0);
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
    }
}
