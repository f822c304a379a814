//! Wire types for the Ollama chat API.
//!
//! Requests carry `{ model, messages, stream: false }`; a successful response
//! carries the generated text at `message.content`. Anything else is treated
//! as a malformed payload by the adapter.

use ensemble_domain::{Message, Role};
use serde::{Deserialize, Serialize};

/// A `{role, content}` pair as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

/// Request body for `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
}

impl ChatRequest {
    /// Build a non-streaming chat request for the given model.
    pub fn new(model: impl Into<String>, messages: &[Message]) -> Self {
        Self {
            model: model.into(),
            messages: messages.iter().map(WireMessage::from).collect(),
            stream: false,
        }
    }
}

/// Response body for a non-streaming chat call
///
/// Only the fields the engine consumes are modeled; Ollama sends more
/// (timings, token counts) which serde ignores.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: Option<WireMessage>,
}

impl ChatResponse {
    /// Extract the generated text, if the body had the expected shape.
    pub fn into_content(self) -> Option<String> {
        self.message.map(|m| m.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let messages = vec![Message::user("hello")];
        let request = ChatRequest::new("llama3:8b", &messages);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama3:8b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_roles_map_to_wire_names() {
        let messages = vec![
            Message::system("be terse"),
            Message::user("q"),
            Message::assistant("a"),
        ];
        let request = ChatRequest::new("m", &messages);
        let roles: Vec<_> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
    }

    #[test]
    fn test_parse_ollama_response() {
        let body = r#"{
            "model": "llama3:8b",
            "created_at": "2024-05-01T10:00:00Z",
            "message": {"role": "assistant", "content": "Rust is a systems language."},
            "done": true,
            "total_duration": 5191566416
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_content().as_deref(),
            Some("Rust is a systems language.")
        );
    }

    #[test]
    fn test_response_without_message_yields_no_content() {
        let response: ChatResponse = serde_json::from_str(r#"{"done": false}"#).unwrap();
        assert!(response.into_content().is_none());
    }
}
