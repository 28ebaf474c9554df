//! OpenAI API client for generated consultation turns
//!
//! Optional delegate for non-emergency turns. Forwards the style-contract
//! instructions, a bounded slice of conversation history and the current
//! input to the chat completions API and returns the model text verbatim.
//! Any failure is returned as an error so the engine can fall back to the
//! deterministic composer; emergencies never reach this path at all.
//! Uses a long-lived reqwest::Client for connection pooling.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::error::ConsultationError;
use crate::memory::ConversationMessage;

/// Instruction appended when the caller has flagged the turn as an
/// emergency, forbidding self-care language.
const EMERGENCY_PROTOCOL_INSTRUCTION: &str = "IMPORTANT: The patient has described emergency symptoms (chest pain, difficulty breathing, severe pain, high fever 105°F/40.5°C or higher, stroke signs, etc.). You must follow the emergency protocol exactly: Use 'Based on what you've told me...' format, state 'This is beyond what I can safely assess remotely', and recommend immediate medical care. Do NOT provide self-care recommendations for emergencies.";

/// Request timeout; expiry counts as backend failure and triggers the
/// deterministic fallback.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Strategy seam for generated consultation turns.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate a reply from the style instructions, the recent history,
    /// the current patient input and the emergency flag.
    async fn generate(
        &self,
        instructions: &str,
        history: &[ConversationMessage],
        input: &str,
        is_emergency: bool,
    ) -> crate::Result<String>;
}

/// Reusable OpenAI client (connection-pooled)
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiBackend {
    async fn generate(
        &self,
        instructions: &str,
        history: &[ConversationMessage],
        input: &str,
        is_emergency: bool,
    ) -> crate::Result<String> {
        if self.api_key.is_empty() {
            return Err(ConsultationError::BackendUnavailable(
                "OPENAI_API_KEY not configured".to_string(),
            ));
        }

        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: build_messages(instructions, history, input, is_emergency),
            temperature: 0.7,
            max_tokens: 500,
        };

        info!("Calling OpenAI API");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI API request failed: {}", e);
                ConsultationError::BackendError(format!("OpenAI API error: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error response: {}", error_text);
            return Err(ConsultationError::BackendError(format!(
                "OpenAI API error: {}",
                error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse OpenAI response: {}", e);
            ConsultationError::BackendError(format!("OpenAI parse error: {}", e))
        })?;

        let answer = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                ConsultationError::BackendError("Empty response from OpenAI".to_string())
            })?;

        info!("OpenAI response received ({} chars)", answer.len());

        Ok(answer)
    }
}

/// Assemble the chat messages: system instructions, recent history, the
/// current input, and the emergency protocol instruction when flagged.
fn build_messages(
    instructions: &str,
    history: &[ConversationMessage],
    input: &str,
    is_emergency: bool,
) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(history.len() + 3);

    messages.push(WireMessage {
        role: "system".to_string(),
        content: instructions.to_string(),
    });

    for msg in history {
        messages.push(WireMessage {
            role: msg.role.as_wire_str().to_string(),
            content: msg.content.clone(),
        });
    }

    messages.push(WireMessage {
        role: "user".to_string(),
        content: input.to_string(),
    });

    if is_emergency {
        messages.push(WireMessage {
            role: "system".to_string(),
            content: EMERGENCY_PROTOCOL_INSTRUCTION.to_string(),
        });
    }

    messages
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MessageRole;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: build_messages("You are a consultant", &[], "I have a headache", false),
            temperature: 0.7,
            max_tokens: 500,
        };

        let json = serde_json::to_string(&request);
        assert!(json.is_ok());
        assert!(json.unwrap().contains("I have a headache"));
    }

    #[test]
    fn test_message_assembly_with_history() {
        let history = vec![
            ConversationMessage::new(MessageRole::User, "I have a cough".to_string()),
            ConversationMessage::new(MessageRole::Assistant, "I understand.".to_string()),
        ];

        let messages = build_messages("instructions", &history, "it started yesterday", false);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].content, "it started yesterday");
    }

    #[test]
    fn test_emergency_flag_injects_protocol_instruction() {
        let messages = build_messages("instructions", &[], "chest pain", true);

        let last = messages.last().unwrap();
        assert_eq!(last.role, "system");
        assert!(last.content.contains("Do NOT provide self-care recommendations"));

        // And never injected when the flag is off
        let messages = build_messages("instructions", &[], "mild cough", false);
        assert!(!messages
            .iter()
            .any(|m| m.content.contains("emergency protocol")));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let backend = OpenAiBackend::new(String::new());
        let result = backend.generate("instructions", &[], "hello", false).await;

        assert!(result.is_err());
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.to_lowercase().contains("api key") || error_msg.contains("OPENAI_API_KEY"));
    }
}
