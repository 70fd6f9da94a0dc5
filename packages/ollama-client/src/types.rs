//! Ollama API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat
// =============================================================================

/// Chat request against `/api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "qwen2.5:14b", "llama3.1:8b")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Always `false` here; this client consumes whole completions.
    pub stream: bool,

    /// Output constraint: the string `"json"` for free-form JSON mode,
    /// or a full JSON schema object for schema-enforced decoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,

    /// Model options (temperature, prediction limit, seed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            model: "qwen2.5:14b".to_string(),
            messages: Vec::new(),
            stream: false,
            format: None,
            options: None,
        }
    }
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(ChatOptions::default).temperature = Some(temperature);
        self
    }

    /// Cap the number of tokens the model may generate.
    pub fn num_predict(mut self, num_predict: i32) -> Self {
        self.options.get_or_insert_with(ChatOptions::default).num_predict = Some(num_predict);
        self
    }

    /// Constrain the output to syntactically valid JSON.
    pub fn format_json(mut self) -> Self {
        self.format = Some(serde_json::Value::String("json".to_string()));
        self
    }

    /// Constrain the output to the given JSON schema (structured outputs).
    pub fn format_schema(mut self, schema: serde_json::Value) -> Self {
        self.format = Some(schema);
        self
    }
}

/// Model options passed through to the runner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatOptions {
    /// Sampling temperature (0.0 for greedy decoding)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate (-1 for unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,

    /// Seed for reproducible sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Completion content
    pub content: String,

    /// Token usage, when the server reports it
    pub usage: Option<Usage>,
}

/// Raw chat response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    pub message: Option<RawMessage>,
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMessage {
    pub content: String,
}

/// Error body the server returns alongside a non-2xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

/// Token counts reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_eval_count: u64,

    /// Tokens in the completion
    pub eval_count: u64,
}
