//! Topic naming through a chat-completion service
//!
//! Only the request/response contract lives here. The transport is supplied
//! by the host through [`ChatTransport`], and a naming failure never touches
//! vectorization or scoring.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TopicError};

const SYSTEM_PROMPT: &str = r#"You are an assistant that provides a topic name and description given the user input.
User input contains:
 -- top words: the most important words under a topic distribution
 -- documents (if provided): exhibit the topic, however, documents can exhibit other topics as well.
You only need to describe the topic related to the top words and use the documents for understanding the relationship of the words.
Generate a JSON object containing:
"topic_name": A concise name for the topic derived from the keywords.
"topic_description": A detailed explanation of the topic, including core ideas, key concepts, and examples highlighted by the documents"#;

const USER_PROMPT_TAIL: &str = r#"
Using this information, provide a JSON object with:
"topic_name": A concise name for the topic based on the keywords.
"topic_description": A detailed explanation of the topic, incorporating the meaning of the keywords and relevant insights from the example documents."#;

/// Connection settings of the chat service
///
/// Built explicitly and passed to whoever needs it; nothing is global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    /// chat model deployment used for naming
    pub chat_deployment: String,
}

impl NamingClientConfig {
    pub const ENDPOINT_VAR: &'static str = "TOPIC_NAMING_ENDPOINT";
    pub const API_KEY_VAR: &'static str = "TOPIC_NAMING_API_KEY";
    pub const API_VERSION_VAR: &'static str = "TOPIC_NAMING_API_VERSION";
    pub const DEPLOYMENT_VAR: &'static str = "TOPIC_NAMING_CHAT_DEPLOYMENT";

    /// Load from environment variables
    ///
    /// # Errors
    /// `InvalidConfig` naming the first variable that is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| TopicError::invalid_config(format!("{key} is not set")))
        };
        Ok(Self {
            endpoint: required(Self::ENDPOINT_VAR)?,
            api_key: required(Self::API_KEY_VAR)?,
            api_version: required(Self::API_VERSION_VAR)?,
            chat_deployment: required(Self::DEPLOYMENT_VAR)?,
        })
    }
}

/// What the service is asked to name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingRequest {
    pub top_words: Vec<String>,
    pub example_documents: Option<Vec<String>>,
}

impl NamingRequest {
    pub fn new<I, S>(top_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            top_words: top_words.into_iter().map(Into::into).collect(),
            example_documents: None,
        }
    }

    pub fn with_example_documents(mut self, documents: Vec<String>) -> Self {
        self.example_documents = Some(documents);
        self
    }

    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    pub fn user_prompt(&self) -> String {
        let mut prompt = format!("top words: {}", self.top_words.join(", "));
        if let Some(docs) = &self.example_documents {
            prompt.push_str("\nexample documents:");
            for doc in docs {
                prompt.push_str("\n - ");
                prompt.push_str(doc);
            }
        }
        prompt.push_str(USER_PROMPT_TAIL);
        prompt
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub logprobs: bool,
}

impl ChatRequest {
    /// Deterministic (temperature 0) naming request
    pub fn for_topic(request: &NamingRequest, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage::system(request.system_prompt()),
                ChatMessage::user(request.user_prompt()),
            ],
            temperature: 0.0,
            logprobs: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Chat-completion response body, only the fields read here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

/// Name and description returned for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicLabel {
    pub topic_name: String,
    pub topic_description: String,
}

impl TopicLabel {
    /// Parse the assistant message content
    pub fn from_content(content: &str) -> Result<Self> {
        serde_json::from_str(content.trim())
            .map_err(|e| TopicError::naming(format!("response is not a topic label: {e}")))
    }
}

/// Sends a chat request and returns the parsed response
pub trait ChatTransport {
    fn complete(&self, config: &NamingClientConfig, request: &ChatRequest) -> Result<ChatResponse>;
}

/// Names topics through a `ChatTransport`
#[derive(Debug, Clone)]
pub struct ChatTopicNamer<T> {
    config: NamingClientConfig,
    transport: T,
}

impl<T: ChatTransport> ChatTopicNamer<T> {
    pub fn new(config: NamingClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &NamingClientConfig {
        &self.config
    }

    /// # Errors
    /// Always `TopicError::Naming`, whatever the transport reported.
    pub fn name_topic(&self, request: &NamingRequest) -> Result<TopicLabel> {
        let body = ChatRequest::for_topic(request, self.config.chat_deployment.as_str());
        debug!(top_words = request.top_words.len(), "requesting topic name");
        let response = self.transport.complete(&self.config, &body).map_err(|e| {
            warn!(error = %e, "topic naming request failed");
            match e {
                TopicError::Naming { .. } => e,
                other => TopicError::naming(other.to_string()),
            }
        })?;
        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| TopicError::naming("response has no choices"))?;
        TopicLabel::from_content(content)
    }
}
