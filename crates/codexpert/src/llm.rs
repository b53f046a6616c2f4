use crate::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:1234";
pub const DEFAULT_MODEL: &str = "meta-llama-3.1-8b-instruct";

pub const SYSTEM_PROMPT: &str = "\
You are an expert developer and code architect. Analyze code, suggest \
improvements, and provide complete solutions. Format code blocks using \
triple backticks with language tags.";

/// LM Studio connection settings.
#[derive(Debug, Clone)]
pub struct LmStudioConfig {
    pub api_url: String,
    pub model: String,
}

impl LmStudioConfig {
    /// Load configuration from environment variables, falling back to the
    /// local LM Studio defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("LM_STUDIO_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: std::env::var("LM_STUDIO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, api_url: Option<String>, model: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: i32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn response_content(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}

/// Create the HTTP client used for chat completion calls.
pub fn create_client() -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Send a prompt to LM Studio and return the reply content.
pub async fn ask(
    client: &reqwest::Client,
    config: &LmStudioConfig,
    prompt: &str,
) -> Result<String> {
    let url = format!(
        "{}/v1/chat/completions",
        config.api_url.trim_end_matches('/')
    );

    let body = ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: 0.7,
        max_tokens: -1,
        stream: false,
    };

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| eyre!("Failed to reach LM Studio at {}: {}", url, e))?;

    if !response.status().is_success() {
        return Err(eyre!("LM Studio returned HTTP {}", response.status()));
    }

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse LM Studio response: {}", e))?;

    response_content(parsed).ok_or_else(|| eyre!("LM Studio response contained no content"))
}
