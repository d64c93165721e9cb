//! OpenAI provider implementation
//!
//! Supports OpenAI API and OpenAI-compatible APIs (OpenRouter, OneAPI, etc.)
//! that implement function calling on `/chat/completions`.

use crate::error::{DomainSuggestError, Result};
use crate::llm::{
    build_user_prompt, parse_site_names, site_names_schema, NameProvider, FUNCTION_NAME,
    SYSTEM_INSTRUCTION,
};
use crate::types::{EmptyReason, GenerationOutcome, LlmConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// OpenAI provider implementation
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DomainSuggestError::config("OpenAI API key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainSuggestError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: config.temperature,
        })
    }

    /// Intelligently constructs the full API URL
    fn build_url(&self, endpoint: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.ends_with("/v1") {
            format!("{}{}", base_url, endpoint)
        } else {
            format!("{}/v1{}", base_url, endpoint)
        }
    }

    fn build_request(&self, prompt: &str, count: usize) -> OpenAiRequest {
        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(prompt, count),
                },
            ],
            temperature: self.temperature,
            tools: vec![OpenAiTool {
                kind: "function",
                function: OpenAiFunction {
                    name: FUNCTION_NAME,
                    description: "Ranked website names for the described product",
                    parameters: site_names_schema(),
                },
            }],
            tool_choice: json!({ "type": "function", "function": { "name": FUNCTION_NAME } }),
        }
    }
}

#[async_trait]
impl NameProvider for OpenAiProvider {
    async fn generate_names(&self, prompt: &str, count: usize) -> Result<GenerationOutcome> {
        let request = self.build_request(prompt, count);

        let url = self.build_url("/chat/completions");
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainSuggestError::timeout("OpenAI request", 30)
                } else {
                    DomainSuggestError::network(
                        format!("Failed to connect to API: {}", e),
                        None,
                        Some(url.clone()),
                    )
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 | 403 => DomainSuggestError::authentication(format!(
                    "OpenAI rejected the API key ({}) for {}",
                    status, self.base_url
                )),
                429 => DomainSuggestError::rate_limit("OpenAI rate limit exceeded (429)", None),
                _ => DomainSuggestError::llm_provider(
                    self.name(),
                    format!("API request failed ({}): {}", status, error_text),
                    Some(status.as_u16().to_string()),
                ),
            });
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| DomainSuggestError::parse(e.to_string(), None))?;

        Ok(extract_outcome(openai_response))
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull the function-call arguments out of the first choice.
fn extract_outcome(response: OpenAiResponse) -> GenerationOutcome {
    let Some(choice) = response.choices.into_iter().next() else {
        return GenerationOutcome::Empty(EmptyReason::NoChoices);
    };

    let message = choice.message;
    let arguments = message
        .tool_calls
        .into_iter()
        .flatten()
        .map(|call| call.function)
        .chain(message.function_call)
        .find(|function| function.name.as_deref().map_or(true, |n| n == FUNCTION_NAME))
        .map(|function| function.arguments);

    parse_site_names(arguments.as_deref())
}

// OpenAI API structures
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    tools: Vec<OpenAiTool>,
    tool_choice: Value,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: OpenAiFunction,
}

#[derive(Serialize)]
struct OpenAiFunction {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    /// Legacy single function call, still returned by some compatible APIs
    #[serde(default)]
    function_call: Option<OpenAiFunctionCall>,
}

#[derive(Deserialize)]
struct OpenAiToolCall {
    function: OpenAiFunctionCall,
}

#[derive(Deserialize)]
struct OpenAiFunctionCall {
    #[serde(default)]
    name: Option<String>,
    arguments: String,
}
