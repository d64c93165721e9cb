//! LLM (Large Language Model) integration module
//!
//! Candidate site names come from one structured text-generation call.

pub mod generator;
pub mod providers;

// Re-export main functionality
pub use generator::CandidateGenerator;

use crate::error::Result;
use crate::types::{EmptyReason, GenerationOutcome, LlmConfig};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Name of the function the provider is asked to call.
pub const FUNCTION_NAME: &str = "productDomains";

/// System instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You generate website names. They should be unique, \
and at least 6 characters. Do not include the TLD. Rank them from best (index 0) to worst (last index)";

/// Core trait for text-generation providers
#[async_trait]
pub trait NameProvider: Send + Sync {
    /// Ask for `count` ranked site names for `prompt`.
    ///
    /// Transport and HTTP failures are errors; an answer without a usable
    /// payload is an `Ok(GenerationOutcome::Empty(..))`.
    async fn generate_names(&self, prompt: &str, count: usize) -> Result<GenerationOutcome>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai"]
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn NameProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(providers::OpenAiProvider::new(config)?)),
        _ => Err(crate::error::DomainSuggestError::config(format!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        ))),
    }
}

/// User message for a generation request
pub fn build_user_prompt(prompt: &str, count: usize) -> String {
    format!("Generate {} domain names for: {}", count, prompt)
}

/// JSON schema of the function arguments the provider must produce
pub fn site_names_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "siteNames": {
                "type": "array",
                "items": { "type": "string" },
                "description": "An array of website names without the TLD."
            }
        },
        "required": ["siteNames"]
    })
}

#[derive(Debug, Deserialize)]
struct SiteNamesPayload {
    #[serde(rename = "siteNames")]
    site_names: Vec<String>,
}

/// Turn the raw function-call arguments into a generation outcome.
pub fn parse_site_names(arguments: Option<&str>) -> GenerationOutcome {
    let Some(arguments) = arguments.filter(|a| !a.trim().is_empty()) else {
        return GenerationOutcome::Empty(EmptyReason::MissingPayload);
    };

    match serde_json::from_str::<SiteNamesPayload>(arguments) {
        Ok(payload) => GenerationOutcome::Names(payload.site_names),
        Err(e) => GenerationOutcome::Empty(EmptyReason::MalformedPayload(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_names() {
        let outcome = parse_site_names(Some(r#"{"siteNames":["novahive","brightloom"]}"#));
        assert_eq!(
            outcome,
            GenerationOutcome::Names(vec!["novahive".to_string(), "brightloom".to_string()])
        );
    }

    #[test]
    fn test_parse_site_names_soft_fails() {
        assert_eq!(
            parse_site_names(None),
            GenerationOutcome::Empty(EmptyReason::MissingPayload)
        );
        assert_eq!(
            parse_site_names(Some("  ")),
            GenerationOutcome::Empty(EmptyReason::MissingPayload)
        );
        assert!(matches!(
            parse_site_names(Some(r#"{"domains":["novahive"]}"#)),
            GenerationOutcome::Empty(EmptyReason::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_site_names(Some("not json")),
            GenerationOutcome::Empty(EmptyReason::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_prompt_and_schema() {
        assert_eq!(
            build_user_prompt("a bakery in Lisbon", 12),
            "Generate 12 domain names for: a bakery in Lisbon"
        );
        let schema = site_names_schema();
        assert_eq!(schema["required"][0], "siteNames");
        assert_eq!(schema["properties"]["siteNames"]["type"], "array");
    }

    #[test]
    fn test_unknown_provider() {
        let config = LlmConfig {
            provider: "unknown".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }
}
