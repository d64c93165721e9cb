//! Service configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first (see [`crate::init`]).
//!
//! ## Required Variables
//!
//! - `OPENAI_API_KEY` - credential for the text-generation provider
//! - `WHOIS_API_KEY` - WhoAPI credential (only for `AVAILABILITY_BACKEND=whoapi`)
//!
//! ## Optional Variables
//!
//! - `OPENAI_BASE_URL` - OpenAI-compatible endpoint (default: `https://api.openai.com/v1`)
//! - `OPENAI_MODEL` - model name (default: `gpt-4.1-mini`)
//! - `AVAILABILITY_BACKEND` - `whoapi` or `rdap` (default: `whoapi`)
//! - `WHOAPI_BASE_URL` - WhoAPI endpoint (default: `https://api.whoapi.com`)
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `LOOKUP_TIMEOUT_SECS` - per-lookup timeout (default: 10)
//! - `REQUEST_DEADLINE_SECS` - whole-pipeline deadline (default: 60)
//! - `LOOKUP_CONCURRENCY` - lookups in flight per request (default: 1, sequential)
//! - `LOOKUP_DELAY_MS` - pause between generation and the first lookup (default: 500)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)

use crate::error::{DomainSuggestError, Result};
use crate::types::{CheckConfig, CheckMethod, LlmConfig, PipelineConfig};
use std::str::FromStr;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = DomainSuggestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(crate::config_error!("Unsupported LOG_FORMAT: {} (expected text or json)", other)),
        }
    }
}

/// Settings for the availability-lookup collaborator
#[derive(Debug, Clone)]
pub struct AvailabilityConfig {
    pub method: CheckMethod,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub availability: AvailabilityConfig,
    pub check: CheckConfig,
    pub pipeline: PipelineConfig,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = var("OPENAI_API_KEY")
            .ok_or_else(|| DomainSuggestError::config("OPENAI_API_KEY is not set"))?;

        let llm = LlmConfig {
            provider: "openai".to_string(),
            model: var("OPENAI_MODEL").unwrap_or_else(|| LlmConfig::default().model),
            api_key,
            base_url: var("OPENAI_BASE_URL"),
            ..LlmConfig::default()
        };

        let method: CheckMethod = match var("AVAILABILITY_BACKEND") {
            Some(backend) => backend.parse()?,
            None => CheckMethod::WhoApi,
        };
        let lookup_timeout = Duration::from_secs(parse_or(&var, "LOOKUP_TIMEOUT_SECS", 10u64)?);

        let availability = AvailabilityConfig {
            method,
            api_key: var("WHOIS_API_KEY"),
            base_url: var("WHOAPI_BASE_URL"),
            timeout: lookup_timeout,
        };
        if availability.method == CheckMethod::WhoApi && availability.api_key.is_none() {
            return Err(DomainSuggestError::config(
                "WHOIS_API_KEY is not set (required when AVAILABILITY_BACKEND=whoapi)",
            ));
        }

        let concurrency: usize = parse_or(&var, "LOOKUP_CONCURRENCY", 1)?;
        if concurrency == 0 {
            return Err(DomainSuggestError::config("LOOKUP_CONCURRENCY must be at least 1"));
        }

        let check = CheckConfig {
            concurrency,
            timeout: lookup_timeout,
        };

        let pipeline = PipelineConfig {
            lookup_delay: Duration::from_millis(parse_or(&var, "LOOKUP_DELAY_MS", 500u64)?),
            request_deadline: Duration::from_secs(parse_or(&var, "REQUEST_DEADLINE_SECS", 60u64)?),
            ..PipelineConfig::default()
        };

        Ok(Self {
            llm,
            availability,
            check,
            pipeline,
            listen_addr: var("LISTEN").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            log_level: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: match var("LOG_FORMAT") {
                Some(format) => format.parse()?,
                None => LogFormat::Text,
            },
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| crate::config_error!("Invalid {}='{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("OPENAI_API_KEY", "sk-test"), ("WHOIS_API_KEY", "who")]).unwrap();

        assert_eq!(config.llm.model, "gpt-4.1-mini");
        assert_eq!(config.availability.method, CheckMethod::WhoApi);
        assert_eq!(config.availability.timeout, Duration::from_secs(10));
        assert_eq!(config.check.concurrency, 1);
        assert_eq!(config.pipeline.batch_size, 12);
        assert_eq!(config.pipeline.result_budget, 3);
        assert_eq!(config.pipeline.lookup_delay, Duration::from_millis(500));
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_credentials() {
        assert!(load(&[]).is_err());
        assert!(load(&[("OPENAI_API_KEY", "sk-test")]).is_err());
        assert!(load(&[("OPENAI_API_KEY", "  ")]).is_err());

        let config = load(&[("OPENAI_API_KEY", "sk-test"), ("AVAILABILITY_BACKEND", "rdap")]).unwrap();
        assert_eq!(config.availability.method, CheckMethod::Rdap);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_BASE_URL", "https://openrouter.ai/api/v1"),
            ("WHOIS_API_KEY", "who"),
            ("LOOKUP_CONCURRENCY", "4"),
            ("LOOKUP_TIMEOUT_SECS", "3"),
            ("LOOKUP_DELAY_MS", "0"),
            ("REQUEST_DEADLINE_SECS", "20"),
            ("LISTEN", "127.0.0.1:8080"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url.as_deref(), Some("https://openrouter.ai/api/v1"));
        assert_eq!(config.check.concurrency, 4);
        assert_eq!(config.check.timeout, Duration::from_secs(3));
        assert_eq!(config.pipeline.lookup_delay, Duration::ZERO);
        assert_eq!(config.pipeline.request_deadline, Duration::from_secs(20));
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        let base = [("OPENAI_API_KEY", "sk-test"), ("WHOIS_API_KEY", "who")];

        let mut vars = base.to_vec();
        vars.push(("LOOKUP_CONCURRENCY", "0"));
        assert!(load(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("LOOKUP_TIMEOUT_SECS", "soon"));
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("LOOKUP_TIMEOUT_SECS"));

        let mut vars = base.to_vec();
        vars.push(("AVAILABILITY_BACKEND", "whois"));
        assert!(load(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("LOG_FORMAT", "xml"));
        assert!(load(&vars).is_err());
    }
}
