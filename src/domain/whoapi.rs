//! WhoAPI availability lookup
//!
//! Queries `GET {base}?apikey=..&r=taken&domain=..` and reads the `taken`
//! flag. A `taken` of `0` means the domain can be registered.

use crate::domain::AvailabilityLookup;
use crate::error::{DomainSuggestError, Result};
use crate::types::{AvailabilityStatus, CheckMethod};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.whoapi.com";

/// WhoAPI client
pub struct WhoApiLookup {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WhoApiLookup {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        if api_key.is_empty() {
            return Err(DomainSuggestError::config("WhoAPI key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("domain-suggest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainSuggestError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[async_trait]
impl AvailabilityLookup for WhoApiLookup {
    async fn check_domain(&self, domain: &str) -> Result<AvailabilityStatus> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("r", "taken"), ("domain", domain)])
            .send()
            .await
            .map_err(|e| {
                DomainSuggestError::network(
                    format!("WhoAPI request failed: {}", e),
                    None,
                    Some(self.base_url.clone()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainSuggestError::network(
                format!("WhoAPI request failed with status {}", status),
                Some(status.as_u16()),
                Some(self.base_url.clone()),
            ));
        }

        let text = response.text().await.map_err(|e| {
            DomainSuggestError::network(e.to_string(), None, Some(self.base_url.clone()))
        })?;

        let body: WhoApiResponse = serde_json::from_str(&text)
            .map_err(|e| DomainSuggestError::parse(e.to_string(), Some(text)))?;

        interpret_response(domain, &body)
    }

    fn method_name(&self) -> CheckMethod {
        CheckMethod::WhoApi
    }
}

/// WhoAPI `r=taken` response
#[derive(Debug, Deserialize)]
struct WhoApiResponse {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    status_desc: Option<String>,
    #[serde(default)]
    taken: Option<Value>,
}

fn interpret_response(domain: &str, body: &WhoApiResponse) -> Result<AvailabilityStatus> {
    // WhoAPI reports request-level failures through a non-zero `status`.
    if let Some(status) = &body.status {
        if as_flag(status) != Some(false) {
            return Err(DomainSuggestError::domain_check(
                domain,
                format!(
                    "WhoAPI status {}: {}",
                    status,
                    body.status_desc.as_deref().unwrap_or("no description")
                ),
                Some(CheckMethod::WhoApi.to_string()),
            ));
        }
    }

    match body.taken.as_ref().and_then(as_flag) {
        Some(false) => Ok(AvailabilityStatus::Available),
        Some(true) => Ok(AvailabilityStatus::Taken),
        None => Err(DomainSuggestError::parse(
            format!("WhoAPI response for '{}' has no usable 'taken' field", domain),
            body.taken.as_ref().map(|v| v.to_string()),
        )),
    }
}

/// Read a 0/1 flag that may arrive as a number, a string or a boolean.
fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|n| n != 0),
        _ => None,
    }
}
