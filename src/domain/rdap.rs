//! RDAP availability lookup
//!
//! Needs no credential. A registry answers 404 for unregistered names and a
//! domain object for registered ones.

use crate::domain::AvailabilityLookup;
use crate::error::{DomainSuggestError, Result};
use crate::rdap::rdap_domain_url;
use crate::types::{AvailabilityStatus, CheckMethod};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// RDAP client for domain checking
pub struct RdapLookup {
    client: Client,
}

impl RdapLookup {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("domain-suggest/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| DomainSuggestError::network(e.to_string(), None, None))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AvailabilityLookup for RdapLookup {
    async fn check_domain(&self, domain: &str) -> Result<AvailabilityStatus> {
        let url = rdap_domain_url(domain).ok_or_else(|| {
            DomainSuggestError::domain_check(
                domain,
                "No RDAP server known for this TLD",
                Some(CheckMethod::Rdap.to_string()),
            )
        })?;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/rdap+json")
            .send()
            .await
            .map_err(|e| DomainSuggestError::network(e.to_string(), None, Some(url.clone())))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(AvailabilityStatus::Available);
        }

        if !status.is_success() {
            return Err(DomainSuggestError::network(
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let text = response.text().await.map_err(|e| {
            DomainSuggestError::network(e.to_string(), None, Some(url.clone()))
        })?;

        let rdap_response: RdapResponse = serde_json::from_str(&text)
            .map_err(|e| DomainSuggestError::parse(e.to_string(), Some(text)))?;

        Ok(classify(&rdap_response))
    }

    fn method_name(&self) -> CheckMethod {
        CheckMethod::Rdap
    }
}

/// Any registration data in a 200 answer means the name is taken.
fn classify(response: &RdapResponse) -> AvailabilityStatus {
    if response.ldh_name.is_some()
        || !response.status.is_empty()
        || !response.entities.is_empty()
        || !response.events.is_empty()
        || !response.nameservers.is_empty()
    {
        AvailabilityStatus::Taken
    } else {
        AvailabilityStatus::Available
    }
}

/// RDAP response structures
#[derive(Debug, Deserialize)]
struct RdapResponse {
    #[serde(rename = "ldhName")]
    ldh_name: Option<String>,
    #[serde(default)]
    status: Vec<String>,
    #[serde(default)]
    entities: Vec<serde_json::Value>,
    #[serde(default)]
    events: Vec<serde_json::Value>,
    #[serde(default)]
    nameservers: Vec<serde_json::Value>,
}
