//! Domain availability checking module

pub mod rdap;
pub mod resolver;
pub mod validator;
pub mod whoapi;

// Re-export main functionality
pub use rdap::RdapLookup;
pub use resolver::{AvailabilityMap, AvailabilityResolver};
pub use validator::DomainValidator;
pub use whoapi::WhoApiLookup;

use crate::config::AvailabilityConfig;
use crate::error::{DomainSuggestError, Result};
use crate::types::{AvailabilityStatus, CheckMethod};
use async_trait::async_trait;
use std::sync::Arc;

/// Availability-lookup collaborator: one query per fully-qualified domain.
#[async_trait]
pub trait AvailabilityLookup: Send + Sync {
    /// Check whether `domain` (name plus TLD) is free to register
    async fn check_domain(&self, domain: &str) -> Result<AvailabilityStatus>;

    /// Get the method name
    fn method_name(&self) -> CheckMethod;
}

/// Create the configured availability lookup
pub fn create_lookup(config: &AvailabilityConfig) -> Result<Arc<dyn AvailabilityLookup>> {
    match config.method {
        CheckMethod::WhoApi => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                DomainSuggestError::config("WHOIS_API_KEY is required for the whoapi backend")
            })?;
            Ok(Arc::new(WhoApiLookup::new(
                api_key,
                config.base_url.clone(),
                config.timeout,
            )?))
        }
        CheckMethod::Rdap => Ok(Arc::new(RdapLookup::new(config.timeout)?)),
    }
}
