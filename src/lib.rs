//! Domain Suggest - available domain names for a short business description
//!
//! A prompt goes to a text-generation provider for ranked candidate names;
//! each candidate is checked against the requested TLDs until enough
//! available names are found.

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod llm;
pub mod pipeline;
pub mod rdap;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{DomainSuggestError, Result};
pub use types::{
    AvailabilityStatus, CheckConfig, EmptyReason, GenerationOutcome, LlmConfig,
    MetricsSnapshot, PerformanceMetrics, PipelineConfig, Recommendation,
};

// Re-export main functionality
pub use domain::{AvailabilityLookup, AvailabilityMap, AvailabilityResolver};
pub use llm::{CandidateGenerator, NameProvider};
pub use pipeline::DomainPipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
