//! Core types and structures for domain-suggest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Number of candidate names requested from the generator per pipeline run.
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// Maximum number of recommendations a pipeline run returns.
pub const DEFAULT_RESULT_BUDGET: usize = 3;

/// Registrar search URL; `{siteName}` is replaced with the candidate name.
pub const REGISTRAR_LINK_TEMPLATE: &str =
    "https://www.namecheap.com/domains/registration/results/?domain={siteName}";

/// Domain availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    /// The lookup failed or its answer could not be interpreted.
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Domain checking method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMethod {
    WhoApi,
    Rdap,
}

impl std::fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMethod::WhoApi => write!(f, "whoapi"),
            CheckMethod::Rdap => write!(f, "rdap"),
        }
    }
}

impl std::str::FromStr for CheckMethod {
    type Err = crate::error::DomainSuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whoapi" => Ok(CheckMethod::WhoApi),
            "rdap" => Ok(CheckMethod::Rdap),
            other => Err(crate::config_error!(
                "Unsupported availability backend: {}. Supported backends: whoapi, rdap",
                other
            )),
        }
    }
}

/// Why a generation call produced no candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The provider answered with zero choices.
    NoChoices,
    /// The first choice carried no structured payload.
    MissingPayload,
    /// The payload was present but did not deserialize to a name list.
    MalformedPayload(String),
    /// Every returned name was blank, duplicated or not a valid label.
    NoUsableNames,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyReason::NoChoices => write!(f, "no choices returned"),
            EmptyReason::MissingPayload => write!(f, "structured payload missing"),
            EmptyReason::MalformedPayload(cause) => write!(f, "malformed payload: {}", cause),
            EmptyReason::NoUsableNames => write!(f, "no usable names"),
        }
    }
}

/// Result of one candidate generation call.
///
/// `Empty` is a soft failure: the pipeline answers with no recommendations
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Candidate base names, best first.
    Names(Vec<String>),
    Empty(EmptyReason),
}

#[cfg(test)]
impl GenerationOutcome {
    /// Candidate names, or an empty slice for a soft failure.
    pub(crate) fn names(&self) -> &[String] {
        match self {
            GenerationOutcome::Names(names) => names,
            GenerationOutcome::Empty(_) => &[],
        }
    }
}

/// One lookup whose answer was neither "available" nor "taken".
#[derive(Debug, Clone, Serialize)]
pub struct InconclusiveLookup {
    pub domain: String,
    pub reason: String,
    pub checked_at: DateTime<Utc>,
}

/// Final output unit of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub site_name: String,
    pub tlds: Vec<String>,
    pub link: String,
}

impl Recommendation {
    /// Build a recommendation, filling the registrar link from `template`.
    pub fn new(site_name: String, tlds: Vec<String>, template: &str) -> Self {
        let link = template.replace("{siteName}", &site_name);
        Self {
            site_name,
            tlds,
            link,
        }
    }
}

/// Operational settings of the pipeline orchestrator
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub batch_size: usize,
    pub result_budget: usize,
    pub registrar_link_template: String,
    /// Pause between generation and the first availability lookup.
    pub lookup_delay: Duration,
    /// Upper bound for one whole pipeline run.
    pub request_deadline: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            result_budget: DEFAULT_RESULT_BUDGET,
            registrar_link_template: REGISTRAR_LINK_TEMPLATE.to_string(),
            lookup_delay: Duration::from_millis(500),
            request_deadline: Duration::from_secs(60),
        }
    }
}

/// Configuration for domain checking
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Number of candidates resolved at once; 1 keeps lookups strictly sequential.
    pub concurrency: usize,
    /// Per-lookup timeout.
    pub timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout: Duration::from_secs(10),
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.7,
        }
    }
}

/// Process-wide counters shared by the generator and the resolver
#[derive(Debug, Default)]
pub struct PerformanceMetrics {
    generation_calls: AtomicU64,
    names_generated: AtomicU64,
    lookups: AtomicU64,
    lookups_inconclusive: AtomicU64,
    errors: AtomicU64,
    total_lookup_time_ms: AtomicU64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_generation_calls(&self) {
        self.generation_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_names_generated(&self, count: usize) {
        self.names_generated.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn increment_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_inconclusive(&self) {
        self.lookups_inconclusive.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_lookup_time(&self, ms: u64) {
        self.total_lookup_time_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generation_calls: self.generation_calls.load(Ordering::Relaxed),
            names_generated: self.names_generated.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookups_inconclusive: self.lookups_inconclusive.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            total_lookup_time_ms: self.total_lookup_time_ms.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`PerformanceMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub generation_calls: u64,
    pub names_generated: u64,
    pub lookups: u64,
    pub lookups_inconclusive: u64,
    pub errors: u64,
    pub total_lookup_time_ms: u64,
}

impl MetricsSnapshot {
    pub fn avg_lookup_time_ms(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.total_lookup_time_ms as f64 / self.lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_link_and_json_shape() {
        let rec = Recommendation::new(
            "novahive".to_string(),
            vec![".com".to_string()],
            REGISTRAR_LINK_TEMPLATE,
        );
        assert_eq!(
            rec.link,
            "https://www.namecheap.com/domains/registration/results/?domain=novahive"
        );

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["siteName"], "novahive");
        assert_eq!(json["tlds"][0], ".com");
        assert!(json.get("site_name").is_none());
    }

    #[test]
    fn test_generation_outcome_names() {
        let outcome = GenerationOutcome::Names(vec!["brightloom".to_string()]);
        assert_eq!(outcome.names(), ["brightloom".to_string()]);

        let outcome = GenerationOutcome::Empty(EmptyReason::NoChoices);
        assert!(outcome.names().is_empty());
    }

    #[test]
    fn test_check_method_parsing() {
        assert_eq!("whoapi".parse::<CheckMethod>().unwrap(), CheckMethod::WhoApi);
        assert_eq!(" RDAP ".parse::<CheckMethod>().unwrap(), CheckMethod::Rdap);
        assert!("whois".parse::<CheckMethod>().is_err());
    }

    #[test]
    fn test_metrics_snapshot() {
        let metrics = PerformanceMetrics::new();
        assert_eq!(metrics.get_stats().avg_lookup_time_ms(), 0.0);

        metrics.increment_lookups();
        metrics.increment_lookups();
        metrics.add_lookup_time(30);
        metrics.increment_inconclusive();

        let stats = metrics.get_stats();
        assert_eq!(stats.lookups, 2);
        assert_eq!(stats.lookups_inconclusive, 1);
        assert_eq!(stats.avg_lookup_time_ms(), 15.0);
    }
}
