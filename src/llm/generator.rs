//! Candidate generator using LLM

use crate::domain::DomainValidator;
use crate::error::Result;
use crate::llm::NameProvider;
use crate::types::{EmptyReason, GenerationOutcome, PerformanceMetrics};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Produces ranked candidate base names for a prompt
#[derive(Clone)]
pub struct CandidateGenerator {
    provider: Arc<dyn NameProvider>,
    validator: DomainValidator,
    metrics: Arc<PerformanceMetrics>,
}

impl CandidateGenerator {
    pub fn new(provider: Arc<dyn NameProvider>) -> Self {
        Self::with_metrics(provider, Arc::new(PerformanceMetrics::new()))
    }

    pub fn with_metrics(provider: Arc<dyn NameProvider>, metrics: Arc<PerformanceMetrics>) -> Self {
        Self {
            provider,
            validator: DomainValidator::new(),
            metrics,
        }
    }

    /// Generate up to `count` candidates, best first.
    ///
    /// Provider answers without usable names come back as
    /// `GenerationOutcome::Empty`; only transport-level failures are errors.
    pub async fn generate(&self, prompt: &str, count: usize) -> Result<GenerationOutcome> {
        let start_time = Instant::now();
        self.metrics.increment_generation_calls();

        let outcome = match self.provider.generate_names(prompt, count).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.metrics.increment_errors();
                tracing::warn!(
                    provider = %self.provider.name(),
                    model = %self.provider.model(),
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Candidate generation failed"
                );
                return Err(e);
            }
        };

        let outcome = match outcome {
            GenerationOutcome::Names(raw) => self.normalize(raw, count),
            empty => empty,
        };

        match &outcome {
            GenerationOutcome::Names(names) => {
                self.metrics.add_names_generated(names.len());
                tracing::info!(
                    provider = %self.provider.name(),
                    requested = count,
                    candidates = names.len(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Candidate generation completed"
                );
            }
            GenerationOutcome::Empty(reason) => {
                tracing::warn!(
                    provider = %self.provider.name(),
                    reason = %reason,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Candidate generation returned no names"
                );
            }
        }

        Ok(outcome)
    }

    /// Keep rank order and the provider's spelling. Blanks, duplicates and
    /// invalid labels are dropped, and a TLD appended anyway is stripped.
    fn normalize(&self, raw: Vec<String>, count: usize) -> GenerationOutcome {
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(raw.len().min(count));

        for name in raw {
            if names.len() >= count {
                break;
            }

            let base = name.trim().split('.').next().unwrap_or_default();
            match self.validator.validate_label(base) {
                Ok(label) => {
                    // names compare case-insensitively, the first spelling wins
                    if seen.insert(label.to_ascii_lowercase()) {
                        names.push(label);
                    }
                }
                Err(e) => {
                    tracing::debug!(name = %name, error = %e, "Dropping unusable candidate");
                }
            }
        }

        if names.is_empty() {
            GenerationOutcome::Empty(EmptyReason::NoUsableNames)
        } else {
            GenerationOutcome::Names(names)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainSuggestError;
    use async_trait::async_trait;

    struct StaticProvider {
        reply: std::result::Result<GenerationOutcome, DomainSuggestError>,
    }

    #[async_trait]
    impl NameProvider for StaticProvider {
        async fn generate_names(&self, _prompt: &str, _count: usize) -> Result<GenerationOutcome> {
            self.reply.clone()
        }

        fn name(&self) -> &'static str {
            "static"
        }

        fn model(&self) -> &str {
            "static-model"
        }
    }

    fn generator(reply: Result<GenerationOutcome>) -> CandidateGenerator {
        CandidateGenerator::new(Arc::new(StaticProvider { reply }))
    }

    fn names(items: &[&str]) -> GenerationOutcome {
        GenerationOutcome::Names(items.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_rank_order_preserved() {
        let outcome = generator(Ok(names(&["novahive", "brightloom", "quietforge"])))
            .generate("a prompt", 12)
            .await
            .unwrap();
        assert_eq!(outcome, names(&["novahive", "brightloom", "quietforge"]));
    }

    #[tokio::test]
    async fn test_normalization() {
        let outcome = generator(Ok(names(&[
            " NovaHive ",
            "novahive",
            "bright loom",
            "",
            "quietforge.com",
            "-bad",
        ])))
        .generate("a prompt", 12)
        .await
        .unwrap();
        assert_eq!(outcome, names(&["NovaHive", "quietforge"]));
    }

    #[tokio::test]
    async fn test_mixed_case_spelling_kept() {
        let outcome = generator(Ok(names(&["DinoDate", "JurassicMingle", "dinodate"])))
            .generate("a prompt", 12)
            .await
            .unwrap();
        assert_eq!(outcome.names(), ["DinoDate".to_string(), "JurassicMingle".to_string()]);
    }

    #[tokio::test]
    async fn test_truncates_to_count() {
        let outcome = generator(Ok(names(&["alpha1", "bravo2", "charlie3"])))
            .generate("a prompt", 2)
            .await
            .unwrap();
        assert_eq!(outcome, names(&["alpha1", "bravo2"]));
    }

    #[tokio::test]
    async fn test_nothing_usable_is_soft_failure() {
        let outcome = generator(Ok(names(&["", "   ", "has space"])))
            .generate("a prompt", 12)
            .await
            .unwrap();
        assert_eq!(outcome, GenerationOutcome::Empty(EmptyReason::NoUsableNames));

        let outcome = generator(Ok(GenerationOutcome::Empty(EmptyReason::NoChoices)))
            .generate("a prompt", 12)
            .await
            .unwrap();
        assert_eq!(outcome, GenerationOutcome::Empty(EmptyReason::NoChoices));
    }

    #[tokio::test]
    async fn test_provider_errors_propagate() {
        let generator = generator(Err(DomainSuggestError::network("down", None, None)));
        let result = generator.generate("a prompt", 12).await;
        assert!(matches!(result, Err(DomainSuggestError::Network { .. })));
        assert_eq!(generator.metrics.get_stats().errors, 1);
    }
}
