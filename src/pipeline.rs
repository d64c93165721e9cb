//! Suggestion pipeline: generate candidates, resolve availability, shape output

use crate::domain::AvailabilityResolver;
use crate::error::{DomainSuggestError, Result};
use crate::llm::CandidateGenerator;
use crate::types::{GenerationOutcome, PipelineConfig, Recommendation};
use std::time::Instant;

/// Orchestrates one suggestion request end to end
#[derive(Clone)]
pub struct DomainPipeline {
    generator: CandidateGenerator,
    resolver: AvailabilityResolver,
    config: PipelineConfig,
}

impl DomainPipeline {
    pub fn new(generator: CandidateGenerator, resolver: AvailabilityResolver, config: PipelineConfig) -> Self {
        Self {
            generator,
            resolver,
            config,
        }
    }

    /// Run the pipeline under the configured request deadline.
    pub async fn run(&self, prompt: &str, tlds: &[String]) -> Result<Vec<Recommendation>> {
        let deadline = self.config.request_deadline;
        tokio::time::timeout(deadline, self.run_inner(prompt, tlds))
            .await
            .map_err(|_| DomainSuggestError::timeout("Domain suggestion", deadline.as_secs()))?
    }

    async fn run_inner(&self, prompt: &str, tlds: &[String]) -> Result<Vec<Recommendation>> {
        let start = Instant::now();

        let candidates = match self.generator.generate(prompt, self.config.batch_size).await? {
            GenerationOutcome::Names(names) => names,
            GenerationOutcome::Empty(reason) => {
                tracing::info!(reason = %reason, "No candidates generated, skipping availability checks");
                return Ok(Vec::new());
            }
        };

        if !self.config.lookup_delay.is_zero() {
            tokio::time::sleep(self.config.lookup_delay).await;
        }

        let map = self
            .resolver
            .resolve(&candidates, tlds, self.config.result_budget)
            .await;

        let recommendations: Vec<Recommendation> = map
            .into_entries()
            .into_iter()
            .take(self.config.result_budget)
            .map(|(site_name, tlds)| {
                Recommendation::new(site_name, tlds, &self.config.registrar_link_template)
            })
            .collect();

        tracing::info!(
            candidates = candidates.len(),
            recommendations = recommendations.len(),
            duration_ms = %start.elapsed().as_millis(),
            "Domain suggestion completed"
        );

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AvailabilityLookup;
    use crate::llm::NameProvider;
    use crate::types::{AvailabilityStatus, CheckConfig, CheckMethod, EmptyReason};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedNames {
        outcome: GenerationOutcome,
        delay: Duration,
    }

    #[async_trait]
    impl NameProvider for FixedNames {
        async fn generate_names(&self, _prompt: &str, _count: usize) -> Result<GenerationOutcome> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.outcome.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    #[derive(Default)]
    struct RecordingLookup {
        available: HashSet<String>,
        calls: Mutex<Vec<String>>,
        count: AtomicUsize,
    }

    #[async_trait]
    impl AvailabilityLookup for RecordingLookup {
        async fn check_domain(&self, domain: &str) -> Result<AvailabilityStatus> {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().push(domain.to_string());
            Ok(if self.available.contains(domain) {
                AvailabilityStatus::Available
            } else {
                AvailabilityStatus::Taken
            })
        }

        fn method_name(&self) -> CheckMethod {
            CheckMethod::WhoApi
        }
    }

    fn pipeline(
        outcome: GenerationOutcome,
        available: &[&str],
        result_budget: usize,
    ) -> (DomainPipeline, Arc<RecordingLookup>) {
        let lookup = Arc::new(RecordingLookup {
            available: available.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        });
        let generator = CandidateGenerator::new(Arc::new(FixedNames {
            outcome,
            delay: Duration::ZERO,
        }));
        let resolver = AvailabilityResolver::new(lookup.clone(), CheckConfig::default());
        let config = PipelineConfig {
            result_budget,
            lookup_delay: Duration::ZERO,
            ..PipelineConfig::default()
        };
        (DomainPipeline::new(generator, resolver, config), lookup)
    }

    fn names(items: &[&str]) -> GenerationOutcome {
        GenerationOutcome::Names(items.iter().map(|s| s.to_string()).collect())
    }

    fn tlds(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_both_names_fully_available() {
        let (pipeline, _) = pipeline(
            names(&["novahive", "brightloom"]),
            &["novahive.com", "novahive.io", "brightloom.com", "brightloom.io"],
            2,
        );

        let recs = pipeline.run("a prompt", &tlds(&[".com", ".io"])).await.unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].site_name, "novahive");
        assert_eq!(recs[0].tlds, tlds(&[".com", ".io"]));
        assert!(recs[0].link.ends_with("?domain=novahive"));
        assert_eq!(recs[1].site_name, "brightloom");
        assert!(recs[1].link.ends_with("?domain=brightloom"));
    }

    #[tokio::test]
    async fn test_budget_of_one_stops_after_first_hit() {
        let (pipeline, lookup) = pipeline(
            names(&["first1", "second", "third3", "fourth", "fifth5"]),
            &["first1.com", "second.com"],
            1,
        );

        let recs = pipeline.run("a prompt", &tlds(&[".com"])).await.unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].site_name, "first1");
        assert_eq!(lookup.count.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.calls.lock().as_slice(), ["first1.com".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_generation_skips_resolver() {
        let (pipeline, lookup) = pipeline(GenerationOutcome::Empty(EmptyReason::NoChoices), &[], 3);

        let recs = pipeline.run("a prompt", &tlds(&[".com"])).await.unwrap();

        assert!(recs.is_empty());
        assert_eq!(lookup.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_order_follows_rank_not_alphabet() {
        let (pipeline, _) = pipeline(
            names(&["zephyrly", "mangoleaf", "applebyte"]),
            &["zephyrly.io", "applebyte.com", "applebyte.io"],
            3,
        );

        let recs = pipeline.run("a prompt", &tlds(&[".com", ".io"])).await.unwrap();

        let order: Vec<_> = recs.iter().map(|r| r.site_name.as_str()).collect();
        assert_eq!(order, ["zephyrly", "applebyte"]);
        assert_eq!(recs[0].tlds, tlds(&[".io"]));
        assert_eq!(recs[1].tlds, tlds(&[".com", ".io"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded() {
        let generator = CandidateGenerator::new(Arc::new(FixedNames {
            outcome: names(&["novahive"]),
            delay: Duration::from_secs(120),
        }));
        let resolver = AvailabilityResolver::new(Arc::new(RecordingLookup::default()), CheckConfig::default());
        let config = PipelineConfig {
            request_deadline: Duration::from_secs(5),
            ..PipelineConfig::default()
        };

        let result = DomainPipeline::new(generator, resolver, config)
            .run("a prompt", &tlds(&[".com"]))
            .await;

        assert!(matches!(result, Err(DomainSuggestError::Timeout { .. })));
    }
}
