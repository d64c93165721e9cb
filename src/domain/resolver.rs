//! Availability resolution over candidates × TLDs
//!
//! Candidates are visited in rank order and, for each one, the requested TLDs
//! in caller order. Once `limit` distinct candidates have at least one free
//! TLD, resolution stops and no further lookups are issued.
//!
//! With `concurrency > 1` a window of candidates is checked at once and the
//! window is then folded in rank order with the same stopping rule, so the
//! resulting map is identical to the sequential one.

use crate::domain::AvailabilityLookup;
use crate::types::{AvailabilityStatus, CheckConfig, InconclusiveLookup, PerformanceMetrics};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;

/// Candidates mapped to the TLDs found free for them, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityMap {
    entries: Vec<(String, Vec<String>)>,
    inconclusive: Vec<InconclusiveLookup>,
    queries: usize,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tld` as available for `name`, creating the entry on first use.
    pub fn insert(&mut self, name: &str, tld: &str) {
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, tlds)) => tlds.push(tld.to_string()),
            None => self.entries.push((name.to_string(), vec![tld.to_string()])),
        }
    }

    /// Number of distinct candidates with at least one available TLD
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups that failed or gave no verdict. They never populate the map.
    pub fn inconclusive(&self) -> &[InconclusiveLookup] {
        &self.inconclusive
    }

    /// Total lookups issued while building this map
    pub fn queries(&self) -> usize {
        self.queries
    }

    pub fn into_entries(self) -> Vec<(String, Vec<String>)> {
        self.entries
    }
}

#[cfg(test)]
impl AvailabilityMap {
    fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, tlds)| tlds.as_slice())
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, tlds)| (name.as_str(), tlds.as_slice()))
    }
}

/// Verdict for one (candidate, TLD) pair
#[derive(Debug)]
struct PairCheck {
    tld: String,
    domain: String,
    status: AvailabilityStatus,
    reason: Option<String>,
}

/// Resolves availability for a ranked candidate list
#[derive(Clone)]
pub struct AvailabilityResolver {
    lookup: Arc<dyn AvailabilityLookup>,
    config: CheckConfig,
    metrics: Arc<PerformanceMetrics>,
}

impl AvailabilityResolver {
    pub fn new(lookup: Arc<dyn AvailabilityLookup>, config: CheckConfig) -> Self {
        Self::with_metrics(lookup, config, Arc::new(PerformanceMetrics::new()))
    }

    pub fn with_metrics(
        lookup: Arc<dyn AvailabilityLookup>,
        config: CheckConfig,
        metrics: Arc<PerformanceMetrics>,
    ) -> Self {
        Self {
            lookup,
            config,
            metrics,
        }
    }

    /// Resolve availability until `limit` candidates are satisfied or the
    /// candidates run out.
    pub async fn resolve(&self, candidates: &[String], tlds: &[String], limit: usize) -> AvailabilityMap {
        let mut map = AvailabilityMap::new();
        if candidates.is_empty() || tlds.is_empty() || limit == 0 {
            return map;
        }

        let start = Instant::now();
        let in_flight = self.config.concurrency.max(1);
        let window = (in_flight / tlds.len()).max(1);

        'windows: for chunk in candidates.chunks(window) {
            let checks = self.check_window(chunk, tlds, in_flight).await;
            map.queries += checks.len();

            // `checks` is in (candidate, tld) order, tlds.len() per candidate.
            for (name, pairs) in chunk.iter().zip(checks.chunks(tlds.len())) {
                for pair in pairs {
                    match pair.status {
                        AvailabilityStatus::Available => map.insert(name, &pair.tld),
                        AvailabilityStatus::Taken => {}
                        AvailabilityStatus::Unknown => map.inconclusive.push(InconclusiveLookup {
                            domain: pair.domain.clone(),
                            reason: pair.reason.clone().unwrap_or_else(|| "no verdict".to_string()),
                            checked_at: Utc::now(),
                        }),
                    }
                }

                if map.len() >= limit {
                    tracing::debug!(limit, candidate = %name, "Result budget reached, stopping early");
                    break 'windows;
                }
            }
        }

        tracing::info!(
            method = %self.lookup.method_name(),
            candidates = candidates.len(),
            tlds = tlds.len(),
            queries = map.queries(),
            found = map.len(),
            inconclusive = map.inconclusive().len(),
            duration_ms = %start.elapsed().as_millis(),
            "Availability resolution completed"
        );

        map
    }

    /// Check every TLD of every candidate in `chunk`, at most `in_flight`
    /// lookups at a time. Output order matches input order.
    async fn check_window(&self, chunk: &[String], tlds: &[String], in_flight: usize) -> Vec<PairCheck> {
        // Owned pairs: borrowed closure arguments make the future non-`Send`.
        let pairs: Vec<(String, String)> = chunk
            .iter()
            .flat_map(|name| tlds.iter().map(move |tld| (name.clone(), tld.clone())))
            .collect();

        stream::iter(pairs)
            .map(|(name, tld)| async move { self.check_pair(&name, &tld).await })
            .buffered(in_flight)
            .collect()
            .await
    }

    async fn check_pair(&self, name: &str, tld: &str) -> PairCheck {
        let domain = format!("{}{}", name, tld);
        let start = Instant::now();
        self.metrics.increment_lookups();

        let outcome = timeout(self.config.timeout, self.lookup.check_domain(&domain)).await;
        let duration = start.elapsed();
        self.metrics.add_lookup_time(duration.as_millis() as u64);

        let (status, reason) = match outcome {
            Ok(Ok(AvailabilityStatus::Unknown)) => {
                (AvailabilityStatus::Unknown, Some("lookup returned no verdict".to_string()))
            }
            Ok(Ok(status)) => (status, None),
            Ok(Err(e)) => (AvailabilityStatus::Unknown, Some(e.to_string())),
            Err(_) => (
                AvailabilityStatus::Unknown,
                Some(format!("timed out after {}s", self.config.timeout.as_secs())),
            ),
        };

        if status == AvailabilityStatus::Unknown {
            self.metrics.increment_inconclusive();
            tracing::warn!(
                domain = %domain,
                reason = reason.as_deref().unwrap_or_default(),
                duration_ms = %duration.as_millis(),
                "Availability lookup inconclusive, treating as unavailable"
            );
        } else {
            tracing::debug!(
                domain = %domain,
                status = %status,
                duration_ms = %duration.as_millis(),
                "Domain check completed"
            );
        }

        PairCheck {
            tld: tld.to_string(),
            domain,
            status,
            reason,
        }
    }
}
