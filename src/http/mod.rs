//! HTTP boundary: `POST /domains` plus a health probe.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::app_router;

use crate::domain::DomainValidator;
use crate::pipeline::DomainPipeline;
use crate::types::PerformanceMetrics;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: DomainPipeline,
    pub validator: DomainValidator,
    pub metrics: Arc<PerformanceMetrics>,
}

impl AppState {
    pub fn new(pipeline: DomainPipeline, metrics: Arc<PerformanceMetrics>) -> Self {
        Self {
            pipeline,
            validator: DomainValidator::new(),
            metrics,
        }
    }
}
