//! Unified data loading service for CLI and TUI
//!
//! Fetches one batch from a record source and aggregates it. Both the
//! report command and the dashboard go through here.

use std::sync::Arc;

use tracing::info;

use crate::services::{Aggregator, RecordSource};
use crate::types::{Result, Summaries};

/// Result of loading one batch
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Display name of the source the batch came from
    pub source: String,
    pub summaries: Summaries,
}

/// Unified data loading service
#[derive(Clone)]
pub struct DataLoaderService {
    source: Arc<dyn RecordSource>,
}

impl DataLoaderService {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch a batch and compute all summaries
    pub fn load(&self) -> Result<LoadResult> {
        let records = self.source.fetch()?;
        let summaries = Aggregator::summarize_all(&records);
        info!(
            source = self.source.name(),
            records = summaries.record_count,
            countries = summaries.countries.len(),
            "aggregated batch"
        );

        Ok(LoadResult {
            source: self.source.name().to_string(),
            summaries,
        })
    }
}
