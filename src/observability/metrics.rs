//! Metrics for the institution pipeline
//!
//! Recording goes through the `metrics` facade. Nothing is exported unless
//! the embedding process installs a recorder.

use std::fmt;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Pipeline metrics
    RecordsNormalized,
    RecordsRejected,
    DuplicatesSkipped,
    ScoreValue,

    // Store metrics
    RecordsPersisted,
    PersistenceFailures,

    // Batch metrics
    BatchesProcessed,
    BatchSize,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RecordsNormalized => "institution_records_normalized_total",
            MetricName::RecordsRejected => "institution_records_rejected_total",
            MetricName::DuplicatesSkipped => "institution_duplicates_skipped_total",
            MetricName::ScoreValue => "institution_score",
            MetricName::RecordsPersisted => "institution_records_persisted_total",
            MetricName::PersistenceFailures => "institution_persistence_failures_total",
            MetricName::BatchesProcessed => "institution_batches_processed_total",
            MetricName::BatchSize => "institution_batch_size",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod pipeline {
    use super::MetricName;

    /// A record came out of normalization with a fresh score
    pub fn record_normalized(score: f64) {
        ::metrics::counter!(MetricName::RecordsNormalized.as_str()).increment(1);
        ::metrics::histogram!(MetricName::ScoreValue.as_str()).record(score);
    }

    /// A record was rejected; `kind` is the error label
    pub fn record_rejected(kind: &'static str) {
        ::metrics::counter!(MetricName::RecordsRejected.as_str(), "kind" => kind).increment(1);
    }

    pub fn duplicate_skipped() {
        ::metrics::counter!(MetricName::DuplicatesSkipped.as_str()).increment(1);
    }
}

pub mod store {
    use super::MetricName;

    pub fn record_persisted() {
        ::metrics::counter!(MetricName::RecordsPersisted.as_str()).increment(1);
    }

    pub fn persistence_failed() {
        ::metrics::counter!(MetricName::PersistenceFailures.as_str()).increment(1);
    }
}

pub mod batch {
    use super::MetricName;

    pub fn batch_processed(total_records: usize, stored: usize, duplicates: usize, failed: usize) {
        ::metrics::histogram!(MetricName::BatchSize.as_str()).record(total_records as f64);
        ::metrics::counter!(MetricName::BatchesProcessed.as_str(),
            "stored" => stored.to_string(),
            "duplicates" => duplicates.to_string(),
            "failed" => failed.to_string()
        )
        .increment(1);
    }
}
