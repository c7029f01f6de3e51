use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::RecordError;
use crate::pipeline::processing::dedupe::{DedupeGate, DuplicateName, Named};
use crate::pipeline::processing::normalize::{DefaultNormalizer, NormalizeConfig, Normalizer};
use crate::storage::{Storage, StoredInstitution};

/// A record that did not make it into the store, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Position in the input batch
    pub index: usize,
    /// The institution name, or `#<index>` when the record has none
    pub identifier: String,
    pub error: RecordError,
}

/// Result of one ingestion run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total_records: usize,
    pub stored: Vec<StoredInstitution>,
    pub duplicates: Vec<DuplicateName>,
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    pub fn stored_count(&self) -> usize {
        self.stored.len()
    }

    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.failures.is_empty()
    }
}

/// Use case for running a batch of raw records through dedupe, normalization and storage
pub struct IngestUseCase {
    normalizer: Box<dyn Normalizer + Send + Sync>,
    storage: Arc<dyn Storage>,
}

impl IngestUseCase {
    pub fn new(normalizer: Box<dyn Normalizer + Send + Sync>, storage: Arc<dyn Storage>) -> Self {
        Self { normalizer, storage }
    }

    /// Create a use case with the default normalizer
    pub fn with_default_normalizer(config: NormalizeConfig, storage: Arc<dyn Storage>) -> Self {
        Self::new(Box::new(DefaultNormalizer::new(config)), storage)
    }

    /// Process one ingestion run. A bad record never stops the rest of the batch.
    #[instrument(skip_all, fields(batch_size = raws.len()))]
    pub async fn process_batch(&self, raws: &[Value]) -> BatchReport {
        let mut gate = DedupeGate::new();
        let mut report = BatchReport {
            total_records: raws.len(),
            ..BatchReport::default()
        };

        for (index, raw) in raws.iter().enumerate() {
            let identifier = raw
                .institution_name()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{index}"));

            if let Some(duplicate) = gate.screen(index, raw) {
                report.duplicates.push(duplicate);
                continue;
            }

            let record = match self.normalizer.normalize(raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!(index, institution = %identifier, error = %e, "Record rejected");
                    crate::observability::metrics::pipeline::record_rejected(e.kind());
                    report.failures.push(RecordFailure { index, identifier, error: e });
                    continue;
                }
            };
            crate::observability::metrics::pipeline::record_normalized(record.score);

            match self.storage.insert(&record).await {
                Ok(stored) => {
                    info!(index, institution = %identifier, id = %stored.id, score = record.score, "Institution stored");
                    crate::observability::metrics::store::record_persisted();
                    report.stored.push(stored);
                }
                Err(e) => {
                    error!(index, institution = %identifier, error = %e, "Failed to store institution");
                    crate::observability::metrics::store::persistence_failed();
                    report.failures.push(RecordFailure {
                        index,
                        identifier,
                        error: RecordError::Persistence(e.to_string()),
                    });
                }
            }
        }

        crate::observability::metrics::batch::batch_processed(
            report.total_records,
            report.stored.len(),
            report.duplicates.len(),
            report.failures.len(),
        );
        info!(
            stored = report.stored.len(),
            duplicates = report.duplicates.len(),
            failed = report.failures.len(),
            "Batch processed"
        );
        report
    }
}
