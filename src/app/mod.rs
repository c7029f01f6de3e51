pub mod ingest_use_case;

pub use ingest_use_case::{BatchReport, IngestUseCase, RecordFailure};
