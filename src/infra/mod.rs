// Adapters for collaborators outside the pipeline

pub mod ndjson_storage;

pub use ndjson_storage::NdjsonStorage;
