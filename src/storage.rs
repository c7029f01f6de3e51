use crate::domain::InstitutionRecord;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// A canonical record as held by a store, with the identifiers the store assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredInstitution {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub record: InstitutionRecord,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl StoredInstitution {
    pub fn new(record: InstitutionRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            record,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Storage trait for persisting canonical institution records
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store one record and return the stored document.
    async fn insert(&self, record: &InstitutionRecord) -> Result<StoredInstitution>;

    /// Read a stored document back by id.
    async fn get(&self, id: Uuid) -> Result<Option<StoredInstitution>>;

    /// All stored documents in insertion order.
    async fn list(&self) -> Result<Vec<StoredInstitution>>;
}

/// In-memory storage implementation for dry runs and testing
#[derive(Default)]
pub struct InMemoryStorage {
    documents: Arc<Mutex<Vec<StoredInstitution>>>,
    by_id: Arc<Mutex<HashMap<Uuid, usize>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> PipelineError {
    PipelineError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert(&self, record: &InstitutionRecord) -> Result<StoredInstitution> {
        let stored = StoredInstitution::new(record.clone());

        let mut documents = self.documents.lock().map_err(poisoned)?;
        let mut by_id = self.by_id.lock().map_err(poisoned)?;
        by_id.insert(stored.id, documents.len());
        documents.push(stored.clone());

        debug!("Stored institution: {} with id {}", stored.record.name, stored.id);
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredInstitution>> {
        let documents = self.documents.lock().map_err(poisoned)?;
        let by_id = self.by_id.lock().map_err(poisoned)?;
        Ok(by_id.get(&id).and_then(|&i| documents.get(i)).cloned())
    }

    async fn list(&self) -> Result<Vec<StoredInstitution>> {
        Ok(self.documents.lock().map_err(poisoned)?.clone())
    }
}
