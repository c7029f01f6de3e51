use crate::domain::InstitutionRecord;
use crate::error::Result;
use crate::storage::{Storage, StoredInstitution};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// File-based implementation of Storage
/// Appends one JSON document per line and re-reads the file for lookups
pub struct NdjsonStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl NdjsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        info!("Institution store: {}", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a document file; a missing file is an empty store.
pub async fn read_documents(path: &Path) -> Result<Vec<StoredInstitution>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<StoredInstitution>(line).map_err(Into::into))
        .collect()
}

#[async_trait]
impl Storage for NdjsonStorage {
    async fn insert(&self, record: &InstitutionRecord) -> Result<StoredInstitution> {
        let stored = StoredInstitution::new(record.clone());
        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended institution {} as {}", stored.record.name, stored.id);
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredInstitution>> {
        Ok(read_documents(&self.path).await?.into_iter().find(|doc| doc.id == id))
    }

    async fn list(&self) -> Result<Vec<StoredInstitution>> {
        read_documents(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{normalize, NormalizeConfig};
    use serde_json::json;
    use tempfile::tempdir;

    fn record(name: &str) -> InstitutionRecord {
        let raw = json!({
            "name": name,
            "type": "Government",
            "location": {"city": "Delhi", "state": "Delhi", "country": "India", "pincode": "110001"},
            "established_year": 1961,
            "accreditation": "NAAC A+",
            "total_students": 9000,
            "required_documents": ["12th Marksheet"],
            "contact_info": {"email": "", "phone": "", "address": "", "website": ""},
            "courses_offered": [{"name": "BTech", "duration": 4, "annual_fees": 25000}],
            "eligibility_criteria": {"BTech": "10+2 with PCM"},
            "acceptance_exams": ["JEE Main"],
            "top_recruiters": [],
            "placements": {"average_salary": 9.2, "highest_salary": 48.0, "placement_rate": 95},
            "image_url": "https://images.pexels.com/photos/3825586/pexels-photo-3825586.jpeg",
            "rating": 4.8,
            "field_taught": ["engineering"]
        });
        normalize(&raw, &NormalizeConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_inserted_documents_are_echoed_back() {
        let dir = tempdir().unwrap();
        let store = NdjsonStorage::new(dir.path().join("nested/institutions.ndjson")).unwrap();

        let first = store.insert(&record("Iyer Institute University")).await.unwrap();
        let second = store.insert(&record("Bose Group University")).await.unwrap();

        let echoed = store.get(first.id).await.unwrap().unwrap();
        assert_eq!(echoed, first);
        assert_eq!(echoed.record.eligibility_criteria[0].name, "BTech");

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn test_documents_carry_storage_fields() {
        let dir = tempdir().unwrap();
        let store = NdjsonStorage::new(dir.path().join("institutions.ndjson")).unwrap();
        store.insert(&record("Rao Industries University")).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert!(doc["_id"].is_string());
        assert!(doc["createdAt"].is_string());
        assert_eq!(doc["type"], json!("Government"));
        assert_eq!(doc["score"], json!(2008.0));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_empty_store() {
        let dir = tempdir().unwrap();
        let store = NdjsonStorage::new(dir.path().join("absent.ndjson")).unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
