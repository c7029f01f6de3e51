use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use crate::domain::InstitutionRecord;

/// Anything the dedupe gate can read an institution name from.
pub trait Named {
    fn institution_name(&self) -> Option<&str>;
}

impl Named for Value {
    fn institution_name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }
}

impl Named for InstitutionRecord {
    fn institution_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// A record dropped because its name was already seen in the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateName {
    /// Position of the dropped record in the input batch.
    pub index: usize,
    pub name: String,
}

/// Names seen so far in one ingestion run. Not shared between runs.
#[derive(Debug, Default)]
pub struct DedupeGate {
    seen: HashSet<String>,
}

impl DedupeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time a name is offered, `false` afterwards.
    ///
    /// Names compare exactly after trimming surrounding whitespace.
    pub fn admit(&mut self, name: &str) -> bool {
        self.seen.insert(name.trim().to_string())
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Offer the record at `index` to the gate.
    ///
    /// Returns the duplicate report when its name was already admitted in
    /// this run. Records whose name is missing or blank are never reported,
    /// so normalization can reject them.
    pub fn screen<T: Named>(&mut self, index: usize, record: &T) -> Option<DuplicateName> {
        let name = record.institution_name()?.trim();
        if name.is_empty() || self.admit(name) {
            return None;
        }
        warn!(index, name, "Duplicate institution skipped");
        crate::observability::metrics::pipeline::duplicate_skipped();
        Some(DuplicateName {
            index,
            name: name.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct DedupeOutcome<T> {
    pub kept: Vec<T>,
    pub duplicates: Vec<DuplicateName>,
}

/// Drop every record whose name already appeared earlier in `batch`.
///
/// First occurrence wins and input order is preserved. Records without a
/// readable name are kept so that normalization can report them.
pub fn dedupe_gate<T: Named>(batch: Vec<T>) -> DedupeOutcome<T> {
    let mut gate = DedupeGate::new();
    let mut kept = Vec::with_capacity(batch.len());
    let mut duplicates = Vec::new();

    for (index, record) in batch.into_iter().enumerate() {
        match gate.screen(index, &record) {
            Some(duplicate) => duplicates.push(duplicate),
            None => kept.push(record),
        }
    }

    DedupeOutcome { kept, duplicates }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_occurrence_wins() {
        let batch = vec![
            json!({"name": "A University", "rating": 1.0}),
            json!({"name": "B College"}),
            json!({"name": "A University", "rating": 4.0}),
        ];

        let outcome = dedupe_gate(batch);
        let names: Vec<_> = outcome.kept.iter().filter_map(|r| r.institution_name()).collect();
        assert_eq!(names, vec!["A University", "B College"]);
        assert_eq!(outcome.kept[0]["rating"], json!(1.0));
        assert_eq!(
            outcome.duplicates,
            vec![DuplicateName {
                index: 2,
                name: "A University".to_string()
            }]
        );
    }

    #[test]
    fn test_unnamed_records_pass_through() {
        let outcome = dedupe_gate(vec![json!({"type": "Private"}), json!({"type": "Private"})]);
        assert_eq!(outcome.kept.len(), 2);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_blank_names_are_left_for_normalization() {
        let outcome = dedupe_gate(vec![json!({"name": "  "}), json!({"name": ""}), json!({"name": " "})]);
        assert_eq!(outcome.kept.len(), 3);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_screen_reports_trimmed_name() {
        let mut gate = DedupeGate::new();
        assert_eq!(gate.screen(0, &json!({"name": "B College"})), None);
        assert_eq!(
            gate.screen(4, &json!({"name": " B College  "})),
            Some(DuplicateName {
                index: 4,
                name: "B College".to_string()
            })
        );
        assert_eq!(gate.seen_count(), 1);
    }

    #[test]
    fn test_gate_is_scoped_to_one_call() {
        let first = dedupe_gate(vec![json!({"name": "A University"})]);
        let second = dedupe_gate(vec![json!({"name": "A University"})]);
        assert_eq!(first.kept.len(), 1);
        assert_eq!(second.kept.len(), 1);
    }

    #[test]
    fn test_names_are_trimmed_but_case_sensitive() {
        let mut gate = DedupeGate::new();
        assert!(gate.admit("A University"));
        assert!(!gate.admit(" A University "));
        assert!(gate.admit("a university"));
        assert_eq!(gate.seen_count(), 2);
    }
}
