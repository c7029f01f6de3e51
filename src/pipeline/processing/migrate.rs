use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::ConversionError;
use crate::pipeline::processing::eligibility::{json_kind, EligibilityInput};

/// Outcome of rewriting a legacy document set.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub converted: usize,
    pub untouched: usize,
    pub failures: Vec<(usize, ConversionError)>,
}

/// Rewrite a legacy `eligibility_criteria` mapping in place as pairs.
///
/// Returns whether the document changed. Documents that already hold pairs,
/// or have no criteria at all, are left alone.
pub fn migrate_document(document: &mut Value) -> Result<bool, ConversionError> {
    let found = json_kind(document);
    let Some(obj) = document.as_object_mut() else {
        return Err(ConversionError::UnsupportedShape { found });
    };
    let Some(criteria) = obj.get_mut("eligibility_criteria") else {
        return Ok(false);
    };

    let pairs = match &*criteria {
        Value::Null | Value::Array(_) => return Ok(false),
        Value::Object(_) => EligibilityInput::from_value(criteria)?.into_canonical(),
        other => {
            return Err(ConversionError::UnsupportedShape {
                found: json_kind(other),
            })
        }
    };
    *criteria = Value::Array(
        pairs
            .into_iter()
            .map(|pair| json!({"name": pair.name, "required": pair.required}))
            .collect(),
    );
    Ok(true)
}

/// Migrate every document; a failing document is reported and left as is.
pub fn migrate_batch(documents: &mut [Value]) -> MigrationReport {
    let mut report = MigrationReport::default();
    for (index, document) in documents.iter_mut().enumerate() {
        match migrate_document(document) {
            Ok(true) => {
                debug!(index, "Converted legacy eligibility mapping");
                report.converted += 1;
            }
            Ok(false) => report.untouched += 1,
            Err(e) => {
                warn!(index, error = %e, "Could not migrate eligibility criteria");
                report.failures.push((index, e));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_becomes_pairs_and_rest_is_untouched() {
        let mut doc = json!({
            "name": "Rao Institute University",
            "rating": "3.9",
            "eligibility_criteria": {"MTech": "BTech in relevant field", "BCom": "10+2 with any stream"}
        });
        assert!(migrate_document(&mut doc).unwrap());
        assert_eq!(
            doc,
            json!({
                "name": "Rao Institute University",
                "rating": "3.9",
                "eligibility_criteria": [
                    {"name": "MTech", "required": "BTech in relevant field"},
                    {"name": "BCom", "required": "10+2 with any stream"}
                ]
            })
        );
    }

    #[test]
    fn test_batch_reports_each_outcome() {
        let mut docs = vec![
            json!({"eligibility_criteria": {"MBA": "Any stream"}}),
            json!({"eligibility_criteria": [{"name": "MBA", "required": "Any stream"}]}),
            json!({"eligibility_criteria": "see website"}),
            json!({"name": "No criteria"}),
        ];
        let report = migrate_batch(&mut docs);
        assert_eq!(report.converted, 1);
        assert_eq!(report.untouched, 2);
        assert_eq!(report.failures, vec![(2, ConversionError::UnsupportedShape { found: "string" })]);
        assert_eq!(docs[2]["eligibility_criteria"], json!("see website"));
    }
}
