use serde_json::{Map, Value};

use crate::domain::EligibilityCriterion;
use crate::error::ConversionError;

/// `eligibility_criteria` as it arrives from any origin.
///
/// Generated and hand-entered records already carry pairs; migrated legacy
/// documents carry a mapping from course name to requirement text.
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityInput {
    Pairs(Vec<EligibilityCriterion>),
    /// Mapping entries in document order.
    Legacy(Vec<(String, String)>),
}

impl EligibilityInput {
    pub fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Object(map) => Self::from_mapping(map),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| pair_from_value(index, item))
                .collect::<Result<Vec<_>, _>>()
                .map(EligibilityInput::Pairs),
            other => Err(ConversionError::UnsupportedShape {
                found: json_kind(other),
            }),
        }
    }

    fn from_mapping(map: &Map<String, Value>) -> Result<Self, ConversionError> {
        map.iter()
            .map(|(course, text)| match text {
                Value::String(text) => Ok((course.clone(), text.clone())),
                _ => Err(ConversionError::NonTextRequirement { course: course.clone() }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(EligibilityInput::Legacy)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, EligibilityInput::Legacy(_))
    }

    pub fn into_canonical(self) -> Vec<EligibilityCriterion> {
        match self {
            EligibilityInput::Pairs(pairs) => pairs,
            EligibilityInput::Legacy(entries) => entries
                .into_iter()
                .map(|(name, required)| EligibilityCriterion { name, required })
                .collect(),
        }
    }
}

/// Accepts `{name, required}` and the generator's `{course, eligibility}`.
fn pair_from_value(index: usize, item: &Value) -> Result<EligibilityCriterion, ConversionError> {
    let obj = item.as_object().ok_or(ConversionError::MalformedPair { index })?;
    let text = |primary: &str, alias: &str| {
        obj.get(primary)
            .or_else(|| obj.get(alias))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match (text("name", "course"), text("required", "eligibility")) {
        (Some(name), Some(required)) => Ok(EligibilityCriterion { name, required }),
        _ => Err(ConversionError::MalformedPair { index }),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
