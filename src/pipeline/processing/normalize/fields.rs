use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::pipeline::processing::eligibility::json_kind;

type Result<T> = std::result::Result<T, ValidationError>;

/// Typed access to one JSON object of a raw record.
///
/// Every error carries the dotted path of the offending field. `null` is
/// treated the same as an absent key.
pub(crate) struct Fields<'a> {
    obj: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> Fields<'a> {
    pub fn root(value: &'a Value) -> Result<Self> {
        Self::from_value(value, String::new(), "<record>")
    }

    fn from_value(value: &'a Value, prefix: String, label: &str) -> Result<Self> {
        match value {
            Value::Object(obj) => Ok(Self { obj, prefix }),
            other => Err(wrong_type(label.to_string(), "object", other)),
        }
    }

    pub fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    pub fn require(&self, key: &str) -> Result<&'a Value> {
        self.get(key).ok_or_else(|| ValidationError::MissingField(self.path(key)))
    }

    pub fn object(&self, key: &str) -> Result<Fields<'a>> {
        let path = self.path(key);
        Fields::from_value(self.require(key)?, path.clone(), &path)
    }

    pub fn array(&self, key: &str) -> Result<&'a [Value]> {
        match self.require(key)? {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(wrong_type(self.path(key), "array", other)),
        }
    }

    /// Trimmed string; may be empty.
    pub fn string(&self, key: &str) -> Result<String> {
        match self.require(key)? {
            Value::String(s) => Ok(s.trim().to_string()),
            other => Err(wrong_type(self.path(key), "string", other)),
        }
    }

    pub fn optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
            Some(other) => Err(wrong_type(self.path(key), "string", other)),
        }
    }

    pub fn non_empty_string(&self, key: &str) -> Result<String> {
        let s = self.string(key)?;
        if s.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: self.path(key),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(s)
    }

    /// A JSON number or a numeric string; non-finite values are rejected.
    pub fn number(&self, key: &str) -> Result<f64> {
        let value = self.require(key)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|n| n.is_finite())
            .ok_or_else(|| wrong_type(self.path(key), "number", value))
    }

    pub fn number_in(&self, key: &str, min: f64, max: Option<f64>) -> Result<f64> {
        let n = self.number(key)?;
        let in_range = n >= min && max.map_or(true, |max| n <= max);
        if !in_range {
            return Err(ValidationError::OutOfRange {
                field: self.path(key),
                value: n.to_string(),
                range: range_label(min, max),
            });
        }
        Ok(n)
    }

    /// A JSON integer or an integral numeric string.
    pub fn integer(&self, key: &str) -> Result<i64> {
        let value = self.require(key)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        };
        parsed.ok_or_else(|| wrong_type(self.path(key), "integer", value))
    }

    pub fn integer_in(&self, key: &str, min: i64, max: Option<i64>) -> Result<i64> {
        let n = self.integer(key)?;
        let in_range = n >= min && max.map_or(true, |max| n <= max);
        if !in_range {
            return Err(ValidationError::OutOfRange {
                field: self.path(key),
                value: n.to_string(),
                range: match max {
                    Some(max) => format!("{min}..={max}"),
                    None => format!("{min}.."),
                },
            });
        }
        Ok(n)
    }

    /// Array of strings, each trimmed; blank entries are dropped.
    pub fn string_list(&self, key: &str) -> Result<Vec<String>> {
        self.array(key)?
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item {
                Value::String(s) if s.trim().is_empty() => None,
                Value::String(s) => Some(Ok(s.trim().to_string())),
                other => Some(Err(wrong_type(format!("{}[{}]", self.path(key), i), "string", other))),
            })
            .collect()
    }

    /// Array of labels parsed into a categorical enum.
    pub fn label_list<T: FromStr<Err = String>>(&self, key: &str) -> Result<Vec<T>> {
        let path = self.path(key);
        self.string_list(key)?
            .iter()
            .enumerate()
            .map(|(i, label)| {
                label.parse::<T>().map_err(|reason| ValidationError::InvalidValue {
                    field: format!("{path}[{i}]"),
                    reason,
                })
            })
            .collect()
    }
}

/// `f` as an integer when it has no fractional part and fits exactly.
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

pub(crate) fn wrong_type(field: String, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::WrongType {
        field,
        expected,
        found: json_kind(found),
    }
}

fn range_label(min: f64, max: Option<f64>) -> String {
    match max {
        Some(max) => format!("{min}..={max}"),
        None => format!("{min}.."),
    }
}
