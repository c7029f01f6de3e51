mod fields;

use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::constants::{MAX_PLACEMENT_RATE, MAX_RATING, MIN_ESTABLISHED_YEAR};
use crate::domain::{
    AcceptanceExam, ContactInfo, Course, Discipline, EligibilityCriterion, InstitutionRecord, InstitutionType,
    Location, Placements,
};
use crate::error::{RecordError, ValidationError};
use crate::pipeline::processing::eligibility::EligibilityInput;
use crate::pipeline::processing::score::{compute_score, ScoreMode};
use fields::{wrong_type, Fields};

/// Settings that change how raw records are validated and scored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeConfig {
    pub score_mode: ScoreMode,
    pub min_established_year: i32,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            score_mode: ScoreMode::Floor,
            min_established_year: MIN_ESTABLISHED_YEAR,
        }
    }
}

/// Trait for turning a raw institution document into a canonical record
pub trait Normalizer {
    fn normalize(&self, raw: &Value) -> Result<InstitutionRecord, RecordError>;
}

/// Normalizer shared by the generator, manual-entry and legacy origins
#[derive(Debug, Clone, Default)]
pub struct DefaultNormalizer {
    pub config: NormalizeConfig,
}

impl DefaultNormalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }
}

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, raw: &Value) -> Result<InstitutionRecord, RecordError> {
        normalize(raw, &self.config)
    }
}

/// Validate a raw document, convert legacy eligibility, and attach a fresh score.
///
/// Any `score` already present in `raw` is ignored.
pub fn normalize(raw: &Value, config: &NormalizeConfig) -> Result<InstitutionRecord, RecordError> {
    let root = Fields::root(raw)?;

    let name = root.non_empty_string("name")?;
    let kind = root.string("type")?.parse::<InstitutionType>().map_err(|reason| ValidationError::InvalidValue {
        field: "type".to_string(),
        reason,
    })?;

    let location = read_location(&root)?;
    let current_year = i64::from(Utc::now().year());
    let established_year =
        root.integer_in("established_year", i64::from(config.min_established_year), Some(current_year))? as i32;
    let accreditation = root.string("accreditation")?;
    let total_students = root.integer_in("total_students", 0, None)? as u64;

    let required_documents = root.string_list("required_documents")?;
    if required_documents.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "required_documents".to_string(),
            reason: "must list at least one document".to_string(),
        }
        .into());
    }

    let contact = root.object("contact_info")?;
    let contact_info = ContactInfo {
        email: contact.string("email")?,
        phone: contact.string("phone")?,
        address: contact.string("address")?,
        website: contact.string("website")?,
    };

    let courses = read_courses(&root)?;
    let eligibility_criteria = read_eligibility(&root)?;

    let acceptance_exams = root.label_list::<AcceptanceExam>("acceptance_exams")?;
    let top_recruiters = root.string_list("top_recruiters")?;

    let placement_fields = root.object("placements")?;
    let placements = Placements {
        average_salary: placement_fields.number_in("average_salary", 0.0, None)?,
        highest_salary: placement_fields.number_in("highest_salary", 0.0, None)?,
        placement_rate: placement_fields.number_in("placement_rate", 0.0, Some(MAX_PLACEMENT_RATE))?,
    };

    let image_url = root.string("image_url")?;
    let lower = image_url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ValidationError::InvalidValue {
            field: "image_url".to_string(),
            reason: format!("{image_url:?} is not an http(s) URL"),
        }
        .into());
    }

    let rating = root.number_in("rating", 0.0, Some(MAX_RATING))?;
    let field_taught = root.label_list::<Discipline>("field_taught")?;

    let admission_process = match root.optional_string("admission_process")? {
        Some(text) if !text.is_empty() => text,
        _ => admission_template(&name, &acceptance_exams),
    };

    let score = compute_score(&placements, rating, config.score_mode);

    Ok(InstitutionRecord {
        name,
        kind,
        location,
        established_year,
        accreditation,
        total_students,
        admission_process,
        required_documents,
        contact_info,
        courses_offered: courses.into_iter().map(|(course, _)| course).collect(),
        eligibility_criteria,
        acceptance_exams,
        top_recruiters,
        placements,
        image_url,
        rating,
        field_taught,
        score,
    })
}

/// Re-run normalization over an already canonical record.
pub fn renormalize(record: &InstitutionRecord, config: &NormalizeConfig) -> Result<InstitutionRecord, RecordError> {
    let raw = serde_json::to_value(record).map_err(|e| ValidationError::InvalidValue {
        field: "<record>".to_string(),
        reason: e.to_string(),
    })?;
    normalize(&raw, config)
}

/// Standard admission text used when a record does not supply its own.
pub fn admission_template(name: &str, exams: &[AcceptanceExam]) -> String {
    let exams = exams.iter().map(AcceptanceExam::label).collect::<Vec<_>>().join(", ");
    format!(
        "The admission process at {name} is merit-based and considers the following criteria:\n\n\
         - Academic performance in 10+2 or equivalent examination\n\
         - Valid entrance examination scores ({exams})\n\
         - Counselling and seat allocation process\n\
         - Document verification and fee payment\n"
    )
}

fn read_location(root: &Fields<'_>) -> Result<Location, ValidationError> {
    let location = root.object("location")?;
    let pincode = match location.require("pincode")? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.is_u64() => n.to_string(),
        other => return Err(wrong_type(location.path("pincode"), "string", other)),
    };
    if pincode.is_empty() || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidValue {
            field: location.path("pincode"),
            reason: format!("{pincode:?} is not a numeric postal code"),
        });
    }
    Ok(Location {
        city: location.string("city")?,
        state: location.string("state")?,
        country: location.string("country")?,
        pincode,
    })
}

/// Courses paired with any per-course eligibility text (manual-entry shape).
fn read_courses(root: &Fields<'_>) -> Result<Vec<(Course, Option<String>)>, ValidationError> {
    root.array("courses_offered")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = format!("{}[{}]", root.path("courses_offered"), i);
            let course = match item {
                Value::Object(_) => Fields::root(item).map_err(|_| wrong_type(label.clone(), "object", item))?,
                other => return Err(wrong_type(label, "object", other)),
            };
            let prefixed = |e: ValidationError| prefix_error(&label, e);
            let fees_key = if course.get("annual_fees").is_some() { "annual_fees" } else { "fee" };
            let duration = course.number("duration").map_err(prefixed)?;
            if duration <= 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: format!("{label}.duration"),
                    value: duration.to_string(),
                    range: "> 0".to_string(),
                });
            }
            let parsed = Course {
                name: course.non_empty_string("name").map_err(prefixed)?,
                duration,
                annual_fees: course
                    .number_in(fees_key, 0.0, None)
                    .map_err(|e| match e {
                        ValidationError::MissingField(_) => ValidationError::MissingField(format!("{label}.annual_fees")),
                        other => prefix_error(&label, other),
                    })?,
            };
            let eligibility = course.optional_string("eligibility").map_err(prefixed)?;
            Ok((parsed, eligibility))
        })
        .collect()
}

fn read_eligibility(root: &Fields<'_>) -> Result<Vec<EligibilityCriterion>, RecordError> {
    if let Some(value) = root.get("eligibility_criteria") {
        return Ok(EligibilityInput::from_value(value)?.into_canonical());
    }

    // Manual entry records the requirement on each course instead.
    let courses = read_courses(root)?;
    if !courses.is_empty() && courses.iter().all(|(_, text)| text.is_some()) {
        return Ok(courses
            .into_iter()
            .filter_map(|(course, text)| text.map(|required| EligibilityCriterion::new(course.name, required)))
            .collect());
    }
    Err(ValidationError::MissingField("eligibility_criteria".to_string()).into())
}

/// Course fields are read through a root-level reader; re-anchor their paths.
fn prefix_error(label: &str, error: ValidationError) -> ValidationError {
    let anchor = |field: String| format!("{label}.{field}");
    match error {
        ValidationError::MissingField(field) => ValidationError::MissingField(anchor(field)),
        ValidationError::WrongType { field, expected, found } => ValidationError::WrongType {
            field: anchor(field),
            expected,
            found,
        },
        ValidationError::OutOfRange { field, value, range } => ValidationError::OutOfRange {
            field: anchor(field),
            value,
            range,
        },
        ValidationError::InvalidValue { field, reason } => ValidationError::InvalidValue {
            field: anchor(field),
            reason,
        },
    }
}
