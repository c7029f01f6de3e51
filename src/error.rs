use thiserror::Error;

/// A raw institution record failed field validation.
///
/// `field` is always the dotted path into the raw document, e.g.
/// `placements.placement_rate` or `courses_offered[2].duration`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Field {field} has the wrong type: expected {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field {field} is out of range: {value} not in {range}")]
    OutOfRange {
        field: String,
        value: String,
        range: String,
    },

    #[error("Field {field} is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    /// Short label used for metrics and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::WrongType { .. } => "wrong_type",
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::InvalidValue { .. } => "invalid_value",
        }
    }
}

/// `eligibility_criteria` could not be brought into the pair-sequence shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("eligibility_criteria must be a mapping or a sequence of pairs, found {found}")]
    UnsupportedShape { found: &'static str },

    #[error("eligibility_criteria[{index}] is not a {{name, required}} pair")]
    MalformedPair { index: usize },

    #[error("eligibility text for course {course:?} is not a string")]
    NonTextRequirement { course: String },
}

/// Everything that can reject a single record inside a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl RecordError {
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Validation(e) => e.kind(),
            RecordError::Conversion(_) => "conversion",
            RecordError::Persistence(_) => "persistence",
        }
    }
}

/// Failures of the collaborators around the pipeline (files, config, stores).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid CSS selector for {field}: {message}")]
    Selector { field: &'static str, message: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
