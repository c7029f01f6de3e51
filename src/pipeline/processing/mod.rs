// Pipeline processing: eligibility conversion, validation, scoring, and batch gating

pub mod dedupe;
pub mod eligibility;
pub mod migrate;
pub mod normalize;
pub mod score;
