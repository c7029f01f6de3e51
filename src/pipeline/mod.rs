// Institution record pipeline: shape conversion, normalization, scoring, dedupe

pub mod processing;

pub use processing::dedupe::{dedupe_gate, DedupeGate, DuplicateName};
pub use processing::normalize::{normalize, DefaultNormalizer, NormalizeConfig, Normalizer};
pub use processing::score::{compute_score, ScoreMode};
