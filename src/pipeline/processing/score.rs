use serde::{Deserialize, Serialize};

use crate::domain::Placements;

/// How the placement term of the score is divided.
///
/// The generator and the bulk inserter historically disagreed here, so the
/// choice is explicit configuration rather than a hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ScoreMode {
    /// `floor(average_salary * placement_rate / 100)`, the canonical ranking.
    #[default]
    #[serde(rename = "floor")]
    #[value(name = "floor")]
    Floor,
    /// `average_salary * placement_rate / 100` without truncation.
    #[serde(rename = "true")]
    #[value(name = "true")]
    TrueDivision,
}

/// `placement term + floor(rating / 2) * 1000`.
pub fn compute_score(placements: &Placements, rating: f64, mode: ScoreMode) -> f64 {
    let placement = placements.average_salary * placements.placement_rate / 100.0;
    let placement = match mode {
        ScoreMode::Floor => placement.floor(),
        ScoreMode::TrueDivision => placement,
    };
    placement + (rating / 2.0).floor() * 1000.0
}
