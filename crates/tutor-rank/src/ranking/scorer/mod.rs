mod assessment;
mod config;
mod rules;

pub use config::{RankingRubric, ResponseTimeTiers, RubricError};

use super::domain::{PerformanceBand, RankingBreakdown, RankingResult, TutorSignalSet};
use super::validation::{validate_signals, ValidationError};
use assessment::{compose_assessment, weakest_category};

const SCORE_FLOOR: f64 = 1.0;
const SCORE_CEILING: f64 = 100.0;

/// Stateless scorer applying a rubric to tutor signal snapshots.
#[derive(Debug, Clone, Default)]
pub struct RankingScorer {
    rubric: RankingRubric,
}

impl RankingScorer {
    pub fn new(rubric: RankingRubric) -> Result<Self, RubricError> {
        rubric.validate()?;
        Ok(Self { rubric })
    }

    pub fn rubric(&self) -> &RankingRubric {
        &self.rubric
    }

    pub fn compute(&self, signals: &TutorSignalSet) -> Result<RankingResult, ValidationError> {
        validate_signals(signals)?;

        let points = rules::score_signals(signals, &self.rubric);
        let breakdown = RankingBreakdown {
            interview_points: points.interview.round() as u8,
            certificate_points: points.certificate,
            response_time_points: points.response_time,
            completion_points: points.completion,
        };

        // The scale starts at 1, so an all-zero tutor is floored rather than left at 0.
        let score = points.sum().round().clamp(SCORE_FLOOR, SCORE_CEILING) as u8;
        let band = PerformanceBand::from_score(score);
        let weakest_category = weakest_category(&breakdown, &self.rubric);

        Ok(RankingResult {
            score,
            breakdown,
            band,
            weakest_category,
            assessment: compose_assessment(band, weakest_category),
        })
    }
}

/// Score a signal set with the default rubric.
pub fn compute_ranking(signals: &TutorSignalSet) -> Result<RankingResult, ValidationError> {
    RankingScorer::default().compute(signals)
}
