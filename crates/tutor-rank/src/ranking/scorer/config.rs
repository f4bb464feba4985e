use serde::{Deserialize, Serialize};

/// Point table backing the ranking rubric.
///
/// The default is the marketplace's published 40/30/15/15 split. A custom rubric can be
/// loaded from configuration but must pass [`RankingRubric::validate`] before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingRubric {
    pub interview_weight: u8,
    pub certificate_weight: u8,
    pub points_per_certificate: u8,
    pub response_time: ResponseTimeTiers,
    pub completion_weight: u8,
}

/// Response-time buckets. `fast_under_minutes` is exclusive, the later bounds inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTimeTiers {
    pub fast_under_minutes: f64,
    pub fast_points: u8,
    pub standard_within_minutes: f64,
    pub standard_points: u8,
    pub slow_within_minutes: f64,
    pub slow_points: u8,
}

impl Default for ResponseTimeTiers {
    fn default() -> Self {
        Self {
            fast_under_minutes: 30.0,
            fast_points: 15,
            standard_within_minutes: 120.0,
            standard_points: 10,
            slow_within_minutes: 1440.0,
            slow_points: 5,
        }
    }
}

impl Default for RankingRubric {
    fn default() -> Self {
        Self {
            interview_weight: 40,
            certificate_weight: 30,
            points_per_certificate: 10,
            response_time: ResponseTimeTiers::default(),
            completion_weight: 15,
        }
    }
}

impl RankingRubric {
    pub fn total_weight(&self) -> u16 {
        self.interview_weight as u16
            + self.certificate_weight as u16
            + self.response_time.fast_points as u16
            + self.completion_weight as u16
    }

    pub fn validate(&self) -> Result<(), RubricError> {
        let total = self.total_weight();
        if total != 100 {
            return Err(RubricError::WeightTotal(total));
        }

        let tiers = &self.response_time;
        let bounds = [
            tiers.fast_under_minutes,
            tiers.standard_within_minutes,
            tiers.slow_within_minutes,
        ];
        if bounds.iter().any(|bound| !bound.is_finite() || *bound < 0.0)
            || bounds.windows(2).any(|pair| pair[0] > pair[1])
        {
            return Err(RubricError::TierBounds);
        }

        if tiers.fast_points < tiers.standard_points || tiers.standard_points < tiers.slow_points {
            return Err(RubricError::TierPoints);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RubricError {
    #[error("category weights must sum to 100, got {0}")]
    WeightTotal(u16),
    #[error("response-time tier bounds must be finite, non-negative, and ascending")]
    TierBounds,
    #[error("response-time tier points must not increase for slower tiers")]
    TierPoints,
}
