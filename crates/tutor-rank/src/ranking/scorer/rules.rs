use super::super::domain::TutorSignalSet;
use super::config::{RankingRubric, ResponseTimeTiers};

const INTERVIEW_FLOOR: f64 = 1.0;
const INTERVIEW_SPAN: f64 = 9.0;

/// Unrounded category contributions; only interview points can be fractional.
pub(crate) struct CategoryPoints {
    pub interview: f64,
    pub certificate: u8,
    pub response_time: u8,
    pub completion: u8,
}

impl CategoryPoints {
    pub fn sum(&self) -> f64 {
        self.interview
            + self.certificate as f64
            + self.response_time as f64
            + self.completion as f64
    }
}

pub(crate) fn score_signals(signals: &TutorSignalSet, rubric: &RankingRubric) -> CategoryPoints {
    CategoryPoints {
        interview: interview_points(signals, rubric.interview_weight),
        certificate: certificate_points(
            signals.approved_certificate_count,
            rubric.points_per_certificate,
            rubric.certificate_weight,
        ),
        response_time: response_time_points(signals.response_time_avg_minutes, &rubric.response_time),
        completion: completion_points(signals.completion_rate_percent, rubric.completion_weight),
    }
}

/// Sub-scores take precedence over the overall mark; no interview earns nothing.
pub(crate) fn interview_points(signals: &TutorSignalSet, weight: u8) -> f64 {
    let rating = match (&signals.interview_sub_scores, signals.interview_overall) {
        (Some(sub_scores), _) => sub_scores.average(),
        (None, Some(overall)) => overall,
        (None, None) => return 0.0,
    };

    let weight = weight as f64;
    ((rating - INTERVIEW_FLOOR) / INTERVIEW_SPAN * weight).clamp(0.0, weight)
}

pub(crate) fn certificate_points(approved: u32, per_certificate: u8, cap: u8) -> u8 {
    let earned = approved.saturating_mul(per_certificate as u32);
    earned.min(cap as u32) as u8
}

pub(crate) fn response_time_points(minutes: Option<f64>, tiers: &ResponseTimeTiers) -> u8 {
    match minutes {
        None => 0,
        Some(minutes) if minutes < tiers.fast_under_minutes => tiers.fast_points,
        Some(minutes) if minutes <= tiers.standard_within_minutes => tiers.standard_points,
        Some(minutes) if minutes <= tiers.slow_within_minutes => tiers.slow_points,
        Some(_) => 0,
    }
}

pub(crate) fn completion_points(rate_percent: f64, weight: u8) -> u8 {
    let points = (rate_percent / 100.0 * weight as f64).round();
    points.clamp(0.0, weight as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::domain::InterviewSubScores;

    #[test]
    fn interview_overall_used_when_sub_scores_missing() {
        let signals = TutorSignalSet {
            interview_overall: Some(10.0),
            ..TutorSignalSet::empty()
        };
        assert_eq!(interview_points(&signals, 40), 40.0);
    }

    #[test]
    fn sub_scores_override_overall_mark() {
        let signals = TutorSignalSet {
            interview_overall: Some(10.0),
            interview_sub_scores: Some(InterviewSubScores::uniform(1.0)),
            ..TutorSignalSet::empty()
        };
        assert_eq!(interview_points(&signals, 40), 0.0);
    }

    #[test]
    fn response_tiers_respect_boundaries() {
        let tiers = ResponseTimeTiers::default();
        assert_eq!(response_time_points(Some(29.9), &tiers), 15);
        assert_eq!(response_time_points(Some(30.0), &tiers), 10);
        assert_eq!(response_time_points(Some(120.0), &tiers), 10);
        assert_eq!(response_time_points(Some(120.5), &tiers), 5);
        assert_eq!(response_time_points(Some(1440.0), &tiers), 5);
        assert_eq!(response_time_points(Some(1441.0), &tiers), 0);
        assert_eq!(response_time_points(None, &tiers), 0);
    }

    #[test]
    fn completion_rounds_to_nearest_point() {
        assert_eq!(completion_points(90.0, 15), 14);
        assert_eq!(completion_points(0.0, 15), 0);
        assert_eq!(completion_points(100.0, 15), 15);
        assert_eq!(completion_points(3.0, 15), 0);
    }
}
