use super::super::domain::{PerformanceBand, RankingBreakdown, RankingCategory};
use super::config::RankingRubric;

/// Category furthest below its own maximum, earliest in `RankingCategory::ALL` on ties.
pub(crate) fn weakest_category(
    breakdown: &RankingBreakdown,
    rubric: &RankingRubric,
) -> RankingCategory {
    let mut weakest = RankingCategory::Interview;
    for category in RankingCategory::ALL.into_iter().skip(1) {
        if ratio_below(breakdown, rubric, category, weakest) {
            weakest = category;
        }
    }
    weakest
}

fn category_max(rubric: &RankingRubric, category: RankingCategory) -> u32 {
    let max = match category {
        RankingCategory::Interview => rubric.interview_weight,
        RankingCategory::Certificate => rubric.certificate_weight,
        RankingCategory::ResponseTime => rubric.response_time.fast_points,
        RankingCategory::Completion => rubric.completion_weight,
    };
    max.max(1) as u32
}

// Cross-multiplied so the comparison of earned/max fractions stays exact.
fn ratio_below(
    breakdown: &RankingBreakdown,
    rubric: &RankingRubric,
    candidate: RankingCategory,
    current: RankingCategory,
) -> bool {
    let candidate_points = breakdown.points(candidate) as u32;
    let current_points = breakdown.points(current) as u32;
    candidate_points * category_max(rubric, current)
        < current_points * category_max(rubric, candidate)
}

pub(crate) fn compose_assessment(band: PerformanceBand, weakest: RankingCategory) -> String {
    format!(
        "{} overall; {} is the weakest area",
        band.label(),
        weakest.label()
    )
}
