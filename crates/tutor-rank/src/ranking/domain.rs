use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for tutors known to the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TutorId(pub String);

impl fmt::Display for TutorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured character interview results, each on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewSubScores {
    pub patience: f64,
    pub empathy: f64,
    pub communication: f64,
    pub professionalism: f64,
    pub subject_mastery: f64,
    pub teaching_ability: f64,
}

impl InterviewSubScores {
    pub fn uniform(value: f64) -> Self {
        Self {
            patience: value,
            empathy: value,
            communication: value,
            professionalism: value,
            subject_mastery: value,
            teaching_ability: value,
        }
    }

    /// Named values in a stable order so validation can report the offending field.
    pub fn entries(&self) -> [(SignalField, f64); 6] {
        [
            (SignalField::Patience, self.patience),
            (SignalField::Empathy, self.empathy),
            (SignalField::Communication, self.communication),
            (SignalField::Professionalism, self.professionalism),
            (SignalField::SubjectMastery, self.subject_mastery),
            (SignalField::TeachingAbility, self.teaching_ability),
        ]
    }

    pub fn average(&self) -> f64 {
        let entries = self.entries();
        let total: f64 = entries.iter().map(|(_, value)| value).sum();
        total / entries.len() as f64
    }
}

/// Aggregated track record describing one tutor at a point in time.
///
/// Optional signals may be absent. The completion rate is required and unknown keys are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TutorSignalSet {
    #[serde(default)]
    pub interview_overall: Option<f64>,
    #[serde(default)]
    pub interview_sub_scores: Option<InterviewSubScores>,
    #[serde(default)]
    pub certificate_count: u32,
    #[serde(default)]
    pub approved_certificate_count: u32,
    #[serde(default)]
    pub response_time_avg_minutes: Option<f64>,
    pub completion_rate_percent: f64,
}

impl TutorSignalSet {
    /// Signal set for a tutor with no recorded activity at all.
    pub fn empty() -> Self {
        Self {
            interview_overall: None,
            interview_sub_scores: None,
            certificate_count: 0,
            approved_certificate_count: 0,
            response_time_avg_minutes: None,
            completion_rate_percent: 0.0,
        }
    }

    pub fn has_interview(&self) -> bool {
        self.interview_overall.is_some() || self.interview_sub_scores.is_some()
    }

    /// Whether a stored ranking computed from `other` is stale for these signals.
    pub fn materially_differs(&self, other: &TutorSignalSet) -> bool {
        self != other
    }
}

impl Default for TutorSignalSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Input fields referenced by validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalField {
    InterviewOverall,
    Patience,
    Empathy,
    Communication,
    Professionalism,
    SubjectMastery,
    TeachingAbility,
    CertificateCount,
    ApprovedCertificateCount,
    ResponseTimeAvgMinutes,
    CompletionRatePercent,
}

impl SignalField {
    pub const fn name(self) -> &'static str {
        match self {
            SignalField::InterviewOverall => "interview_overall",
            SignalField::Patience => "interview_sub_scores.patience",
            SignalField::Empathy => "interview_sub_scores.empathy",
            SignalField::Communication => "interview_sub_scores.communication",
            SignalField::Professionalism => "interview_sub_scores.professionalism",
            SignalField::SubjectMastery => "interview_sub_scores.subject_mastery",
            SignalField::TeachingAbility => "interview_sub_scores.teaching_ability",
            SignalField::CertificateCount => "certificate_count",
            SignalField::ApprovedCertificateCount => "approved_certificate_count",
            SignalField::ResponseTimeAvgMinutes => "response_time_avg_minutes",
            SignalField::CompletionRatePercent => "completion_rate_percent",
        }
    }
}

impl fmt::Display for SignalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories contributing to the composite score, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingCategory {
    Interview,
    Certificate,
    ResponseTime,
    Completion,
}

impl RankingCategory {
    pub const ALL: [RankingCategory; 4] = [
        RankingCategory::Interview,
        RankingCategory::Certificate,
        RankingCategory::ResponseTime,
        RankingCategory::Completion,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RankingCategory::Interview => "interview",
            RankingCategory::Certificate => "certificate",
            RankingCategory::ResponseTime => "response time",
            RankingCategory::Completion => "completion rate",
        }
    }
}

/// Points earned per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankingBreakdown {
    pub interview_points: u8,
    pub certificate_points: u8,
    pub response_time_points: u8,
    pub completion_points: u8,
}

impl RankingBreakdown {
    pub fn points(&self, category: RankingCategory) -> u8 {
        match category {
            RankingCategory::Interview => self.interview_points,
            RankingCategory::Certificate => self.certificate_points,
            RankingCategory::ResponseTime => self.response_time_points,
            RankingCategory::Completion => self.completion_points,
        }
    }

    pub fn total(&self) -> u16 {
        RankingCategory::ALL
            .iter()
            .map(|category| self.points(*category) as u16)
            .sum()
    }
}

/// Coarse band shown next to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl PerformanceBand {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => PerformanceBand::Excellent,
            60..=79 => PerformanceBand::Good,
            40..=59 => PerformanceBand::Average,
            _ => PerformanceBand::NeedsImprovement,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::Good => "Good",
            PerformanceBand::Average => "Average",
            PerformanceBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Composite ranking derived from a signal snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub score: u8,
    pub breakdown: RankingBreakdown,
    pub band: PerformanceBand,
    pub weakest_category: RankingCategory,
    pub assessment: String,
}
