use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{InterviewSubScores, TutorSignalSet};

/// Completed character interview captured by the admin team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub completed_at: DateTime<Utc>,
    pub overall: Option<f64>,
    pub sub_scores: Option<InterviewSubScores>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Pending,
    Approved,
    Rejected,
}

/// Uploaded credential and its verification state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub title: String,
    pub status: CertificateStatus,
}

/// Raw activity persisted for a tutor, prior to aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TutorActivity {
    #[serde(default)]
    pub interviews: Vec<InterviewRecord>,
    #[serde(default)]
    pub certificates: Vec<CertificateRecord>,
    /// Minutes until first reply, one sample per enquiry.
    #[serde(default)]
    pub response_minutes: Vec<f64>,
    #[serde(default)]
    pub assignments_total: u32,
    #[serde(default)]
    pub assignments_completed: u32,
}

/// Collapses tutor activity into the snapshot consumed by the scorer.
///
/// Values are passed through untouched; bad upstream data is left for validation to
/// reject rather than being corrected here.
pub struct SignalAggregator;

impl SignalAggregator {
    pub fn aggregate(activity: &TutorActivity) -> TutorSignalSet {
        let latest_interview = activity
            .interviews
            .iter()
            .max_by_key(|interview| interview.completed_at);

        let certificate_count = activity.certificates.len() as u32;
        let approved_certificate_count = activity
            .certificates
            .iter()
            .filter(|certificate| certificate.status == CertificateStatus::Approved)
            .count() as u32;

        let response_time_avg_minutes = if activity.response_minutes.is_empty() {
            None
        } else {
            let total: f64 = activity.response_minutes.iter().sum();
            Some(total / activity.response_minutes.len() as f64)
        };

        let completion_rate_percent = if activity.assignments_total == 0 {
            0.0
        } else {
            activity.assignments_completed as f64 / activity.assignments_total as f64 * 100.0
        };

        TutorSignalSet {
            interview_overall: latest_interview.and_then(|interview| interview.overall),
            interview_sub_scores: latest_interview.and_then(|interview| interview.sub_scores),
            certificate_count,
            approved_certificate_count,
            response_time_avg_minutes,
            completion_rate_percent,
        }
    }
}
