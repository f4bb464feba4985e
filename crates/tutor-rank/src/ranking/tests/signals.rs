use chrono::{TimeZone, Utc};

use crate::ranking::domain::InterviewSubScores;
use crate::ranking::signals::{
    CertificateRecord, CertificateStatus, InterviewRecord, SignalAggregator, TutorActivity,
};
use crate::ranking::{compute_ranking, PerformanceBand};

fn certificate(title: &str, status: CertificateStatus) -> CertificateRecord {
    CertificateRecord {
        title: title.to_string(),
        status,
    }
}

fn activity() -> TutorActivity {
    TutorActivity {
        interviews: vec![
            InterviewRecord {
                completed_at: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
                overall: Some(4.0),
                sub_scores: None,
            },
            InterviewRecord {
                completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
                overall: Some(8.0),
                sub_scores: Some(InterviewSubScores::uniform(8.0)),
            },
        ],
        certificates: vec![
            certificate("PGDE", CertificateStatus::Approved),
            certificate("A-Level Chemistry", CertificateStatus::Approved),
            certificate("First Aid", CertificateStatus::Pending),
            certificate("Unverifiable diploma", CertificateStatus::Rejected),
        ],
        response_minutes: vec![10.0, 20.0, 30.0],
        assignments_total: 10,
        assignments_completed: 9,
    }
}

#[test]
fn aggregator_uses_latest_interview() {
    let signals = SignalAggregator::aggregate(&activity());

    assert_eq!(signals.interview_overall, Some(8.0));
    assert_eq!(
        signals.interview_sub_scores,
        Some(InterviewSubScores::uniform(8.0))
    );
}

#[test]
fn aggregator_counts_only_approved_certificates() {
    let signals = SignalAggregator::aggregate(&activity());

    assert_eq!(signals.certificate_count, 4);
    assert_eq!(signals.approved_certificate_count, 2);
}

#[test]
fn aggregator_averages_response_and_completion() {
    let signals = SignalAggregator::aggregate(&activity());

    assert_eq!(signals.response_time_avg_minutes, Some(20.0));
    assert!((signals.completion_rate_percent - 90.0).abs() < 1e-9);

    let result = compute_ranking(&signals).expect("aggregated signals are valid");
    assert_eq!(result.score, 80);
    assert_eq!(result.band, PerformanceBand::Excellent);
}

#[test]
fn inactive_tutor_aggregates_to_absent_signals() {
    let signals = SignalAggregator::aggregate(&TutorActivity::default());

    assert!(!signals.has_interview());
    assert_eq!(signals.response_time_avg_minutes, None);
    assert_eq!(signals.completion_rate_percent, 0.0);
    assert_eq!(compute_ranking(&signals).expect("valid").score, 1);
}
