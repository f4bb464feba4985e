use super::common::*;
use crate::ranking::domain::{InterviewSubScores, SignalField, TutorSignalSet};
use crate::ranking::{compute_ranking, validate_signals, Violation};

#[test]
fn completion_above_one_hundred_is_rejected() {
    let error = compute_ranking(&invalid_signals()).expect_err("142% is invalid");

    assert_eq!(error.field, SignalField::CompletionRatePercent);
    assert_eq!(
        error.to_string(),
        "completion_rate_percent must be in [0, 100], got 142"
    );
}

#[test]
fn sub_scores_outside_scale_name_the_sub_score() {
    let mut sub_scores = InterviewSubScores::uniform(7.0);
    sub_scores.empathy = 0.0;
    let signals = TutorSignalSet {
        interview_sub_scores: Some(sub_scores),
        ..strong_signals()
    };

    let error = validate_signals(&signals).expect_err("0 is below the interview scale");

    assert_eq!(error.field, SignalField::Empathy);
    assert!(matches!(error.violation, Violation::OutOfRange { .. }));
}

#[test]
fn interview_overall_above_ten_is_rejected() {
    let signals = TutorSignalSet {
        interview_overall: Some(11.0),
        ..TutorSignalSet::empty()
    };

    let error = validate_signals(&signals).expect_err("11 is above the interview scale");

    assert_eq!(error.field, SignalField::InterviewOverall);
}

#[test]
fn approved_certificates_cannot_exceed_total() {
    let signals = TutorSignalSet {
        certificate_count: 1,
        approved_certificate_count: 2,
        ..strong_signals()
    };

    let error = validate_signals(&signals).expect_err("approved exceeds total");

    assert_eq!(error.field, SignalField::ApprovedCertificateCount);
    assert_eq!(
        error.violation,
        Violation::ExceedsTotal {
            approved: 2,
            total: 1
        }
    );
}

#[test]
fn negative_response_time_is_rejected() {
    let signals = TutorSignalSet {
        response_time_avg_minutes: Some(-5.0),
        ..strong_signals()
    };

    let error = validate_signals(&signals).expect_err("negative minutes");

    assert_eq!(error.field, SignalField::ResponseTimeAvgMinutes);
    assert!(matches!(error.violation, Violation::Negative { .. }));
}

#[test]
fn non_finite_values_are_rejected() {
    let signals = TutorSignalSet {
        response_time_avg_minutes: Some(f64::INFINITY),
        ..strong_signals()
    };
    let error = validate_signals(&signals).expect_err("infinite minutes");
    assert!(matches!(error.violation, Violation::NotFinite { .. }));

    let signals = TutorSignalSet {
        completion_rate_percent: f64::NAN,
        ..strong_signals()
    };
    let error = validate_signals(&signals).expect_err("NaN completion");
    assert_eq!(error.field, SignalField::CompletionRatePercent);
}

#[test]
fn range_edges_are_accepted() {
    let signals = TutorSignalSet {
        interview_overall: Some(1.0),
        interview_sub_scores: Some(InterviewSubScores::uniform(10.0)),
        certificate_count: 0,
        approved_certificate_count: 0,
        response_time_avg_minutes: Some(0.0),
        completion_rate_percent: 100.0,
    };

    assert!(validate_signals(&signals).is_ok());
}

#[test]
fn misnamed_signal_fields_fail_to_deserialize() {
    let parsed = serde_json::from_str::<TutorSignalSet>(
        r#"{"completionRatePercent": 142, "approvedCertificateCount": 9}"#,
    );

    let error = parsed.expect_err("camelCase keys are not signal fields");
    assert!(error.to_string().contains("unknown field"));
}

#[test]
fn missing_completion_rate_fails_to_deserialize() {
    let error = serde_json::from_str::<TutorSignalSet>("{}").expect_err("completion is required");

    assert!(error.to_string().contains("completion_rate_percent"));
}

#[test]
fn unknown_sub_score_fields_fail_to_deserialize() {
    let parsed = serde_json::from_str::<TutorSignalSet>(
        r#"{
            "completion_rate_percent": 80,
            "interview_sub_scores": {
                "patience": 8, "empathy": 8, "communication": 8,
                "professionalism": 8, "subject_mastery": 8, "teaching_ability": 8,
                "punctuality": 2
            }
        }"#,
    );

    assert!(parsed.is_err());
}
