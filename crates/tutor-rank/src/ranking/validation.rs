use std::fmt;

use serde::Serialize;

use super::domain::{SignalField, TutorSignalSet};

const INTERVIEW_MIN: f64 = 1.0;
const INTERVIEW_MAX: f64 = 10.0;
const COMPLETION_MIN: f64 = 0.0;
const COMPLETION_MAX: f64 = 100.0;

/// Rejected signal value; no score is produced for the tutor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} {violation}")]
pub struct ValidationError {
    pub field: SignalField,
    pub violation: Violation,
}

impl ValidationError {
    fn new(field: SignalField, violation: Violation) -> Self {
        Self { field, violation }
    }
}

/// Constraint broken by an upstream value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    NotFinite { value: f64 },
    Negative { value: f64 },
    OutOfRange { min: f64, max: f64, value: f64 },
    ExceedsTotal { approved: u32, total: u32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotFinite { value } => write!(f, "must be a finite number, got {value}"),
            Violation::Negative { value } => write!(f, "must be non-negative, got {value}"),
            Violation::OutOfRange { min, max, value } => {
                write!(f, "must be in [{min}, {max}], got {value}")
            }
            Violation::ExceedsTotal { approved, total } => write!(
                f,
                "must not exceed certificate_count ({total}), got {approved}"
            ),
        }
    }
}

/// Check every documented constraint before any points are computed.
pub fn validate_signals(signals: &TutorSignalSet) -> Result<(), ValidationError> {
    if let Some(overall) = signals.interview_overall {
        check_range(
            SignalField::InterviewOverall,
            overall,
            INTERVIEW_MIN,
            INTERVIEW_MAX,
        )?;
    }

    if let Some(sub_scores) = &signals.interview_sub_scores {
        for (field, value) in sub_scores.entries() {
            check_range(field, value, INTERVIEW_MIN, INTERVIEW_MAX)?;
        }
    }

    if signals.approved_certificate_count > signals.certificate_count {
        return Err(ValidationError::new(
            SignalField::ApprovedCertificateCount,
            Violation::ExceedsTotal {
                approved: signals.approved_certificate_count,
                total: signals.certificate_count,
            },
        ));
    }

    if let Some(minutes) = signals.response_time_avg_minutes {
        check_finite(SignalField::ResponseTimeAvgMinutes, minutes)?;
        if minutes < 0.0 {
            return Err(ValidationError::new(
                SignalField::ResponseTimeAvgMinutes,
                Violation::Negative { value: minutes },
            ));
        }
    }

    check_range(
        SignalField::CompletionRatePercent,
        signals.completion_rate_percent,
        COMPLETION_MIN,
        COMPLETION_MAX,
    )
}

fn check_finite(field: SignalField, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(field, Violation::NotFinite { value }))
    }
}

fn check_range(field: SignalField, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            Violation::OutOfRange { min, max, value },
        ));
    }
    Ok(())
}
