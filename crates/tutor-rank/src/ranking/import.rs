use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{InterviewSubScores, TutorId, TutorSignalSet};

/// Tutor row loaded from a signal export.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTutor {
    pub tutor_id: TutorId,
    pub display_name: String,
    pub signals: TutorSignalSet,
}

#[derive(Debug, thiserror::Error)]
pub enum SignalImportError {
    #[error("failed to read signal export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid signal CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: interview sub-scores must be all present or all empty")]
    PartialSubScores { row: usize },
    #[error("row {row}: completion_rate_percent is required")]
    MissingCompletionRate { row: usize },
}

/// Bulk loader for tutor signal exports.
pub struct SignalImporter;

impl SignalImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedTutor>, SignalImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedTutor>, SignalImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut tutors = Vec::new();

        for (index, record) in csv_reader.deserialize::<SignalRow>().enumerate() {
            let row = record?;
            // Header is line 1.
            let tutor = row.into_tutor(index + 2)?;
            tutors.push(tutor);
        }

        Ok(tutors)
    }
}

#[derive(Debug, Deserialize)]
struct SignalRow {
    tutor_id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    interview_overall: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    patience: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    empathy: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    communication: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    professionalism: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    subject_mastery: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    teaching_ability: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    certificate_count: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    approved_certificate_count: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    response_time_avg_minutes: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    completion_rate_percent: Option<f64>,
}

impl SignalRow {
    fn into_tutor(self, row: usize) -> Result<ImportedTutor, SignalImportError> {
        let sub_scores = [
            self.patience,
            self.empathy,
            self.communication,
            self.professionalism,
            self.subject_mastery,
            self.teaching_ability,
        ];

        let interview_sub_scores = match sub_scores {
            [Some(patience), Some(empathy), Some(communication), Some(professionalism), Some(subject_mastery), Some(teaching_ability)] => {
                Some(InterviewSubScores {
                    patience,
                    empathy,
                    communication,
                    professionalism,
                    subject_mastery,
                    teaching_ability,
                })
            }
            [None, None, None, None, None, None] => None,
            _ => return Err(SignalImportError::PartialSubScores { row }),
        };

        let completion_rate_percent = self
            .completion_rate_percent
            .ok_or(SignalImportError::MissingCompletionRate { row })?;

        let display_name = if self.display_name.is_empty() {
            self.tutor_id.clone()
        } else {
            self.display_name
        };

        Ok(ImportedTutor {
            tutor_id: TutorId(self.tutor_id),
            display_name,
            signals: TutorSignalSet {
                interview_overall: self.interview_overall,
                interview_sub_scores,
                certificate_count: self.certificate_count.unwrap_or(0),
                approved_certificate_count: self.approved_certificate_count.unwrap_or(0),
                response_time_avg_minutes: self.response_time_avg_minutes,
                completion_rate_percent,
            },
        })
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}
