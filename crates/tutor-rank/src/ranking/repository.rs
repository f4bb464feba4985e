use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{PerformanceBand, RankingBreakdown, RankingResult, TutorId, TutorSignalSet};

/// Ranking fields written back to the tutor profile after a recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRanking {
    pub ranking_score: u8,
    pub breakdown: RankingBreakdown,
    pub band: PerformanceBand,
    pub assessment: String,
    pub ranking_updated_at: DateTime<Utc>,
}

impl StoredRanking {
    pub fn from_result(result: &RankingResult, ranking_updated_at: DateTime<Utc>) -> Self {
        Self {
            ranking_score: result.score,
            breakdown: result.breakdown,
            band: result.band,
            assessment: result.assessment.clone(),
            ranking_updated_at,
        }
    }
}

/// Repository record holding the latest signals and the ranking derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorRecord {
    pub tutor_id: TutorId,
    pub display_name: String,
    pub signals: TutorSignalSet,
    pub ranking: Option<StoredRanking>,
}

impl TutorRecord {
    pub fn new(tutor_id: TutorId, display_name: impl Into<String>, signals: TutorSignalSet) -> Self {
        Self {
            tutor_id,
            display_name: display_name.into(),
            signals,
            ranking: None,
        }
    }

    pub fn ranking_view(&self) -> TutorRankingView {
        TutorRankingView {
            tutor_id: self.tutor_id.clone(),
            display_name: self.display_name.clone(),
            ranking_score: self.ranking.as_ref().map(|ranking| ranking.ranking_score),
            assessment: self
                .ranking
                .as_ref()
                .map(|ranking| ranking.assessment.clone())
                .unwrap_or_else(|| "not yet ranked".to_string()),
            ranking_updated_at: self
                .ranking
                .as_ref()
                .map(|ranking| ranking.ranking_updated_at),
        }
    }
}

/// Storage abstraction for tutor profiles; injected into the ranking service at startup.
pub trait TutorRepository: Send + Sync {
    fn insert(&self, record: TutorRecord) -> Result<TutorRecord, RepositoryError>;
    fn upsert(&self, record: TutorRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &TutorId) -> Result<Option<TutorRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<TutorRecord>, RepositoryError>;
    fn save_ranking(&self, id: &TutorId, ranking: StoredRanking) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("tutor already exists")]
    Conflict,
    #[error("tutor not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public projection rendered by the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorRankingView {
    pub tutor_id: TutorId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_score: Option<u8>,
    pub assessment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_updated_at: Option<DateTime<Utc>>,
}
