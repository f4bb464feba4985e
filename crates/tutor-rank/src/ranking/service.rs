use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{RankingResult, TutorId, TutorSignalSet};
use super::repository::{
    RepositoryError, StoredRanking, TutorRankingView, TutorRecord, TutorRepository,
};
use super::scorer::RankingScorer;
use super::validation::ValidationError;

/// Service composing the repository and the ranking scorer for admin workflows.
pub struct RankingService<R> {
    repository: Arc<R>,
    scorer: Arc<RankingScorer>,
}

impl<R> RankingService<R>
where
    R: TutorRepository + 'static,
{
    pub fn new(repository: Arc<R>, scorer: RankingScorer) -> Self {
        Self {
            repository,
            scorer: Arc::new(scorer),
        }
    }

    pub fn scorer(&self) -> &RankingScorer {
        &self.scorer
    }

    /// Score a signal set without touching the repository.
    pub fn preview(&self, signals: &TutorSignalSet) -> Result<RankingResult, ValidationError> {
        self.scorer.compute(signals)
    }

    /// Store a new tutor and rank it immediately.
    pub fn register(
        &self,
        tutor_id: TutorId,
        display_name: impl Into<String>,
        signals: TutorSignalSet,
    ) -> Result<RankingResult, RankingServiceError> {
        let result = self.scorer.compute(&signals)?;
        let mut record = TutorRecord::new(tutor_id, display_name, signals);
        record.ranking = Some(StoredRanking::from_result(&result, Utc::now()));

        let stored = self.repository.insert(record)?;
        info!(tutor_id = %stored.tutor_id, score = result.score, "tutor registered and ranked");
        Ok(result)
    }

    /// Replace a tutor's signals, recomputing only when they changed materially.
    pub fn update_signals(
        &self,
        tutor_id: &TutorId,
        signals: TutorSignalSet,
    ) -> Result<TutorRecord, RankingServiceError> {
        let mut record = self
            .repository
            .fetch(tutor_id)?
            .ok_or(RepositoryError::NotFound)?;

        if record.ranking.is_some() && !record.signals.materially_differs(&signals) {
            debug!(%tutor_id, "signals unchanged; keeping stored ranking");
            return Ok(record);
        }

        let result = self.scorer.compute(&signals)?;
        record.signals = signals;
        record.ranking = Some(StoredRanking::from_result(&result, Utc::now()));
        self.repository.upsert(record.clone())?;

        info!(%tutor_id, score = result.score, "tutor signals updated");
        Ok(record)
    }

    /// Change the display name; the stored ranking is left as is.
    pub fn rename(
        &self,
        tutor_id: &TutorId,
        display_name: impl Into<String>,
    ) -> Result<TutorRecord, RankingServiceError> {
        let mut record = self
            .repository
            .fetch(tutor_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.display_name = display_name.into();
        self.repository.upsert(record.clone())?;

        debug!(%tutor_id, display_name = %record.display_name, "tutor renamed");
        Ok(record)
    }

    /// Recompute and persist the ranking for one tutor.
    pub fn recalculate(&self, tutor_id: &TutorId) -> Result<RankingResult, RankingServiceError> {
        let record = self
            .repository
            .fetch(tutor_id)?
            .ok_or(RepositoryError::NotFound)?;

        let result = self.scorer.compute(&record.signals)?;
        self.repository
            .save_ranking(tutor_id, StoredRanking::from_result(&result, Utc::now()))?;

        info!(%tutor_id, score = result.score, "ranking recalculated");
        Ok(result)
    }

    /// Recompute every tutor. Invalid signal sets are reported, not fatal.
    pub fn recalculate_all(&self) -> Result<BatchRecalculation, RankingServiceError> {
        let mut batch = BatchRecalculation::default();

        for record in self.repository.list()? {
            match self.scorer.compute(&record.signals) {
                Ok(result) => {
                    self.repository.save_ranking(
                        &record.tutor_id,
                        StoredRanking::from_result(&result, Utc::now()),
                    )?;
                    batch.updated.push(RecalculatedTutor {
                        tutor_id: record.tutor_id,
                        score: result.score,
                    });
                }
                Err(error) => {
                    warn!(tutor_id = %record.tutor_id, %error, "unable to compute ranking");
                    batch.failed.push(FailedTutor {
                        tutor_id: record.tutor_id,
                        field: error.field.name(),
                        error: error.to_string(),
                    });
                }
            }
        }

        info!(
            updated = batch.updated.len(),
            failed = batch.failed.len(),
            "batch ranking recalculation finished"
        );
        Ok(batch)
    }

    /// Ranked tutors by descending score; unranked tutors are omitted.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<TutorRankingView>, RankingServiceError> {
        let mut ranked: Vec<TutorRecord> = self
            .repository
            .list()?
            .into_iter()
            .filter(|record| record.ranking.is_some())
            .collect();

        ranked.sort_by(|left, right| {
            let left_score = left.ranking.as_ref().map(|ranking| ranking.ranking_score);
            let right_score = right.ranking.as_ref().map(|ranking| ranking.ranking_score);
            right_score
                .cmp(&left_score)
                .then_with(|| left.tutor_id.cmp(&right.tutor_id))
        });

        Ok(ranked
            .iter()
            .take(limit)
            .map(TutorRecord::ranking_view)
            .collect())
    }

    pub fn get(&self, tutor_id: &TutorId) -> Result<TutorRecord, RankingServiceError> {
        let record = self
            .repository
            .fetch(tutor_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Outcome of a "recalculate all" run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchRecalculation {
    pub updated: Vec<RecalculatedTutor>,
    pub failed: Vec<FailedTutor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecalculatedTutor {
    pub tutor_id: TutorId,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedTutor {
    pub tutor_id: TutorId,
    pub field: &'static str,
    pub error: String,
}

/// Error raised by the ranking service.
#[derive(Debug, thiserror::Error)]
pub enum RankingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
