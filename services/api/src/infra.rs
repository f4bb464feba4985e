use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;
use tutor_rank::config::{AppConfig, ConfigError};
use tutor_rank::error::AppError;
use tutor_rank::ranking::{
    RankingScorer, RepositoryError, SignalImporter, StoredRanking, TutorId, TutorRecord,
    TutorRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTutorRepository {
    records: Arc<Mutex<HashMap<TutorId, TutorRecord>>>,
}

impl TutorRepository for InMemoryTutorRepository {
    fn insert(&self, record: TutorRecord) -> Result<TutorRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.tutor_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.tutor_id.clone(), record.clone());
        Ok(record)
    }

    fn upsert(&self, record: TutorRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.insert(record.tutor_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &TutorId) -> Result<Option<TutorRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<TutorRecord>, RepositoryError> {
        let guard = self.lock()?;
        let mut records: Vec<TutorRecord> = guard.values().cloned().collect();
        records.sort_by(|left, right| left.tutor_id.cmp(&right.tutor_id));
        Ok(records)
    }

    fn save_ranking(&self, id: &TutorId, ranking: StoredRanking) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.ranking = Some(ranking);
        Ok(())
    }
}

impl InMemoryTutorRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<TutorId, TutorRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("tutor store lock poisoned".to_string()))
    }

    /// Load tutors from a CSV export without ranking them; callers decide when to recalculate.
    pub(crate) fn seed_from_csv(&self, path: &Path) -> Result<usize, AppError> {
        let tutors = SignalImporter::from_path(path)?;
        let count = tutors.len();
        for tutor in tutors {
            self.upsert(TutorRecord::new(
                tutor.tutor_id,
                tutor.display_name,
                tutor.signals,
            ))
            .map_err(|err| AppError::Ranking(err.into()))?;
        }
        info!(count, path = %path.display(), "seeded tutor store");
        Ok(count)
    }
}

/// Scorer configured from `RANKING_RUBRIC_PATH`, or the published default.
pub(crate) fn configured_scorer(config: &AppConfig) -> Result<RankingScorer, AppError> {
    let rubric = config.ranking.rubric()?;
    RankingScorer::new(rubric).map_err(|err| ConfigError::InvalidRubric(err).into())
}
