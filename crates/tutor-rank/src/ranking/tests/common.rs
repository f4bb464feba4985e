use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::ranking::domain::{InterviewSubScores, TutorId, TutorSignalSet};
use crate::ranking::repository::{
    RepositoryError, StoredRanking, TutorRecord, TutorRepository,
};
use crate::ranking::{ranking_router, RankingScorer, RankingService};

/// Scenario A: strong interview, two approved certificates, fast replies, 90% completion.
pub(super) fn strong_signals() -> TutorSignalSet {
    TutorSignalSet {
        interview_overall: None,
        interview_sub_scores: Some(InterviewSubScores::uniform(8.0)),
        certificate_count: 3,
        approved_certificate_count: 2,
        response_time_avg_minutes: Some(20.0),
        completion_rate_percent: 90.0,
    }
}

pub(super) fn average_signals() -> TutorSignalSet {
    TutorSignalSet {
        interview_overall: Some(6.0),
        interview_sub_scores: None,
        certificate_count: 2,
        approved_certificate_count: 1,
        response_time_avg_minutes: Some(90.0),
        completion_rate_percent: 60.0,
    }
}

pub(super) fn invalid_signals() -> TutorSignalSet {
    TutorSignalSet {
        completion_rate_percent: 142.0,
        ..strong_signals()
    }
}

pub(super) fn tutor_id(value: &str) -> TutorId {
    TutorId(value.to_string())
}

pub(super) fn scorer() -> RankingScorer {
    RankingScorer::default()
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<TutorId, TutorRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(records: Vec<TutorRecord>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.records.lock().expect("repository mutex poisoned");
            for record in records {
                guard.insert(record.tutor_id.clone(), record);
            }
        }
        repository
    }
}

impl TutorRepository for MemoryRepository {
    fn insert(&self, record: TutorRecord) -> Result<TutorRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.tutor_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.tutor_id.clone(), record.clone());
        Ok(record)
    }

    fn upsert(&self, record: TutorRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.tutor_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &TutorId) -> Result<Option<TutorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<TutorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<TutorRecord> = guard.values().cloned().collect();
        records.sort_by(|left, right| left.tutor_id.cmp(&right.tutor_id));
        Ok(records)
    }

    fn save_ranking(&self, id: &TutorId, ranking: StoredRanking) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(id) {
            Some(record) => {
                record.ranking = Some(ranking);
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(super) struct UnavailableRepository;

impl TutorRepository for UnavailableRepository {
    fn insert(&self, _record: TutorRecord) -> Result<TutorRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _record: TutorRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &TutorId) -> Result<Option<TutorRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<TutorRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_ranking(&self, _id: &TutorId, _ranking: StoredRanking) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (RankingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RankingService::new(repository.clone(), scorer());
    (service, repository)
}

pub(super) fn ranking_router_with_service(service: RankingService<MemoryRepository>) -> axum::Router {
    ranking_router(Arc::new(service))
}

pub(super) fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
