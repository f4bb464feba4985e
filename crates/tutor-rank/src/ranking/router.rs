use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{TutorId, TutorSignalSet};
use super::repository::{RepositoryError, TutorRepository};
use super::service::{RankingService, RankingServiceError};

const DEFAULT_LEADERBOARD_LIMIT: usize = 20;

/// Router builder exposing the admin ranking endpoints.
pub fn ranking_router<R>(service: Arc<RankingService<R>>) -> Router
where
    R: TutorRepository + 'static,
{
    Router::new()
        .route("/api/v1/rankings", get(leaderboard_handler::<R>))
        .route("/api/v1/rankings/compute", post(compute_handler::<R>))
        .route(
            "/api/v1/rankings/recalculate",
            post(recalculate_all_handler::<R>),
        )
        .route(
            "/api/v1/tutors/:tutor_id/signals",
            put(signals_handler::<R>),
        )
        .route(
            "/api/v1/tutors/:tutor_id/ranking",
            get(ranking_handler::<R>),
        )
        .route(
            "/api/v1/tutors/:tutor_id/ranking/recalculate",
            post(recalculate_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeaderboardQuery {
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SignalsPayload {
    #[serde(default)]
    pub(crate) display_name: Option<String>,
    pub(crate) signals: TutorSignalSet,
}

pub(crate) async fn compute_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    axum::Json(signals): axum::Json<TutorSignalSet>,
) -> Response
where
    R: TutorRepository + 'static,
{
    match service.preview(&signals) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(RankingServiceError::Validation(error), None),
    }
}

pub(crate) async fn leaderboard_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    R: TutorRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    match service.leaderboard(limit) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error, None),
    }
}

pub(crate) async fn recalculate_all_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
) -> Response
where
    R: TutorRepository + 'static,
{
    match service.recalculate_all() {
        Ok(batch) => (StatusCode::OK, axum::Json(batch)).into_response(),
        Err(error) => error_response(error, None),
    }
}

pub(crate) async fn signals_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Path(tutor_id): Path<String>,
    axum::Json(payload): axum::Json<SignalsPayload>,
) -> Response
where
    R: TutorRepository + 'static,
{
    let id = TutorId(tutor_id);
    let SignalsPayload {
        display_name,
        signals,
    } = payload;

    let outcome = match service.get(&id) {
        Ok(_) => service
            .update_signals(&id, signals)
            .and_then(|record| match display_name {
                Some(name) if name != record.display_name => service.rename(&id, name),
                _ => Ok(record),
            })
            .map(|record| (StatusCode::OK, record.ranking_view())),
        Err(RankingServiceError::Repository(RepositoryError::NotFound)) => {
            let display_name = display_name.unwrap_or_else(|| id.0.clone());
            service
                .register(id.clone(), display_name, signals)
                .and_then(|_| service.get(&id))
                .map(|record| (StatusCode::CREATED, record.ranking_view()))
        }
        Err(other) => Err(other),
    };

    match outcome {
        Ok((status, view)) => (status, axum::Json(view)).into_response(),
        Err(error) => error_response(error, Some(&id)),
    }
}

pub(crate) async fn ranking_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Path(tutor_id): Path<String>,
) -> Response
where
    R: TutorRepository + 'static,
{
    let id = TutorId(tutor_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.ranking_view())).into_response(),
        Err(error) => error_response(error, Some(&id)),
    }
}

pub(crate) async fn recalculate_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Path(tutor_id): Path<String>,
) -> Response
where
    R: TutorRepository + 'static,
{
    let id = TutorId(tutor_id);
    match service.recalculate(&id) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error, Some(&id)),
    }
}

fn error_response(error: RankingServiceError, tutor_id: Option<&TutorId>) -> Response {
    match error {
        RankingServiceError::Validation(error) => {
            let payload = json!({
                "error": "unable to compute ranking for this tutor: data issue",
                "field": error.field.name(),
                "detail": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        RankingServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "tutor not found",
                "tutor_id": tutor_id.map(|id| id.0.clone()),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        RankingServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "tutor already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
