use crate::cli::ServeArgs;
use crate::infra::{configured_scorer, AppState, InMemoryTutorRepository};
use crate::routes::with_ranking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use tutor_rank::config::AppConfig;
use tutor_rank::error::AppError;
use tutor_rank::ranking::RankingService;
use tutor_rank::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryTutorRepository::default());
    let ranking_service = Arc::new(RankingService::new(
        repository.clone(),
        configured_scorer(&config)?,
    ));

    if let Some(path) = args.seed_csv.take() {
        repository.seed_from_csv(&path)?;
        let batch = ranking_service.recalculate_all()?;
        info!(
            ranked = batch.updated.len(),
            rejected = batch.failed.len(),
            "initial rankings computed"
        );
    }

    let app = with_ranking_routes(ranking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tutor ranking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
