//! Tutor ranking: signal validation, the weighted rubric, and the admin recalculation flow.
//!
//! The scorer is a pure function over a [`TutorSignalSet`] snapshot. Everything with side
//! effects (persisting `ranking_score` and `ranking_updated_at`, batch recalculation, HTTP)
//! sits in the service and router layers around it.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scorer;
pub mod service;
pub mod signals;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    InterviewSubScores, PerformanceBand, RankingBreakdown, RankingCategory, RankingResult,
    SignalField, TutorId, TutorSignalSet,
};
pub use import::{ImportedTutor, SignalImportError, SignalImporter};
pub use repository::{
    RepositoryError, StoredRanking, TutorRankingView, TutorRecord, TutorRepository,
};
pub use router::ranking_router;
pub use scorer::{compute_ranking, RankingRubric, RankingScorer, ResponseTimeTiers, RubricError};
pub use service::{
    BatchRecalculation, FailedTutor, RankingService, RankingServiceError, RecalculatedTutor,
};
pub use signals::{
    CertificateRecord, CertificateStatus, InterviewRecord, SignalAggregator, TutorActivity,
};
pub use validation::{validate_signals, ValidationError, Violation};
