pub mod config;
pub mod error;
pub mod ranking;
pub mod telemetry;

pub use ranking::{compute_ranking, RankingResult, TutorSignalSet, ValidationError};
