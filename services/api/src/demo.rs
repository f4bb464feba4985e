use crate::infra::{configured_scorer, InMemoryTutorRepository};
use chrono::{Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tutor_rank::config::AppConfig;
use tutor_rank::error::AppError;
use tutor_rank::ranking::{
    CertificateRecord, CertificateStatus, InterviewRecord, InterviewSubScores, RankingCategory,
    RankingResult, RankingService, SignalAggregator, TutorActivity, TutorId, TutorRecord,
    TutorRepository, TutorSignalSet,
};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file containing a single tutor signal set
    #[arg(long)]
    pub(crate) signals: PathBuf,
    /// Print the result as JSON instead of a readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankCsvArgs {
    /// Signal CSV export, one tutor per row
    pub(crate) path: PathBuf,
    /// Number of leaderboard entries to print
    #[arg(long, default_value_t = 10)]
    pub(crate) top: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the per-category breakdown for every sample tutor.
    #[arg(long)]
    pub(crate) show_breakdown: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let scorer = configured_scorer(&config)?;

    let raw = std::fs::read_to_string(&args.signals)?;
    let signals: TutorSignalSet = serde_json::from_str(&raw)?;
    let result = scorer.compute(&signals)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_result(&args.signals.display().to_string(), &result, true);
    }
    Ok(())
}

pub(crate) fn run_rank_csv(args: RankCsvArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = Arc::new(InMemoryTutorRepository::default());
    let service = RankingService::new(repository.clone(), configured_scorer(&config)?);

    let seeded = repository.seed_from_csv(&args.path)?;
    let batch = service.recalculate_all()?;

    println!(
        "Ranked {} of {} tutors from {}",
        batch.updated.len(),
        seeded,
        args.path.display()
    );

    println!("\nLeaderboard");
    for (position, view) in service.leaderboard(args.top)?.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) - {} | {}",
            position + 1,
            view.display_name,
            view.tutor_id,
            view.ranking_score.unwrap_or_default(),
            view.assessment
        );
    }

    if !batch.failed.is_empty() {
        println!("\nUnable to compute ranking (data issue)");
        for failure in &batch.failed {
            println!("- {}: {}", failure.tutor_id, failure.error);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryTutorRepository::default());
    let service = RankingService::new(repository.clone(), Default::default());

    println!("Tutor ranking demo");
    for (id, name, activity) in sample_tutors() {
        let signals = SignalAggregator::aggregate(&activity);
        match service.register(TutorId(id.to_string()), name, signals) {
            Ok(result) => render_result(name, &result, args.show_breakdown),
            Err(err) => println!("- {name}: unable to compute ranking ({err})"),
        }
    }

    println!("\nBad upstream data is rejected rather than scored");
    let corrupted = TutorSignalSet {
        completion_rate_percent: 142.0,
        ..TutorSignalSet::empty()
    };
    repository
        .upsert(TutorRecord::new(
            TutorId("tutor-404".to_string()),
            "Corrupted Import",
            corrupted,
        ))
        .map_err(|err| AppError::Ranking(err.into()))?;

    let batch = service.recalculate_all()?;
    println!(
        "- Recalculated {} tutors, {} rejected",
        batch.updated.len(),
        batch.failed.len()
    );
    for failure in &batch.failed {
        println!("  {} -> {}", failure.tutor_id, failure.error);
    }

    println!("\nLeaderboard");
    for (position, view) in service.leaderboard(10)?.iter().enumerate() {
        println!(
            "{:>3}. {} - {}",
            position + 1,
            view.display_name,
            view.ranking_score.unwrap_or_default()
        );
    }

    Ok(())
}

fn render_result(label: &str, result: &RankingResult, show_breakdown: bool) {
    println!("- {label}: {} / 100 ({})", result.score, result.assessment);
    if show_breakdown {
        for category in RankingCategory::ALL {
            println!(
                "    {:<16} {:>3}",
                category.label(),
                result.breakdown.points(category)
            );
        }
    }
}

fn certificate(title: &str, status: CertificateStatus) -> CertificateRecord {
    CertificateRecord {
        title: title.to_string(),
        status,
    }
}

fn interview(days_ago: i64, sub_scores: InterviewSubScores) -> InterviewRecord {
    InterviewRecord {
        completed_at: Utc::now() - Duration::days(days_ago),
        overall: Some(sub_scores.average()),
        sub_scores: Some(sub_scores),
    }
}

fn sample_tutors() -> Vec<(&'static str, &'static str, TutorActivity)> {
    vec![
        (
            "tutor-001",
            "Mei Lin",
            TutorActivity {
                interviews: vec![interview(
                    30,
                    InterviewSubScores {
                        patience: 9.0,
                        empathy: 8.0,
                        communication: 9.0,
                        professionalism: 9.0,
                        subject_mastery: 10.0,
                        teaching_ability: 9.0,
                    },
                )],
                certificates: vec![
                    certificate("PGDE", CertificateStatus::Approved),
                    certificate("Physics BSc", CertificateStatus::Approved),
                    certificate("Olympiad Coach", CertificateStatus::Approved),
                ],
                response_minutes: vec![8.0, 14.0, 22.0],
                assignments_total: 20,
                assignments_completed: 19,
            },
        ),
        (
            "tutor-002",
            "Arjun Rao",
            TutorActivity {
                interviews: vec![interview(90, InterviewSubScores::uniform(7.0))],
                certificates: vec![
                    certificate("Maths BSc", CertificateStatus::Approved),
                    certificate("TEFL", CertificateStatus::Pending),
                ],
                response_minutes: vec![45.0, 80.0, 200.0],
                assignments_total: 12,
                assignments_completed: 9,
            },
        ),
        (
            "tutor-003",
            "New Applicant",
            TutorActivity {
                certificates: vec![certificate("Diploma", CertificateStatus::Rejected)],
                ..TutorActivity::default()
            },
        ),
    ]
}
