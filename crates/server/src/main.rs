//! Simple test harness for the voting service.
//!
//! Loads the seed snapshot, records a few extra ballots and prints every
//! ranking plus recommendations for one user.
//!
//! Usage: `server [config.json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use recommender::WeatherPreference;
use server::{EngineConfig, VotingService};
use vote_store::{RankedBallot, ScoreEntry, ScoredSubmission, SeedData, Submission};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,tally=debug,recommender=debug")
        .init();

    info!("Starting voting service test harness");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = EngineConfig::load_or_default(config_path.as_deref())?;

    info!("Loading seed snapshot from {:?}...", config.seed_path);
    let seed = SeedData::load_from_file(&config.seed_path)
        .with_context(|| format!("Failed to load seed {:?}", config.seed_path))?;
    let activities = seed.activities.clone();
    let service = VotingService::from_seed(seed, &config)?;
    info!("Seed loaded: {} ballots", service.list_ballots().len());

    let extra = [
        Submission::Ranked(RankedBallot::new(1, vec![3, 1, 2])),
        Submission::Scored(ScoredSubmission {
            user_id: 2,
            votes: vec![ScoreEntry { activity_id: 1, score: 8 }],
        }),
        // Rejected: activity 2 twice
        Submission::Ranked(RankedBallot::new(3, vec![2, 2])),
    ];
    for submission in &extra {
        match service.submit_ballot(submission) {
            Ok(recorded) => info!("Recorded {} ballot(s)", recorded),
            Err(err) => info!("Submission rejected: {}", err),
        }
    }

    let schulze = service.rank_by_schulze();
    info!("Schulze order: {:?}", schulze.order);

    let candidate_ids: Vec<_> = activities.iter().map(|a| a.id).collect();
    let condorcet = service.rank_by_condorcet(&candidate_ids);
    info!("Condorcet winner: {:?}", condorcet.winner);
    for entry in &condorcet.copeland {
        info!("   Copeland {} -> {}", entry.activity_id, entry.score);
    }

    for entry in service.score_ranking() {
        info!(
            "Score {} -> {:.2} ({} votes)",
            entry.activity_id, entry.average_score, entry.vote_count
        );
    }

    let candidates = WeatherPreference::for_condition("clear").filter_candidates(&activities);
    let user_id = 1;
    let recommendations = service
        .recommend_for_user(user_id, candidates, config.max_recommendations)
        .await?;
    info!("Received {} recommendations for user {}:", recommendations.len(), user_id);
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} [{}] - Score: {:.3}",
            i + 1,
            rec.activity.name,
            rec.activity.activity_type,
            rec.score
        );
    }

    Ok(())
}
