use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use recommender::{Recommendation, WeatherPreference};
use server::{EngineConfig, VotingService};
use std::path::PathBuf;
use std::time::Instant;
use tally::{PairwiseMatrix, candidate_set, schulze_ranking};
use tracing::warn;
use vote_store::{
    Activity, ActivityId, Ballot, BallotStore, RankedBallot, SeedData, UserId, ranked_ballots,
};

/// Activity Votes - ranked and scored voting on activities
#[derive(Parser)]
#[command(name = "activity-votes")]
#[command(about = "Activity voting, ranking and recommendations", long_about = None)]
struct Cli {
    /// Seed snapshot (users, activities, ballots) as JSON
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored ballots
    Ballots {
        /// Only ballots from this user
        #[arg(long)]
        user_id: Option<UserId>,
    },

    /// Schulze ranking over all ranked ballots
    Schulze,

    /// Condorcet winner and Copeland scores
    Condorcet {
        /// Candidate activity ids (default: every activity in the snapshot)
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<ActivityId>,
    },

    /// Activities ranked by average score
    Scores,

    /// Score details for one activity
    Activity {
        #[arg(long)]
        id: ActivityId,
    },

    /// Collaborative recommendations for a user
    Recommend {
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations (default from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Weather condition used to pick indoor or outdoor candidates
        #[arg(long)]
        weather: Option<String>,
    },

    /// Rank a random election to measure performance
    Simulate {
        /// Number of candidate activities
        #[arg(long, default_value = "20")]
        candidates: u32,

        /// Number of ranked ballots
        #[arg(long, default_value = "1000")]
        voters: u32,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.seed_path = data;
    }
    let load = || load_service(&config);

    match cli.command {
        Commands::Ballots { user_id } => {
            let (service, _) = load()?;
            handle_ballots(&service, user_id);
        }
        Commands::Schulze => {
            let (service, activities) = load()?;
            handle_schulze(&service, &activities);
        }
        Commands::Condorcet { candidates } => {
            let (service, activities) = load()?;
            handle_condorcet(&service, &activities, candidates);
        }
        Commands::Scores => {
            let (service, activities) = load()?;
            handle_scores(&service, &activities);
        }
        Commands::Activity { id } => {
            let (service, activities) = load()?;
            handle_activity(&service, &activities, id);
        }
        Commands::Recommend {
            user_id,
            limit,
            weather,
        } => {
            let (service, activities) = load()?;
            let limit = limit.unwrap_or(config.max_recommendations);
            handle_recommend(&service, activities, user_id, limit, weather).await?;
        }
        // Needs no seed data
        Commands::Simulate {
            candidates,
            voters,
            seed,
        } => handle_simulate(candidates, voters, seed)?,
    }

    Ok(())
}

/// Load the seed snapshot into a service; also returns the activity list.
fn load_service(config: &EngineConfig) -> Result<(VotingService, Vec<Activity>)> {
    let start = Instant::now();
    let seed = SeedData::load_from_file(&config.seed_path)
        .with_context(|| format!("Failed to load seed data from {:?}", config.seed_path))?;
    let activities = seed.activities.clone();
    let service = VotingService::from_seed(seed, config)?;
    println!(
        "{} Loaded {} activities and {} ballots in {:?}",
        "✓".green(),
        activities.len(),
        service.list_ballots().len(),
        start.elapsed()
    );
    Ok((service, activities))
}

fn activity_name(activities: &[Activity], id: ActivityId) -> String {
    activities
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("activity {}", id))
}

/// Handle the 'ballots' command
fn handle_ballots(service: &VotingService, user_id: Option<UserId>) {
    let ballots = match user_id {
        Some(user_id) => service.store().ballots_for_user(user_id),
        None => service.list_ballots(),
    };

    println!("{}", format!("{} ballot(s):", ballots.len()).bold().blue());
    for ballot in &ballots {
        match ballot {
            Ballot::Ranked(b) => println!(
                "{} user {} ranked {:?}",
                "•".green(),
                b.user_id,
                b.activity_ranking
            ),
            Ballot::Scored(v) => println!(
                "{} user {} scored activity {} with {}",
                "•".cyan(),
                v.user_id,
                v.activity_id,
                v.score
            ),
        }
    }
}

/// Handle the 'schulze' command
fn handle_schulze(service: &VotingService, activities: &[Activity]) {
    let ranking = service.rank_by_schulze();
    println!("{}", "Schulze ranking:".bold().blue());
    if ranking.order.is_empty() {
        println!("  no ranked ballots");
    }
    for (rank, (id, wins)) in ranking.wins.iter().enumerate() {
        println!(
            "{}. {} ({} pairwise wins)",
            (rank + 1).to_string().green(),
            activity_name(activities, *id),
            wins
        );
    }
}

/// Handle the 'condorcet' command
fn handle_condorcet(service: &VotingService, activities: &[Activity], candidates: Vec<ActivityId>) {
    let candidates = if candidates.is_empty() {
        activities.iter().map(|a| a.id).collect()
    } else {
        candidates
    };
    let result = service.rank_by_condorcet(&candidates);

    println!("{}", "Condorcet analysis:".bold().blue());
    match result.winner {
        Some(id) => println!("{}Winner: {}", "• ".green(), activity_name(activities, id)),
        None => println!("{}No Condorcet winner", "• ".yellow()),
    }
    println!("Copeland scores:");
    for entry in &result.copeland {
        println!(
            "  - {}: {:+}",
            activity_name(activities, entry.activity_id),
            entry.score
        );
    }
    println!("Pairwise preferences:");
    for entry in result.pairwise.iter().filter(|e| e.count > 0) {
        println!("  - {} over {}: {}", entry.winner, entry.loser, entry.count);
    }
}

/// Handle the 'scores' command
fn handle_scores(service: &VotingService, activities: &[Activity]) {
    println!("{}", "Activities by average score:".bold().blue());
    for (rank, entry) in service.score_ranking().iter().enumerate() {
        println!(
            "{}. {} avg {:.2} ({} votes)",
            (rank + 1).to_string().green(),
            activity_name(activities, entry.activity_id),
            entry.average_score,
            entry.vote_count
        );
    }
}

/// Handle the 'activity' command
fn handle_activity(service: &VotingService, activities: &[Activity], id: ActivityId) {
    let report = service.activity_score(id);
    println!("{}", activity_name(activities, id).bold().blue());
    println!("{}Average score: {:.2}", "• ".cyan(), report.average_score);
    println!("{}Votes: {}", "• ".cyan(), report.vote_count);
    for vote in &report.votes {
        println!("  - user {}: {}", vote.user_id, vote.score);
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &VotingService,
    activities: Vec<Activity>,
    user_id: UserId,
    limit: usize,
    weather: Option<String>,
) -> Result<()> {
    let candidates = match weather.as_deref() {
        Some(condition) => {
            if !WeatherPreference::is_known_condition(condition) {
                warn!("Unknown weather condition {:?}, using indoor activities", condition);
            }
            let preference = WeatherPreference::for_condition(condition);
            println!("Weather '{}' -> {:?} activities", condition, preference);
            preference.filter_candidates(&activities)
        }
        None => activities,
    };

    let recommendations = service
        .recommend_for_user(user_id, candidates, limit)
        .await
        .with_context(|| format!("Cannot recommend for user {}", user_id))?;
    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'simulate' command
fn handle_simulate(candidates: u32, voters: u32, seed: u64) -> Result<()> {
    if candidates == 0 {
        return Err(anyhow!("At least one candidate is required"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let ids: Vec<ActivityId> = (1..=candidates).collect();
    let store = BallotStore::new();
    for user_id in 0..voters {
        let mut ranking = ids.clone();
        ranking.shuffle(&mut rng);
        ranking.truncate(rng.random_range(1..=ranking.len()));
        store.add_ballot(&Ballot::Ranked(RankedBallot::new(user_id, ranking)));
    }

    let ballots = store.list_ballots();
    let start = Instant::now();
    let ranked = ranked_ballots(&ballots);
    let matrix = PairwiseMatrix::from_ballots(&candidate_set(&ranked), &ranked);
    let pairwise_time = start.elapsed();
    let ranking = schulze_ranking(&matrix);
    let total_time = start.elapsed();

    println!("{}", "Simulation results:".bold().blue());
    println!("Candidates: {}, ballots: {}", candidates, voters);
    println!("Pairwise matrix: {:?}", pairwise_time);
    println!("Schulze closure: {:?}", total_time - pairwise_time);
    println!("Total: {:?}", total_time);
    if let Some(winner) = ranking.winner() {
        println!("{}Winner: activity {}", "• ".green(), winner);
    }
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    println!("{}", "Recommended activities:".bold().blue());
    for line in recommendation_lines(recommendations) {
        println!("{}", line);
    }
}

fn recommendation_lines(recommendations: &[Recommendation]) -> Vec<String> {
    if recommendations.is_empty() {
        return vec!["  no recommendations".to_string()];
    }
    recommendations
        .iter()
        .enumerate()
        .map(|(rank, rec)| {
            format!(
                "{}. {} [{}, {}] - Score: {:.2}",
                (rank + 1).to_string().green(),
                rec.activity.name,
                rec.activity.activity_type,
                if rec.activity.is_indoor { "indoor" } else { "outdoor" },
                rec.score
            )
        })
        .collect()
}
