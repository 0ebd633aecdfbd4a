use std::path::Path;
use std::time::Instant;
use vote_store::{SeedData, ranked_ballots, scored_votes};

fn main() {
    let seed_path = Path::new("data/seed.json");

    println!("Loading seed snapshot...\n");

    let start = Instant::now();
    let seed = SeedData::load_from_file(seed_path).expect("Failed to load seed snapshot");
    let (index, store) = seed.into_parts().expect("Seed snapshot contains invalid ballots");
    let elapsed = start.elapsed();

    let (users, activities) = index.counts();
    let ballots = store.list_ballots();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Activities: {}", activities);
    println!("Ranked ballots: {}", ranked_ballots(&ballots).len());
    println!("Scored votes: {}", scored_votes(&ballots).len());
}
