use battleship_solo::{autoplay, MatchSummary};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

/// One JSON line per simulated match.
#[derive(Serialize)]
struct SimResult {
    seed: u64,
    #[serde(flatten)]
    summary: MatchSummary,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u64 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 1,
    };

    for i in 0..games {
        let seed = seed.wrapping_add(i);
        let mut rng = SmallRng::seed_from_u64(seed);
        let (_, summary) = autoplay(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
        println!("{}", serde_json::to_string(&SimResult { seed, summary })?);
    }
    Ok(())
}
