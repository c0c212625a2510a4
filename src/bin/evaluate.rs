use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sliding_tile_solver::engine::Board;
use sliding_tile_solver::heuristics::Heuristic;
use sliding_tile_solver::metrics::{render_table, summarize};
use sliding_tile_solver::runner::{plan_jobs, run_batch, RunRecord};
use sliding_tile_solver::solver::Strategy;
use sliding_tile_solver::utils::parse_dimensions;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares strategies and heuristics on random puzzles", long_about = None)]
struct Args {
    /// Number of random puzzles to evaluate
    #[clap(short = 'n', long, default_value_t = 20)]
    count: usize,

    /// Puzzle dimensions as [width, height]
    #[clap(short, long, default_value = "[4, 2]", value_parser = parse_dimensions)]
    dimensions: (usize, usize),

    /// Seed of the first puzzle; puzzle `i` uses `seed + i`
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Time budget per run in seconds, 0 for none
    #[clap(short, long, default_value_t = 60)]
    timeout: u64,

    /// Worker threads, defaults to one per core
    #[clap(short, long)]
    jobs: Option<usize>,
}

/// Per heuristic, how many A* runs matched the UCS optimum out of those both solved.
fn optimality_against_ucs(records: &[RunRecord]) -> BTreeMap<Heuristic, (usize, usize)> {
    let optimal: HashMap<usize, u32> = records
        .iter()
        .filter(|r| r.job.strategy == Strategy::Ucs)
        .filter_map(|r| r.solution_cost().map(|cost| (r.job.puzzle_index, cost)))
        .collect();

    let mut tally: BTreeMap<Heuristic, (usize, usize)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.job.strategy == Strategy::Astar) {
        let (Some(cost), Some(&best)) = (
            record.solution_cost(),
            optimal.get(&record.job.puzzle_index),
        ) else {
            continue;
        };
        let entry = tally.entry(record.job.heuristic).or_insert((0, 0));
        if cost == best {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
    tally
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (width, height) = args.dimensions;

    let mut puzzles = Vec::with_capacity(args.count);
    for idx in 0..args.count {
        let seed = args.seed + idx as u64;
        let board = Board::random(width, height, &mut SmallRng::seed_from_u64(seed))?;
        puzzles.push((idx, board));
    }

    let heuristics = [
        Heuristic::Manhattan,
        Heuristic::ValueDiff,
        Heuristic::EmptyCorner,
    ];
    let strategies = [Strategy::Ucs, Strategy::Gbfs, Strategy::Astar];
    let jobs = plan_jobs(&puzzles, &strategies, &heuristics);
    info!(
        "Evaluating {} runs over {} puzzles of size {}x{}",
        jobs.len(),
        puzzles.len(),
        width,
        height
    );

    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let records = run_batch(jobs, timeout, args.jobs).context("Failed to start worker pool")?;

    println!("\n--- Evaluation Complete ---");
    println!("Puzzles evaluated: {}", puzzles.len());
    println!("\n{}", render_table(&summarize(&records)));

    println!("\n--- A* Optimality (against UCS) ---");
    for (heuristic, (matched, compared)) in optimality_against_ucs(&records) {
        println!(
            "Heuristic {:<12}: {}/{} optimal",
            heuristic.to_string(),
            matched,
            compared
        );
    }
    Ok(())
}
