use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use sliding_tile_solver::engine::Board;
use sliding_tile_solver::heuristics::Heuristic;
use sliding_tile_solver::metrics::{render_table, summarize};
use sliding_tile_solver::output::write_report_files;
use sliding_tile_solver::runner::{plan_jobs, run_batch, RunRecord, RunStatus};
use sliding_tile_solver::solver::Strategy;
use sliding_tile_solver::utils::{load_puzzles, parse_dimensions};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the puzzle file, one puzzle per line
    input_file: PathBuf,

    /// Puzzle dimensions as [width, height]
    #[clap(short, long, default_value = "[4, 2]", value_parser = parse_dimensions)]
    dimensions: (usize, usize),

    /// Output directory for solution and search files
    #[clap(short, long, default_value = "_out/")]
    output: PathBuf,

    /// Time budget per run in seconds, 0 for none
    #[clap(short, long, default_value_t = 60)]
    timeout: u64,

    /// Search strategies to run
    #[clap(short, long, value_enum, value_delimiter = ',',
           default_values_t = [Strategy::Ucs, Strategy::Gbfs, Strategy::Astar])]
    strategies: Vec<Strategy>,

    /// Heuristics for GBFS and A*
    #[clap(short = 'H', long, value_enum, value_delimiter = ',',
           default_values_t = [Heuristic::Manhattan, Heuristic::ValueDiff])]
    heuristics: Vec<Heuristic>,

    /// Worker threads, defaults to one per core
    #[clap(short, long)]
    jobs: Option<usize>,
}

fn describe(record: &RunRecord) -> String {
    match (record.status, record.report.solution()) {
        (RunStatus::Solved, Some(solution)) => format!(
            "cost {}, {} moves, {} expanded",
            solution.total_cost,
            solution.move_count(),
            record.search_length()
        ),
        (RunStatus::TimedOut, _) => "no solution (timed out)".to_string(),
        _ => "no solution".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (width, height) = args.dimensions;
    if (width * height) % 2 != 0 {
        warn!(
            "{}x{} boards have an odd number of cells, some puzzles may have no solution",
            width, height
        );
    }

    let content = fs::read_to_string(&args.input_file)
        .with_context(|| format!("Failed to read puzzle file {}", args.input_file.display()))?;

    let puzzles: Vec<(usize, Board)> = load_puzzles(&content, width, height)
        .into_iter()
        .enumerate()
        .filter_map(|(idx, parsed)| match parsed {
            Ok(board) => Some((idx, board)),
            Err(e) => {
                warn!("Skipping puzzle {}: {}", idx, e);
                None
            }
        })
        .collect();
    info!(
        "Loaded {} puzzles from {}",
        puzzles.len(),
        args.input_file.display()
    );

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let jobs = plan_jobs(&puzzles, &args.strategies, &args.heuristics);
    info!("Running {} searches", jobs.len());
    let records = run_batch(jobs, timeout, args.jobs).context("Failed to start worker pool")?;

    for record in &records {
        let job = &record.job;
        write_report_files(
            &args.output,
            job.puzzle_index,
            job.strategy,
            job.heuristic,
            &record.report,
        )
        .with_context(|| format!("Failed to write results for puzzle {}", job.puzzle_index))?;

        let heuristic = if job.strategy.uses_heuristic() {
            format!(" ({})", job.heuristic)
        } else {
            String::new()
        };
        println!(
            "Puzzle {}, {}{}: {}",
            job.puzzle_index,
            job.strategy,
            heuristic,
            describe(record)
        );
    }

    println!("\n{}", render_table(&summarize(&records)));
    println!("\nResults written to {}", args.output.display());
    Ok(())
}
