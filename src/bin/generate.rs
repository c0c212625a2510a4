use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sliding_tile_solver::engine::Board;
use sliding_tile_solver::utils::parse_dimensions;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Writes random puzzles, one per line", long_about = None)]
struct Args {
    /// File to write the puzzles to
    output: PathBuf,

    /// Number of puzzles to generate
    #[clap(short = 'n', long, default_value_t = 50)]
    count: usize,

    /// Puzzle dimensions as [width, height]
    #[clap(short, long, default_value = "[4, 2]", value_parser = parse_dimensions)]
    dimensions: (usize, usize),

    /// Seed for the random number generator
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (width, height) = args.dimensions;
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    for _ in 0..args.count {
        let board = Board::random(width, height, &mut rng)?;
        writeln!(out, "{}", board.to_line())?;
    }
    out.flush()?;

    info!(
        "Wrote {} {}x{} puzzles (seed {}) to {}",
        args.count,
        width,
        height,
        args.seed,
        args.output.display()
    );
    Ok(())
}
