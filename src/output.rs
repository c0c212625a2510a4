//! Solution and search-trace file writers.
//!
//! Solution files hold one `"<tile> <cost> <grid>"` line per step followed by a
//! `"<total_cost> <elapsed_seconds>"` trailer. Search files hold one
//! `"<f> <g> <h> <grid>"` line per expanded state. Both contain the single line
//! `no solution` when the search did not reach a goal.
use crate::engine::{Board, EMPTY_TILE};
use crate::heuristics::Heuristic;
use crate::solver::{SearchReport, Solution, Strategy};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const NO_SOLUTION: &str = "no solution";

/// Value of the tile moved into place at step `idx`, `0` for the initial step.
fn moved_tile(solution: &Solution<Board>, idx: usize) -> u32 {
    match (&solution.steps[idx].mv, idx.checked_sub(1)) {
        (Some(mv), Some(prev)) => solution.steps[prev].state.tile_at(mv.tile),
        _ => EMPTY_TILE,
    }
}

pub fn write_solution<W: Write>(out: &mut W, report: &SearchReport<Board>) -> io::Result<()> {
    let Some(solution) = report.solution() else {
        return writeln!(out, "{}", NO_SOLUTION);
    };
    for (idx, step) in solution.steps.iter().enumerate() {
        writeln!(
            out,
            "{} {} {}",
            moved_tile(solution, idx),
            step.cost,
            step.state.to_line()
        )?;
    }
    writeln!(
        out,
        "{} {:.3}",
        solution.total_cost,
        report.elapsed.as_secs_f64()
    )
}

pub fn write_search<W: Write>(out: &mut W, report: &SearchReport<Board>) -> io::Result<()> {
    if report.solution().is_none() {
        return writeln!(out, "{}", NO_SOLUTION);
    }
    for expansion in &report.trace {
        let costs = expansion.costs;
        writeln!(
            out,
            "{} {} {} {}",
            costs.f,
            costs.g,
            costs.h,
            expansion.state.to_line()
        )?;
    }
    Ok(())
}

/// `ucs` for Uniform-Cost Search, `<strategy>-<heuristic>` otherwise.
pub fn run_label(strategy: Strategy, heuristic: Heuristic) -> String {
    if strategy.uses_heuristic() {
        format!("{}-{}", strategy.tag(), heuristic.tag())
    } else {
        strategy.tag().to_string()
    }
}

/// Paths of the solution and search files for one run.
pub fn output_paths(
    dir: &Path,
    puzzle_index: usize,
    strategy: Strategy,
    heuristic: Heuristic,
) -> (PathBuf, PathBuf) {
    let label = run_label(strategy, heuristic);
    (
        dir.join(format!("{}_{}_solution.txt", puzzle_index, label)),
        dir.join(format!("{}_{}_search.txt", puzzle_index, label)),
    )
}

/// Writes both files for one run into `dir`, which must already exist.
pub fn write_report_files(
    dir: &Path,
    puzzle_index: usize,
    strategy: Strategy,
    heuristic: Heuristic,
    report: &SearchReport<Board>,
) -> io::Result<()> {
    let (solution_path, search_path) = output_paths(dir, puzzle_index, strategy, heuristic);

    let mut solution_file = BufWriter::new(File::create(solution_path)?);
    write_solution(&mut solution_file, report)?;
    solution_file.flush()?;

    let mut search_file = BufWriter::new(File::create(search_path)?);
    write_search(&mut search_file, report)?;
    search_file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::h_zero;
    use crate::solver::{solve, Outcome, SearchLimits};
    use std::time::Duration;

    fn solved_report() -> SearchReport<Board> {
        let b = Board::new(vec![1, 2, 3, 4, 5, 6, 0, 7], 4, 2).unwrap();
        let mut report = solve(
            &b,
            &b.goal_states(),
            Strategy::Ucs,
            h_zero,
            &SearchLimits::unbounded(),
        );
        report.elapsed = Duration::from_millis(1500);
        report
    }

    #[test]
    fn test_write_solution() {
        let mut out = Vec::new();
        write_solution(&mut out, &solved_report()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0 0 1 2 3 4 5 6 0 7\n7 1 1 2 3 4 5 6 7 0\n1 1.500\n"
        );
    }

    #[test]
    fn test_write_search_lists_expansions() {
        let report = solved_report();
        let mut out = Vec::new();
        write_search(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), report.trace.len());
        assert_eq!(lines[0], "0 0 0 1 2 3 4 5 6 0 7");
        assert!(lines.last().unwrap().ends_with("1 2 3 4 5 6 7 0"));
    }

    #[test]
    fn test_failed_search_writes_sentinel() {
        let mut report = solved_report();
        report.outcome = Outcome::TimedOut;
        let mut solution = Vec::new();
        let mut search = Vec::new();
        write_solution(&mut solution, &report).unwrap();
        write_search(&mut search, &report).unwrap();
        assert_eq!(solution, b"no solution\n");
        assert_eq!(search, b"no solution\n");
    }

    #[test]
    fn test_output_paths() {
        let dir = Path::new("_out");
        let (solution, search) = output_paths(dir, 3, Strategy::Ucs, Heuristic::Zero);
        assert_eq!(solution, dir.join("3_ucs_solution.txt"));
        assert_eq!(search, dir.join("3_ucs_search.txt"));
        let (solution, _) = output_paths(dir, 0, Strategy::Astar, Heuristic::Manhattan);
        assert_eq!(solution, dir.join("0_astar-h1_solution.txt"));
    }
}
