//! Batch orchestration: one independent search per puzzle, strategy and heuristic.
//!
//! Jobs share nothing mutable, so a batch is spread over a `rayon` pool. Each job
//! carries its own wall-clock deadline and is recorded as timed out, never retried.
use crate::engine::Board;
use crate::heuristics::Heuristic;
use crate::solver::{solve, Outcome, SearchLimits, SearchReport, Strategy};
use log::{debug, warn};
use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Job {
    pub puzzle_index: usize,
    pub board: Board,
    pub strategy: Strategy,
    pub heuristic: Heuristic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Solved,
    /// The search exhausted every reachable state.
    NoSolution,
    TimedOut,
}

#[derive(Clone, Debug)]
pub struct RunRecord {
    pub job: Job,
    pub status: RunStatus,
    /// Heuristic estimate of the initial board against its nearest goal.
    pub initial_estimate: u32,
    pub report: SearchReport<Board>,
}

impl RunRecord {
    pub fn solution_cost(&self) -> Option<u32> {
        self.report.solution().map(|s| s.total_cost)
    }

    pub fn solution_length(&self) -> Option<usize> {
        self.report.solution().map(|s| s.move_count())
    }

    pub fn search_length(&self) -> usize {
        self.report.trace.len()
    }
}

/// Expands puzzles into jobs.
///
/// Strategies that ignore the heuristic run once per puzzle with `Heuristic::Zero`;
/// the others run once per requested heuristic.
pub fn plan_jobs(
    puzzles: &[(usize, Board)],
    strategies: &[Strategy],
    heuristics: &[Heuristic],
) -> Vec<Job> {
    let mut jobs = Vec::new();
    for (puzzle_index, board) in puzzles {
        for &strategy in strategies {
            let chosen: &[Heuristic] = if strategy.uses_heuristic() {
                heuristics
            } else {
                &[Heuristic::Zero]
            };
            for &heuristic in chosen {
                jobs.push(Job {
                    puzzle_index: *puzzle_index,
                    board: board.clone(),
                    strategy,
                    heuristic,
                });
            }
        }
    }
    jobs
}

/// Runs one job, giving up after `timeout` if one is set.
pub fn run_job(job: Job, timeout: Option<Duration>) -> RunRecord {
    let goals = job.board.goal_states();
    let limits = timeout.map_or_else(SearchLimits::unbounded, SearchLimits::with_timeout);

    let report = solve(
        &job.board,
        &goals,
        job.strategy,
        job.heuristic.function(),
        &limits,
    );
    let status = match report.outcome {
        Outcome::Solved(_) => RunStatus::Solved,
        Outcome::Exhausted => RunStatus::NoSolution,
        Outcome::TimedOut => RunStatus::TimedOut,
    };

    if status == RunStatus::TimedOut {
        warn!(
            "puzzle {} with {} ({}) ran out of time after {} expansions",
            job.puzzle_index,
            job.strategy,
            job.heuristic,
            report.trace.len()
        );
    } else {
        debug!(
            "puzzle {} with {} ({}) finished: {:?}",
            job.puzzle_index, job.strategy, job.heuristic, status
        );
    }

    RunRecord {
        initial_estimate: job.heuristic.estimate(&job.board, &goals),
        job,
        status,
        report,
    }
}

/// Runs every job in parallel and returns the records in job order.
///
/// # Errors
/// Fails only if a dedicated pool of `threads` workers cannot be created.
pub fn run_batch(
    jobs: Vec<Job>,
    timeout: Option<Duration>,
    threads: Option<usize>,
) -> Result<Vec<RunRecord>, ThreadPoolBuildError> {
    let mut builder = ThreadPoolBuilder::new();
    if let Some(threads) = threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    Ok(pool.install(|| {
        jobs.into_par_iter()
            .map(|job| run_job(job, timeout))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzles() -> Vec<(usize, Board)> {
        vec![
            (0, Board::new(vec![1, 2, 3, 4, 5, 6, 0, 7], 4, 2).unwrap()),
            (1, Board::new(vec![1, 2, 0, 3], 2, 2).unwrap()),
        ]
    }

    #[test]
    fn test_plan_jobs_runs_ucs_once() {
        let jobs = plan_jobs(
            &puzzles(),
            &[Strategy::Ucs, Strategy::Gbfs, Strategy::Astar],
            &[Heuristic::Manhattan, Heuristic::ValueDiff],
        );
        assert_eq!(jobs.len(), 2 * (1 + 2 + 2));
        let first: Vec<(Strategy, Heuristic)> =
            jobs[..5].iter().map(|j| (j.strategy, j.heuristic)).collect();
        assert_eq!(
            first,
            vec![
                (Strategy::Ucs, Heuristic::Zero),
                (Strategy::Gbfs, Heuristic::Manhattan),
                (Strategy::Gbfs, Heuristic::ValueDiff),
                (Strategy::Astar, Heuristic::Manhattan),
                (Strategy::Astar, Heuristic::ValueDiff),
            ]
        );
        assert!(jobs[5..].iter().all(|j| j.puzzle_index == 1));
    }

    #[test]
    fn test_run_job_solves() {
        let job = plan_jobs(&puzzles(), &[Strategy::Astar], &[Heuristic::Manhattan]).remove(0);
        let record = run_job(job, Some(Duration::from_secs(30)));
        assert_eq!(record.status, RunStatus::Solved);
        assert_eq!(record.solution_cost(), Some(1));
        assert_eq!(record.solution_length(), Some(1));
        assert_eq!(record.initial_estimate, 1);
    }

    #[test]
    fn test_run_job_times_out() {
        let job = plan_jobs(&puzzles(), &[Strategy::Ucs], &[]).remove(0);
        let record = run_job(job, Some(Duration::ZERO));
        assert_eq!(record.status, RunStatus::TimedOut);
        assert_eq!(record.solution_cost(), None);
    }

    #[test]
    fn test_run_batch_keeps_job_order() {
        let jobs = plan_jobs(
            &puzzles(),
            &[Strategy::Ucs, Strategy::Astar],
            &[Heuristic::Manhattan],
        );
        let expected: Vec<(usize, Strategy)> =
            jobs.iter().map(|j| (j.puzzle_index, j.strategy)).collect();
        let records = run_batch(jobs, None, Some(2)).unwrap();
        let actual: Vec<(usize, Strategy)> = records
            .iter()
            .map(|r| (r.job.puzzle_index, r.job.strategy))
            .collect();
        assert_eq!(actual, expected);
        assert!(records.iter().all(|r| r.status == RunStatus::Solved));
    }
}
