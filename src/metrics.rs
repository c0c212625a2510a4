//! Aggregated statistics over batches of runs.
use crate::heuristics::Heuristic;
use crate::output::run_label;
use crate::runner::{RunRecord, RunStatus};
use crate::solver::Strategy;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Totals for one strategy and heuristic pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub strategy: Strategy,
    pub heuristic: Heuristic,
    pub runs: usize,
    pub solved: usize,
    pub no_solution: usize,
    pub timed_out: usize,
    pub total_solution_length: usize,
    pub total_search_length: usize,
    pub total_cost: u64,
    pub total_time: Duration,
    estimate_ratio_sum: f64,
    estimate_ratio_count: usize,
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

impl Summary {
    fn new(strategy: Strategy, heuristic: Heuristic) -> Self {
        Summary {
            strategy,
            heuristic,
            runs: 0,
            solved: 0,
            no_solution: 0,
            timed_out: 0,
            total_solution_length: 0,
            total_search_length: 0,
            total_cost: 0,
            total_time: Duration::ZERO,
            estimate_ratio_sum: 0.0,
            estimate_ratio_count: 0,
        }
    }

    fn add(&mut self, record: &RunRecord) {
        self.runs += 1;
        self.total_search_length += record.search_length();
        self.total_time += record.report.elapsed;
        match record.status {
            RunStatus::Solved => self.solved += 1,
            RunStatus::NoSolution => self.no_solution += 1,
            RunStatus::TimedOut => self.timed_out += 1,
        }
        if let Some(solution) = record.report.solution() {
            self.total_solution_length += solution.move_count();
            self.total_cost += u64::from(solution.total_cost);
            if solution.total_cost > 0 {
                self.estimate_ratio_sum +=
                    f64::from(record.initial_estimate) / f64::from(solution.total_cost);
                self.estimate_ratio_count += 1;
            }
        }
    }

    /// Runs that ended without a path, for either reason.
    pub fn failures(&self) -> usize {
        self.no_solution + self.timed_out
    }

    pub fn average_solution_length(&self) -> f64 {
        average(self.total_solution_length as f64, self.solved)
    }

    pub fn average_search_length(&self) -> f64 {
        average(self.total_search_length as f64, self.runs)
    }

    pub fn average_cost(&self) -> f64 {
        average(self.total_cost as f64, self.solved)
    }

    pub fn average_time(&self) -> f64 {
        average(self.total_time.as_secs_f64(), self.runs)
    }

    /// Mean of `initial estimate / solution cost` over solved runs. Above 1 means the
    /// heuristic overestimated at the start.
    pub fn average_estimate_ratio(&self) -> f64 {
        average(self.estimate_ratio_sum, self.estimate_ratio_count)
    }
}

/// Groups records by strategy and heuristic, ordered UCS, GBFS, A*.
pub fn summarize(records: &[RunRecord]) -> Vec<Summary> {
    let mut grouped: BTreeMap<(Strategy, Heuristic), Summary> = BTreeMap::new();
    for record in records {
        let key = (record.job.strategy, record.job.heuristic);
        grouped
            .entry(key)
            .or_insert_with(|| Summary::new(key.0, key.1))
            .add(record);
    }
    grouped.into_values().collect()
}

pub const TABLE_HEADER: &str =
    "run          runs solved  fail  t/o  avg len  avg search  avg cost  avg time   h/cost";

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>4} {:>6} {:>5} {:>4} {:>8.2} {:>11.1} {:>9.2} {:>8.3}s {:>8.3}",
            run_label(self.strategy, self.heuristic),
            self.runs,
            self.solved,
            self.failures(),
            self.timed_out,
            self.average_solution_length(),
            self.average_search_length(),
            self.average_cost(),
            self.average_time(),
            self.average_estimate_ratio(),
        )
    }
}

/// Renders summaries as a text table with a header row.
pub fn render_table(summaries: &[Summary]) -> String {
    let mut table = String::from(TABLE_HEADER);
    for summary in summaries {
        table.push('\n');
        table.push_str(&summary.to_string());
    }
    table
}
