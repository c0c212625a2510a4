//! Best-first search over any [`Solvable`] state space.
//!
//! Uniform-Cost Search, Greedy Best-First Search and A* share one engine and only
//! differ in how [`Strategy::combine`] turns the path cost `g` and the heuristic
//! estimate `h` into the queue priority `f`.
use crate::engine::Solvable;
use crate::error::QueueError;
use crate::queue::IndexedPriorityQueue;
use clap::ValueEnum;
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Which best-first variant to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Strategy {
    /// Uniform-Cost Search, `f = g`.
    Ucs,
    /// Greedy Best-First Search, `f = h`.
    Gbfs,
    /// A*, `f = g + h`.
    Astar,
}

impl Strategy {
    pub fn combine(self, g: u32, h: u32) -> u32 {
        match self {
            Strategy::Ucs => g,
            Strategy::Gbfs => h,
            Strategy::Astar => g + h,
        }
    }

    /// Whether a closed state may be reopened when a strictly cheaper path reaches it.
    pub fn reopens_closed(self) -> bool {
        matches!(self, Strategy::Ucs)
    }

    /// Whether the strategy looks at the heuristic at all.
    pub fn uses_heuristic(self) -> bool {
        !matches!(self, Strategy::Ucs)
    }

    /// Short name used in output file names.
    pub fn tag(self) -> &'static str {
        match self {
            Strategy::Ucs => "ucs",
            Strategy::Gbfs => "gbfs",
            Strategy::Astar => "astar",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Ucs => "UCS",
            Strategy::Gbfs => "GBFS",
            Strategy::Astar => "A*",
        };
        f.write_str(name)
    }
}

/// The `(f, g, h)` triple a state was scheduled or expanded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Costs {
    pub f: u32,
    pub g: u32,
    pub h: u32,
}

/// One expanded state, in expansion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion<S> {
    pub state: S,
    pub costs: Costs,
}

/// One state on the solution path.
///
/// `mv` is the move that produced `state` from the previous step; the initial
/// step has no move and a zero cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<S: Solvable> {
    pub state: S,
    pub cost: u32,
    pub mv: Option<S::Move>,
}

/// A path from the initial state to a goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<S: Solvable> {
    pub steps: Vec<Step<S>>,
    pub total_cost: u32,
}

impl<S: Solvable> Solution<S> {
    /// Number of moves, excluding the initial state.
    pub fn move_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn final_state(&self) -> Option<&S> {
        self.steps.last().map(|step| &step.state)
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<S: Solvable> {
    Solved(Solution<S>),
    /// The open set ran dry without reaching a goal.
    Exhausted,
    /// The deadline or the expansion cap was hit before a goal was reached.
    TimedOut,
}

/// Result of a [`solve`] call.
#[derive(Clone, Debug)]
pub struct SearchReport<S: Solvable> {
    pub outcome: Outcome<S>,
    /// Every expanded state with the costs it was expanded at.
    pub trace: Vec<Expansion<S>>,
    pub elapsed: Duration,
}

impl<S: Solvable> SearchReport<S> {
    pub fn solution(&self) -> Option<&Solution<S>> {
        match &self.outcome {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Bounds on a single search.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    /// Most states to expand before giving up.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        SearchLimits::default()
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        SearchLimits {
            deadline: Instant::now().checked_add(timeout),
            max_expansions: None,
        }
    }

    pub fn with_max_expansions(self, max_expansions: usize) -> Self {
        SearchLimits {
            max_expansions: Some(max_expansions),
            ..self
        }
    }

    fn exceeded(&self, expanded: usize) -> bool {
        self.max_expansions.is_some_and(|cap| expanded >= cap)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Runs a best-first search from `start` until any of `goals` is expanded.
///
/// # Arguments
/// * `start`: The initial state.
/// * `goals`: Accepted goal states. The heuristic is taken as the minimum over all of them.
/// * `strategy`: Decides the priority `f` from `g` and `h`.
/// * `heuristic`: Estimate of the remaining cost from a state to one goal.
/// * `limits`: Optional deadline and expansion cap, checked once per expansion.
///
/// # Returns
/// A `SearchReport` with the outcome and the ordered list of expanded states.
pub fn solve<S, H>(
    start: &S,
    goals: &[S],
    strategy: Strategy,
    heuristic: H,
    limits: &SearchLimits,
) -> SearchReport<S>
where
    S: Solvable,
    H: Fn(&S, &S) -> u32,
{
    let started = Instant::now();
    let estimate = |state: &S| {
        goals
            .iter()
            .map(|goal| heuristic(state, goal))
            .min()
            .unwrap_or(0)
    };

    let mut open: IndexedPriorityQueue<S, u32> = IndexedPriorityQueue::new();
    let mut open_costs: HashMap<S, Costs> = HashMap::new();
    let mut closed: HashMap<S, Costs> = HashMap::new();
    let mut predecessors: HashMap<S, (S, S::Move)> = HashMap::new();
    let mut expansions: Vec<Expansion<S>> = Vec::new();

    let h = estimate(start);
    let start_costs = Costs {
        f: strategy.combine(0, h),
        g: 0,
        h,
    };
    open.enqueue(start.clone(), start_costs.f);
    open_costs.insert(start.clone(), start_costs);
    debug!("{} search started, initial estimate {}", strategy, h);

    let outcome = loop {
        if limits.exceeded(expansions.len()) {
            break Outcome::TimedOut;
        }

        let state = match open.dequeue() {
            Ok((_, state)) => state,
            Err(QueueError::Empty) => break Outcome::Exhausted,
        };
        let Some(costs) = open_costs.remove(&state) else {
            continue;
        };
        trace!("expand f={} g={} h={}", costs.f, costs.g, costs.h);
        closed.insert(state.clone(), costs);
        expansions.push(Expansion {
            state: state.clone(),
            costs,
        });

        if goals.contains(&state) {
            break Outcome::Solved(retrace(&predecessors, state));
        }

        for mv in state.get_moves() {
            let next = state.compute_move(&mv);
            let next_g = costs.g + S::move_cost(&mv);

            if let Some(done) = closed.get(&next) {
                if !(strategy.reopens_closed() && next_g < done.g) {
                    continue;
                }
                closed.remove(&next);
            }

            let next_h = estimate(&next);
            let next_f = strategy.combine(next_g, next_h);
            if open.peek_priority(&next).is_some_and(|f| f <= next_f) {
                continue;
            }

            open.enqueue(next.clone(), next_f);
            open_costs.insert(
                next.clone(),
                Costs {
                    f: next_f,
                    g: next_g,
                    h: next_h,
                },
            );
            predecessors.insert(next, (state.clone(), mv));
        }
    };

    let elapsed = started.elapsed();
    match &outcome {
        Outcome::Solved(solution) => debug!(
            "{} found a solution of cost {} after {} expansions in {:?}",
            strategy,
            solution.total_cost,
            expansions.len(),
            elapsed
        ),
        Outcome::Exhausted => debug!(
            "{} exhausted the state space after {} expansions",
            strategy,
            expansions.len()
        ),
        Outcome::TimedOut => debug!(
            "{} timed out after {} expansions",
            strategy,
            expansions.len()
        ),
    }

    SearchReport {
        outcome,
        trace: expansions,
        elapsed,
    }
}

/// Walks the predecessor map back from `goal` and returns the path start to goal.
pub fn retrace<S: Solvable>(predecessors: &HashMap<S, (S, S::Move)>, goal: S) -> Solution<S> {
    let mut steps = Vec::new();
    let mut current = goal;
    while let Some((previous, mv)) = predecessors.get(&current) {
        steps.push(Step {
            state: current,
            cost: S::move_cost(mv),
            mv: Some(mv.clone()),
        });
        current = previous.clone();
    }
    steps.push(Step {
        state: current,
        cost: 0,
        mv: None,
    });
    steps.reverse();

    let total_cost = steps.iter().map(|step| step.cost).sum();
    Solution { steps, total_cost }
}
