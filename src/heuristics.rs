use crate::engine::{Board, Position, EMPTY_TILE};
use clap::ValueEnum;

/// Constant zero estimate. Always admissible.
pub fn h_zero(_current: &Board, _goal: &Board) -> u32 {
    0
}

/// Folds an axis distance to account for wrapping moves.
///
/// A distance greater than half the axis length becomes `ceil(distance / 2)`.
fn wrap_aware_distance(a: usize, b: usize, axis_len: usize) -> u32 {
    let d = a.abs_diff(b);
    if 2 * d > axis_len {
        d.div_ceil(2) as u32
    } else {
        d as u32
    }
}

/// Sum of wrap-aware Manhattan distances of every non-empty tile to its goal cell.
///
/// # Arguments
/// * `current`: The board to evaluate.
/// * `goal`: The goal layout, with the same dimensions as `current`.
///
/// # Returns
/// The summed distance. `0` exactly when `current` equals `goal`.
pub fn h_manhattan(current: &Board, goal: &Board) -> u32 {
    let (w, h) = current.dimensions();

    let mut goal_positions = vec![Position::new(0, 0); w * h];
    for (idx, &value) in goal.tiles().iter().enumerate() {
        goal_positions[value as usize] = Position::new(idx % w, idx / w);
    }

    current
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != EMPTY_TILE)
        .map(|(idx, &value)| {
            let target = goal_positions[value as usize];
            wrap_aware_distance(idx % w, target.x, w) + wrap_aware_distance(idx / w, target.y, h)
        })
        .sum()
}

/// Sum over all cells of the absolute difference between the present and expected
/// tile values. Not a distance and not admissible in general.
pub fn h_value_diff(current: &Board, goal: &Board) -> u32 {
    current
        .tiles()
        .iter()
        .zip(goal.tiles())
        .map(|(&a, &b)| a.abs_diff(b))
        .sum()
}

/// `0` when the empty tile already sits in the bottom-right corner, `1` otherwise.
///
/// Every goal layout keeps the empty tile in that corner, so this never overestimates.
pub fn h_empty_corner(current: &Board, _goal: &Board) -> u32 {
    let (w, h) = current.dimensions();
    u32::from(current.empty_position() != Position::new(w - 1, h - 1))
}

/// Selects one of the heuristic functions by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Heuristic {
    Zero,
    Manhattan,
    ValueDiff,
    EmptyCorner,
}

impl Heuristic {
    pub fn function(self) -> fn(&Board, &Board) -> u32 {
        match self {
            Heuristic::Zero => h_zero,
            Heuristic::Manhattan => h_manhattan,
            Heuristic::ValueDiff => h_value_diff,
            Heuristic::EmptyCorner => h_empty_corner,
        }
    }

    pub fn evaluate(self, current: &Board, goal: &Board) -> u32 {
        (self.function())(current, goal)
    }

    /// Lowest estimate over all `goals`, or `0` if there are none.
    pub fn estimate(self, current: &Board, goals: &[Board]) -> u32 {
        goals
            .iter()
            .map(|goal| self.evaluate(current, goal))
            .min()
            .unwrap_or(0)
    }

    /// Short name used in output file names.
    pub fn tag(self) -> &'static str {
        match self {
            Heuristic::Zero => "h0",
            Heuristic::Manhattan => "h1",
            Heuristic::ValueDiff => "h2",
            Heuristic::EmptyCorner => "h3",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Manhattan => "manhattan",
            Heuristic::ValueDiff => "value-diff",
            Heuristic::EmptyCorner => "empty-corner",
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(tiles: &[u32], width: usize, height: usize) -> Board {
        Board::new(tiles.to_vec(), width, height).unwrap()
    }

    #[test]
    fn test_h_zero() {
        let b = board(&[0, 1, 2, 3, 4, 5, 6, 7], 4, 2);
        assert_eq!(h_zero(&b, &b.goal_states()[0]), 0);
    }

    #[test]
    fn test_wrap_aware_distance() {
        assert_eq!(wrap_aware_distance(0, 1, 4), 1);
        assert_eq!(wrap_aware_distance(0, 2, 4), 2);
        assert_eq!(wrap_aware_distance(0, 3, 4), 2);
        assert_eq!(wrap_aware_distance(4, 0, 5), 2);
        assert_eq!(wrap_aware_distance(1, 0, 2), 1);
    }

    #[test]
    fn test_h_manhattan_zero_at_goal() {
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 0], 4, 2);
        let goals = b.goal_states();
        assert_eq!(h_manhattan(&goals[0], &goals[0]), 0);
        assert_eq!(h_manhattan(&goals[1], &goals[1]), 0);
    }

    #[test]
    fn test_h_manhattan_counts_moved_tiles() {
        let goal = board(&[1, 2, 3, 4, 5, 6, 7, 0], 4, 2);
        // Tile 7 is one step left of its goal cell.
        let one_off = board(&[1, 2, 3, 4, 5, 6, 0, 7], 4, 2);
        assert_eq!(h_manhattan(&one_off, &goal), 1);
        // Tile 1 sits across the horizontal wrap, a raw distance of 3 folded to 2.
        let wrapped = board(&[0, 2, 3, 1, 5, 6, 7, 4], 4, 2);
        assert_eq!(h_manhattan(&wrapped, &goal), 2 + 1);
    }

    #[test]
    fn test_h_value_diff() {
        let goal = board(&[1, 2, 3, 0], 2, 2);
        let b = board(&[1, 2, 0, 3], 2, 2);
        assert_eq!(h_value_diff(&b, &goal), 3 + 3);
        assert_eq!(h_value_diff(&goal, &goal), 0);
    }

    #[test]
    fn test_h_empty_corner() {
        let goal = board(&[1, 2, 3, 0], 2, 2);
        assert_eq!(h_empty_corner(&goal, &goal), 0);
        assert_eq!(h_empty_corner(&board(&[1, 2, 0, 3], 2, 2), &goal), 1);
    }

    #[test]
    fn test_estimate_takes_minimum_over_goals() {
        let b = board(&[1, 3, 5, 7, 2, 4, 6, 0], 4, 2);
        let goals = b.goal_states();
        assert!(Heuristic::Manhattan.evaluate(&b, &goals[0]) > 0);
        assert_eq!(Heuristic::Manhattan.estimate(&b, &goals), 0);
        assert_eq!(Heuristic::ValueDiff.estimate(&b, &[]), 0);
    }
}
