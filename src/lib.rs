//! # Sliding Tile Solver Library
//!
//! This library solves generalized sliding-tile puzzles, where the empty tile may
//! swap across board edges (wrap-around moves) and diagonally from a corner, each
//! at its own cost. Solving uses one best-first engine run as Uniform-Cost Search,
//! Greedy Best-First Search or A*.
//!
//! It is used by three binaries:
//! - `solve`: Reads a puzzle file, runs every requested strategy and heuristic on
//!   each puzzle under a time budget, and writes solution and search files.
//! - `generate`: Writes a file of random puzzles from a seed.
//! - `evaluate`: Runs every combination on seeded random puzzles and prints
//!   aggregated metrics.
//!
//! ## Modules
//! - `engine`: The puzzle board (`Board`), its moves (`Move`) and the `Solvable` trait.
//! - `queue`: The indexed priority queue behind the open set.
//! - `heuristics`: Heuristic functions and the `Heuristic` selector.
//! - `solver`: The best-first search engine and path reconstruction.
//! - `utils`: Parsing of dimensions and puzzle files.
//! - `output`: Solution and search file writers.
//! - `runner`: Parallel batches of independent, time-bounded searches.
//! - `metrics`: Aggregation of run results.
//! - `error`: Error types.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod metrics;
pub mod output;
pub mod queue;
pub mod runner;
pub mod solver;
pub mod utils;
