//! Error types shared across the crate.
use thiserror::Error;

/// Errors raised while building or parsing a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("Invalid puzzle dimensions {0:?}. Width and height must both be at least 2")]
    InvalidDimensions(Vec<usize>),
    #[error("Could not parse dimensions from '{0}'")]
    MalformedDimensions(String),
    #[error("Expected {expected} tiles but found {found}")]
    TileCount { expected: usize, found: usize },
    #[error("Could not parse tile '{0}' as a non-negative integer")]
    InvalidTile(String),
    #[error("No empty tile marked as '0' found in the puzzle definition")]
    MissingEmptyTile,
    #[error("Tile {0} appears more than once")]
    DuplicateTile(u32),
    #[error("Tile {value} is out of range, expected a value below {limit}")]
    TileOutOfRange { value: u32, limit: u32 },
}

/// Errors raised by [`crate::queue::IndexedPriorityQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("Dequeue called on an empty priority queue")]
    Empty,
}
