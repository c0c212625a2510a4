//! Puzzle model for generalized sliding-tile puzzles.
//!
//! This module defines the puzzle's fundamental components:
//! - `Position`: a cell coordinate on the grid, origin at the top left.
//! - `Move`: a single legal transition (regular, wrapping or diagonal swap) with its cost.
//! - `Board`: an immutable grid of tiles with the empty tile marked as `0`, its move
//!   generator, and the goal layouts it can be solved into.
//! - `Solvable`: the interface the search engine drives.
use crate::error::PuzzleError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Value marking the empty tile.
pub const EMPTY_TILE: u32 = 0;

/// A cell coordinate. `x` is the column, `y` is the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Offsets the position by `(dx, dy)`, wrapping around a `width` x `height` grid.
    pub fn wrapping_offset(self, (dx, dy): (i32, i32), width: usize, height: usize) -> Self {
        let x = (self.x as i64 + dx as i64).rem_euclid(width as i64) as usize;
        let y = (self.y as i64 + dy as i64).rem_euclid(height as i64) as usize;
        Position { x, y }
    }
}

/// The family a move belongs to, derived from its cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Swap with an axis-adjacent tile.
    Regular,
    /// Swap with a tile on the opposite edge of an axis longer than 2.
    Wrap,
    /// Swap with a diagonal neighbour, only from a corner.
    Diagonal,
}

/// Cost of a regular adjacent swap.
pub const REGULAR_COST: u32 = 1;
/// Cost of a swap that wraps around an edge.
pub const WRAP_COST: u32 = 2;
/// Cost of a diagonal swap.
pub const DIAGONAL_COST: u32 = 3;

/// A legal transition from a board.
///
/// `tile` is the position of the tile that slides into the empty cell, and
/// `direction` is the unit displacement that carries it there (modulo the grid
/// size), so `tile + direction` is the empty cell before the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub cost: u32,
    pub tile: Position,
    pub direction: (i32, i32),
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self.cost {
            REGULAR_COST => MoveKind::Regular,
            WRAP_COST => MoveKind::Wrap,
            _ => MoveKind::Diagonal,
        }
    }

    /// Where the moved tile lands, which is also where the empty tile was.
    pub fn destination(&self, width: usize, height: usize) -> Position {
        self.tile.wrapping_offset(self.direction, width, height)
    }

    /// The move that undoes this one on the board it produced.
    pub fn inverse(&self, width: usize, height: usize) -> Move {
        Move {
            cost: self.cost,
            tile: self.destination(width, height),
            direction: (-self.direction.0, -self.direction.1),
        }
    }
}

/// Something the best-first engine can search over.
pub trait Solvable: Clone + Eq + Hash {
    type Move: Clone + fmt::Debug + PartialEq + Eq;

    /// Every legal move from this state.
    fn get_moves(&self) -> Vec<Self::Move>;

    /// The state reached by applying `mv`. `self` is left untouched.
    fn compute_move(&self, mv: &Self::Move) -> Self;

    /// Path cost of `mv`. Must be strictly positive.
    fn move_cost(mv: &Self::Move) -> u32;
}

/// An immutable sliding-tile grid.
///
/// Tiles are stored row-major. Every value of `0..width * height` appears exactly
/// once and `0` is the empty tile. Equality and hashing only consider the grid
/// contents.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<u32>,
    empty: Position,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.tiles.hash(state);
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), PuzzleError> {
    if width < 2 || height < 2 {
        return Err(PuzzleError::InvalidDimensions(vec![width, height]));
    }
    Ok(())
}

impl Board {
    /// Creates a board from row-major tile values.
    ///
    /// # Arguments
    /// * `tiles`: The tile values, row by row. Must hold `width * height` values.
    /// * `width`: Number of columns, at least 2.
    /// * `height`: Number of rows, at least 2.
    ///
    /// # Returns
    /// The validated `Board`, or the first `PuzzleError` found.
    ///
    /// # Examples
    /// ```
    /// use sliding_tile_solver::engine::{Board, Position};
    /// let board = Board::new(vec![1, 2, 0, 3], 2, 2).unwrap();
    /// assert_eq!(board.empty_position(), Position::new(0, 1));
    /// assert!(Board::new(vec![1, 2, 3], 3, 1).is_err());
    /// ```
    pub fn new(tiles: Vec<u32>, width: usize, height: usize) -> Result<Self, PuzzleError> {
        check_dimensions(width, height)?;

        let expected = width * height;
        if tiles.len() != expected {
            return Err(PuzzleError::TileCount {
                expected,
                found: tiles.len(),
            });
        }

        let empty_idx = tiles
            .iter()
            .position(|&t| t == EMPTY_TILE)
            .ok_or(PuzzleError::MissingEmptyTile)?;

        let mut seen = vec![false; expected];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(PuzzleError::TileOutOfRange {
                    value,
                    limit: expected as u32,
                })?;
            if *slot {
                return Err(PuzzleError::DuplicateTile(value));
            }
            *slot = true;
        }

        Ok(Board {
            width,
            height,
            tiles,
            empty: Position::new(empty_idx % width, empty_idx / width),
        })
    }

    /// Creates a uniformly shuffled board using the caller's generator.
    ///
    /// The same seed always produces the same board. No solvability check is made.
    pub fn random(width: usize, height: usize, rng: &mut impl Rng) -> Result<Self, PuzzleError> {
        check_dimensions(width, height)?;
        let mut tiles: Vec<u32> = (0..(width * height) as u32).collect();
        tiles.shuffle(rng);
        Board::new(tiles, width, height)
    }

    // Callers guarantee `tiles` is a valid permutation for the dimensions.
    fn from_valid_tiles(tiles: Vec<u32>, width: usize, height: usize) -> Self {
        let empty_idx = tiles.iter().position(|&t| t == EMPTY_TILE).unwrap_or(0);
        Board {
            width,
            height,
            tiles,
            empty: Position::new(empty_idx % width, empty_idx / width),
        }
    }

    /// The solved layouts for a board of this size.
    ///
    /// The first numbers tiles row by row, the second column by column. Both keep the
    /// empty tile in the bottom-right corner.
    pub fn goal_states(&self) -> Vec<Board> {
        let (w, h) = (self.width, self.height);
        let n = (w * h) as u32;
        let lin = |k: usize| (k as u32 + 1) % n;

        let row_major: Vec<u32> = (0..w * h).map(lin).collect();
        let mut column_major = vec![0; w * h];
        for y in 0..h {
            for x in 0..w {
                column_major[y * w + x] = lin(x * h + y);
            }
        }

        let first = Board::from_valid_tiles(row_major, w, h);
        let second = Board::from_valid_tiles(column_major, w, h);
        if first == second {
            vec![first]
        } else {
            vec![first, second]
        }
    }

    /// Whether the board matches one of its goal layouts.
    pub fn is_goal(&self) -> bool {
        // Every goal keeps the empty tile bottom-right.
        if self.empty != Position::new(self.width - 1, self.height - 1) {
            return false;
        }
        self.goal_states().contains(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn empty_position(&self) -> Position {
        self.empty
    }

    /// Row-major tile values.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Returns the tile at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the grid.
    pub fn tile_at(&self, pos: Position) -> u32 {
        self.tiles[self.index(pos)]
    }

    fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    /// Single-line representation used in solution and search files.
    ///
    /// ```
    /// use sliding_tile_solver::engine::Board;
    /// let board = Board::new(vec![1, 2, 0, 3], 2, 2).unwrap();
    /// assert_eq!(board.to_line(), "1 2 0 3");
    /// ```
    pub fn to_line(&self) -> String {
        self.tiles
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lateral_cost(&self, tile: Position) -> u32 {
        let (w, h) = (self.width, self.height);
        let Position { x, y } = self.empty;

        let wraps_horizontally =
            w > 2 && ((tile.x == 0 && x == w - 1) || (tile.x == w - 1 && x == 0));
        let wraps_vertically =
            h > 2 && ((tile.y == 0 && y == h - 1) || (tile.y == h - 1 && y == 0));

        if wraps_horizontally || wraps_vertically {
            WRAP_COST
        } else {
            REGULAR_COST
        }
    }

    /// Lists the legal moves, laterals first (top, bottom, right, left) then diagonals.
    ///
    /// On an axis of length 2 both neighbours are the same cell, so only one move is
    /// produced for it. Diagonal moves only exist from a corner and never on a 2x2 grid.
    pub fn get_moves(&self) -> Vec<Move> {
        let (w, h) = (self.width, self.height);
        let empty = self.empty;
        let neighbour = |d: (i32, i32)| empty.wrapping_offset(d, w, h);

        let mut laterals: Vec<(Position, (i32, i32))> = Vec::with_capacity(4);
        let top = neighbour((0, -1));
        let bottom = neighbour((0, 1));
        laterals.push((top, (0, 1)));
        if bottom != top {
            laterals.push((bottom, (0, -1)));
        }
        let right = neighbour((1, 0));
        let left = neighbour((-1, 0));
        laterals.push((right, (-1, 0)));
        if left != right {
            laterals.push((left, (1, 0)));
        }

        let mut moves: Vec<Move> = laterals
            .into_iter()
            .map(|(tile, direction)| Move {
                cost: self.lateral_cost(tile),
                tile,
                direction,
            })
            .collect();

        if (w, h) != (2, 2) {
            let Position { x, y } = empty;
            let main_diagonal = (x, y) == (0, 0) || (x, y) == (w - 1, h - 1);
            let anti_diagonal = (x, y) == (w - 1, 0) || (x, y) == (0, h - 1);

            let offsets: &[(i32, i32)] = if main_diagonal {
                &[(-1, -1), (1, 1)]
            } else if anti_diagonal {
                &[(-1, 1), (1, -1)]
            } else {
                &[]
            };

            for &(dx, dy) in offsets {
                moves.push(Move {
                    cost: DIAGONAL_COST,
                    tile: neighbour((dx, dy)),
                    direction: (-dx, -dy),
                });
            }
        }

        moves
    }

    /// Swaps the empty tile with `mv.tile` and returns the resulting board.
    pub fn compute_move(&self, mv: &Move) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.index(mv.tile), self.index(self.empty));
        Board {
            width: self.width,
            height: self.height,
            tiles,
            empty: mv.tile,
        }
    }
}

impl Solvable for Board {
    type Move = Move;

    fn get_moves(&self) -> Vec<Move> {
        Board::get_moves(self)
    }

    fn compute_move(&self, mv: &Move) -> Board {
        Board::compute_move(self, mv)
    }

    fn move_cost(mv: &Move) -> u32 {
        mv.cost
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = (self.tiles.len() - 1).to_string().len();
        for (row_idx, row) in self.tiles.chunks(self.width).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|t| format!("{:>width$}", t, width = cell_width))
                .collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
