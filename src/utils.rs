use crate::engine::Board;
use crate::error::PuzzleError;

/// Parses puzzle dimensions given as `[width, height]`, `width,height` or `widthxheight`.
///
/// # Returns
/// * `Ok((width, height))` when two values, both at least 2, are found.
/// * `Err(PuzzleError::MalformedDimensions)` if a value is not a number.
/// * `Err(PuzzleError::InvalidDimensions)` if fewer than two values are given or one is below 2.
///
/// # Examples
/// ```
/// use sliding_tile_solver::utils::parse_dimensions;
/// assert_eq!(parse_dimensions("[4, 2]"), Ok((4, 2)));
/// assert_eq!(parse_dimensions("3x3"), Ok((3, 3)));
/// assert!(parse_dimensions("[4]").is_err());
/// ```
pub fn parse_dimensions(s: &str) -> Result<(usize, usize), PuzzleError> {
    let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
    let values = inner
        .split(|c: char| c == ',' || c == 'x' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| PuzzleError::MalformedDimensions(s.to_string()))
        })
        .collect::<Result<Vec<usize>, PuzzleError>>()?;

    match values.as_slice() {
        [width, height, ..] if *width >= 2 && *height >= 2 => Ok((*width, *height)),
        _ => Err(PuzzleError::InvalidDimensions(values)),
    }
}

/// Parses one line of whitespace-separated tile values into a `Board`.
pub fn parse_puzzle_line(line: &str, width: usize, height: usize) -> Result<Board, PuzzleError> {
    let tiles = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| PuzzleError::InvalidTile(token.to_string()))
        })
        .collect::<Result<Vec<u32>, PuzzleError>>()?;
    Board::new(tiles, width, height)
}

/// Parses every non-blank line of a puzzle file.
///
/// Each line is parsed independently, so a malformed puzzle only fails its own entry.
pub fn load_puzzles(content: &str, width: usize, height: usize) -> Vec<Result<Board, PuzzleError>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_puzzle_line(line, width, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Position;

    #[test]
    fn test_parse_dimensions_formats() {
        assert_eq!(parse_dimensions("[4, 2]"), Ok((4, 2)));
        assert_eq!(parse_dimensions("4,2"), Ok((4, 2)));
        assert_eq!(parse_dimensions(" 5x3 "), Ok((5, 3)));
    }

    #[test]
    fn test_parse_dimensions_rejects_invalid() {
        assert_eq!(
            parse_dimensions("[4]"),
            Err(PuzzleError::InvalidDimensions(vec![4]))
        );
        assert_eq!(
            parse_dimensions("[1, 4]"),
            Err(PuzzleError::InvalidDimensions(vec![1, 4]))
        );
        assert!(matches!(
            parse_dimensions("[a, 4]"),
            Err(PuzzleError::MalformedDimensions(_))
        ));
    }

    #[test]
    fn test_parse_puzzle_line_valid() {
        let board = parse_puzzle_line("3 0 1 4 2 6 5 7", 4, 2).unwrap();
        assert_eq!(board.empty_position(), Position::new(1, 0));
        assert_eq!(board.tile_at(Position::new(3, 1)), 7);
    }

    #[test]
    fn test_parse_puzzle_line_errors() {
        assert_eq!(
            parse_puzzle_line("3 0 1 x", 2, 2),
            Err(PuzzleError::InvalidTile("x".to_string()))
        );
        assert_eq!(
            parse_puzzle_line("3 4 1 0", 2, 2),
            Err(PuzzleError::TileOutOfRange { value: 4, limit: 4 })
        );
        assert_eq!(
            parse_puzzle_line("3 2 1 4", 2, 2),
            Err(PuzzleError::MissingEmptyTile)
        );
        assert!(matches!(
            parse_puzzle_line("1 2 3", 2, 2),
            Err(PuzzleError::TileCount { .. })
        ));
    }

    #[test]
    fn test_load_puzzles_keeps_going_after_bad_line() {
        let content = "1 0 3 7 5 2 6 4\n\n1 2 3 4 5 6 7 8\n0 3 7 5 2 6 4 1\n";
        let puzzles = load_puzzles(content, 4, 2);
        assert_eq!(puzzles.len(), 3);
        assert!(puzzles[0].is_ok());
        assert!(puzzles[1].is_err());
        assert!(puzzles[2].is_ok());
    }
}
