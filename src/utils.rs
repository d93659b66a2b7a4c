use serde::{Deserialize, Serialize};

use crate::engine::{Board, MoveSequence};
use crate::error::SolveError;
use crate::solver::solve;

/// Request body accepted by the solving endpoint: `{"board": [[...], ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub board: Vec<Vec<u32>>,
}

impl From<&Board> for SolveRequest {
    fn from(board: &Board) -> Self {
        SolveRequest {
            board: board.rows().to_vec(),
        }
    }
}

/// Successful response: the moves as single-character strings, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub result: Vec<String>,
}

impl From<&MoveSequence> for SolveResponse {
    fn from(moves: &MoveSequence) -> Self {
        SolveResponse {
            result: moves.tokens(),
        }
    }
}

/// Failure response, sent instead of a partial move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Parses a board written as a text grid, one row per line.
///
/// Values are separated by whitespace; the blank may be written as `.` or `0`.
/// Blank lines are ignored, so trailing newlines and padding are harmless.
///
/// # Arguments
/// * `s`: The text of the grid.
///
/// # Returns
/// * `Ok(Board)` if every token parses and the arrangement is valid.
/// * `Err(SolveError::InvalidInput)` on an unrecognized token, rows of different
///   lengths, or an invalid value set.
///
/// # Examples
/// ```
/// use fifteen_solver::utils::board_from_str;
/// use fifteen_solver::engine::Pos;
///
/// let board = board_from_str("
///     1 . 2
///     3 4 5
/// ").unwrap();
/// assert_eq!(board.blank(), Pos::new(0, 1));
/// assert_eq!(board.width(), 3);
///
/// assert!(board_from_str("1 x\n2 3").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, SolveError> {
    let mut rows = Vec::new();
    for (r, line) in s.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(c, token)| match token {
                "." => Ok(0),
                _ => token.parse::<u32>().map_err(|_| {
                    SolveError::InvalidInput(format!(
                        "unrecognized token '{}' in row {} col {}",
                        token, r, c
                    ))
                }),
            })
            .collect::<Result<Vec<u32>, SolveError>>()?;
        rows.push(row);
    }
    Board::from_rows(rows)
}

/// Parses a JSON solve request into a validated board.
///
/// # Errors
/// `SolveError::InvalidInput` if the JSON is malformed, lacks a `board` field, holds
/// values that are not non-negative integers, or describes an invalid arrangement.
pub fn parse_request(json: &str) -> Result<Board, SolveError> {
    let request: SolveRequest = serde_json::from_str(json)
        .map_err(|e| SolveError::InvalidInput(format!("malformed request: {}", e)))?;
    Board::from_rows(request.board)
}

/// Solves the board in a JSON request and returns the JSON response.
///
/// Success yields `{"result": ["r", "d", ...]}`; any failure, from parsing to an
/// unsolvable arrangement, yields `{"error": "..."}`.
///
/// # Examples
/// ```
/// use fifteen_solver::utils::solve_to_json;
///
/// let response = solve_to_json(r#"{"board": [[1, 0], [2, 3]]}"#);
/// assert_eq!(response, r#"{"result":["d","u","l"]}"#);
///
/// let response = solve_to_json(r#"{"board": [[1, 1], [2, 3]]}"#);
/// assert!(response.starts_with(r#"{"error":"invalid input"#));
/// ```
pub fn solve_to_json(json: &str) -> String {
    let outcome = parse_request(json).and_then(|board| solve(&board));
    let encoded = match outcome {
        Ok(solution) => serde_json::to_string(&SolveResponse::from(&solution.moves)),
        Err(e) => serde_json::to_string(&ErrorResponse {
            error: e.to_string(),
        }),
    };
    // Both shapes are plain strings and lists, which always serialize.
    encoded.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}
