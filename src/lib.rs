//! # Fifteen Solver Library
//!
//! This library solves the sliding-tile puzzle ("fifteen puzzle") on boards of any
//! size from 2x2 upward. The solver is not a search: it places tiles one at a time
//! in reverse solved order using fixed move patterns, so the same board always yields
//! the same move sequence and the run time is polynomial in the board size.
//!
//! It is used by four binaries:
//! - `solve_board`: Reads a board (JSON request or text grid) and prints the moves.
//! - `scramble_board`: Prints a seeded, solvable scrambled board.
//! - `human_player`: Allows interactive play via the command line, with the solver
//!   available as a hint.
//! - `solver_benchmark`: Solves batches of scrambled boards and reports move counts.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), moves (`Move`, `MoveSequence`)
//!   and move application.
//! - `error`: The `SolveError` type shared by every operation.
//! - `invariants`: Predicates describing the partial solution at each phase boundary.
//! - `patterns`: Fixed move patterns shared by the phases.
//! - `lower_rows`: Phase one, every row below row 1.
//! - `top_rows`: Phase two, rows 0 and 1 down to column 2.
//! - `corner`: Phase three, the top-left 2x2 block.
//! - `solver`: The `solve_puzzle` and `solve` entry points tying the phases together.
//! - `utils`: Text and JSON parsing of boards and the JSON request/response shapes.

pub mod corner;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod lower_rows;
pub mod patterns;
pub mod solver;
pub mod top_rows;
pub mod utils;
