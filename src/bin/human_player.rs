use anyhow::{Context, Result};
use clap::Parser;
use fifteen_solver::engine::{Board, MoveSequence, DEFAULT_SIZE};
use fifteen_solver::solver::solve;
use log::info;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of rows
    #[clap(long, default_value_t = DEFAULT_SIZE)]
    height: usize,

    /// Number of columns
    #[clap(long, default_value_t = DEFAULT_SIZE)]
    width: usize,

    /// Seed for the starting scramble
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

/// How an interactive session ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Solved { steps: usize },
    Quit,
    EndOfInput,
}

const PROMPT: &str = "Enter moves (u/d/l/r, e.g. 'rrd'), 's' for a hint, \
                      'a' to let the solver finish, 'q' to quit: ";

/// Runs the read-eval loop until the board is solved, the player quits or input ends.
fn play<R: BufRead, W: Write>(mut board: Board, mut input: R, mut out: W) -> Result<Outcome> {
    let mut steps = 0;
    writeln!(out, "Welcome to the fifteen puzzle!")?;

    loop {
        writeln!(out, "---------------------")?;
        writeln!(out, "Steps: {}", steps)?;
        writeln!(out, "{}", board)?;

        if board.is_solved() {
            writeln!(out)?;
            writeln!(out, "---------------------")?;
            writeln!(out, "Solved in {} steps!", steps)?;
            writeln!(out, "---------------------")?;
            return Ok(Outcome::Solved { steps });
        }

        write!(out, "{}", PROMPT)?;
        out.flush().context("failed to flush output")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            writeln!(out)?;
            writeln!(out, "End of input, leaving the game.")?;
            return Ok(Outcome::EndOfInput);
        }

        match line.trim() {
            "q" => {
                writeln!(out, "Thanks for playing!")?;
                return Ok(Outcome::Quit);
            }
            "s" => match solve(&board) {
                Ok(solution) => writeln!(
                    out,
                    "Solver suggests {} moves: {}",
                    solution.moves.len(),
                    solution.moves
                )?,
                Err(e) => writeln!(out, "Solver failed: {}", e)?,
            },
            "a" => match solve(&board) {
                Ok(solution) => {
                    steps += solution.moves.len();
                    board = solution.final_board;
                    writeln!(out, "Solver applied {} moves.", solution.moves.len())?;
                }
                Err(e) => writeln!(out, "Solver failed: {}", e)?,
            },
            moves => match moves.parse::<MoveSequence>() {
                Ok(moves) if moves.is_empty() => writeln!(out, "No moves entered.")?,
                Ok(moves) => {
                    // commit only if every move is legal
                    let mut next = board.clone();
                    match next.apply_moves(moves.as_slice()) {
                        Ok(()) => {
                            steps += moves.len();
                            board = next;
                        }
                        Err(e) => writeln!(out, "Invalid move: {}", e)?,
                    }
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = Board::scrambled(args.height, args.width, args.seed)?;
    match play(board, io::stdin().lock(), io::stdout().lock())? {
        Outcome::Solved { steps } => info!("session solved in {} steps", steps),
        outcome => info!("session ended: {:?}", outcome),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(board: Board, input: &str) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = play(board, input.as_bytes(), &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn one_slide_away() -> Board {
        Board::from_rows(vec![vec![1, 0], vec![2, 3]]).unwrap()
    }

    #[test]
    fn test_play_stops_at_end_of_input() {
        let (outcome, out) = run(one_slide_away(), "");
        assert_eq!(outcome, Outcome::EndOfInput);
        assert_eq!(out.matches("Enter moves").count(), 1);
    }

    #[test]
    fn test_play_stops_after_blank_lines_run_out() {
        let (outcome, out) = run(one_slide_away(), "\n\n");
        assert_eq!(outcome, Outcome::EndOfInput);
        assert_eq!(out.matches("No moves entered.").count(), 2);
        assert_eq!(out.matches("Enter moves").count(), 3);
    }

    #[test]
    fn test_play_quit() {
        let (outcome, out) = run(one_slide_away(), "q\nl\n");
        assert_eq!(outcome, Outcome::Quit);
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn test_play_moves_solve_board() {
        let (outcome, out) = run(one_slide_away(), "x\nr\nl\n");
        assert_eq!(outcome, Outcome::Solved { steps: 1 });
        assert!(out.contains("unrecognized move token 'x'"));
        assert!(out.contains("Invalid move"));
    }

    #[test]
    fn test_play_solver_finishes() {
        let board = Board::from_rows(vec![vec![3, 1, 2], vec![4, 0, 5], vec![6, 7, 8]]).unwrap();
        let expected = solve(&board).unwrap().moves.len();
        let (outcome, out) = run(board, "s\na\n");
        assert!(out.contains("Solver suggests"));
        assert_eq!(outcome, Outcome::Solved { steps: expected });
    }
}
