use anyhow::{bail, Context, Result};
use clap::Parser;
use fifteen_solver::engine::Board;
use fifteen_solver::solver::solve;
use fifteen_solver::utils::{board_from_str, parse_request, SolveResponse};
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file: a JSON request (`{"board": [[...]]}`) or a text grid
    board_file: PathBuf,

    /// Re-apply the moves to the input board and check it ends up solved
    #[clap(long)]
    verify: bool,

    /// Print the boards and a move count instead of the JSON response
    #[clap(short, long)]
    pretty: bool,
}

fn read_board_file(path: &PathBuf) -> Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let board = if content.trim_start().starts_with('{') {
        parse_request(&content)
    } else {
        board_from_str(&content)
    };
    board.with_context(|| format!("invalid board in {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = read_board_file(&args.board_file)?;
    info!(
        "loaded {}x{} board from {}",
        board.height(),
        board.width(),
        args.board_file.display()
    );

    let solution = solve(&board).context("solver failed")?;

    if args.verify {
        let mut replay = board.clone();
        replay
            .apply_moves(solution.moves.as_slice())
            .context("replaying the solution failed")?;
        if !replay.is_solved() {
            bail!("replaying the solution did not solve the board:\n{}", replay);
        }
        info!("verified {} moves", solution.moves.len());
    }

    if args.pretty {
        println!("Initial board state:\n{}\n", board);
        println!("Moves ({}):", solution.moves.len());
        if solution.moves.is_empty() {
            println!("  No moves needed.");
        } else {
            println!("  {}", solution.moves);
        }
        println!("\nFinal board state:\n{}", solution.final_board);
    } else {
        let response = SolveResponse::from(&solution.moves);
        println!("{}", serde_json::to_string(&response)?);
    }
    Ok(())
}
