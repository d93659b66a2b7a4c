use anyhow::Result;
use clap::Parser;
use fifteen_solver::engine::{Board, DEFAULT_SIZE};
use fifteen_solver::utils::SolveRequest;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of rows
    #[clap(long, default_value_t = DEFAULT_SIZE)]
    height: usize,

    /// Number of columns
    #[clap(long, default_value_t = DEFAULT_SIZE)]
    width: usize,

    /// Seed for the scramble; the same seed always gives the same board
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Print a text grid instead of a JSON request
    #[clap(short, long)]
    text: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = Board::scrambled(args.height, args.width, args.seed)?;
    if args.text {
        println!("{}", board);
    } else {
        println!("{}", serde_json::to_string(&SolveRequest::from(&board))?);
    }
    Ok(())
}
