use anyhow::{bail, Result};
use clap::Parser;
use fifteen_solver::engine::{Board, MIN_SIZE};
use fifteen_solver::solver::solve;
use log::debug;
use std::time::Instant;

const START_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Largest height and width to benchmark; every shape from 2x2 up to this is run
    #[clap(short, long, default_value_t = 6)]
    max_size: usize,

    /// Number of scrambled boards per shape
    #[clap(short, long, default_value_t = 20)]
    boards: u64,
}

struct ShapeStats {
    height: usize,
    width: usize,
    min_moves: usize,
    max_moves: usize,
    avg_moves: f64,
    micros_per_board: f64,
}

fn run_shape(height: usize, width: usize, boards: u64) -> Result<ShapeStats> {
    let mut counts = Vec::new();
    let started = Instant::now();

    for board_idx in 0..boards {
        let seed = START_SEED + board_idx;
        let board = Board::scrambled(height, width, seed)?;
        let solution = solve(&board)?;
        if !solution.final_board.is_solved() {
            bail!("{}x{} board with seed {} was not solved", height, width, seed);
        }
        debug!("{}x{} seed {}: {} moves", height, width, seed, solution.moves.len());
        counts.push(solution.moves.len());
    }

    let elapsed = started.elapsed();
    let total: usize = counts.iter().sum();
    Ok(ShapeStats {
        height,
        width,
        min_moves: counts.iter().copied().min().unwrap_or(0),
        max_moves: counts.iter().copied().max().unwrap_or(0),
        avg_moves: total as f64 / counts.len().max(1) as f64,
        micros_per_board: elapsed.as_micros() as f64 / counts.len().max(1) as f64,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.max_size < MIN_SIZE {
        bail!("max size must be at least {}", MIN_SIZE);
    }

    println!(
        "Solving {} scrambled boards for every shape up to {}x{}...",
        args.boards, args.max_size, args.max_size
    );

    let mut all_stats = Vec::new();
    for height in MIN_SIZE..=args.max_size {
        for width in MIN_SIZE..=args.max_size {
            all_stats.push(run_shape(height, width, args.boards)?);
        }
    }

    println!("\n--- Move Counts ---");
    println!("{:<8} {:>8} {:>8} {:>10} {:>12}", "Shape", "Min", "Max", "Average", "us/board");
    for stats in &all_stats {
        println!(
            "{:<8} {:>8} {:>8} {:>10.2} {:>12.1}",
            format!("{}x{}", stats.height, stats.width),
            stats.min_moves,
            stats.max_moves,
            stats.avg_moves,
            stats.micros_per_board
        );
    }
    Ok(())
}
