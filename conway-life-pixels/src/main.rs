#![deny(clippy::all)]
#![forbid(unsafe_code)]

use clap::Parser;
use life_grid::{Random, Simulation, Speed};
use life_pixels_support::{ShellError, animate, window_size_to_grid_size};
use log::info;

const CELL_PIXEL_WIDTH: u32 = 25;

/// Conway's Game of Life on a bounded grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Seed for the starting grid and every restart [default: random]
    #[arg(long)]
    seed: Option<u64>,

    /// Generations per second
    #[arg(
        long,
        default_value_t = Speed::MIN.value(),
        value_parser = clap::value_parser!(u8)
            .range(i64::from(Speed::MIN.value())..=i64::from(Speed::MAX.value()))
    )]
    speed: u8,

    /// Start paused
    #[arg(long)]
    paused: bool,
}

fn main() -> Result<(), ShellError> {
    env_logger::init();
    let args = Args::parse();

    let rand = match args.seed {
        Some(seed) => {
            info!("seed {seed}");
            Random::from_seed(seed)
        }
        None => Random::new(),
    };

    animate(CELL_PIXEL_WIDTH, rand, |window_size, rand| {
        let (rows, cols) = window_size_to_grid_size(window_size, CELL_PIXEL_WIDTH);
        Simulation::new(rows, cols, Speed::new(args.speed), rand).with_paused(args.paused)
    })
}
