use std::time::Duration;

use clap::Parser;
use common::MazeError;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
pub const DEFAULT_DELAY_MS: u64 = 50; // Per solver step, only when animating.

/// Carve a random maze and walk out of it by backtracking.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of rows
    #[arg(long, env = "MAZE_ROWS", default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of columns
    #[arg(long, env = "MAZE_COLS", default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Random seed. A fresh one is drawn and printed when omitted
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Draw the carving and the search in the terminal
    #[arg(long, env = "MAZE_ANIMATE")]
    pub animate: bool,

    /// Pause after each solver step while animating, in milliseconds
    #[arg(long, env = "MAZE_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Print the maze with the path found
    #[arg(long, env = "MAZE_SHOW_PATH")]
    pub show_path: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub animate: bool,
    pub delay: Duration,
    pub show_path: bool,
}

impl Config {
    /// Reads `.env` if present, then the command line, which wins over the environment.
    pub fn parse_args() -> Result<Args, clap::Error> {
        dotenvy::dotenv().ok();
        Args::try_parse()
    }

    pub fn from_args(args: Args) -> Result<Self, MazeError> {
        if args.rows < 1 || args.cols < 1 {
            return Err(MazeError::InvalidDimensions {
                rows: args.rows,
                cols: args.cols,
            });
        }

        Ok(Config {
            rows: args.rows,
            cols: args.cols,
            seed: args.seed.unwrap_or_else(rand::random),
            animate: args.animate,
            delay: Duration::from_millis(args.delay_ms),
            show_path: args.show_path,
        })
    }
}
