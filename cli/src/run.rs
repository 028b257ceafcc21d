use log::info;
use rand::{SeedableRng, rngs::StdRng};

use common::{
    Maze, MazeError,
    maze::{grid::Position, observer::MazeObserver},
};

use crate::{config::Config, render::TerminalRenderer};

pub struct Solution {
    pub maze: Maze,
    pub path: Option<Vec<Position>>,
}

/// Carves a maze from the configured seed and solves it, drawing both phases in the
/// terminal when animation is on. The walls and path do not depend on animation.
pub fn run(config: &Config) -> Result<Solution, MazeError> {
    info!(
        "carving {} x {} maze with seed {}",
        config.rows, config.cols, config.seed
    );

    if config.animate {
        let mut renderer = TerminalRenderer::stdout(config.rows, config.cols, config.delay);
        let solution = carve_and_solve(config, &mut renderer);
        renderer.finish().expect("failed to restore the terminal");
        solution
    } else {
        carve_and_solve(config, &mut ())
    }
}

fn carve_and_solve(
    config: &Config,
    observer: &mut dyn MazeObserver,
) -> Result<Solution, MazeError> {
    let rng = StdRng::seed_from_u64(config.seed);
    let mut maze = Maze::new_observed(config.rows, config.cols, rng, observer)?;
    let path = maze.solve(observer);

    Ok(Solution { maze, path })
}

pub fn print_banner(config: &Config) {
    println!("  Maze size: {} x {}", config.rows, config.cols);
    println!("  Seed:      {}", config.seed);
}

pub fn print_solution(config: &Config, solution: &Solution) {
    let Some(path) = &solution.path else {
        return;
    };

    if config.show_path {
        println!("{}", solution.maze.log(Some(path)));
    } else if !config.animate {
        println!("{}", solution.maze);
    }
    println!("Solved in {} steps.", path.len() - 1);
}
