pub mod grid;
pub mod maker;
pub mod observer;
pub mod solver;

use std::fmt;

use log::info;
use rand::{SeedableRng, rngs::StdRng};

use crate::{error::MazeError, random::RandomSource};
use grid::{Direction, Grid, Position};
use maker::MazeMaker;
use observer::MazeObserver;

/// A carved grid together with the random source that carved it.
pub struct Maze<R = StdRng> {
    pub grid: Grid,
    rng: R,
}

impl Maze<StdRng> {
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Result<Self, MazeError> {
        Maze::new(rows, cols, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Maze<R> {
    pub fn new(rows: usize, cols: usize, rng: R) -> Result<Self, MazeError> {
        Maze::new_observed(rows, cols, rng, &mut ())
    }

    pub fn new_observed(
        rows: usize,
        cols: usize,
        mut rng: R,
        observer: &mut dyn MazeObserver,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::new(rows, cols)?;
        MazeMaker::new(&mut grid, &mut rng, observer).carve();

        Ok(Maze { grid, rng })
    }

    /// Replaces the walls with a freshly carved maze of the same size, continuing the
    /// random stream this maze was carved from.
    pub fn regenerate(&mut self, observer: &mut dyn MazeObserver) {
        let mut grid = Grid::new(self.grid.rows(), self.grid.cols())
            .expect("dimensions were validated when the maze was first built");
        MazeMaker::new(&mut grid, &mut self.rng, observer).carve();
        self.grid = grid;
    }

    /// Clears the visited flags left by carving, then searches for the exit.
    pub fn solve(&mut self, observer: &mut dyn MazeObserver) -> Option<Vec<Position>> {
        self.grid.reset_visited();
        let path = solver::find_path(&mut self.grid, observer);

        match &path {
            Some(path) => info!(
                "solved {} x {} maze, path length {}",
                self.grid.rows(),
                self.grid.cols(),
                path.len()
            ),
            None => info!(
                "no path through {} x {} maze",
                self.grid.rows(),
                self.grid.cols()
            ),
        }

        path
    }
}

impl<R> Maze<R> {
    /// Wall layout as a block grid, `1` for wall and `0` for open. Cell `(r, c)` sits at
    /// block `(2r + 1, 2c + 1)` and the wall between two cells sits between their blocks.
    pub fn blocks(&self) -> Vec<Vec<u8>> {
        let grid = &self.grid;
        let height = 2 * grid.rows() + 1;
        let width = 2 * grid.cols() + 1;
        let mut blocks = vec![vec![1; width]; height];

        for cell in grid.cells() {
            let Position { row, col } = cell.position();
            let (z, x) = (2 * row + 1, 2 * col + 1);

            blocks[z][x] = 0;
            for side in [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
            ] {
                if !cell.has_wall(side) {
                    let (wz, wx) = wall_block(z, x, side);
                    blocks[wz][wx] = 0;
                }
            }
        }

        blocks
    }

    /// Renders the maze, two characters per block. A path, if given, is drawn through the
    /// cells and passages it covers.
    pub fn log(&self, path: Option<&[Position]>) -> String {
        let mut marks: Vec<Vec<bool>> = self
            .blocks()
            .iter()
            .map(|row| vec![false; row.len()])
            .collect();

        // Positions outside the grid are skipped.
        let path = path.unwrap_or_default();
        for &cell in path.iter().filter(|&&cell| self.grid.contains(cell)) {
            marks[2 * cell.row + 1][2 * cell.col + 1] = true;
        }
        for step in path.windows(2) {
            let (from, to) = (step[0], step[1]);
            if !self.grid.contains(from) || !self.grid.contains(to) {
                continue;
            }
            if let Some(direction) = from.direction_to(to) {
                let (wz, wx) = wall_block(2 * from.row + 1, 2 * from.col + 1, direction);
                marks[wz][wx] = true;
            }
        }

        self.blocks()
            .iter()
            .zip(marks)
            .map(|(row, marked)| {
                row.iter()
                    .zip(marked)
                    .map(|(&block, mark)| match (block, mark) {
                        (_, true) => "░░",
                        (0, false) => "  ",
                        _ => "██",
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn wall_block(z: usize, x: usize, side: Direction) -> (usize, usize) {
    match side {
        Direction::Up => (z - 1, x),
        Direction::Down => (z + 1, x),
        Direction::Left => (z, x - 1),
        Direction::Right => (z, x + 1),
    }
}

impl<R> fmt::Display for Maze<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log(None))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use strum::IntoEnumIterator;

    use super::*;
    use super::observer::{Event, Recorder};

    fn walls(grid: &Grid) -> Vec<[bool; 4]> {
        grid.cells()
            .map(|cell| {
                [
                    cell.has_top_wall(),
                    cell.has_bottom_wall(),
                    cell.has_left_wall(),
                    cell.has_right_wall(),
                ]
            })
            .collect()
    }

    fn assert_is_perfect_maze(grid: &Grid) {
        let total_cells = grid.len();
        assert_eq!(
            grid.open_interior_walls(),
            total_cells - 1,
            "a spanning tree has one edge fewer than cells"
        );

        let mut seen = vec![false; total_cells];
        let mut queue = VecDeque::from([grid.entrance()]);
        let mut seen_count = 0;
        seen[0] = true;

        while let Some(at) = queue.pop_front() {
            seen_count += 1;
            for direction in Direction::iter() {
                if !grid.is_passage(at, direction) {
                    continue;
                }
                let next = grid
                    .neighbor(at, direction)
                    .expect("passages lead to cells inside the grid");
                let index = next.row * grid.cols() + next.col;
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(next);
                }
            }
        }

        assert_eq!(seen_count, total_cells, "all cells should be connected");
    }

    fn assert_path_is_valid(grid: &Grid, path: &[Position]) {
        assert_eq!(path.first(), Some(&grid.entrance()));
        assert_eq!(path.last(), Some(&grid.exit()));

        let distinct: HashSet<&Position> = path.iter().collect();
        assert_eq!(distinct.len(), path.len(), "path should not repeat cells");

        for step in path.windows(2) {
            let direction = step[0]
                .direction_to(step[1])
                .expect("consecutive path cells are adjacent");
            assert!(grid.is_passage(step[0], direction), "path walks through a wall");
        }
    }

    #[test]
    fn test_generation_carves_a_spanning_tree() {
        for seed in 0..32 {
            for (rows, cols) in [(1, 1), (1, 7), (6, 1), (2, 2), (5, 5), (8, 13)] {
                let maze = Maze::with_seed(rows, cols, seed).expect("valid dimensions");
                assert_is_perfect_maze(&maze.grid);
            }
        }
    }

    #[test]
    fn test_generation_leaves_every_cell_visited() {
        let maze = Maze::with_seed(7, 9, 3).expect("valid dimensions");
        assert!(maze.grid.cells().all(|cell| cell.visited));
    }

    #[test]
    fn test_generation_opens_entrance_and_exit() {
        let maze = Maze::with_seed(4, 6, 11).expect("valid dimensions");
        let grid = &maze.grid;

        assert!(!grid.cell_at(0, 0).expect("in bounds").has_top_wall());
        assert!(!grid.cell_at(3, 5).expect("in bounds").has_bottom_wall());

        // No other border wall is opened.
        for cell in grid.cells() {
            let Position { row, col } = cell.position();
            if row == 0 && col != 0 {
                assert!(cell.has_top_wall());
            }
            if row == 3 && col != 5 {
                assert!(cell.has_bottom_wall());
            }
            if col == 0 {
                assert!(cell.has_left_wall());
            }
            if col == 5 {
                assert!(cell.has_right_wall());
            }
        }
    }

    #[test]
    fn test_generation_rejects_invalid_dimensions() {
        assert_eq!(
            Maze::with_seed(0, 0, 0).err(),
            Some(MazeError::InvalidDimensions { rows: 0, cols: 0 })
        );
    }

    #[test]
    fn test_same_seed_gives_same_walls() {
        for seed in [0, 1, 99, u64::MAX] {
            let a = Maze::with_seed(12, 9, seed).expect("valid dimensions");
            let b = Maze::with_seed(12, 9, seed).expect("valid dimensions");
            assert_eq!(walls(&a.grid), walls(&b.grid));
            assert_eq!(a.blocks(), b.blocks());
        }
    }

    #[test]
    fn test_different_seeds_give_different_walls() {
        let a = Maze::with_seed(12, 12, 1).expect("valid dimensions");
        let b = Maze::with_seed(12, 12, 2).expect("valid dimensions");
        assert_ne!(walls(&a.grid), walls(&b.grid));
    }

    #[test]
    fn test_single_cell_maze() {
        let mut maze = Maze::with_seed(1, 1, 0).expect("valid dimensions");
        let cell = maze.grid.cell_at(0, 0).expect("in bounds");

        assert!(!cell.has_top_wall() && !cell.has_bottom_wall());
        assert!(cell.has_left_wall() && cell.has_right_wall());
        assert_eq!(maze.grid.open_interior_walls(), 0);

        let mut recorder = Recorder::new();
        let path = maze.solve(&mut recorder).expect("single cell is its own exit");
        assert_eq!(path, vec![Position::new(0, 0)]);
        assert_eq!(recorder.moves().count(), 0);
    }

    const FIVE_BY_FIVE_SEED_ZERO: &str = "\
██  ██████████████████
██                  ██
██████████████████  ██
██              ██  ██
██  ██████████████  ██
██          ██      ██
██  ██████  ██  ██████
██      ██  ██      ██
██████  ██  ██████  ██
██      ██          ██
██████████████████  ██";

    #[test]
    fn test_five_by_five_seed_zero_layout_and_reset() {
        let mut maze = Maze::with_seed(5, 5, 0).expect("valid dimensions");
        assert_eq!(maze.to_string(), FIVE_BY_FIVE_SEED_ZERO);
        assert_is_perfect_maze(&maze.grid);

        assert!(maze.grid.cells().all(|cell| cell.visited));
        maze.grid.reset_visited();
        assert_eq!(maze.grid.cells().filter(|cell| !cell.visited).count(), 25);
    }

    #[test]
    fn test_solver_finds_a_simple_path_in_generated_mazes() {
        for seed in 0..32 {
            let mut maze = Maze::with_seed(9, 14, seed).expect("valid dimensions");
            let mut recorder = Recorder::new();
            let path = maze.solve(&mut recorder).expect("perfect mazes are solvable");

            assert_path_is_valid(&maze.grid, &path);

            let surviving = recorder.surviving_moves();
            assert_eq!(surviving.len(), path.len() - 1);
            for (step, (from, to)) in path.windows(2).zip(surviving) {
                assert_eq!((step[0], step[1]), (from, to));
            }
        }
    }

    #[test]
    fn test_solver_without_reset_sees_a_fully_visited_maze() {
        let mut maze = Maze::with_seed(4, 4, 5).expect("valid dimensions");
        assert!(!solver::solve(&mut maze.grid, &mut ()));

        maze.grid.reset_visited();
        assert!(solver::solve(&mut maze.grid, &mut ()));
    }

    #[test]
    fn test_observer_does_not_change_the_outcome() {
        let mut recorder = Recorder::new();
        let mut observed = Maze::new_observed(10, 10, StdRng::seed_from_u64(8), &mut recorder)
            .expect("valid dimensions");
        let mut headless = Maze::with_seed(10, 10, 8).expect("valid dimensions");

        assert_eq!(walls(&observed.grid), walls(&headless.grid));
        assert_eq!(observed.solve(&mut recorder), headless.solve(&mut ()));
    }

    #[test]
    fn test_observer_sees_every_opened_wall() {
        let mut recorder = Recorder::new();
        let maze = Maze::new_observed(6, 7, StdRng::seed_from_u64(4), &mut recorder)
            .expect("valid dimensions");

        let opened = recorder
            .events
            .iter()
            .filter(|event| matches!(event, Event::WallOpened(..)))
            .count();
        assert_eq!(opened, maze.grid.open_interior_walls());
        assert!(recorder.events.contains(&Event::BoundaryOpened(
            Position::new(0, 0),
            Direction::Up
        )));
        assert!(recorder.events.contains(&Event::BoundaryOpened(
            Position::new(5, 6),
            Direction::Down
        )));
    }

    #[test]
    fn test_large_maze_does_not_exhaust_the_stack() {
        let mut maze = Maze::with_seed(100, 120, 17).expect("valid dimensions");
        assert_is_perfect_maze(&maze.grid);

        let path = maze.solve(&mut ()).expect("perfect mazes are solvable");
        assert_path_is_valid(&maze.grid, &path);
    }

    #[test]
    fn test_regenerate_continues_the_random_stream() {
        let mut a = Maze::with_seed(8, 8, 21).expect("valid dimensions");
        let mut b = Maze::with_seed(8, 8, 21).expect("valid dimensions");
        let first = walls(&a.grid);

        a.regenerate(&mut ());
        b.regenerate(&mut ());

        assert_is_perfect_maze(&a.grid);
        assert_eq!(walls(&a.grid), walls(&b.grid));
        assert_ne!(walls(&a.grid), first);
    }

    #[test]
    fn test_blocks_mark_entrance_and_exit_gaps() {
        let maze = Maze::with_seed(3, 4, 0).expect("valid dimensions");
        let blocks = maze.blocks();

        assert_eq!(blocks.len(), 7);
        assert_eq!(blocks[0].len(), 9);
        assert_eq!(blocks[0][1], 0);
        assert_eq!(blocks[6][7], 0);
        assert_eq!(blocks[0].iter().filter(|&&block| block == 0).count(), 1);
        assert_eq!(blocks[6].iter().filter(|&&block| block == 0).count(), 1);

        let corners_are_walls = blocks
            .iter()
            .step_by(2)
            .all(|row| row.iter().step_by(2).all(|&block| block == 1));
        assert!(corners_are_walls);
    }

    #[test]
    fn test_log_draws_the_path() {
        let mut maze = Maze::with_seed(2, 2, 0).expect("valid dimensions");
        let path = maze.solve(&mut ()).expect("perfect mazes are solvable");

        let plain = maze.log(None);
        let with_path = maze.log(Some(&path));

        assert!(!plain.contains('░'));
        // Each path cell and each passage between consecutive cells is one marked block.
        let marked_blocks = with_path.matches("░░").count();
        assert_eq!(marked_blocks, 2 * path.len() - 1);
        assert_eq!(plain.lines().count(), 5);
    }

    #[test]
    fn test_log_skips_path_cells_outside_the_grid() {
        let maze = Maze::with_seed(2, 2, 0).expect("valid dimensions");
        let path = [Position::new(0, 0), Position::new(5, 5), Position::new(1, 7)];

        let text = maze.log(Some(&path));

        assert_eq!(text.matches("░░").count(), 1);
        assert_eq!(text.lines().count(), 5);
    }
}
