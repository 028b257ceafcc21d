pub mod algorithms;

use log::debug;
use strum::IntoEnumIterator;

use super::{
    grid::{Direction, Grid, Position},
    observer::MazeObserver,
};
use crate::random::RandomSource;
use algorithms::backtrack::Backtrack;

/// Carves passages into a grid in place, reporting each opened wall to the observer.
pub struct MazeMaker<'a, R: RandomSource> {
    pub grid: &'a mut Grid,
    rng: &'a mut R,
    observer: &'a mut dyn MazeObserver,
}

impl<'a, R: RandomSource> MazeMaker<'a, R> {
    pub fn new(grid: &'a mut Grid, rng: &'a mut R, observer: &'a mut dyn MazeObserver) -> Self {
        MazeMaker {
            grid,
            rng,
            observer,
        }
    }

    /// Turns the grid into a perfect maze rooted at the entrance, then opens the entrance
    /// and exit. Every cell is left marked visited.
    pub fn carve(&mut self) {
        let entrance = self.grid.entrance();
        self.backtrack(entrance);
        self.break_entrance_and_exit();

        debug!(
            "carved {} x {} maze with {} open walls",
            self.grid.rows(),
            self.grid.cols(),
            self.grid.open_interior_walls()
        );
    }

    fn get_neighbors(&self, cell: Position, only_if_unvisited: bool) -> Vec<Position> {
        Direction::iter()
            .filter_map(|direction| self.grid.neighbor(cell, direction))
            .filter(|&neighbor| !only_if_unvisited || !self.is_visited(neighbor))
            .collect()
    }

    fn pick_neighbor(&mut self, cell: Position, only_if_unvisited: bool) -> Option<Position> {
        let neighbors = self.get_neighbors(cell, only_if_unvisited);
        if neighbors.is_empty() {
            return None;
        }

        let i = self.rng.pick(neighbors.len());
        Some(neighbors[i])
    }

    fn visit_cell(&mut self, cell: Position) {
        self.grid
            .mark_visited(cell)
            .expect("carver only visits cells inside the grid");
    }

    fn is_visited(&self, cell: Position) -> bool {
        self.grid.is_visited(cell)
    }

    fn remove_wall_between(&mut self, cell_1: Position, cell_2: Position) {
        self.grid
            .open_wall(cell_1, cell_2)
            .expect("carver only opens walls between neighbors");
        self.observer.wall_opened(cell_1, cell_2);
    }

    fn break_entrance_and_exit(&mut self) {
        let openings = [
            (self.grid.entrance(), Direction::Up),
            (self.grid.exit(), Direction::Down),
        ];

        for (cell, side) in openings {
            self.grid
                .open_boundary(cell, side)
                .expect("entrance and exit sit on the border");
            self.observer.boundary_opened(cell, side);
        }
    }
}
