use super::super::MazeMaker;
use crate::{maze::grid::Position, random::RandomSource};

/// Randomized depth-first carving. Each step extends the current passage into a random
/// unvisited neighbour and backs up when there is none, so the result is a spanning tree.
pub trait Backtrack {
    fn backtrack(&mut self, start: Position);
}

impl<R: RandomSource> Backtrack for MazeMaker<'_, R> {
    fn backtrack(&mut self, start: Position) {
        // Explicit stack: the passage can be as long as the grid has cells.
        let mut stack = vec![start];
        self.visit_cell(start);

        while let Some(curr) = stack.pop() {
            if let Some(next) = self.pick_neighbor(curr, true) {
                stack.push(curr);
                self.remove_wall_between(curr, next);
                self.visit_cell(next);
                stack.push(next);
            }
        }
    }
}
