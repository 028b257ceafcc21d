use log::debug;
use strum::IntoEnumIterator;

use super::{
    grid::{Direction, DirectionIter, Grid, Position},
    observer::MazeObserver,
};

struct Frame {
    at: Position,
    remaining: DirectionIter,
}

impl Frame {
    fn new(at: Position) -> Self {
        Frame {
            at,
            remaining: Direction::iter(),
        }
    }
}

/// Depth-first search from the entrance to the exit. Visitation state must be reset by
/// the caller beforehand: cells already marked visited are treated as explored.
pub fn solve(grid: &mut Grid, observer: &mut dyn MazeObserver) -> bool {
    find_path(grid, observer).is_some()
}

/// Like `solve`, but returns the cells of the path found, entrance first.
///
/// Directions are tried up, down, left, right. Each step forward is reported with
/// `undo = false`; leaving a dead end reports the same step again with `undo = true`.
/// The search stops at the first arrival on the exit, so the path is not necessarily
/// the shortest one.
pub fn find_path(grid: &mut Grid, observer: &mut dyn MazeObserver) -> Option<Vec<Position>> {
    let start = grid.entrance();
    let target = grid.exit();

    enter(grid, observer, start);
    if start == target {
        return Some(vec![start]);
    }

    let mut stack = vec![Frame::new(start)];
    let mut backtracks = 0;

    while let Some(frame) = stack.last_mut() {
        let at = frame.at;
        let next = frame.remaining.by_ref().find_map(|direction| {
            grid.neighbor(at, direction).filter(|&neighbor| {
                grid.is_passage(at, direction) && !grid.is_visited(neighbor)
            })
        });

        match next {
            Some(next) => {
                observer.moved(at, next, false);
                enter(grid, observer, next);

                if next == target {
                    let mut path: Vec<Position> = stack.iter().map(|frame| frame.at).collect();
                    path.push(next);
                    debug!(
                        "reached {} in {} steps after {} backtracks",
                        target,
                        path.len() - 1,
                        backtracks
                    );
                    return Some(path);
                }

                stack.push(Frame::new(next));
            }
            None => {
                stack.pop();
                if let Some(parent) = stack.last() {
                    observer.moved(parent.at, at, true);
                    backtracks += 1;
                }
            }
        }
    }

    debug!("no path from {} to {}", start, target);
    None
}

fn enter(grid: &mut Grid, observer: &mut dyn MazeObserver, at: Position) {
    observer.cell_entered(at);
    grid.mark_visited(at)
        .expect("search only walks cells inside the grid");
}
