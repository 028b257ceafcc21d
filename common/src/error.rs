use std::{error, fmt};

use crate::maze::grid::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    InvalidDimensions { rows: usize, cols: usize },
    OutOfBounds { row: usize, col: usize },
    NotAdjacent { a: Position, b: Position },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { rows, cols } => write!(
                f,
                "Maze must have at least one row and one column, got {} x {}.",
                rows, cols
            ),
            MazeError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid.", row, col)
            }
            MazeError::NotAdjacent { a, b } => {
                write!(f, "Cells {} and {} are not adjacent.", a, b)
            }
        }
    }
}

impl error::Error for MazeError {}
