use std::fmt;

use strum::{EnumIter, IntoEnumIterator};

use crate::error::MazeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Neighbouring position one step in `direction`, or `None` past the top or left edge.
    /// Bottom and right edges are checked by `Grid::neighbor`.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let Position { row, col } = self;
        match direction {
            Direction::Up => row.checked_sub(1).map(|row| Position { row, col }),
            Direction::Down => Some(Position { row: row + 1, col }),
            Direction::Left => col.checked_sub(1).map(|col| Position { row, col }),
            Direction::Right => Some(Position { row, col: col + 1 }),
        }
    }

    /// Direction leading from `self` to `other` when the two are grid-adjacent.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::iter().find(|&direction| self.step(direction) == Some(other))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iteration order (up, down, left, right) is the order the solver explores in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Wall flags are read-only outside this module; they change through `Grid` so that both
/// sides of an interior wall always agree. `visited` is free scratch state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    has_top_wall: bool,
    has_bottom_wall: bool,
    has_left_wall: bool,
    has_right_wall: bool,
    pub visited: bool,
}

impl Cell {
    fn new(position: Position) -> Self {
        Cell {
            position,
            has_top_wall: true,
            has_bottom_wall: true,
            has_left_wall: true,
            has_right_wall: true,
            visited: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn has_top_wall(&self) -> bool {
        self.has_top_wall
    }

    pub fn has_bottom_wall(&self) -> bool {
        self.has_bottom_wall
    }

    pub fn has_left_wall(&self) -> bool {
        self.has_left_wall
    }

    pub fn has_right_wall(&self) -> bool {
        self.has_right_wall
    }

    pub fn has_wall(&self, side: Direction) -> bool {
        match side {
            Direction::Up => self.has_top_wall(),
            Direction::Down => self.has_bottom_wall(),
            Direction::Left => self.has_left_wall(),
            Direction::Right => self.has_right_wall(),
        }
    }

    // Interior walls only change in pairs, through `Grid::open_wall`.
    fn remove_wall(&mut self, side: Direction) {
        match side {
            Direction::Up => self.has_top_wall = false,
            Direction::Down => self.has_bottom_wall = false,
            Direction::Left => self.has_left_wall = false,
            Direction::Right => self.has_right_wall = false,
        }
    }
}

/// Fixed-size, row-major store of cells and their walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        if rows < 1 || cols < 1 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(Position { row, col })))
            .collect();

        Ok(Grid { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn entrance(&self) -> Position {
        Position { row: 0, col: 0 }
    }

    pub fn exit(&self) -> Position {
        Position {
            row: self.rows - 1,
            col: self.cols - 1,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, MazeError> {
        let index = self.index(row, col)?;
        Ok(&self.cells[index])
    }

    pub fn cell_at_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, MazeError> {
        let index = self.index(row, col)?;
        Ok(&mut self.cells[index])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|&neighbor| self.contains(neighbor))
    }

    /// Removes the facing walls of two adjacent cells together.
    pub fn open_wall(&mut self, a: Position, b: Position) -> Result<(), MazeError> {
        let a_index = self.index(a.row, a.col)?;
        let b_index = self.index(b.row, b.col)?;
        let direction = a.direction_to(b).ok_or(MazeError::NotAdjacent { a, b })?;

        self.cells[a_index].remove_wall(direction);
        self.cells[b_index].remove_wall(direction.opposite());

        Ok(())
    }

    /// Opens an outward wall on the grid border. Has no partner cell.
    pub fn open_boundary(&mut self, position: Position, side: Direction) -> Result<(), MazeError> {
        if self.neighbor(position, side).is_some() {
            return Err(MazeError::NotAdjacent {
                a: position,
                b: position.step(side).unwrap_or(position),
            });
        }

        self.cell_at_mut(position.row, position.col)?.remove_wall(side);
        Ok(())
    }

    /// True when `from` has an open passage to an in-bounds neighbour in `direction`.
    pub fn is_passage(&self, from: Position, direction: Direction) -> bool {
        self.neighbor(from, direction).is_some()
            && self
                .cell_at(from.row, from.col)
                .is_ok_and(|cell| !cell.has_wall(direction))
    }

    pub fn is_visited(&self, position: Position) -> bool {
        self.cell_at(position.row, position.col)
            .is_ok_and(|cell| cell.visited)
    }

    pub fn mark_visited(&mut self, position: Position) -> Result<(), MazeError> {
        self.cell_at_mut(position.row, position.col)?.visited = true;
        Ok(())
    }

    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// Number of open walls between pairs of cells. Border openings are not counted.
    pub fn open_interior_walls(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let down = self.is_passage(cell.position(), Direction::Down) as usize;
                let right = self.is_passage(cell.position(), Direction::Right) as usize;
                down + right
            })
            .sum()
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, MazeError> {
        if row >= self.rows || col >= self.cols {
            return Err(MazeError::OutOfBounds { row, col });
        }
        Ok(row * self.cols + col)
    }
}
