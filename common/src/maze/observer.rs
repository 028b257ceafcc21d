use super::grid::{Direction, Position};

/// Receives carving and solving events as they happen. Every method defaults to a no-op,
/// and nothing an observer does can change the maze, so a headless run and an observed
/// run with the same seed produce the same walls and the same path.
pub trait MazeObserver {
    fn wall_opened(&mut self, _a: Position, _b: Position) {}

    fn boundary_opened(&mut self, _at: Position, _side: Direction) {}

    fn cell_entered(&mut self, _at: Position) {}

    fn moved(&mut self, _from: Position, _to: Position, _undo: bool) {}
}

impl MazeObserver for () {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    WallOpened(Position, Position),
    BoundaryOpened(Position, Direction),
    CellEntered(Position),
    Moved {
        from: Position,
        to: Position,
        undo: bool,
    },
}

/// Keeps every event in order. Handy for replaying a run or checking it in tests.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> impl Iterator<Item = (Position, Position, bool)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            Event::Moved { from, to, undo } => Some((from, to, undo)),
            _ => None,
        })
    }

    /// Replays forward and undo moves against a stack, leaving the moves never taken back.
    pub fn surviving_moves(&self) -> Vec<(Position, Position)> {
        let mut stack: Vec<(Position, Position)> = Vec::new();
        for (from, to, undo) in self.moves() {
            if undo {
                let last = stack.pop();
                debug_assert_eq!(last, Some((from, to)), "undo must match the last move");
            } else {
                stack.push((from, to));
            }
        }
        stack
    }
}

impl MazeObserver for Recorder {
    fn wall_opened(&mut self, a: Position, b: Position) {
        self.events.push(Event::WallOpened(a, b));
    }

    fn boundary_opened(&mut self, at: Position, side: Direction) {
        self.events.push(Event::BoundaryOpened(at, side));
    }

    fn cell_entered(&mut self, at: Position) {
        self.events.push(Event::CellEntered(at));
    }

    fn moved(&mut self, from: Position, to: Position, undo: bool) {
        self.events.push(Event::Moved { from, to, undo });
    }
}
