use std::{
    io::{self, Stdout, Write, stdout},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use common::maze::{
    grid::{Direction, Position},
    observer::MazeObserver,
};

const WALL: &str = "██";
const OPEN: &str = "  ";
const TRAIL: &str = "██";

/// Draws carving and solving in the terminal as the events arrive. The maze is laid out
/// as blocks two columns wide: cell `(r, c)` at block `(2r + 1, 2c + 1)`, walls between.
pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    rows: usize,
    cols: usize,
    delay: Duration,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(rows: usize, cols: usize, delay: Duration) -> Self {
        TerminalRenderer::new(stdout(), rows, cols, delay)
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Clears the screen and draws the uncarved grid: every cell closed on all sides.
    pub fn new(out: W, rows: usize, cols: usize, delay: Duration) -> Self {
        let mut renderer = TerminalRenderer {
            out,
            rows,
            cols,
            delay,
        };
        renderer
            .draw_closed_grid()
            .expect("failed to draw the initial grid");
        renderer
    }

    fn draw_closed_grid(&mut self) -> io::Result<()> {
        execute!(self.out, Hide, Clear(ClearType::All))?;

        for z in 0..2 * self.rows + 1 {
            let line: String = (0..2 * self.cols + 1)
                .map(|x| if z % 2 == 1 && x % 2 == 1 { OPEN } else { WALL })
                .collect();
            queue!(self.out, MoveTo(0, screen(z)), Print(line))?;
        }

        self.out.flush()
    }

    fn paint(
        &mut self,
        block: (usize, usize),
        text: &str,
        color: Option<Color>,
    ) -> io::Result<()> {
        let (z, x) = block;
        queue!(self.out, MoveTo(screen(2 * x), screen(z)))?;
        if let Some(color) = color {
            queue!(self.out, SetForegroundColor(color))?;
        }
        queue!(self.out, Print(text), ResetColor)?;
        self.out.flush()
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    /// Moves the cursor below the maze and shows it again.
    pub fn finish(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            MoveTo(0, screen(2 * self.rows + 1)),
            Show
        )
    }
}

impl<W: Write> MazeObserver for TerminalRenderer<W> {
    fn wall_opened(&mut self, a: Position, b: Position) {
        self.paint(between(a, b), OPEN, None)
            .expect("failed to draw opened wall");
    }

    fn boundary_opened(&mut self, at: Position, side: Direction) {
        self.paint(beside(at, side), OPEN, None)
            .expect("failed to draw maze opening");
    }

    fn cell_entered(&mut self, _at: Position) {
        self.pause();
    }

    fn moved(&mut self, from: Position, to: Position, undo: bool) {
        let color = if undo { Color::DarkGrey } else { Color::Red };
        for block in [block_of(from), between(from, to), block_of(to)] {
            self.paint(block, TRAIL, Some(color))
                .expect("failed to draw solver move");
        }
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

/// Shows the cursor again after a forced shutdown.
pub fn restore_terminal() {
    let _ = execute!(stdout(), ResetColor, Show);
}

fn block_of(cell: Position) -> (usize, usize) {
    (2 * cell.row + 1, 2 * cell.col + 1)
}

fn between(a: Position, b: Position) -> (usize, usize) {
    (a.row + b.row + 1, a.col + b.col + 1)
}

fn beside(cell: Position, side: Direction) -> (usize, usize) {
    let (z, x) = block_of(cell);
    match side {
        Direction::Up => (z - 1, x),
        Direction::Down => (z + 1, x),
        Direction::Left => (z, x - 1),
        Direction::Right => (z, x + 1),
    }
}

fn screen(coordinate: usize) -> u16 {
    u16::try_from(coordinate).unwrap_or(u16::MAX)
}
