pub mod error;
pub mod maze;
pub mod random;

pub use error::MazeError;
pub use maze::Maze;
