pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod render;
pub mod solvers;

pub use error::MazeError;
pub use maze::{Cell, Coord, Direction, Maze, MazeConfig};
pub use render::RenderPort;
pub use solvers::{SearchOutcome, Solver};
