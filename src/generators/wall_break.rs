use rand::Rng;

use crate::maze::{Coord, Direction, Maze, get_neighbors};

/// Secondary pass that opens extra interior walls, one cell per step.
///
/// Each cell gets one chance, with the maze's wall-break probability, to open a random
/// wall that is still closed and faces another cell. The outer boundary is never touched.
pub struct WallBreaker {
    coords: Vec<Coord>,
    next: usize,
}

impl WallBreaker {
    pub fn new(maze: &Maze) -> Self {
        WallBreaker {
            coords: maze.coords().collect(),
            next: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.coords.len()
    }

    /// Visits the next cell. Returns `None` when every cell has been visited, otherwise
    /// the visited cell and the wall opened from it, if any, as `(direction, neighbor)`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        maze: &mut Maze,
        rng: &mut R,
    ) -> Option<(Coord, Option<(Direction, Coord)>)> {
        let cell = *self.coords.get(self.next)?;
        self.next += 1;

        let probability = maze.wall_break_probability();
        if probability <= 0.0 || !rng.random_bool(probability) {
            return Some((cell, None));
        }

        let candidates = closed_interior_walls(maze, cell);
        if candidates.is_empty() {
            return Some((cell, None));
        }
        let (direction, neighbor) = candidates[rng.random_range(0..candidates.len())];
        maze.carve(cell, direction);
        Some((cell, Some((direction, neighbor))))
    }
}

/// Walls of `cell` that are closed and shared with an in-bounds neighbor.
fn closed_interior_walls(maze: &Maze, cell: Coord) -> Vec<(Direction, Coord)> {
    get_neighbors(cell, maze)
        .filter(|&(dir, _)| maze[cell].has_wall(dir))
        .collect()
}
