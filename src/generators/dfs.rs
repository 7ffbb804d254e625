use rand::{Rng, seq::SliceRandom};

use crate::maze::{Coord, Direction, Maze, grid::Grid};

/// What a single pop of the carving stack did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarveStep {
    /// Opened the wall from `from` towards the unvisited neighbor `to`.
    Carved {
        from: Coord,
        to: Coord,
        direction: Direction,
    },
    /// The popped cell had no unvisited neighbor left.
    DeadEnd(Coord),
}

/// Randomized depth-first carving with an explicit stack.
///
/// Each call to [`DepthFirstCarver::step`] pops one cell and carves at most one wall,
/// which keeps the carved passages a spanning tree.
pub struct DepthFirstCarver {
    stack: Vec<Coord>,
    visited: Grid<bool>,
}

impl DepthFirstCarver {
    pub fn new(maze: &Maze) -> Self {
        DepthFirstCarver {
            stack: vec![maze.entrance()],
            visited: Grid::filled(maze.num_cols(), maze.num_rows(), false),
        }
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pops one cell and carves towards a random unvisited neighbor.
    /// Returns `None` once the stack is exhausted.
    pub fn step<R: Rng + ?Sized>(&mut self, maze: &mut Maze, rng: &mut R) -> Option<CarveStep> {
        let mut order = Direction::ALL;
        order.shuffle(rng);
        self.step_in_order(maze, order)
    }

    /// Same as [`DepthFirstCarver::step`], scanning directions in the given order.
    pub(crate) fn step_in_order(
        &mut self,
        maze: &mut Maze,
        order: [Direction; 4],
    ) -> Option<CarveStep> {
        let cell = self.stack.pop()?;
        self.visited[cell] = true;

        let unvisited = order.into_iter().find_map(|dir| {
            maze.neighbor(cell, dir)
                .filter(|&n| !self.visited[n])
                .map(|n| (dir, n))
        });

        match unvisited {
            Some((direction, neighbor)) => {
                // Put the cell back first so we can look at another neighbor of this cell later
                self.stack.push(cell);
                // Put the neighbor to carve the maze in that neighbor's direction
                self.stack.push(neighbor);
                maze.carve(cell, direction);
                Some(CarveStep::Carved {
                    from: cell,
                    to: neighbor,
                    direction,
                })
            }
            None => Some(CarveStep::DeadEnd(cell)),
        }
    }
}
