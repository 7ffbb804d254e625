pub mod cell;
pub mod direction;
pub mod geometry;
pub mod grid;

pub use cell::Cell;
pub use direction::Direction;
use grid::Grid;

use crate::error::MazeError;
use crate::render::RenderPort;

/// A `(col, row)` grid index.
pub type Coord = (u16, u16);

/// Dimensions and generation parameters of a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    /// Number of cell columns
    pub num_cols: u16,
    /// Number of cell rows
    pub num_rows: u16,
    /// Pixel width of every cell
    pub cell_width: u32,
    /// Pixel height of every cell
    pub cell_height: u32,
    /// Chance, per cell, of opening one extra interior wall after carving
    pub wall_break_probability: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            num_cols: 16,
            num_rows: 10,
            cell_width: 50,
            cell_height: 50,
            wall_break_probability: 0.0,
        }
    }
}

impl MazeConfig {
    pub fn new(num_cols: u16, num_rows: u16) -> Self {
        Self {
            num_cols,
            num_rows,
            ..Self::default()
        }
    }

    pub fn with_cell_size(mut self, cell_width: u32, cell_height: u32) -> Self {
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self
    }

    pub fn with_wall_break_probability(mut self, probability: f64) -> Self {
        self.wall_break_probability = probability;
        self
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        if self.num_cols == 0 || self.num_rows == 0 {
            return Err(MazeError::InvalidConfiguration(format!(
                "maze must have at least one column and one row, got {}x{}",
                self.num_cols, self.num_rows
            )));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(MazeError::InvalidConfiguration(format!(
                "cell size must be positive, got {}x{} pixels",
                self.cell_width, self.cell_height
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_break_probability) {
            return Err(MazeError::InvalidConfiguration(format!(
                "wall break probability must be within [0, 1], got {}",
                self.wall_break_probability
            )));
        }
        Ok(())
    }
}

pub struct Maze {
    cells: Grid<Cell>,
    wall_break_probability: f64,
}

impl Maze {
    /// Creates a fully walled maze. Every cell starts with all four walls and unvisited.
    pub fn new(config: &MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        let (cell_width, cell_height) = (config.cell_width, config.cell_height);
        let cells = Grid::from_fn(config.num_cols, config.num_rows, |col, row| {
            Cell::new((col, row), cell_width, cell_height)
        });
        Ok(Maze {
            cells,
            wall_break_probability: config.wall_break_probability,
        })
    }

    /// Returns the number of cell columns.
    pub fn num_cols(&self) -> u16 {
        self.cells.width()
    }

    /// Returns the number of cell rows.
    pub fn num_rows(&self) -> u16 {
        self.cells.height()
    }

    pub fn num_cells(&self) -> usize {
        self.num_cols() as usize * self.num_rows() as usize
    }

    pub fn wall_break_probability(&self) -> f64 {
        self.wall_break_probability
    }

    /// The top-left cell, whose top wall is the maze entrance.
    pub fn entrance(&self) -> Coord {
        (0, 0)
    }

    /// The bottom-right cell, whose bottom wall is the maze exit.
    pub fn exit(&self) -> Coord {
        (self.num_cols() - 1, self.num_rows() - 1)
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.cells.is_in_bounds(coord)
    }

    /// All coordinates, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        self.cells.coords()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The neighbor one step away in `direction`, if it lies inside the maze.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let (dx, dy) = direction.offset();
        let x = u16::try_from(coord.0 as i32 + dx).ok()?;
        let y = u16::try_from(coord.1 as i32 + dy).ok()?;
        self.is_in_bounds((x, y)).then_some((x, y))
    }

    /// Removes the wall on `direction` side of `from` together with the facing wall of
    /// the neighbor, so the pair stays consistent.
    ///
    /// Returns `true` if a wall was removed, `false` if it was already open or there is
    /// no neighbor on that side.
    pub fn carve(&mut self, from: Coord, direction: Direction) -> bool {
        let Some(to) = self.neighbor(from, direction) else {
            return false;
        };
        if !self[from].has_wall(direction) {
            return false;
        }
        self[from].set_wall(direction, false);
        self[to].set_wall(direction.opposite(), false);
        true
    }

    /// Puts back the wall between `from` and its neighbor on `direction`, as a pair.
    ///
    /// Returns `true` if a wall was added.
    pub fn build_wall(&mut self, from: Coord, direction: Direction) -> bool {
        let Some(to) = self.neighbor(from, direction) else {
            return false;
        };
        if self[from].has_wall(direction) {
            return false;
        }
        self[from].set_wall(direction, true);
        self[to].set_wall(direction.opposite(), true);
        true
    }

    /// Opens the entrance and exit on the outer boundary.
    pub fn open_entrance_and_exit(&mut self) {
        let (entrance, exit) = (self.entrance(), self.exit());
        self[entrance].set_wall(Direction::Up, false);
        self[exit].set_wall(Direction::Down, false);
    }

    /// Neighbors reachable from `coord` without crossing a wall.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            if self[coord].has_wall(dir) {
                return None;
            }
            self.neighbor(coord, dir).map(|n| (dir, n))
        })
    }

    /// Resets the visited shading of every cell.
    pub fn clear_transient_state(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.visited = false);
    }

    /// Submits every cell to the render port. Does not refresh the frame.
    pub fn draw(&self, port: &mut impl RenderPort) {
        self.cells.iter().for_each(|cell| port.draw_cell(cell));
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[index]
    }
}

impl std::ops::IndexMut<Coord> for Maze {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.cells[index]
    }
}

/// Get neighbors of a cell, ignoring walls.
/// A neighbor is considered a cell that is one step away in the cardinal directions (up, down, left, right).
pub fn get_neighbors(coord: Coord, maze: &Maze) -> impl Iterator<Item = (Direction, Coord)> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |dir| maze.neighbor(coord, dir).map(|n| (dir, n)))
}
