use super::direction::Direction;
use super::geometry::{Line, Point, cell_origin};

/// A single maze cell: four walls, a visited shade and its pixel geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: (u16, u16),
    origin: Point,
    width: u32,
    height: u32,
    thickness: f64,
    pub has_top: bool,
    pub has_right: bool,
    pub has_bottom: bool,
    pub has_left: bool,
    /// Shading marker for the render port. Traversals keep their own visited sets.
    pub visited: bool,
}

impl Cell {
    /// Wall thickness in pixels.
    pub const WALL_THICKNESS: f64 = 2.0;

    /// Creates a fully walled, unvisited cell at `coord`.
    pub fn new(coord: (u16, u16), width: u32, height: u32) -> Self {
        Cell {
            coord,
            origin: cell_origin(coord.0, coord.1, width, height),
            width,
            height,
            thickness: Cell::WALL_THICKNESS,
            has_top: true,
            has_right: true,
            has_bottom: true,
            has_left: true,
            visited: false,
        }
    }

    /// Grid index `(col, row)` of this cell.
    pub fn coord(&self) -> (u16, u16) {
        self.coord
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width as f64 / 2.0,
            self.origin.y + self.height as f64 / 2.0,
        )
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.has_top,
            Direction::Right => self.has_right,
            Direction::Down => self.has_bottom,
            Direction::Left => self.has_left,
        }
    }

    /// Sets a single wall flag. Prefer `Maze::carve` for walls shared with a neighbor.
    pub(crate) fn set_wall(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::Up => self.has_top = present,
            Direction::Right => self.has_right = present,
            Direction::Down => self.has_bottom = present,
            Direction::Left => self.has_left = present,
        }
    }

    /// The wall segment on the given side, inset by half the wall thickness so it stays
    /// inside the cell.
    pub fn wall_line(&self, direction: Direction) -> Line {
        let (x1, y1) = (self.origin.x, self.origin.y);
        let (x2, y2) = (x1 + self.width as f64, y1 + self.height as f64);
        let offset = self.thickness / 2.0;
        let (start, end) = match direction {
            Direction::Up => (Point::new(x1, y1 + offset), Point::new(x2, y1 + offset)),
            Direction::Right => (Point::new(x2 - offset, y1), Point::new(x2 - offset, y2)),
            Direction::Down => (Point::new(x1, y2 - offset), Point::new(x2, y2 - offset)),
            Direction::Left => (Point::new(x1 + offset, y1), Point::new(x1 + offset, y2)),
        };
        Line::new(start, end, self.thickness)
    }

    /// Walls still standing, in `Direction::ALL` order.
    pub fn walls(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.has_wall(dir))
    }
}
