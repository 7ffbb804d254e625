/// A pixel coordinate on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A straight segment between two points, drawn with the given thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
}

impl Line {
    pub const fn new(start: Point, end: Point, thickness: f64) -> Self {
        Line {
            start,
            end,
            thickness,
        }
    }
}

/// Top-left pixel corner of the cell at `(col, row)`.
pub fn cell_origin(col: u16, row: u16, cell_width: u32, cell_height: u32) -> Point {
    Point::new(
        col as f64 * cell_width as f64,
        row as f64 * cell_height as f64,
    )
}
