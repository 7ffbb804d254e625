use std::{fmt, io::Write, ops::ControlFlow, time::Duration};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyModifiers},
    queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::error::MazeError;
use crate::maze::{Cell, Direction, geometry::{Line, Point}};
use crate::render::RenderPort;

/// Smallest cell size, in pixels, whose inset walls still round onto the wall slots.
pub const MIN_CELL_SIZE: u32 = 8;

/// What occupies one slot of the character grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Empty,
    Wall,
    Visited,
    Frontier,
    Route,
}

impl Glyph {
    /// The width of each slot when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Empty => "  ".with(Color::Reset),
            Glyph::Wall => "██".with(Color::White),
            Glyph::Visited => "░░".with(Color::DarkGrey),
            Glyph::Frontier => "··".with(Color::Grey),
            Glyph::Route => "██".with(Color::Magenta),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// A [`RenderPort`] that rasterizes pixel-space maze geometry onto the terminal.
///
/// A maze of `n x m` cells maps onto a `(2n + 1) x (2m + 1)` grid of slots: cell
/// interiors land on odd slots, walls between them on even slots, and wall corners on
/// even-even slots. Pixel coordinates are scaled so one cell spans two slots.
pub struct TerminalCanvas<W: Write> {
    out: W,
    cell_width: f64,
    cell_height: f64,
    grid_width: u16,
    grid_height: u16,
    /// Pause after each refreshed frame
    delay: Duration,
    /// Whether to read key presses from the terminal on refresh
    interactive: bool,
    cancelled: bool,
    error: Option<std::io::Error>,
}

impl<W: Write> TerminalCanvas<W> {
    /// Longest pause the slow-down key will reach.
    const MAX_DELAY: Duration = Duration::from_secs(1);

    /// Fails when the cells are too small to rasterize or the slot grid does not fit in
    /// terminal coordinates.
    pub fn new(
        out: W,
        num_cols: u16,
        num_rows: u16,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, MazeError> {
        if cell_width < MIN_CELL_SIZE || cell_height < MIN_CELL_SIZE {
            return Err(MazeError::InvalidConfiguration(format!(
                "cells of {}x{} pixels are too small to draw, need at least {}x{}",
                cell_width, cell_height, MIN_CELL_SIZE, MIN_CELL_SIZE
            )));
        }
        let slots = |cells: u16| cells.checked_mul(2).and_then(|n| n.checked_add(1));
        let too_large = || {
            MazeError::InvalidConfiguration(format!(
                "a {}x{} maze does not fit in a terminal",
                num_cols, num_rows
            ))
        };
        let grid_width = slots(num_cols).ok_or_else(too_large)?;
        let grid_height = slots(num_rows).ok_or_else(too_large)?;
        // Two characters per slot, plus a row for the status line
        if grid_width.checked_mul(Glyph::WIDTH).is_none() || grid_height.checked_add(1).is_none()
        {
            return Err(too_large());
        }

        Ok(TerminalCanvas {
            out,
            cell_width: cell_width as f64,
            cell_height: cell_height as f64,
            grid_width,
            grid_height,
            delay: Duration::ZERO,
            interactive: false,
            cancelled: false,
            error: None,
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Poll the terminal for Esc / `q` / Ctrl-C and speed keys on every refresh.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Terminal columns and rows needed to show the grid plus the status line.
    pub fn required_size(&self) -> (u16, u16) {
        (self.grid_width * Glyph::WIDTH, self.grid_height + 1)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The first I/O error hit while drawing, if any. Drawing stops after an error.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Maps a pixel position to the nearest grid slot.
    pub fn to_slot(&self, point: Point) -> (u16, u16) {
        let scale = |v: f64, size: f64, max: u16| {
            let slot = (2.0 * v / size).round().max(0.0);
            (slot as u16).min(max - 1)
        };
        (
            scale(point.x, self.cell_width, self.grid_width),
            scale(point.y, self.cell_height, self.grid_height),
        )
    }

    /// Grid slots covered by a line, endpoints included.
    pub fn rasterize(&self, line: &Line) -> Vec<(u16, u16)> {
        let (x0, y0) = self.to_slot(line.start);
        let (x1, y1) = self.to_slot(line.end);
        let (dx, dy) = (x1 as i32 - x0 as i32, y1 as i32 - y0 as i32);
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            return vec![(x0, y0)];
        }
        (0..=steps)
            .map(|i| {
                let x = x0 as i32 + dx * i / steps;
                let y = y0 as i32 + dy * i / steps;
                (x as u16, y as u16)
            })
            .collect()
    }

    fn paint(&mut self, slot: (u16, u16), glyph: Glyph) {
        if self.error.is_some() {
            return;
        }
        let result = queue!(
            self.out,
            cursor::MoveTo(slot.0 * Glyph::WIDTH, slot.1),
            style::Print(glyph)
        );
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    fn draw_line(&mut self, line: &Line, glyph: Glyph) {
        for slot in self.rasterize(line) {
            // Corner posts always stand, even when the walls meeting there are open
            let is_corner = slot.0 % 2 == 0 && slot.1 % 2 == 0;
            if glyph == Glyph::Empty && is_corner {
                continue;
            }
            self.paint(slot, glyph);
        }
    }

    /// Fills the interior of the rectangle spanned by `origin` and the given size.
    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, glyph: Glyph) {
        let center = Point::new(origin.x + width / 2.0, origin.y + height / 2.0);
        let slot = self.to_slot(center);
        self.paint(slot, glyph);
    }

    /// Clears the screen and paints the empty grid with corner posts.
    pub fn clear(&mut self) -> std::io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for y in (0..self.grid_height).step_by(2) {
            for x in (0..self.grid_width).step_by(2) {
                self.paint((x, y), Glyph::Wall);
            }
        }
        self.out.flush()?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Prints a message on the line below the grid, truncated to the terminal width.
    pub fn status(&mut self, message: &str, color: Color) -> std::io::Result<()> {
        let width = terminal::size().map(|(w, _)| w).unwrap_or(u16::MAX) as usize;
        let (message, _) = message.unicode_truncate(width);
        queue!(
            self.out,
            cursor::MoveTo(0, self.grid_height),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(message.with(color))
        )?;
        self.out.flush()
    }

    /// Reads pending key presses without blocking.
    fn poll_input(&mut self) -> std::io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event::Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    tracing::debug!("[canvas] stop key pressed");
                    self.cancelled = true;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.cancelled = true;
                }
                KeyCode::Up => {
                    self.delay /= 2;
                    tracing::debug!("[canvas] speed up, delay {:?}", self.delay);
                }
                KeyCode::Down => {
                    self.delay = (self.delay * 2)
                        .max(Duration::from_millis(1))
                        .min(Self::MAX_DELAY);
                    tracing::debug!("[canvas] slow down, delay {:?}", self.delay);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl<W: Write> RenderPort for TerminalCanvas<W> {
    fn draw_cell(&mut self, cell: &Cell) {
        let shade = if cell.visited {
            Glyph::Visited
        } else {
            Glyph::Empty
        };
        let origin = cell.origin();
        self.fill_rect(origin, cell.width() as f64, cell.height() as f64, shade);
        for direction in Direction::ALL {
            let glyph = if cell.has_wall(direction) {
                Glyph::Wall
            } else {
                Glyph::Empty
            };
            self.draw_line(&cell.wall_line(direction), glyph);
        }
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, confirmed: bool) {
        let glyph = if confirmed {
            Glyph::Route
        } else {
            Glyph::Frontier
        };
        let line = Line::new(from.center(), to.center(), from.thickness());
        self.draw_line(&line, glyph);
    }

    fn refresh_frame(&mut self) -> ControlFlow<()> {
        if self.error.is_none() {
            if let Err(e) = self.out.flush() {
                self.error = Some(e);
            }
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.interactive && self.error.is_none() {
            if let Err(e) = self.poll_input() {
                self.error = Some(e);
            }
        }
        if self.cancelled || self.error.is_some() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
