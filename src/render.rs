//! The drawing boundary between the maze algorithms and whatever displays them.
//!
//! Generators and solvers push draw requests into a [`RenderPort`] and call
//! [`RenderPort::refresh_frame`] once per animated step. The port owns all pixels and all
//! pacing: it may sleep, poll for input, or do nothing at all. Returning
//! [`ControlFlow::Break`] from `refresh_frame` asks the running algorithm to stop at the
//! current step boundary.

use std::ops::ControlFlow;

use crate::maze::{Cell, Coord};

pub trait RenderPort {
    /// Render one cell's walls and its visited shading.
    fn draw_cell(&mut self, cell: &Cell);

    /// Render a line between two cell centers. `confirmed` selects the final-path style
    /// instead of the exploration style.
    fn draw_move(&mut self, from: &Cell, to: &Cell, confirmed: bool);

    /// Flush pending draw requests. Called once per animated step.
    fn refresh_frame(&mut self) -> ControlFlow<()>;
}

/// A port that discards everything and never asks to stop.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPort;

impl RenderPort for NullPort {
    fn draw_cell(&mut self, _cell: &Cell) {}

    fn draw_move(&mut self, _from: &Cell, _to: &Cell, _confirmed: bool) {}

    fn refresh_frame(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// A draw request as seen by a [`RecordingPort`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Cell { coord: Coord, visited: bool },
    Move { from: Coord, to: Coord, confirmed: bool },
    Refresh,
}

/// Records every request, optionally asking to stop after a number of frames.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub calls: Vec<DrawCall>,
    /// Break out after this many refreshes, if set
    pub stop_after_frames: Option<usize>,
    frames: usize,
}

impl RecordingPort {
    pub fn stopping_after(frames: usize) -> Self {
        RecordingPort {
            stop_after_frames: Some(frames),
            ..Self::default()
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Confirmed path edges in the order they were drawn.
    pub fn confirmed_moves(&self) -> Vec<(Coord, Coord)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                DrawCall::Move {
                    from,
                    to,
                    confirmed: true,
                } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    /// Exploration moves in the order they were drawn.
    pub fn frontier_moves(&self) -> Vec<(Coord, Coord)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                DrawCall::Move {
                    from,
                    to,
                    confirmed: false,
                } => Some((from, to)),
                _ => None,
            })
            .collect()
    }
}

impl RenderPort for RecordingPort {
    fn draw_cell(&mut self, cell: &Cell) {
        self.calls.push(DrawCall::Cell {
            coord: cell.coord(),
            visited: cell.visited,
        });
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, confirmed: bool) {
        self.calls.push(DrawCall::Move {
            from: from.coord(),
            to: to.coord(),
            confirmed,
        });
    }

    fn refresh_frame(&mut self) -> ControlFlow<()> {
        self.calls.push(DrawCall::Refresh);
        self.frames += 1;
        match self.stop_after_frames {
            Some(limit) if self.frames >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}
