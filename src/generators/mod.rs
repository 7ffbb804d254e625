use std::ops::ControlFlow;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod dfs;
mod wall_break;

pub use dfs::{CarveStep, DepthFirstCarver};
pub use wall_break::WallBreaker;

use crate::error::MazeError;
use crate::maze::{Coord, Direction, Maze, MazeConfig};
use crate::render::RenderPort;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// One bounded unit of generation work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationStep {
    /// The depth-first pass opened a passage.
    Carved {
        from: Coord,
        to: Coord,
        direction: Direction,
    },
    /// The depth-first pass backtracked out of a cell.
    DeadEnd(Coord),
    /// The wall-break pass opened an extra wall.
    WallBroken {
        from: Coord,
        to: Coord,
        direction: Direction,
    },
    /// The wall-break pass left this cell as it was.
    WallKept(Coord),
}

enum Phase {
    Carving(DepthFirstCarver),
    BreakingWalls(WallBreaker),
    Done,
}

/// Stepwise maze generation: depth-first carving, then the wall-break pass.
///
/// The entrance and exit are opened when the generation is created. Iterating to the end
/// leaves every cell reachable from the entrance.
pub struct Generation<'a, R: Rng + ?Sized> {
    maze: &'a mut Maze,
    rng: &'a mut R,
    phase: Phase,
}

impl<'a, R: Rng + ?Sized> Generation<'a, R> {
    pub fn new(maze: &'a mut Maze, rng: &'a mut R) -> Self {
        maze.open_entrance_and_exit();
        let carver = DepthFirstCarver::new(maze);
        Generation {
            maze,
            rng,
            phase: Phase::Carving(carver),
        }
    }

    /// Read access to the maze being generated, e.g. for drawing between steps.
    pub fn maze(&self) -> &Maze {
        self.maze
    }
}

impl<R: Rng + ?Sized> Iterator for Generation<'_, R> {
    type Item = GenerationStep;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.phase {
                Phase::Carving(carver) => match carver.step(self.maze, self.rng) {
                    Some(CarveStep::Carved {
                        from,
                        to,
                        direction,
                    }) => {
                        return Some(GenerationStep::Carved {
                            from,
                            to,
                            direction,
                        });
                    }
                    Some(CarveStep::DeadEnd(coord)) => {
                        return Some(GenerationStep::DeadEnd(coord));
                    }
                    None => {
                        tracing::debug!("[generator] carving finished, breaking extra walls");
                        self.phase = Phase::BreakingWalls(WallBreaker::new(self.maze));
                    }
                },
                Phase::BreakingWalls(breaker) => match breaker.step(self.maze, self.rng) {
                    Some((from, Some((direction, to)))) => {
                        return Some(GenerationStep::WallBroken {
                            from,
                            to,
                            direction,
                        });
                    }
                    Some((coord, None)) => return Some(GenerationStep::WallKept(coord)),
                    None => {
                        self.phase = Phase::Done;
                    }
                },
                Phase::Done => return None,
            }
        }
    }
}

/// Builds and fully generates a maze.
pub fn generate<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<Maze, MazeError> {
    let mut maze = Maze::new(config)?;
    let steps = Generation::new(&mut maze, rng).count();
    tracing::debug!(
        "[generator] generated {}x{} maze in {} steps",
        config.num_cols,
        config.num_rows,
        steps
    );
    Ok(maze)
}

/// Generates a maze while animating every opened wall on the render port.
///
/// Returns `Ok(None)` if the port asked to stop before generation finished.
pub fn generate_animated<R: Rng + ?Sized>(
    config: &MazeConfig,
    rng: &mut R,
    port: &mut impl RenderPort,
) -> Result<Option<Maze>, MazeError> {
    let mut maze = Maze::new(config)?;
    maze.draw(port);
    if port.refresh_frame().is_break() {
        return Ok(None);
    }

    let mut generation = Generation::new(&mut maze, rng);
    let (entrance, exit) = (generation.maze().entrance(), generation.maze().exit());
    port.draw_cell(&generation.maze()[entrance]);
    port.draw_cell(&generation.maze()[exit]);

    while let Some(step) = generation.next() {
        let (from, to) = match step {
            GenerationStep::Carved { from, to, .. } | GenerationStep::WallBroken { from, to, .. } => {
                (from, to)
            }
            // Nothing changed on screen
            GenerationStep::DeadEnd(_) | GenerationStep::WallKept(_) => continue,
        };
        let maze = generation.maze();
        port.draw_cell(&maze[from]);
        port.draw_cell(&maze[to]);
        if let ControlFlow::Break(()) = port.refresh_frame() {
            tracing::info!("[generator] generation cancelled by render port");
            return Ok(None);
        }
    }
    Ok(Some(maze))
}
