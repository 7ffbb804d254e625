pub mod canvas;
pub mod logging;

use std::{
    io::{Stdout, Write},
    ops::ControlFlow,
    time::Duration,
};

use anyhow::bail;
use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::Color,
    terminal::{self, ClearType},
};

use crate::{
    generators::{generate, generate_animated, get_rng},
    maze::MazeConfig,
    render::RenderPort,
    solvers::{SearchOutcome, Solver, solve},
};
use canvas::TerminalCanvas;

/// Everything the terminal front-end needs for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub maze: MazeConfig,
    pub solver: Solver,
    /// Pause after every animated step
    pub delay: Duration,
    /// Seed for the maze generator, random if unset
    pub seed: Option<u64>,
    /// Animate carving instead of drawing the finished maze at once
    pub animate_generation: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            solver: Solver::Dfs,
            delay: Duration::from_millis(5),
            seed: None,
            animate_generation: false,
        }
    }
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Wait for the user to press the Esc key
/// This function blocks until Esc is pressed
fn wait_for_esc() -> std::io::Result<()> {
    loop {
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
            if matches!(code, KeyCode::Esc | KeyCode::Char('q'))
                && kind == event::KeyEventKind::Press
            {
                break;
            }
        }
    }
    Ok(())
}

/// Generates and solves one maze in the terminal.
/// Returns how the search ended; `Cancelled` if the user stopped it.
pub fn run(config: &AppConfig) -> anyhow::Result<SearchOutcome> {
    config.maze.validate()?;

    let maze = &config.maze;
    let mut canvas = TerminalCanvas::new(
        std::io::stdout(),
        maze.num_cols,
        maze.num_rows,
        maze.cell_width,
        maze.cell_height,
    )?
    .with_delay(config.delay)
    .interactive();

    let (term_width, term_height) = terminal::size()?;
    let (needed_width, needed_height) = canvas.required_size();
    if term_width < needed_width || term_height < needed_height {
        bail!(
            "terminal is {}x{} but a {}x{} maze needs {}x{}; resize the terminal or shrink the maze",
            term_width,
            term_height,
            maze.num_cols,
            maze.num_rows,
            needed_width,
            needed_height
        );
    }

    let mut stdout = std::io::stdout();
    setup_terminal(&mut stdout)?;
    tracing::info!(
        "[app] starting {}x{} maze, solver {}, delay {:?}",
        maze.num_cols,
        maze.num_rows,
        config.solver,
        config.delay
    );
    let result = animate(config, &mut canvas);
    restore_terminal(&mut stdout)?;
    tracing::info!("[app] finished with {:?}", result.as_ref().map(|o| o.goal_reached()));
    result
}

fn animate(
    config: &AppConfig,
    canvas: &mut TerminalCanvas<Stdout>,
) -> anyhow::Result<SearchOutcome> {
    canvas.clear()?;
    let mut rng = get_rng(config.seed);

    canvas.status("Generating maze... (Esc to stop, ↑/↓ to change speed)", Color::Yellow)?;
    let maze = if config.animate_generation {
        generate_animated(&config.maze, &mut rng, canvas)?
    } else {
        let maze = generate(&config.maze, &mut rng)?;
        maze.draw(canvas);
        match canvas.refresh_frame() {
            ControlFlow::Continue(()) => Some(maze),
            ControlFlow::Break(()) => None,
        }
    };
    if let Some(e) = canvas.take_error() {
        return Err(e.into());
    }
    let Some(mut maze) = maze else {
        tracing::info!("[app] generation cancelled by user");
        return Ok(SearchOutcome::Cancelled);
    };

    canvas.status(
        &format!("Solving with {}... (Esc to stop, ↑/↓ to change speed)", config.solver),
        Color::Cyan,
    )?;
    let outcome = solve(&mut maze, config.solver, canvas);
    if let Some(e) = canvas.take_error() {
        return Err(e.into());
    }

    let (message, color) = match &outcome {
        SearchOutcome::Found(path) => (
            format!(
                "Path found by {}: {} cells. Press Esc to exit...",
                config.solver,
                path.len()
            ),
            Color::Green,
        ),
        SearchOutcome::Exhausted => (
            format!("No path found by {}. Press Esc to exit...", config.solver),
            Color::Red,
        ),
        SearchOutcome::Cancelled => return Ok(outcome),
    };
    canvas.status(&message, color)?;
    // Esc while tracing the path already counts as the exit key
    if !canvas.is_cancelled() {
        wait_for_esc()?;
    }
    Ok(outcome)
}
