use std::time::Instant;

use mazetrace::{
    MazeConfig, Solver,
    app::logging,
    generators::{generate, get_rng},
    render::NullPort,
    solvers::solve,
};

/// Generates and solves large mazes headless, logging how long each phase takes.
///
/// Usage: `profile [iterations] [algorithm]`
fn main() -> anyhow::Result<()> {
    logging::init_stderr_logging(false)?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let solver = match args.next() {
        Some(name) => name.parse::<Solver>()?,
        None => Solver::AStar,
    };

    let config = MazeConfig::new(255, 255).with_wall_break_probability(0.05);
    let mut rng = get_rng(Some(0));
    for i in 0..num_iters {
        let started = Instant::now();
        let mut maze = generate(&config, &mut rng)?;
        let generated = started.elapsed();
        let outcome = solve(&mut maze, solver, &mut NullPort);
        tracing::info!(
            "[profile] iteration {}: generate {:?}, solve {:?} with {}, goal reached: {}",
            i,
            generated,
            started.elapsed() - generated,
            solver,
            outcome.goal_reached()
        );
    }
    Ok(())
}
