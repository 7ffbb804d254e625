use std::{path::PathBuf, time::Duration};

use clap::Parser;
use mazetrace::{
    MazeConfig, SearchOutcome, Solver,
    app::{self, AppConfig, canvas::MIN_CELL_SIZE, logging},
};

/// Generate a maze and watch a search algorithm solve it, step by step.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of maze columns
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..=1000))]
    cols: u16,

    /// Number of maze rows
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=1000))]
    rows: u16,

    /// Pixel width of a cell
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(MIN_CELL_SIZE as i64..))]
    cell_width: u32,

    /// Pixel height of a cell
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(MIN_CELL_SIZE as i64..))]
    cell_height: u32,

    /// Chance per cell of opening one extra wall after carving, between 0 and 1
    #[arg(long, default_value_t = 0.0)]
    wall_break_probability: f64,

    /// Solving algorithm: dfs, bfs or astar
    #[arg(long, short, default_value = "dfs")]
    algorithm: String,

    /// Pause between animation steps, in milliseconds
    #[arg(long, default_value_t = 5)]
    delay_ms: u64,

    /// Random seed for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Animate the carving of the maze as well as the search
    #[arg(long)]
    animate_generation: bool,

    /// Where to write logs
    #[arg(long, default_value = "mazetrace.log")]
    log_file: PathBuf,

    /// Log debug messages
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<AppConfig> {
        let maze = MazeConfig::new(self.cols, self.rows)
            .with_cell_size(self.cell_width, self.cell_height)
            .with_wall_break_probability(self.wall_break_probability);
        maze.validate()?;
        Ok(AppConfig {
            maze,
            solver: self.algorithm.parse::<Solver>()?,
            delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
            animate_generation: self.animate_generation,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = logging::init_file_logging(&args.log_file, args.verbose)?;
    let config = args.into_config()?;

    match app::run(&config)? {
        SearchOutcome::Found(path) => {
            println!("Maze solved by {}! Path length: {} cells.", config.solver, path.len())
        }
        SearchOutcome::Exhausted => println!("No path found to the goal."),
        SearchOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}
