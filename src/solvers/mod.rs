use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;
use std::str::FromStr;

mod astar;
mod frontier;

pub use astar::{PriorityFrontier, euclidean_distance};
pub use frontier::{Frontier, FrontierEntry, QueueFrontier, StackFrontier};

use crate::error::MazeError;
use crate::maze::{Coord, Maze};
use crate::render::RenderPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Dfs,
    Bfs,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Dfs, Solver::Bfs, Solver::AStar];

    /// Short name accepted by [`Solver::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Solver::Dfs => "dfs",
            Solver::Bfs => "bfs",
            Solver::AStar => "astar",
        }
    }

    fn frontier(&self, goal: Coord) -> Box<dyn Frontier> {
        match self {
            Solver::Dfs => Box::new(StackFrontier::default()),
            Solver::Bfs => Box::new(QueueFrontier::default()),
            Solver::AStar => Box::new(PriorityFrontier::new(goal)),
        }
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Solver::Dfs),
            "bfs" | "breadth-first" => Ok(Solver::Bfs),
            "astar" | "a-star" | "a*" => Ok(Solver::AStar),
            _ => Err(MazeError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// How a solve call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The exit was reached; the path runs from the entrance to the exit.
    Found(Vec<Coord>),
    /// Every reachable cell was processed without reaching the exit.
    Exhausted,
    /// The render port asked to stop before the search finished.
    Cancelled,
}

impl SearchOutcome {
    pub fn goal_reached(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Result of a single [`Search::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStep {
    /// A cell was popped and its open neighbors were added to the frontier.
    Expanded { coord: Coord, parent: Option<Coord> },
    /// A popped cell had already been processed.
    Skipped(Coord),
    /// The goal was popped. Nothing further is expanded.
    Reached { coord: Coord, parent: Option<Coord> },
    /// The frontier is empty.
    Exhausted,
}

/// Stepwise search from the entrance to the exit of a maze.
///
/// The visited set and parent map live here, not on the maze, and are dropped with the
/// search. `Cell::visited` is only set for shading.
pub struct Search {
    frontier: Box<dyn Frontier>,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    start: Coord,
    goal: Coord,
}

impl Search {
    pub fn new(maze: &Maze, solver: Solver) -> Self {
        let (start, goal) = (maze.entrance(), maze.exit());
        let mut frontier = solver.frontier(goal);
        frontier.push(FrontierEntry {
            coord: start,
            steps: 0,
        });
        Search {
            frontier,
            visited: HashSet::new(),
            parents: HashMap::new(),
            start,
            goal,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn parent(&self, coord: Coord) -> Option<Coord> {
        self.parents.get(&coord).copied()
    }

    /// Pops one cell from the frontier and processes it.
    pub fn step(&mut self, maze: &mut Maze) -> SearchStep {
        let Some(current) = self.frontier.pop() else {
            return SearchStep::Exhausted;
        };
        let coord = current.coord;
        if !self.visited.insert(coord) {
            return SearchStep::Skipped(coord);
        }
        maze[coord].visited = true;
        let parent = self.parent(coord);

        if coord == self.goal {
            return SearchStep::Reached { coord, parent };
        }

        for (_, neighbor) in maze.open_neighbors(coord) {
            let is_new = neighbor != self.start
                && !self.visited.contains(&neighbor)
                && !self.parents.contains_key(&neighbor);
            if !is_new {
                continue;
            }
            self.parents.insert(neighbor, coord);
            self.frontier.push(FrontierEntry {
                coord: neighbor,
                steps: current.steps + 1,
            });
        }
        SearchStep::Expanded { coord, parent }
    }

    /// Walks the parent map back from `to` and returns the path from the entrance.
    /// Returns `None` if `to` was never discovered.
    pub fn path_to(&self, to: Coord) -> Option<Vec<Coord>> {
        let mut path = vec![to];
        let mut current = to;
        while current != self.start {
            current = self.parent(current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Solves the maze with the given strategy, animating every step on the render port.
///
/// The visited shading of the maze is cleared first, so a maze can be solved repeatedly.
pub fn solve(maze: &mut Maze, solver: Solver, port: &mut impl RenderPort) -> SearchOutcome {
    maze.clear_transient_state();
    let mut search = Search::new(maze, solver);
    tracing::debug!(
        "[solver] solving {}x{} maze with {}",
        maze.num_cols(),
        maze.num_rows(),
        solver
    );

    loop {
        let (coord, parent, reached) = match search.step(maze) {
            SearchStep::Skipped(_) => continue,
            SearchStep::Exhausted => {
                tracing::info!(
                    "[solver] {} exhausted the frontier after {} cells, no path",
                    solver,
                    search.visited_count()
                );
                return SearchOutcome::Exhausted;
            }
            SearchStep::Expanded { coord, parent } => (coord, parent, false),
            SearchStep::Reached { coord, parent } => (coord, parent, true),
        };

        port.draw_cell(&maze[coord]);
        if let Some(parent) = parent {
            port.draw_move(&maze[parent], &maze[coord], false);
        }
        let cancelled = port.refresh_frame().is_break();

        if reached {
            let path = match search.path_to(coord) {
                Some(path) => path,
                // The goal is only ever reached through recorded parents
                None => return SearchOutcome::Exhausted,
            };
            tracing::info!(
                "[solver] {} reached the goal after {} cells, path length {}",
                solver,
                search.visited_count(),
                path.len()
            );
            if !cancelled {
                trace_path(maze, &path, port);
            }
            return SearchOutcome::Found(path);
        }

        if cancelled {
            tracing::info!("[solver] search cancelled by render port");
            return SearchOutcome::Cancelled;
        }
    }
}

/// Parses `algorithm` and solves the maze with it. Unknown names are rejected before
/// anything is drawn.
pub fn solve_by_name(
    maze: &mut Maze,
    algorithm: &str,
    port: &mut impl RenderPort,
) -> Result<SearchOutcome, MazeError> {
    let solver = algorithm.parse::<Solver>()?;
    Ok(solve(maze, solver, port))
}

/// Draws the confirmed path backwards, from the exit to the entrance, one edge per frame.
fn trace_path(maze: &Maze, path: &[Coord], port: &mut impl RenderPort) {
    for edge in path.windows(2).rev() {
        let (parent, child) = (edge[0], edge[1]);
        port.draw_move(&maze[child], &maze[parent], true);
        if let ControlFlow::Break(()) = port.refresh_frame() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate, get_rng, tests::carve_in_order};
    use crate::maze::{Direction, MazeConfig};
    use crate::render::{DrawCall, NullPort, RecordingPort};

    fn assert_valid_path(maze: &Maze, path: &[Coord]) {
        assert_eq!(path.first(), Some(&maze.entrance()));
        assert_eq!(path.last(), Some(&maze.exit()));
        assert!(path.len() <= maze.num_cells());
        for edge in path.windows(2) {
            let direction = Direction::between(edge[0], edge[1]).expect("cells are adjacent");
            assert!(
                !maze[edge[0]].has_wall(direction),
                "path crosses a wall between {:?} and {:?}",
                edge[0],
                edge[1]
            );
        }
        let unique = path.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), path.len(), "path revisits a cell");
    }

    #[test]
    fn test_solver_names() {
        assert_eq!("dfs".parse::<Solver>(), Ok(Solver::Dfs));
        assert_eq!("Depth-First".parse::<Solver>(), Ok(Solver::Dfs));
        assert_eq!("breadth-first".parse::<Solver>(), Ok(Solver::Bfs));
        assert_eq!("A*".parse::<Solver>(), Ok(Solver::AStar));
        assert_eq!("a-star".parse::<Solver>(), Ok(Solver::AStar));
        for solver in Solver::ALL {
            assert_eq!(solver.name().parse::<Solver>(), Ok(solver));
        }
        assert_eq!(
            "dijkstra".parse::<Solver>(),
            Err(MazeError::UnsupportedAlgorithm("dijkstra".to_string()))
        );
    }

    #[test]
    fn test_all_solvers_solve_generated_mazes() {
        for (seed, (cols, rows)) in [(1, 1), (1, 6), (6, 1), (3, 3), (10, 7), (25, 25)]
            .into_iter()
            .enumerate()
        {
            for p in [0.0, 0.25] {
                let config = MazeConfig::new(cols, rows).with_wall_break_probability(p);
                let mut maze = generate(&config, &mut get_rng(Some(seed as u64))).unwrap();
                for solver in Solver::ALL {
                    let outcome = solve(&mut maze, solver, &mut NullPort);
                    let path = outcome.path().expect("generated mazes are solvable");
                    assert_valid_path(&maze, path);
                }
            }
        }
    }

    #[test]
    fn test_perfect_maze_has_one_path() {
        let config = MazeConfig::new(14, 9);
        let mut maze = generate(&config, &mut get_rng(Some(21))).unwrap();
        let paths = Solver::ALL.map(|solver| solve(&mut maze, solver, &mut NullPort));
        assert!(paths.iter().all(|p| p.goal_reached()));
        assert_eq!(paths[0], paths[1]);
        assert_eq!(paths[1], paths[2]);
    }

    #[test]
    fn test_bfs_finds_shortest_path_with_loops() {
        let config = MazeConfig::new(15, 15).with_wall_break_probability(0.5);
        let mut maze = generate(&config, &mut get_rng(Some(8))).unwrap();
        let length = |outcome: SearchOutcome| outcome.path().map(|p| p.len()).unwrap();
        let bfs = length(solve(&mut maze, Solver::Bfs, &mut NullPort));
        let dfs = length(solve(&mut maze, Solver::Dfs, &mut NullPort));
        let astar = length(solve(&mut maze, Solver::AStar, &mut NullPort));
        assert!(bfs <= dfs);
        assert!(bfs <= astar);
    }

    #[test]
    fn test_open_grid_shortest_path() {
        // No interior walls at all
        let config = MazeConfig::new(5, 4);
        let mut maze = Maze::new(&config).unwrap();
        maze.open_entrance_and_exit();
        for coord in maze.coords().collect::<Vec<_>>() {
            maze.carve(coord, Direction::Right);
            maze.carve(coord, Direction::Down);
        }
        let outcome = solve(&mut maze, Solver::Bfs, &mut NullPort);
        let path = outcome.path().unwrap();
        assert_valid_path(&maze, path);
        assert_eq!(path.len(), 4 + 3 + 1);

        let outcome = solve(&mut maze, Solver::AStar, &mut NullPort);
        assert_valid_path(&maze, outcome.path().unwrap());
    }

    #[test]
    fn test_disconnected_grid_is_unsolvable() {
        // Split a carved 4x4 maze into a left and a right half
        let config = MazeConfig::new(4, 4);
        let mut maze = generate(&config, &mut get_rng(Some(2))).unwrap();
        for row in 0..4 {
            maze.build_wall((1, row), Direction::Right);
        }
        for solver in Solver::ALL {
            let mut port = RecordingPort::default();
            let outcome = solve(&mut maze, solver, &mut port);
            assert_eq!(outcome, SearchOutcome::Exhausted, "{}", solver);
            assert!(port.confirmed_moves().is_empty());
            // Nothing right of the new wall was explored
            assert!(port.calls.iter().all(|c| match c {
                DrawCall::Cell { coord, .. } => coord.0 <= 1,
                _ => true,
            }));
        }
    }

    #[test]
    fn test_fully_walled_grid_is_unsolvable() {
        let mut maze = Maze::new(&MazeConfig::new(3, 3)).unwrap();
        maze.open_entrance_and_exit();
        for solver in Solver::ALL {
            let mut port = RecordingPort::default();
            assert!(!solve(&mut maze, solver, &mut port).goal_reached());
            assert_eq!(
                port.calls,
                vec![
                    DrawCall::Cell {
                        coord: (0, 0),
                        visited: true
                    },
                    DrawCall::Refresh
                ]
            );
        }
    }

    #[test]
    fn test_scripted_3x3_dfs_path() {
        let mut maze = carve_in_order(
            3,
            3,
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up],
        );
        let mut port = RecordingPort::default();
        let outcome = solve(&mut maze, Solver::Dfs, &mut port);
        // Tree distance from (0,0) to (2,2) is 4 passages
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
        );
        assert_eq!(
            port.confirmed_moves(),
            vec![
                ((2, 2), (2, 1)),
                ((2, 1), (2, 0)),
                ((2, 0), (1, 0)),
                ((1, 0), (0, 0)),
            ]
        );
        assert_eq!(
            port.frontier_moves(),
            vec![((0, 0), (1, 0)), ((1, 0), (2, 0)), ((2, 0), (2, 1)), ((2, 1), (2, 2))]
        );
    }

    #[test]
    fn test_unknown_algorithm_draws_nothing() {
        let mut maze = generate(&MazeConfig::new(4, 4), &mut get_rng(Some(0))).unwrap();
        let mut port = RecordingPort::default();
        let result = solve_by_name(&mut maze, "unknown", &mut port);
        assert_eq!(
            result,
            Err(MazeError::UnsupportedAlgorithm("unknown".to_string()))
        );
        assert!(port.calls.is_empty());

        let result = solve_by_name(&mut maze, "bfs", &mut port).unwrap();
        assert!(result.goal_reached());
        assert!(!port.calls.is_empty());
    }

    #[test]
    fn test_every_processed_cell_is_one_frame() {
        let mut maze = generate(&MazeConfig::new(6, 6), &mut get_rng(Some(4))).unwrap();
        let mut port = RecordingPort::default();
        let outcome = solve(&mut maze, Solver::Bfs, &mut port);
        let path = outcome.path().unwrap();
        let cells = port
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Cell { .. }))
            .count();
        // One frame per processed cell plus one per confirmed edge
        assert_eq!(port.frames(), cells + path.len() - 1);
        assert_eq!(port.confirmed_moves().len(), path.len() - 1);
        // Every processed cell except the entrance arrives with a frontier move
        assert_eq!(port.frontier_moves().len(), cells - 1);
        assert_eq!(maze.cells().filter(|c| c.visited).count(), cells);
    }

    #[test]
    fn test_cancellation_stops_the_search() {
        let mut maze = generate(&MazeConfig::new(20, 20), &mut get_rng(Some(6))).unwrap();
        let mut port = RecordingPort::stopping_after(3);
        let outcome = solve(&mut maze, Solver::Dfs, &mut port);
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(port.frames(), 3);
    }

    #[test]
    fn test_stop_on_goal_frame_still_finds_path() {
        let mut maze = carve_in_order(
            3,
            3,
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up],
        );
        // Five processed cells, the last one being the exit
        let mut port = RecordingPort::stopping_after(5);
        let outcome = solve(&mut maze, Solver::Dfs, &mut port);
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
        );
        assert!(port.confirmed_moves().is_empty());
        assert_eq!(port.frames(), 5);

        let mut maze = generate(&MazeConfig::new(1, 1), &mut get_rng(Some(0))).unwrap();
        let mut port = RecordingPort::stopping_after(1);
        let outcome = solve(&mut maze, Solver::Bfs, &mut port);
        assert_eq!(outcome, SearchOutcome::Found(vec![(0, 0)]));
        assert!(port.confirmed_moves().is_empty());
    }

    #[test]
    fn test_stop_while_tracing_path_still_finds_path() {
        let mut maze = carve_in_order(
            3,
            3,
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up],
        );
        // Five search frames, then two of the four path edges
        let mut port = RecordingPort::stopping_after(7);
        let outcome = solve(&mut maze, Solver::Dfs, &mut port);
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
        );
        assert_eq!(
            port.confirmed_moves(),
            vec![((2, 2), (2, 1)), ((2, 1), (2, 0))]
        );
        assert_eq!(port.frames(), 7);
    }

    #[test]
    fn test_repeated_solves_reset_shading() {
        let mut maze = generate(&MazeConfig::new(8, 8), &mut get_rng(Some(13))).unwrap();
        let first = solve(&mut maze, Solver::Dfs, &mut NullPort);
        let shaded_first = maze.cells().filter(|c| c.visited).count();
        let second = solve(&mut maze, Solver::Dfs, &mut NullPort);
        let shaded_second = maze.cells().filter(|c| c.visited).count();
        assert_eq!(first, second);
        assert_eq!(shaded_first, shaded_second);
    }

    #[test]
    fn test_search_steps() {
        let mut maze = carve_in_order(
            2,
            1,
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up],
        );
        let mut search = Search::new(&maze, Solver::Bfs);
        assert_eq!(
            search.step(&mut maze),
            SearchStep::Expanded {
                coord: (0, 0),
                parent: None
            }
        );
        assert_eq!(
            search.step(&mut maze),
            SearchStep::Reached {
                coord: (1, 0),
                parent: Some((0, 0))
            }
        );
        assert_eq!(search.path_to((1, 0)), Some(vec![(0, 0), (1, 0)]));
        assert_eq!(search.step(&mut maze), SearchStep::Exhausted);
    }
}
