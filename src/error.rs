use std::fmt;

/// Errors raised while configuring a maze or selecting a solver.
///
/// Both variants are reported before any carving or searching starts, so a caller never
/// observes a half-built maze.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// Non-positive dimensions or an out-of-range wall-break probability.
    InvalidConfiguration(String),
    /// A solver name that is not one of the supported strategies.
    UnsupportedAlgorithm(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidConfiguration(reason) => {
                write!(f, "invalid maze configuration: {}", reason)
            }
            MazeError::UnsupportedAlgorithm(name) => write!(
                f,
                "unsupported solving algorithm '{}' (expected one of: dfs, bfs, astar)",
                name
            ),
        }
    }
}

impl std::error::Error for MazeError {}
