use crate::cell::Cell;

/// Errors produced while building a [CostMap](crate::CostMap) or
/// [MovementPolicy](crate::MovementPolicy), or while running a search.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("cell {cell} lies outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("invalid policy: minimum streak before turn {min_streak_before_turn} with maximum streak {max_streak}")]
    InvalidPolicyParameters {
        min_streak_before_turn: u32,
        max_streak: u32,
    },

    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: Cell, to: Cell },

    #[error("no path found from {start} to {goal}")]
    NoPathFound { start: Cell, goal: Cell },

    #[error("pop on an empty priority queue")]
    EmptyQueue,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
