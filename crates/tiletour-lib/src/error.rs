use thiserror::Error;

use crate::grid::Coord;

/// Convenient result alias for the tiletour library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a coordinate lies outside the loaded grid.
    #[error("coordinate {coord} is outside the {width}x{height} grid")]
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },

    /// Raised when grid text has ragged rows, non-digit cells, or no rows at all.
    #[error("malformed grid at row {row}: {reason}")]
    MalformedGrid { row: usize, reason: String },

    /// Raised when the grid contains a terrain class the cost table does not cover.
    #[error("terrain class {class} has no entry in the cost table")]
    UnmappedTerrainClass { class: u8 },

    /// Raised when a supplied cost table maps a class to a non-positive cost.
    #[error("terrain class {class} has invalid cost {cost}; traversal costs must be positive")]
    InvalidTerrainCost { class: u8, cost: u32 },

    /// Raised when extracting from an empty priority queue. Reaching a caller
    /// indicates a pathfinder or planner bug, not bad input.
    #[error("extract_min called on an empty queue")]
    EmptyQueue,

    /// Raised when no traversable route exists between two points.
    #[error("no traversable route from {from} to {to}")]
    NoPath { from: Coord, to: Coord },

    /// Raised when every remaining unvisited target is unreachable from the
    /// planner's current position.
    #[error("none of the {remaining} unvisited targets are reachable from {from}")]
    NoReachableTarget { from: Coord, remaining: usize },

    /// Raised when a summary is built from a plan with no legs.
    #[error("tour plan was empty")]
    EmptyTourPlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
