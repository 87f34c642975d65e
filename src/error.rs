//! Structured error types for spangrid.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! raised before any state is mutated, so a failed call leaves the grid
//! exactly as it was.

/// All errors that can occur while mutating or querying a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A required argument was missing or out of its valid domain
    /// (zero span, zero count, empty tag name, null content value).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A logical coordinate fell outside the current extent, or a fixed
    /// boundary refused a placement that would have crossed it.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The requested rectangle overlaps an already-placed cell.
    /// Coordinates are logical.
    #[error("cell conflict at ({row}/{col}): position already covered by a cell")]
    Conflict { row: i64, col: i64 },

    /// The operation is not defined for the grid's current state
    /// (e.g. compacting a grid with no placed cells).
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
