use serde::{Deserialize, Serialize};

/// One of the four boundaries of a grid.
///
/// Growth and edge compaction operate on a single edge; boundary policies
/// are configured per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// An axis of the grid, used for compaction, coalescing, and tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Row,
    Column,
}

/// What happens when a placement request extends past an edge.
///
/// The default on all four edges is [`BoundaryPolicy::Fixed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryPolicy {
    /// Any placement outside the predefined extent is rejected with an
    /// out-of-range error.
    #[default]
    Fixed,
    /// Cells are truncated to the current extent when necessary. A cell
    /// that falls entirely outside is silently dropped.
    Clipping,
    /// The grid grows as needed to accommodate the cell.
    Grow,
}

/// Where a cell actually landed after a successful [`Grid::set_cell`].
///
/// When clipping is active the anchor and end coordinates may differ from
/// the requested location, and `modified` reports whether the cell's spans
/// were truncated in the process.
///
/// [`Grid::set_cell`]: crate::Grid::set_cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Logical row of the anchor position after resolution.
    pub row: i64,
    /// Logical column of the anchor position after resolution.
    pub col: i64,
    /// Logical row of the last covered position.
    pub row_end: i64,
    /// Logical column of the last covered position.
    pub col_end: i64,
    /// True iff the cell's row and/or column span was truncated.
    pub modified: bool,
}

/// Result of a side-effect-free placement probe ([`Grid::can_set_cell`]).
///
/// [`Grid::can_set_cell`]: crate::Grid::can_set_cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanPlace {
    /// The cell cannot be placed as requested.
    No,
    /// The cell could technically be placed, but clipping would remove it
    /// entirely.
    FullyClipped,
    /// The cell can be placed as requested.
    Yes,
}
