//! spangrid - a resizable 2D grid of spanning cells
//!
//! An in-process mutable grid structure for assembling table-shaped data
//! before handing it to a renderer:
//! - cells spanning multiple rows and columns, with overlap detection
//! - per-edge boundary policies (fixed, clipping, auto-grow)
//! - logical coordinates that may be negative and shift as the grid grows
//! - row/column compaction and default-run coalescing
//! - row/column tags that survive growth and follow compaction
//!
//! Renderers consume the grid purely through its read accessors
//! ([`Grid::cell_at`], [`Grid::is_visible`], [`Grid::is_default`],
//! [`Grid::extent`]); the crate defines no output format of its own.
//!
//! # Usage
//!
//! ```
//! use spangrid::{Axis, Cell, Edge, BoundaryPolicy, Grid};
//!
//! let mut grid = Grid::new(4, 4)?;
//! grid.set_boundary_policy(Edge::Right, BoundaryPolicy::Grow);
//!
//! let mut header = Cell::new(1, 6)?;
//! header.set_value(serde_json::json!("Report"))?;
//!
//! // The right edge grows by 2 columns to accommodate the span.
//! let placed = grid.set_cell(header, 0, 0)?.unwrap();
//! assert_eq!(placed.col_end, 5);
//! assert_eq!(grid.col_end(), 5);
//!
//! // Cover the remaining default positions with spanning filler cells.
//! grid.coalesce(Axis::Row)?;
//! # Ok::<(), spangrid::GridError>(())
//! ```

pub mod error;
pub mod grid;
pub mod types;

pub use error::{GridError, Result};
pub use grid::{Grid, DEFAULT_GRID_SIZE};
pub use types::*;
