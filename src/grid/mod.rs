//! The grid itself: a dynamically resizable 2D matrix of spanning cells.
//!
//! A grid has a logical row and column numbering that starts at `row0` /
//! `col0` in the upper left corner; logical indices may be negative and
//! shift as the grid grows or compacts from the top/left edge. Only offsets
//! from `row0` / `col0` index the underlying storage.
//!
//! # Storage
//!
//! Placed cells live in an arena ([`Vec<Cell>`]); the matrix itself is a
//! row-major vector of slots, each holding an optional arena index plus a
//! visibility flag. A slot with no arena index is the untouched "default
//! cell": a shared, immutable 1×1 empty sentinel that is only ever
//! overwritten, never mutated. A placed cell is referenced from every
//! position it covers; exactly the anchor (top-left) position is visible.
//!
//! # Invariants
//!
//! 1. A placed cell anchored at (r, c) with span (rs, cs) is referenced by
//!    every slot in `[r, r+rs-1] × [c, c+cs-1]`, all within bounds, with
//!    exactly the anchor visible.
//! 2. A cell's recorded span equals the number of slots it covers (spans
//!    are truncated in place when clipped).
//! 3. `row_end = row0 + row_number - 1`, `col_end = col0 + col_number - 1`.
//! 4. Row/column tags are keyed by logical index; compaction drops or
//!    remaps them, growth leaves them untouched.

mod placement;
mod resize;

use std::collections::HashMap;

use crate::error::{GridError, Result};
use crate::types::{Axis, BoundaryPolicy, Cell, Edge};

/// Initial extent used by [`Grid::default`].
pub const DEFAULT_GRID_SIZE: u32 = 50;

/// Index into the cell arena.
pub(crate) type CellId = usize;

/// One matrix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    /// Arena index of the covering cell; `None` means the default sentinel.
    pub(crate) cell: Option<CellId>,
    /// Anchor flag; default slots are all visible.
    pub(crate) visible: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            cell: None,
            visible: true,
        }
    }
}

/// Per-edge boundary policies. All edges default to [`BoundaryPolicy::Fixed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PolicyTable {
    top: BoundaryPolicy,
    bottom: BoundaryPolicy,
    left: BoundaryPolicy,
    right: BoundaryPolicy,
}

impl PolicyTable {
    fn get(&self, edge: Edge) -> BoundaryPolicy {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    fn set(&mut self, edge: Edge, policy: BoundaryPolicy) {
        match edge {
            Edge::Top => self.top = policy,
            Edge::Bottom => self.bottom = policy,
            Edge::Left => self.left = policy,
            Edge::Right => self.right = policy,
        }
    }

    fn set_all(&mut self, policy: BoundaryPolicy) {
        *self = Self {
            top: policy,
            bottom: policy,
            left: policy,
            right: policy,
        };
    }
}

/// Narrowing helper for storage offsets that have already been
/// bounds-checked against the matrix dimensions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[inline]
pub(crate) fn to_index(v: i64) -> usize {
    debug_assert!(v >= 0);
    v as usize
}

/// Widening helper for matrix dimensions.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub(crate) fn dim(v: u32) -> usize {
    v as usize
}

/// Storage offset back to signed coordinate space.
#[allow(clippy::cast_possible_wrap)]
#[inline]
pub(crate) fn from_index(v: usize) -> i64 {
    debug_assert!(i64::try_from(v).is_ok());
    v as i64
}

/// Narrowing helper for counts bounded by a matrix dimension.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub(crate) fn to_u32(v: usize) -> u32 {
    debug_assert!(u32::try_from(v).is_ok());
    v as u32
}

/// A dynamically resizable two-dimensional grid whose cells may span
/// multiple rows and columns.
///
/// # Example
///
/// ```
/// use spangrid::{Cell, Grid};
///
/// let mut grid = Grid::new(5, 5)?;
/// let placed = grid.set_cell(Cell::new(2, 2)?, 0, 0)?;
/// assert!(placed.is_some());
/// assert!(grid.is_visible(0, 0)?);
/// assert!(!grid.is_visible(1, 1)?);
/// # Ok::<(), spangrid::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    arena: Vec<Cell>,
    slots: Vec<Slot>,
    row_number: u32,
    col_number: u32,
    row0: i64,
    col0: i64,
    row_end: i64,
    col_end: i64,
    policies: PolicyTable,
    row_tags: HashMap<i64, HashMap<String, String>>,
    col_tags: HashMap<i64, HashMap<String, String>>,
    default_cell: Cell,
}

impl Default for Grid {
    /// A 50×50 grid at origin (0, 0) with fixed boundaries.
    fn default() -> Self {
        Self::unchecked(0, 0, DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl Grid {
    /// Create a grid with logical indices starting at (0, 0).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if either dimension is 0.
    pub fn new(row_number: u32, col_number: u32) -> Result<Self> {
        Self::with_origin(0, 0, row_number, col_number)
    }

    /// Create a grid whose logical indices start at (`row0`, `col0`) in the
    /// upper left corner.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if either dimension is 0.
    pub fn with_origin(row0: i64, col0: i64, row_number: u32, col_number: u32) -> Result<Self> {
        if row_number < 1 {
            return Err(GridError::InvalidArgument(
                "row_number must be larger than 0".into(),
            ));
        }
        if col_number < 1 {
            return Err(GridError::InvalidArgument(
                "col_number must be larger than 0".into(),
            ));
        }
        Ok(Self::unchecked(row0, col0, row_number, col_number))
    }

    /// Dimensions already validated (non-zero).
    fn unchecked(row0: i64, col0: i64, row_number: u32, col_number: u32) -> Self {
        Self {
            arena: Vec::new(),
            slots: vec![Slot::default(); dim(row_number) * dim(col_number)],
            row_number,
            col_number,
            row0,
            col0,
            row_end: row0 + i64::from(row_number) - 1,
            col_end: col0 + i64::from(col_number) - 1,
            policies: PolicyTable::default(),
            row_tags: HashMap::new(),
            col_tags: HashMap::new(),
            default_cell: Cell::default(),
        }
    }

    // ------------------------------------------------------------------
    // Extent
    // ------------------------------------------------------------------

    /// Logical index of the first row.
    #[inline]
    pub fn row0(&self) -> i64 {
        self.row0
    }

    /// Logical index of the first column.
    #[inline]
    pub fn col0(&self) -> i64 {
        self.col0
    }

    /// Logical index of the last row.
    #[inline]
    pub fn row_end(&self) -> i64 {
        self.row_end
    }

    /// Logical index of the last column.
    #[inline]
    pub fn col_end(&self) -> i64 {
        self.col_end
    }

    /// Number of rows.
    #[inline]
    pub fn row_number(&self) -> u32 {
        self.row_number
    }

    /// Number of columns.
    #[inline]
    pub fn col_number(&self) -> u32 {
        self.col_number
    }

    /// The current logical extent as `(row0, col0, row_end, col_end)`.
    pub fn extent(&self) -> (i64, i64, i64, i64) {
        (self.row0, self.col0, self.row_end, self.col_end)
    }

    /// True iff no position holds a placed cell.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.cell.is_none())
    }

    // ------------------------------------------------------------------
    // Boundary policies
    // ------------------------------------------------------------------

    /// The boundary policy configured at the given edge.
    pub fn boundary_policy(&self, edge: Edge) -> BoundaryPolicy {
        self.policies.get(edge)
    }

    /// Set the boundary policy at the given edge.
    pub fn set_boundary_policy(&mut self, edge: Edge, policy: BoundaryPolicy) {
        self.policies.set(edge, policy);
    }

    /// Enable fixed boundaries at all four edges.
    pub fn set_all_fixed(&mut self) {
        self.policies.set_all(BoundaryPolicy::Fixed);
    }

    /// Enable clipping at all four edges.
    pub fn set_all_clipping(&mut self) {
        self.policies.set_all(BoundaryPolicy::Clipping);
    }

    /// Enable auto-grow at all four edges.
    pub fn set_all_grow(&mut self) {
        self.policies.set_all(BoundaryPolicy::Grow);
    }

    // ------------------------------------------------------------------
    // Cell accessors
    // ------------------------------------------------------------------

    /// The cell at the given logical position.
    ///
    /// Positions not covered by a placed cell return the shared default
    /// cell (1×1, empty).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] outside the current extent.
    pub fn cell_at(&self, row: i64, col: i64) -> Result<&Cell> {
        let (r, c) = self.offsets(row, col)?;
        match self.slot(r, c).cell {
            Some(id) => Ok(self.arena.get(id).unwrap_or(&self.default_cell)),
            None => Ok(&self.default_cell),
        }
    }

    /// Mutable access to the placed cell at the given logical position.
    ///
    /// Returns `Ok(None)` for positions still holding the default cell;
    /// the sentinel is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] outside the current extent.
    pub fn cell_at_mut(&mut self, row: i64, col: i64) -> Result<Option<&mut Cell>> {
        let (r, c) = self.offsets(row, col)?;
        match self.slot(r, c).cell {
            Some(id) => Ok(self.arena.get_mut(id)),
            None => Ok(None),
        }
    }

    /// Whether the given logical position is the anchor of its cell (or an
    /// untouched default position).
    ///
    /// Positions covered by a spanning cell but not its anchor are
    /// invisible; renderers skip them.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] outside the current extent.
    pub fn is_visible(&self, row: i64, col: i64) -> Result<bool> {
        let (r, c) = self.offsets(row, col)?;
        Ok(self.slot(r, c).visible)
    }

    /// Whether the given logical position still holds the default cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] outside the current extent.
    pub fn is_default(&self, row: i64, col: i64) -> Result<bool> {
        let (r, c) = self.offsets(row, col)?;
        Ok(self.slot(r, c).cell.is_none())
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    /// Attach a string-keyed tag with a value to an entire logical row or
    /// column. Tags survive growth; compaction drops or remaps them along
    /// with their row/column.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if the name is empty and
    /// [`GridError::OutOfRange`] if the index is outside the current extent.
    pub fn add_tag(
        &mut self,
        axis: Axis,
        logical_index: i64,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(GridError::InvalidArgument(
                "tag name may not be empty".into(),
            ));
        }
        self.check_logical_index(axis, logical_index)?;
        self.tags_for_mut(axis)
            .entry(logical_index)
            .or_default()
            .insert(name, value.into());
        Ok(())
    }

    /// Attach an empty-valued tag; effectively a marker.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::add_tag`].
    pub fn add_marker_tag(
        &mut self,
        axis: Axis,
        logical_index: i64,
        name: impl Into<String>,
    ) -> Result<()> {
        self.add_tag(axis, logical_index, name, "")
    }

    /// Check for the presence of a tag.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if the index is outside the
    /// current extent.
    pub fn has_tag(&self, axis: Axis, logical_index: i64, name: &str) -> Result<bool> {
        self.check_logical_index(axis, logical_index)?;
        Ok(self
            .tags_for(axis)
            .get(&logical_index)
            .is_some_and(|tags| tags.contains_key(name)))
    }

    /// The value of a tag, or `None` if it is not present.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if the index is outside the
    /// current extent.
    pub fn tag(&self, axis: Axis, logical_index: i64, name: &str) -> Result<Option<&str>> {
        self.check_logical_index(axis, logical_index)?;
        Ok(self
            .tags_for(axis)
            .get(&logical_index)
            .and_then(|tags| tags.get(name))
            .map(String::as_str))
    }

    // ------------------------------------------------------------------
    // Overlay
    // ------------------------------------------------------------------

    /// Place every visible placed cell of `other` into this grid, with the
    /// anchor translated by (`row_offset`, `col_offset`). Cells are cloned;
    /// placements obey this grid's boundary policies.
    ///
    /// # Errors
    ///
    /// Propagates any placement error; earlier placements of the overlay
    /// remain applied.
    pub fn add_grid(&mut self, other: &Grid, row_offset: i64, col_offset: i64) -> Result<()> {
        for row in other.row0..=other.row_end {
            for col in other.col0..=other.col_end {
                if !other.is_default(row, col)? && other.is_visible(row, col)? {
                    let cell = other.cell_at(row, col)?.clone();
                    self.set_cell(cell, row + row_offset, col + col_offset)?;
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internal storage helpers
    // ------------------------------------------------------------------

    /// Translate logical coordinates into storage offsets, validating
    /// against the current extent.
    pub(crate) fn offsets(&self, row: i64, col: i64) -> Result<(usize, usize)> {
        let r = row - self.row0;
        let c = col - self.col0;
        if r < 0 || r >= i64::from(self.row_number) {
            return Err(GridError::OutOfRange(format!(
                "row must be between {} and {}",
                self.row0, self.row_end
            )));
        }
        if c < 0 || c >= i64::from(self.col_number) {
            return Err(GridError::OutOfRange(format!(
                "col must be between {} and {}",
                self.col0, self.col_end
            )));
        }
        Ok((to_index(r), to_index(c)))
    }

    #[inline]
    pub(crate) fn slot_index(&self, r: usize, c: usize) -> usize {
        r * dim(self.col_number) + c
    }

    /// The slot at a storage offset; out-of-bounds reads yield a default
    /// slot (callers bounds-check first).
    #[inline]
    pub(crate) fn slot(&self, r: usize, c: usize) -> Slot {
        let idx = self.slot_index(r, c);
        self.slots.get(idx).copied().unwrap_or_default()
    }

    pub(crate) fn set_slot(&mut self, r: usize, c: usize, slot: Slot) {
        let idx = self.slot_index(r, c);
        if let Some(stored) = self.slots.get_mut(idx) {
            *stored = slot;
        }
    }

    pub(crate) fn arena_push(&mut self, cell: Cell) -> CellId {
        self.arena.push(cell);
        self.arena.len() - 1
    }

    /// Replace the slot matrix and dimensions wholesale. Used by growth and
    /// compaction, which rebuild the matrix.
    pub(crate) fn replace_storage(&mut self, slots: Vec<Slot>, row_number: u32, col_number: u32) {
        debug_assert_eq!(slots.len(), dim(row_number) * dim(col_number));
        self.slots = slots;
        self.row_number = row_number;
        self.col_number = col_number;
    }

    /// Shift the logical origin/end bookkeeping after a structural change.
    pub(crate) fn set_row_range(&mut self, row0: i64) {
        self.row0 = row0;
        self.row_end = row0 + i64::from(self.row_number) - 1;
    }

    pub(crate) fn set_col_range(&mut self, col0: i64) {
        self.col0 = col0;
        self.col_end = col0 + i64::from(self.col_number) - 1;
    }

    fn check_logical_index(&self, axis: Axis, logical_index: i64) -> Result<()> {
        match axis {
            Axis::Row => {
                let r = logical_index - self.row0;
                if r < 0 || r >= i64::from(self.row_number) {
                    return Err(GridError::OutOfRange(format!(
                        "row must be between {} and {}",
                        self.row0, self.row_end
                    )));
                }
            }
            Axis::Column => {
                let c = logical_index - self.col0;
                if c < 0 || c >= i64::from(self.col_number) {
                    return Err(GridError::OutOfRange(format!(
                        "col must be between {} and {}",
                        self.col0, self.col_end
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn tags_for(&self, axis: Axis) -> &HashMap<i64, HashMap<String, String>> {
        match axis {
            Axis::Row => &self.row_tags,
            Axis::Column => &self.col_tags,
        }
    }

    pub(crate) fn tags_for_mut(&mut self, axis: Axis) -> &mut HashMap<i64, HashMap<String, String>> {
        match axis {
            Axis::Row => &mut self.row_tags,
            Axis::Column => &mut self.col_tags,
        }
    }

    /// Drop all tags whose logical index lies in `[start, end)`.
    pub(crate) fn remove_tags_in_range(&mut self, axis: Axis, start: i64, end: i64) {
        self.tags_for_mut(axis)
            .retain(|&index, _| index < start || index >= end);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_dimensions() {
        assert!(Grid::new(0, 5).is_err());
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn default_grid_extent() {
        let grid = Grid::default();
        assert_eq!(grid.extent(), (0, 0, 49, 49));
        assert!(grid.is_empty());
    }

    #[test]
    fn negative_origin_extent_bookkeeping() {
        let grid = Grid::with_origin(-3, -2, 6, 4).unwrap();
        assert_eq!(grid.row0(), -3);
        assert_eq!(grid.row_end(), 2);
        assert_eq!(grid.col0(), -2);
        assert_eq!(grid.col_end(), 1);
        assert!(grid.is_default(-3, -2).unwrap());
        assert!(grid.cell_at(3, 0).is_err());
    }

    #[test]
    fn default_positions_are_visible_defaults() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(grid.is_visible(1, 1).unwrap());
        assert!(grid.is_default(1, 1).unwrap());
        assert_eq!(grid.cell_at(1, 1).unwrap().row_span(), 1);
    }

    #[test]
    fn policies_default_to_fixed() {
        let mut grid = Grid::new(2, 2).unwrap();
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            assert_eq!(grid.boundary_policy(edge), BoundaryPolicy::Fixed);
        }
        grid.set_all_grow();
        assert_eq!(grid.boundary_policy(Edge::Left), BoundaryPolicy::Grow);
        grid.set_boundary_policy(Edge::Top, BoundaryPolicy::Clipping);
        assert_eq!(grid.boundary_policy(Edge::Top), BoundaryPolicy::Clipping);
        assert_eq!(grid.boundary_policy(Edge::Bottom), BoundaryPolicy::Grow);
    }

    #[test]
    fn cell_at_mut_edits_placed_cells_only() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell(Cell::new(2, 2).unwrap(), 0, 0).unwrap();

        let cell = grid.cell_at_mut(1, 1).unwrap().unwrap();
        cell.set_value(serde_json::json!(7)).unwrap();
        assert_eq!(grid.cell_at(0, 0).unwrap().value(), Some(&serde_json::json!(7)));

        // The default sentinel cannot be edited in place.
        assert!(grid.cell_at_mut(2, 2).unwrap().is_none());
    }

    #[test]
    fn tags_round_trip() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_tag(Axis::Row, 1, "header", "main").unwrap();
        grid.add_marker_tag(Axis::Column, 2, "totals").unwrap();

        assert!(grid.has_tag(Axis::Row, 1, "header").unwrap());
        assert_eq!(grid.tag(Axis::Row, 1, "header").unwrap(), Some("main"));
        assert_eq!(grid.tag(Axis::Column, 2, "totals").unwrap(), Some(""));
        assert!(!grid.has_tag(Axis::Row, 0, "header").unwrap());
        assert!(grid.add_tag(Axis::Row, 7, "x", "y").is_err());
        assert!(grid.add_tag(Axis::Row, 1, "", "y").is_err());
    }
}
