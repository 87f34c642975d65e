//! Structural mutations: growth, compaction, and coalescing.
//!
//! All three rebuild the slot matrix wholesale — an O(rows × cols) copy per
//! structural change. Placed cells live in the arena and are untouched by
//! the copy; only slot references move.

use super::{dim, from_index, to_u32, Grid, Slot};
use crate::error::{GridError, Result};
use crate::types::{Axis, Cell, Edge};

impl Grid {
    /// Add `count` rows or columns at the given edge.
    ///
    /// Existing contents keep their logical coordinates: growing at the top
    /// or left shifts `row0` / `col0` down by `count`, growing at the
    /// bottom or right extends `row_end` / `col_end`. New positions hold
    /// the default cell. Tags are keyed by logical index and are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if `count` is 0 and
    /// [`GridError::OutOfRange`] if the dimension would overflow.
    pub fn grow(&mut self, edge: Edge, count: u32) -> Result<()> {
        if count < 1 {
            return Err(GridError::InvalidArgument(
                "count must be greater than 0".into(),
            ));
        }

        let rows = self.row_number();
        let cols = self.col_number();
        let shift = dim(count);

        match edge {
            Edge::Top | Edge::Bottom => {
                let new_rows = rows.checked_add(count).ok_or_else(dimension_overflow)?;
                let slots = match edge {
                    Edge::Top => {
                        self.rebuilt_slots(new_rows, cols, |r, c| Some((r.checked_sub(shift)?, c)))
                    }
                    _ => self.rebuilt_slots(new_rows, cols, |r, c| {
                        (r < dim(rows)).then_some((r, c))
                    }),
                };
                self.replace_storage(slots, new_rows, cols);
                let row0 = match edge {
                    Edge::Top => self.row0() - i64::from(count),
                    _ => self.row0(),
                };
                self.set_row_range(row0);
            }
            Edge::Left | Edge::Right => {
                let new_cols = cols.checked_add(count).ok_or_else(dimension_overflow)?;
                let slots = match edge {
                    Edge::Left => {
                        self.rebuilt_slots(rows, new_cols, |r, c| Some((r, c.checked_sub(shift)?)))
                    }
                    _ => self.rebuilt_slots(rows, new_cols, |r, c| {
                        (c < dim(cols)).then_some((r, c))
                    }),
                };
                self.replace_storage(slots, rows, new_cols);
                let col0 = match edge {
                    Edge::Left => self.col0() - i64::from(count),
                    _ => self.col0(),
                };
                self.set_col_range(col0);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            edge = ?edge,
            count,
            rows = self.row_number(),
            cols = self.col_number(),
            "grid grown"
        );

        Ok(())
    }

    /// Remove consecutive fully-default rows or columns at the given edge.
    ///
    /// Tags attached to the removed rows/columns are dropped. Returns
    /// whether anything was removed; a boundary row/column holding at least
    /// one placed cell makes this a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Unsupported`] if the grid has no placed cells
    /// at all — compacting it would make it disappear.
    pub fn compact_edge(&mut self, edge: Edge) -> Result<bool> {
        self.refuse_if_empty()?;

        let rows = dim(self.row_number());
        let cols = dim(self.col_number());

        let count = match edge {
            Edge::Top => (0..rows).take_while(|&r| self.row_fully_default(r)).count(),
            Edge::Bottom => (0..rows)
                .rev()
                .take_while(|&r| self.row_fully_default(r))
                .count(),
            Edge::Left => (0..cols).take_while(|&c| self.col_fully_default(c)).count(),
            Edge::Right => (0..cols)
                .rev()
                .take_while(|&c| self.col_fully_default(c))
                .count(),
        };
        if count == 0 {
            return Ok(false);
        }

        match edge {
            Edge::Top => {
                let new_rows = to_u32(rows - count);
                let slots =
                    self.rebuilt_slots(new_rows, self.col_number(), |r, c| Some((r + count, c)));
                self.replace_storage(slots, new_rows, self.col_number());
                let row0 = self.row0();
                self.remove_tags_in_range(Axis::Row, row0, row0 + from_index(count));
                self.set_row_range(row0 + from_index(count));
            }
            Edge::Bottom => {
                let new_rows = to_u32(rows - count);
                let slots = self.rebuilt_slots(new_rows, self.col_number(), |r, c| Some((r, c)));
                self.replace_storage(slots, new_rows, self.col_number());
                let row_end = self.row_end();
                self.remove_tags_in_range(Axis::Row, row_end - from_index(count) + 1, row_end + 1);
                self.set_row_range(self.row0());
            }
            Edge::Left => {
                let new_cols = to_u32(cols - count);
                let slots =
                    self.rebuilt_slots(self.row_number(), new_cols, |r, c| Some((r, c + count)));
                self.replace_storage(slots, self.row_number(), new_cols);
                let col0 = self.col0();
                self.remove_tags_in_range(Axis::Column, col0, col0 + from_index(count));
                self.set_col_range(col0 + from_index(count));
            }
            Edge::Right => {
                let new_cols = to_u32(cols - count);
                let slots = self.rebuilt_slots(self.row_number(), new_cols, |r, c| Some((r, c)));
                self.replace_storage(slots, self.row_number(), new_cols);
                let col_end = self.col_end();
                self.remove_tags_in_range(
                    Axis::Column,
                    col_end - from_index(count) + 1,
                    col_end + 1,
                );
                self.set_col_range(self.col0());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(edge = ?edge, removed = count, "grid compacted at edge");

        Ok(true)
    }

    /// Remove every fully-default row or column along the given axis,
    /// boundary and interior alike — a superset of [`Grid::compact_edge`]
    /// on both edges of the axis.
    ///
    /// Tags on retained rows/columns are remapped to their new logical
    /// positions; tags on removed ones are dropped. Returns whether
    /// anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Unsupported`] if the grid has no placed cells,
    /// or if the compaction would retain nothing.
    pub fn compact_axis(&mut self, axis: Axis) -> Result<bool> {
        self.refuse_if_empty()?;

        let rows = dim(self.row_number());
        let cols = dim(self.col_number());

        let retained: Vec<usize> = match axis {
            Axis::Row => (0..rows).filter(|&r| !self.row_fully_default(r)).collect(),
            Axis::Column => (0..cols).filter(|&c| !self.col_fully_default(c)).collect(),
        };
        let Some(&first) = retained.first() else {
            return Err(GridError::Unsupported(
                "compaction would retain no rows or columns".into(),
            ));
        };

        let full = match axis {
            Axis::Row => retained.len() == rows,
            Axis::Column => retained.len() == cols,
        };
        if full {
            return Ok(false);
        }

        // Tags move with their row/column: the tag of retained index i
        // lands at the i-th logical position of the compacted grid.
        let origin = match axis {
            Axis::Row => self.row0(),
            Axis::Column => self.col0(),
        };
        let mut remapped = std::collections::HashMap::new();
        for (new_index, &old_index) in retained.iter().enumerate() {
            if let Some(tags) = self.tags_for(axis).get(&(from_index(old_index) + origin)) {
                remapped.insert(
                    from_index(new_index) + origin + from_index(first),
                    tags.clone(),
                );
            }
        }

        match axis {
            Axis::Row => {
                let new_rows = to_u32(retained.len());
                let slots = self.rebuilt_slots(new_rows, self.col_number(), |r, c| {
                    retained.get(r).map(|&old| (old, c))
                });
                self.replace_storage(slots, new_rows, self.col_number());
                *self.tags_for_mut(axis) = remapped;
                self.set_row_range(origin + from_index(first));
            }
            Axis::Column => {
                let new_cols = to_u32(retained.len());
                let slots = self.rebuilt_slots(self.row_number(), new_cols, |r, c| {
                    retained.get(c).map(|&old| (r, old))
                });
                self.replace_storage(slots, self.row_number(), new_cols);
                *self.tags_for_mut(axis) = remapped;
                self.set_col_range(origin + from_index(first));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(axis = ?axis, retained = retained.len(), "grid compacted along axis");

        Ok(true)
    }

    /// Remove empty rows and columns at all four boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Unsupported`] if the grid has no placed cells.
    pub fn compact_all(&mut self) -> Result<bool> {
        let mut changed = self.compact_edge(Edge::Left)?;
        changed |= self.compact_edge(Edge::Right)?;
        changed |= self.compact_edge(Edge::Top)?;
        changed |= self.compact_edge(Edge::Bottom)?;
        Ok(changed)
    }

    /// Replace each maximal run of consecutive default positions along the
    /// given axis with a single spanning cell.
    ///
    /// Coalescing along rows scans each row for runs of default positions
    /// and covers each with one `1 × run-length` cell (and symmetrically
    /// for columns), placed through the regular placement path. This
    /// reduces the number of cells needed to represent sparse regions.
    /// Returns whether any run was coalesced.
    ///
    /// # Errors
    ///
    /// Propagates placement errors; none are expected since replacement
    /// rectangles are in bounds and default by construction.
    pub fn coalesce(&mut self, axis: Axis) -> Result<bool> {
        let rows = dim(self.row_number());
        let cols = dim(self.col_number());
        let mut coalesced = false;

        match axis {
            Axis::Row => {
                for r in 0..rows {
                    let mut c = 0;
                    while c < cols {
                        if self.slot(r, c).cell.is_some() {
                            c += 1;
                            continue;
                        }
                        let run_start = c;
                        while c < cols && self.slot(r, c).cell.is_none() {
                            c += 1;
                        }
                        let cell = Cell::new(1, to_u32(c - run_start))?;
                        self.set_cell(
                            cell,
                            from_index(r) + self.row0(),
                            from_index(run_start) + self.col0(),
                        )?;
                        coalesced = true;
                    }
                }
            }
            Axis::Column => {
                for c in 0..cols {
                    let mut r = 0;
                    while r < rows {
                        if self.slot(r, c).cell.is_some() {
                            r += 1;
                            continue;
                        }
                        let run_start = r;
                        while r < rows && self.slot(r, c).cell.is_none() {
                            r += 1;
                        }
                        let cell = Cell::new(to_u32(r - run_start), 1)?;
                        self.set_cell(
                            cell,
                            from_index(run_start) + self.row0(),
                            from_index(c) + self.col0(),
                        )?;
                        coalesced = true;
                    }
                }
            }
        }

        Ok(coalesced)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn refuse_if_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(GridError::Unsupported(
                "the grid has no cells defined; compacting it would make it disappear".into(),
            ));
        }
        Ok(())
    }

    fn row_fully_default(&self, r: usize) -> bool {
        (0..dim(self.col_number())).all(|c| self.slot(r, c).cell.is_none())
    }

    fn col_fully_default(&self, c: usize) -> bool {
        (0..dim(self.row_number())).all(|r| self.slot(r, c).cell.is_none())
    }

    /// Build a fresh slot matrix of the given dimensions, pulling each new
    /// position from an old one via `source`; positions mapping to `None`
    /// become default slots.
    fn rebuilt_slots(
        &self,
        new_rows: u32,
        new_cols: u32,
        source: impl Fn(usize, usize) -> Option<(usize, usize)>,
    ) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(dim(new_rows) * dim(new_cols));
        for r in 0..dim(new_rows) {
            for c in 0..dim(new_cols) {
                let slot = source(r, c).map_or_else(Slot::default, |(or, oc)| self.slot(or, oc));
                slots.push(slot);
            }
        }
        slots
    }
}

fn dimension_overflow() -> GridError {
    GridError::OutOfRange("grid dimension overflow".into())
}
