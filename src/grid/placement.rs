//! Cell placement: six-case-per-axis boundary resolution.
//!
//! A placement request is classified independently per axis against the
//! matrix bounds `[0, len-1]` (offsets relative to the current origin):
//!
//! 1. entirely before the near edge,
//! 2. starting before the near edge, ending in bounds,
//! 3. overhanging both edges,
//! 4. entirely in bounds,
//! 5. starting in bounds, overflowing the far edge,
//! 6. entirely beyond the far edge.
//!
//! Each edge's configured [`BoundaryPolicy`] then decides the outcome:
//! `Fixed` rejects, `Clipping` truncates (dropping the cell entirely in
//! cases 1 and 6), `Grow` extends the grid by the exact deficit.
//!
//! The classification is pure: it reports the resolved extent and required
//! growth without touching the grid, so [`Grid::set_cell`] and
//! [`Grid::can_set_cell`] share one decision path and differ only in
//! whether they apply the result.

use super::{to_index, Grid, Slot};
use crate::error::{GridError, Result};
use crate::types::{BoundaryPolicy, CanPlace, Cell, Edge, Placement};

/// Resolved extent of a cell along one axis, in storage offsets of the
/// matrix *after* any required growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisFit {
    start: i64,
    end: i64,
    /// Rows/columns to add at the near (top/left) edge before filling.
    grow_near: u32,
    /// Rows/columns to add at the far (bottom/right) edge before filling.
    grow_far: u32,
    /// True iff clipping reduced the span along this axis.
    truncated: bool,
}

impl AxisFit {
    fn fitting(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            grow_near: 0,
            grow_far: 0,
            truncated: false,
        }
    }

    fn span(&self) -> u32 {
        debug_assert!(self.end >= self.start);
        u32::try_from(self.end - self.start + 1).unwrap_or(1)
    }

    /// The resolved extent translated back to pre-growth offsets and
    /// clamped to the current bounds: the only positions where an existing
    /// cell could conflict. `None` when the covered rectangle lies entirely
    /// in newly grown territory.
    fn preexisting_range(&self, len: u32) -> Option<(i64, i64)> {
        let shift = i64::from(self.grow_near);
        let lo = (self.start - shift).max(0);
        let hi = (self.end - shift).min(i64::from(len) - 1);
        (lo <= hi).then_some((lo, hi))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisOutcome {
    Fit(AxisFit),
    /// Clipping removed the cell entirely (cases 1 and 6).
    FullyClipped,
}

/// Error-message context for one axis.
#[derive(Clone, Copy)]
struct AxisLabel {
    /// "row" or "col".
    word: &'static str,
    /// Logical index of the first row/column.
    origin: i64,
}

impl AxisLabel {
    fn outside(&self) -> GridError {
        GridError::OutOfRange(format!(
            "cell lies completely outside of the grid ({} axis)",
            self.word
        ))
    }

    fn too_many(&self, span: u32, len: u32) -> GridError {
        GridError::OutOfRange(format!(
            "cell has too many {}s ({}); maximum is {}",
            self.word, span, len
        ))
    }

    fn between(&self, span: u32, len: u32) -> GridError {
        GridError::OutOfRange(format!(
            "{} must be between {} and {}",
            self.word,
            self.origin,
            self.origin + i64::from(len) - i64::from(span)
        ))
    }
}

fn growth(deficit: i64) -> Result<u32> {
    debug_assert!(deficit > 0);
    u32::try_from(deficit).map_err(|_| {
        GridError::OutOfRange(format!(
            "required growth of {deficit} rows/columns exceeds the supported grid size"
        ))
    })
}

/// Classify one axis of a placement request and resolve it against the
/// near- and far-edge policies.
fn resolve_axis(
    start: i64,
    span: u32,
    len: u32,
    near: BoundaryPolicy,
    far: BoundaryPolicy,
    label: AxisLabel,
) -> Result<AxisOutcome> {
    let len_i = i64::from(len);
    let span_i = i64::from(span);
    let end = start + span_i - 1;

    if end < 0 {
        // Case 1: entirely before the near edge.
        match near {
            BoundaryPolicy::Fixed => Err(label.outside()),
            BoundaryPolicy::Clipping => Ok(AxisOutcome::FullyClipped),
            BoundaryPolicy::Grow => {
                let mut fit = AxisFit::fitting(0, span_i - 1);
                fit.grow_near = growth(-start)?;
                Ok(AxisOutcome::Fit(fit))
            }
        }
    } else if start < 0 {
        if end < len_i {
            // Case 2: overhangs the near edge only.
            match near {
                BoundaryPolicy::Fixed => Err(if span > len {
                    label.too_many(span, len)
                } else {
                    label.between(span, len)
                }),
                BoundaryPolicy::Clipping => {
                    let mut fit = AxisFit::fitting(0, end);
                    fit.truncated = true;
                    Ok(AxisOutcome::Fit(fit))
                }
                BoundaryPolicy::Grow => {
                    let mut fit = AxisFit::fitting(0, span_i - 1);
                    fit.grow_near = growth(-start)?;
                    Ok(AxisOutcome::Fit(fit))
                }
            }
        } else {
            // Case 3: overhangs both edges. Resolve the near edge first,
            // then the far edge against the (possibly grown) length.
            let mut fit = AxisFit::fitting(start, end);
            let mut len_now = len_i;
            match near {
                BoundaryPolicy::Fixed => return Err(label.too_many(span, len)),
                BoundaryPolicy::Clipping => {
                    fit.start = 0;
                    fit.truncated = true;
                }
                BoundaryPolicy::Grow => {
                    fit.grow_near = growth(-start)?;
                    len_now += i64::from(fit.grow_near);
                    fit.start = 0;
                    fit.end = span_i - 1;
                }
            }
            if fit.end >= len_now {
                match far {
                    BoundaryPolicy::Fixed => return Err(label.too_many(span, len)),
                    BoundaryPolicy::Clipping => {
                        fit.end = len_now - 1;
                        fit.truncated = true;
                    }
                    BoundaryPolicy::Grow => {
                        fit.grow_far = growth(fit.end - len_now + 1)?;
                    }
                }
            }
            Ok(AxisOutcome::Fit(fit))
        }
    } else if start < len_i {
        if end < len_i {
            // Case 4: no edge interaction.
            Ok(AxisOutcome::Fit(AxisFit::fitting(start, end)))
        } else {
            // Case 5: overflows the far edge only.
            match far {
                BoundaryPolicy::Fixed => Err(if span > len {
                    label.too_many(span, len)
                } else {
                    label.between(span, len)
                }),
                BoundaryPolicy::Clipping => {
                    let mut fit = AxisFit::fitting(start, len_i - 1);
                    fit.truncated = true;
                    Ok(AxisOutcome::Fit(fit))
                }
                BoundaryPolicy::Grow => {
                    let mut fit = AxisFit::fitting(start, end);
                    fit.grow_far = growth(end - len_i + 1)?;
                    Ok(AxisOutcome::Fit(fit))
                }
            }
        }
    } else {
        // Case 6: entirely beyond the far edge.
        match far {
            BoundaryPolicy::Fixed => Err(label.outside()),
            BoundaryPolicy::Clipping => Ok(AxisOutcome::FullyClipped),
            BoundaryPolicy::Grow => {
                let mut fit = AxisFit::fitting(start, end);
                fit.grow_far = growth(end - len_i + 1)?;
                Ok(AxisOutcome::Fit(fit))
            }
        }
    }
}

impl Grid {
    /// Insert a cell at the given logical anchor.
    ///
    /// The request is resolved per axis against the edge policies (see the
    /// module docs for the case matrix), after which the covered rectangle
    /// is checked for conflicts with already-placed cells. On success every
    /// covered position references the cell, with only the anchor visible,
    /// and the returned [`Placement`] reports where the cell actually
    /// landed — which may differ from the request when clipping shifted or
    /// truncated it.
    ///
    /// Returns `Ok(None)` when clipping removed the cell entirely; the grid
    /// is unchanged and the cell is dropped.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] when a fixed boundary refuses the request,
    /// [`GridError::Conflict`] when the rectangle overlaps a placed cell.
    /// Either way the grid is left untouched.
    pub fn set_cell(&mut self, mut cell: Cell, row: i64, col: i64) -> Result<Option<Placement>> {
        let row_fit = match self.resolve_rows(&cell, row)? {
            AxisOutcome::FullyClipped => return Ok(None),
            AxisOutcome::Fit(fit) => fit,
        };
        let col_fit = match self.resolve_cols(&cell, col)? {
            AxisOutcome::FullyClipped => return Ok(None),
            AxisOutcome::Fit(fit) => fit,
        };

        // Conflicts are detected after policy resolution but before any
        // growth is applied, so a refused placement leaves the grid
        // untouched.
        self.check_conflicts(row_fit, col_fit)?;

        if row_fit.grow_near > 0 {
            self.grow(Edge::Top, row_fit.grow_near)?;
        }
        if row_fit.grow_far > 0 {
            self.grow(Edge::Bottom, row_fit.grow_far)?;
        }
        if col_fit.grow_near > 0 {
            self.grow(Edge::Left, col_fit.grow_near)?;
        }
        if col_fit.grow_far > 0 {
            self.grow(Edge::Right, col_fit.grow_far)?;
        }

        let modified = row_fit.truncated || col_fit.truncated;
        if modified {
            cell.set_row_span(row_fit.span());
            cell.set_col_span(col_fit.span());
        }

        let id = self.arena_push(cell);
        for r in row_fit.start..=row_fit.end {
            for c in col_fit.start..=col_fit.end {
                self.set_slot(
                    to_index(r),
                    to_index(c),
                    Slot {
                        cell: Some(id),
                        visible: false,
                    },
                );
            }
        }
        // Only the anchor remains visible; all other covered positions are
        // hidden.
        self.set_slot(
            to_index(row_fit.start),
            to_index(col_fit.start),
            Slot {
                cell: Some(id),
                visible: true,
            },
        );

        let placement = Placement {
            row: row_fit.start + self.row0(),
            col: col_fit.start + self.col0(),
            row_end: row_fit.end + self.row0(),
            col_end: col_fit.end + self.col0(),
            modified,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            row = placement.row,
            col = placement.col,
            row_end = placement.row_end,
            col_end = placement.col_end,
            modified = placement.modified,
            "cell placed"
        );

        Ok(Some(placement))
    }

    /// Probe whether a cell could be placed at the given anchor, without
    /// mutating the grid.
    ///
    /// Runs the same per-axis policy resolution and conflict scan as
    /// [`Grid::set_cell`] and reports the outcome as a [`CanPlace`].
    pub fn can_set_cell(&self, cell: &Cell, row: i64, col: i64) -> CanPlace {
        let row_fit = match self.resolve_rows(cell, row) {
            Err(_) => return CanPlace::No,
            Ok(AxisOutcome::FullyClipped) => return CanPlace::FullyClipped,
            Ok(AxisOutcome::Fit(fit)) => fit,
        };
        let col_fit = match self.resolve_cols(cell, col) {
            Err(_) => return CanPlace::No,
            Ok(AxisOutcome::FullyClipped) => return CanPlace::FullyClipped,
            Ok(AxisOutcome::Fit(fit)) => fit,
        };
        if self.check_conflicts(row_fit, col_fit).is_err() {
            CanPlace::No
        } else {
            CanPlace::Yes
        }
    }

    fn resolve_rows(&self, cell: &Cell, row: i64) -> Result<AxisOutcome> {
        resolve_axis(
            row - self.row0(),
            cell.row_span(),
            self.row_number(),
            self.boundary_policy(Edge::Top),
            self.boundary_policy(Edge::Bottom),
            AxisLabel {
                word: "row",
                origin: self.row0(),
            },
        )
    }

    fn resolve_cols(&self, cell: &Cell, col: i64) -> Result<AxisOutcome> {
        resolve_axis(
            col - self.col0(),
            cell.col_span(),
            self.col_number(),
            self.boundary_policy(Edge::Left),
            self.boundary_policy(Edge::Right),
            AxisLabel {
                word: "col",
                origin: self.col0(),
            },
        )
    }

    /// Scan the part of the resolved rectangle that overlaps the current
    /// matrix for already-placed cells.
    fn check_conflicts(&self, row_fit: AxisFit, col_fit: AxisFit) -> Result<()> {
        let Some((r_lo, r_hi)) = row_fit.preexisting_range(self.row_number()) else {
            return Ok(());
        };
        let Some((c_lo, c_hi)) = col_fit.preexisting_range(self.col_number()) else {
            return Ok(());
        };
        for r in r_lo..=r_hi {
            for c in c_lo..=c_hi {
                if self.slot(to_index(r), to_index(c)).cell.is_some() {
                    return Err(GridError::Conflict {
                        row: r + self.row0(),
                        col: c + self.col0(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    const FIXED: BoundaryPolicy = BoundaryPolicy::Fixed;
    const CLIP: BoundaryPolicy = BoundaryPolicy::Clipping;
    const GROW: BoundaryPolicy = BoundaryPolicy::Grow;

    const LABEL: AxisLabel = AxisLabel {
        word: "row",
        origin: 0,
    };

    fn fit(outcome: Result<AxisOutcome>) -> AxisFit {
        match outcome.unwrap() {
            AxisOutcome::Fit(fit) => fit,
            AxisOutcome::FullyClipped => panic!("expected a fit"),
        }
    }

    // Case 1: span entirely before the near edge (start -5, span 2, len 10).
    #[test]
    fn case1_fixed_rejects() {
        assert!(resolve_axis(-5, 2, 10, FIXED, FIXED, LABEL).is_err());
    }

    #[test]
    fn case1_clipping_removes_cell() {
        let outcome = resolve_axis(-5, 2, 10, CLIP, CLIP, LABEL).unwrap();
        assert_eq!(outcome, AxisOutcome::FullyClipped);
    }

    #[test]
    fn case1_grow_extends_near_edge() {
        let fit = fit(resolve_axis(-5, 2, 10, GROW, GROW, LABEL));
        assert_eq!((fit.start, fit.end), (0, 1));
        assert_eq!(fit.grow_near, 5);
        assert_eq!(fit.grow_far, 0);
        assert!(!fit.truncated);
    }

    // Case 2: overhangs the near edge (start -2, span 4, len 10).
    #[test]
    fn case2_clipping_truncates_at_near_edge() {
        let fit = fit(resolve_axis(-2, 4, 10, CLIP, CLIP, LABEL));
        assert_eq!((fit.start, fit.end), (0, 1));
        assert!(fit.truncated);
    }

    #[test]
    fn case2_grow_shifts_whole_cell_into_view() {
        let fit = fit(resolve_axis(-2, 4, 10, GROW, GROW, LABEL));
        assert_eq!((fit.start, fit.end), (0, 3));
        assert_eq!(fit.grow_near, 2);
        assert!(!fit.truncated);
    }

    // Case 3: overhangs both edges (start -2, span 8, len 4).
    #[test]
    fn case3_fixed_rejects() {
        assert!(resolve_axis(-2, 8, 4, FIXED, GROW, LABEL).is_err());
        assert!(resolve_axis(-2, 8, 4, CLIP, FIXED, LABEL).is_err());
    }

    #[test]
    fn case3_clipping_both_edges_keeps_current_extent() {
        let fit = fit(resolve_axis(-2, 8, 4, CLIP, CLIP, LABEL));
        assert_eq!((fit.start, fit.end), (0, 3));
        assert!(fit.truncated);
        assert_eq!((fit.grow_near, fit.grow_far), (0, 0));
    }

    #[test]
    fn case3_grow_both_edges() {
        let fit = fit(resolve_axis(-2, 8, 4, GROW, GROW, LABEL));
        assert_eq!((fit.start, fit.end), (0, 7));
        // Near growth covers the overhang of 2; span 8 in a grown length
        // of 6 still needs 2 more at the far edge.
        assert_eq!(fit.grow_near, 2);
        assert_eq!(fit.grow_far, 2);
        assert!(!fit.truncated);
    }

    #[test]
    fn case3_grow_near_clip_far() {
        let fit = fit(resolve_axis(-2, 8, 4, GROW, CLIP, LABEL));
        assert_eq!(fit.grow_near, 2);
        assert_eq!(fit.grow_far, 0);
        assert_eq!((fit.start, fit.end), (0, 5));
        assert!(fit.truncated);
    }

    // Case 4: fits with no edge interaction; policy is irrelevant.
    #[test_case(FIXED; "fixed")]
    #[test_case(CLIP; "clipping")]
    #[test_case(GROW; "grow")]
    fn case4_always_fits(policy: BoundaryPolicy) {
        let fit = fit(resolve_axis(3, 4, 10, policy, policy, LABEL));
        assert_eq!((fit.start, fit.end), (3, 6));
        assert!(!fit.truncated);
        assert_eq!((fit.grow_near, fit.grow_far), (0, 0));
    }

    // Case 5: overflows the far edge (start 2, span 4, len 4).
    #[test]
    fn case5_fixed_rejects() {
        assert!(resolve_axis(2, 4, 4, FIXED, FIXED, LABEL).is_err());
    }

    #[test]
    fn case5_clipping_truncates_at_far_edge() {
        let fit = fit(resolve_axis(2, 4, 4, CLIP, CLIP, LABEL));
        assert_eq!((fit.start, fit.end), (2, 3));
        assert!(fit.truncated);
    }

    #[test]
    fn case5_grow_extends_far_edge() {
        let fit = fit(resolve_axis(2, 4, 4, GROW, GROW, LABEL));
        assert_eq!((fit.start, fit.end), (2, 5));
        assert_eq!(fit.grow_far, 2);
        assert!(!fit.truncated);
    }

    // Case 6: entirely beyond the far edge (start 7, span 2, len 4).
    #[test]
    fn case6_fixed_rejects() {
        assert!(resolve_axis(7, 2, 4, FIXED, FIXED, LABEL).is_err());
    }

    #[test]
    fn case6_clipping_removes_cell() {
        let outcome = resolve_axis(7, 2, 4, CLIP, CLIP, LABEL).unwrap();
        assert_eq!(outcome, AxisOutcome::FullyClipped);
    }

    #[test]
    fn case6_grow_extends_to_reach_cell() {
        let fit = fit(resolve_axis(7, 2, 4, GROW, GROW, LABEL));
        assert_eq!((fit.start, fit.end), (7, 8));
        assert_eq!(fit.grow_far, 5);
    }

    #[test]
    fn preexisting_range_maps_back_through_near_growth() {
        let mut fit = AxisFit::fitting(0, 3);
        fit.grow_near = 2;
        // Post-growth [0,3] corresponds to pre-growth [-2,1]; only [0,1]
        // exists today.
        assert_eq!(fit.preexisting_range(10), Some((0, 1)));
    }

    #[test]
    fn preexisting_range_empty_when_fully_in_new_territory() {
        let mut fit = AxisFit::fitting(0, 1);
        fit.grow_near = 5;
        assert_eq!(fit.preexisting_range(10), None);
    }
}
