//! Selection state: active cell plus an optional rectangular range.
//!
//! Pure data. The invariant is that `range`, when set, always encloses
//! `active`; mutators re-establish it rather than trusting callers.

use serde::{Deserialize, Serialize};

use crate::range::{CellPos, CellRange};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    active: Option<CellPos>,
    range: Option<CellRange>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<CellPos> {
        self.active
    }

    pub fn range(&self) -> Option<CellRange> {
        self.range
    }

    /// Set the active cell, collapsing any range to that single cell.
    pub fn set_active(&mut self, pos: CellPos) {
        self.active = Some(pos);
        self.range = Some(CellRange::cell(pos));
    }

    /// Select a range. The active cell moves to the range's start corner
    /// unless it already lies inside the rectangle.
    pub fn set_range(&mut self, range: CellRange) {
        match self.active {
            Some(active) if range.contains(active) => {}
            _ => self.active = Some(range.start),
        }
        self.range = Some(range);
    }

    /// Extend the current selection so the active cell stays the anchor and
    /// `to` becomes the opposite corner.
    pub fn extend_to(&mut self, to: CellPos) {
        let anchor = match self.active {
            Some(a) => a,
            None => {
                self.set_active(to);
                return;
            }
        };
        self.range = Some(CellRange::new(anchor, to));
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.range = None;
    }

    /// The effective rectangle for range operations: the explicit range, or
    /// the active cell as a 1x1 range.
    pub fn effective_range(&self) -> Option<CellRange> {
        self.range.or_else(|| self.active.map(CellRange::cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_active_collapses_range() {
        let mut sel = Selection::new();
        sel.set_range(CellRange::new(CellPos::new(0, 0), CellPos::new(3, 3)));
        sel.set_active(CellPos::new(5, 5));
        assert_eq!(sel.active(), Some(CellPos::new(5, 5)));
        assert!(sel.range().unwrap().is_single_cell());
    }

    #[test]
    fn test_range_encloses_active() {
        let mut sel = Selection::new();
        sel.set_active(CellPos::new(10, 10));
        sel.set_range(CellRange::new(CellPos::new(0, 0), CellPos::new(2, 2)));
        let active = sel.active().unwrap();
        assert!(sel.range().unwrap().contains(active));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut sel = Selection::new();
        sel.set_active(CellPos::new(1, 1));
        sel.extend_to(CellPos::new(4, 0));
        let range = sel.range().unwrap();
        assert!(range.contains(CellPos::new(1, 1)));
        assert!(range.contains(CellPos::new(4, 0)));
        assert_eq!(sel.active(), Some(CellPos::new(1, 1)));
    }

    #[test]
    fn test_effective_range_falls_back_to_active() {
        let mut sel = Selection::new();
        assert_eq!(sel.effective_range(), None);
        sel.set_active(CellPos::new(2, 3));
        let range = sel.effective_range().unwrap();
        assert!(range.is_single_cell());
        assert!(range.contains(CellPos::new(2, 3)));
    }
}
