//! The sparse cell table plus everything keyed by grid coordinates:
//! dimensions, frozen panes, and merged blocks.
//!
//! Structural edits (insert/delete row/column) rewrite the table by
//! re-addressing every affected key. That is O(occupied cells), which is the
//! design point: the table is sparse and positions live in the keys.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use gridnote_core::{CellPos, CellRange};

use crate::cell::{fmt_number, Cell, CellBorder, CellStyle, CellValue, NumberFormat};
use crate::formula::{EvalValue, FormulaEvaluator};

pub const DEFAULT_COL_WIDTH: f32 = 100.0;
pub const DEFAULT_ROW_HEIGHT: f32 = 24.0;

/// Result of a merge lookup for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeInfo {
    /// Top-left cell of the merged block (the one carrying the spans).
    pub master: CellPos,
    pub rows: usize,
    pub cols: usize,
    /// Whether the queried position is the master itself.
    pub is_master: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    cells: FxHashMap<(usize, usize), Cell>,
    rows: usize,
    cols: usize,
    col_widths: Vec<f32>,
    row_heights: Vec<f32>,
    frozen_rows: usize,
    frozen_cols: usize,
}

impl Sheet {
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: FxHashMap::default(),
            rows,
            cols,
            col_widths: vec![DEFAULT_COL_WIDTH; cols],
            row_heights: vec![DEFAULT_ROW_HEIGHT; rows],
            frozen_rows: 0,
            frozen_cols: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn get_cell(&self, pos: CellPos) -> Option<&Cell> {
        self.cells.get(&(pos.row, pos.col))
    }

    /// Clone of the cell at `pos`, default when absent (absent key == empty cell).
    pub fn cell_or_default(&self, pos: CellPos) -> Cell {
        self.get_cell(pos).cloned().unwrap_or_default()
    }

    pub fn get_display(&self, pos: CellPos) -> String {
        self.get_cell(pos).map(|c| c.display()).unwrap_or_default()
    }

    /// Raw editable text: the formula source when present, else the literal.
    pub fn get_raw(&self, pos: CellPos) -> String {
        match self.get_cell(pos) {
            Some(cell) => match &cell.formula {
                Some(f) => f.clone(),
                None => cell.value.to_display(),
            },
            None => String::new(),
        }
    }

    /// Enter text into a cell the way the editor commits it.
    ///
    /// Text starting with `=` is stored as a formula and handed to the
    /// evaluator with the whole sheet as context; everything else is a
    /// literal. An existing style survives the overwrite either way.
    pub fn set_cell_text(&mut self, pos: CellPos, raw: &str, evaluator: &dyn FormulaEvaluator) {
        if raw.starts_with('=') {
            let outcome = evaluator.evaluate(raw, self);
            let cell = self.cells.entry((pos.row, pos.col)).or_default();
            cell.formula = Some(raw.to_string());
            match outcome {
                Ok(value) => {
                    cell.error = None;
                    match value.into_scalar() {
                        EvalValue::Number(n) => {
                            cell.value = CellValue::Number(n);
                            cell.display_value = Some(fmt_number(n));
                        }
                        EvalValue::Text(s) => {
                            cell.display_value = Some(s.clone());
                            cell.value = CellValue::Text(s);
                        }
                        // into_scalar never returns Bool/List
                        other => {
                            let text = match other {
                                EvalValue::Bool(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
                                _ => String::new(),
                            };
                            cell.display_value = Some(text.clone());
                            cell.value = CellValue::Text(text);
                        }
                    }
                }
                Err(err) => {
                    log::debug!("formula {raw:?} at {pos} failed: {err}");
                    cell.value = CellValue::Empty;
                    cell.display_value = Some(err.to_string());
                    cell.error = Some(err);
                }
            }
        } else {
            let cell = self.cells.entry((pos.row, pos.col)).or_default();
            cell.formula = None;
            cell.error = None;
            cell.display_value = None;
            cell.value = CellValue::from_literal(raw);
            if cell.is_vacant() {
                self.cells.remove(&(pos.row, pos.col));
            }
        }
    }

    /// Clear content (value/formula/error) but keep style, border, and spans.
    pub fn clear_cell_content(&mut self, pos: CellPos) {
        if let Some(cell) = self.cells.get_mut(&(pos.row, pos.col)) {
            cell.value = CellValue::Empty;
            cell.formula = None;
            cell.display_value = None;
            cell.error = None;
            if cell.is_vacant() {
                self.cells.remove(&(pos.row, pos.col));
            }
        }
    }

    /// Remove the cell entirely (content and presentation).
    pub fn remove_cell(&mut self, pos: CellPos) {
        self.cells.remove(&(pos.row, pos.col));
    }

    pub fn update_style(&mut self, pos: CellPos, f: impl FnOnce(&mut CellStyle)) {
        let cell = self.cells.entry((pos.row, pos.col)).or_default();
        f(&mut cell.style);
        if cell.is_vacant() {
            self.cells.remove(&(pos.row, pos.col));
        }
    }

    pub fn set_style(&mut self, pos: CellPos, style: CellStyle) {
        self.update_style(pos, |s| *s = style);
    }

    pub fn set_border(&mut self, pos: CellPos, border: Option<CellBorder>) {
        let cell = self.cells.entry((pos.row, pos.col)).or_default();
        cell.border = border;
        if cell.is_vacant() {
            self.cells.remove(&(pos.row, pos.col));
        }
    }

    pub fn set_format(&mut self, pos: CellPos, format: NumberFormat) {
        let cell = self.cells.entry((pos.row, pos.col)).or_default();
        cell.format = format;
        if cell.is_vacant() {
            self.cells.remove(&(pos.row, pos.col));
        }
    }

    /// Insert a pre-built cell, dropping it when vacant.
    pub fn put_cell(&mut self, pos: CellPos, cell: Cell) {
        if cell.is_vacant() {
            self.cells.remove(&(pos.row, pos.col));
        } else {
            self.cells.insert((pos.row, pos.col), cell);
        }
    }

    /// Iterate over all occupied cells.
    pub fn cells_iter(&self) -> impl Iterator<Item = (CellPos, &Cell)> {
        self.cells
            .iter()
            .map(|(&(row, col), cell)| (CellPos::new(row, col), cell))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Snapshot of the full cell table (for undo history).
    pub fn cells_snapshot(&self) -> FxHashMap<(usize, usize), Cell> {
        self.cells.clone()
    }

    /// Install a previously captured table (for undo/redo).
    pub fn restore_cells(&mut self, cells: FxHashMap<(usize, usize), Cell>) {
        self.cells = cells;
    }

    /// Replace all cells and grow (never shrink) the grid bounds.
    pub fn replace_cells(&mut self, cells: FxHashMap<(usize, usize), Cell>, rows: usize, cols: usize) {
        self.cells = cells;
        self.ensure_size(rows, cols);
    }

    /// Grow dimension arrays and counts to cover at least `rows` x `cols`.
    pub fn ensure_size(&mut self, rows: usize, cols: usize) {
        if rows > self.rows {
            self.row_heights.resize(rows, DEFAULT_ROW_HEIGHT);
            self.rows = rows;
        }
        if cols > self.cols {
            self.col_widths.resize(cols, DEFAULT_COL_WIDTH);
            self.cols = cols;
        }
    }

    // =========================================================================
    // Dimensions and frozen panes
    // =========================================================================

    pub fn col_width(&self, col: usize) -> f32 {
        self.col_widths.get(col).copied().unwrap_or(DEFAULT_COL_WIDTH)
    }

    pub fn row_height(&self, row: usize) -> f32 {
        self.row_heights.get(row).copied().unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    pub fn set_col_width(&mut self, col: usize, width: f32) {
        if col < self.cols {
            self.col_widths[col] = width.max(1.0);
        }
    }

    pub fn set_row_height(&mut self, row: usize, height: f32) {
        if row < self.rows {
            self.row_heights[row] = height.max(1.0);
        }
    }

    pub fn col_widths(&self) -> &[f32] {
        &self.col_widths
    }

    pub fn row_heights(&self) -> &[f32] {
        &self.row_heights
    }

    pub fn frozen_rows(&self) -> usize {
        self.frozen_rows
    }

    pub fn frozen_cols(&self) -> usize {
        self.frozen_cols
    }

    /// Set frozen pane counts, clamped to `[0, count - 1]`.
    pub fn set_frozen(&mut self, rows: usize, cols: usize) {
        self.frozen_rows = rows.min(self.rows.saturating_sub(1));
        self.frozen_cols = cols.min(self.cols.saturating_sub(1));
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Insert one row after `after_row`: every cell strictly below shifts
    /// down by one key, a default-height entry is spliced in.
    pub fn insert_row_after(&mut self, after_row: usize) {
        let shifted: Vec<_> = self
            .cells
            .keys()
            .filter(|&&(r, _)| r > after_row)
            .copied()
            .collect();
        // Move from the bottom up so shifted keys never collide.
        let mut moved: Vec<_> = shifted
            .into_iter()
            .filter_map(|k| self.cells.remove(&k).map(|c| (k, c)))
            .collect();
        moved.sort_by(|a, b| b.0 .0.cmp(&a.0 .0));
        for ((r, c), cell) in moved {
            self.cells.insert((r + 1, c), cell);
        }

        let at = (after_row + 1).min(self.rows);
        self.row_heights.insert(at, DEFAULT_ROW_HEIGHT);
        self.rows += 1;
    }

    /// Delete `row`: cells exactly at that index drop, higher rows shift up.
    pub fn delete_row(&mut self, row: usize) {
        if self.rows <= 1 || row >= self.rows {
            return;
        }
        self.cells.retain(|&(r, _), _| r != row);
        let shifted: Vec<_> = self
            .cells
            .keys()
            .filter(|&&(r, _)| r > row)
            .copied()
            .collect();
        let mut moved: Vec<_> = shifted
            .into_iter()
            .filter_map(|k| self.cells.remove(&k).map(|c| (k, c)))
            .collect();
        moved.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));
        for ((r, c), cell) in moved {
            self.cells.insert((r - 1, c), cell);
        }

        self.row_heights.remove(row);
        self.rows -= 1;
        self.frozen_rows = self.frozen_rows.min(self.rows.saturating_sub(1));
    }

    /// Insert one column after `after_col`.
    pub fn insert_col_after(&mut self, after_col: usize) {
        let shifted: Vec<_> = self
            .cells
            .keys()
            .filter(|&&(_, c)| c > after_col)
            .copied()
            .collect();
        let mut moved: Vec<_> = shifted
            .into_iter()
            .filter_map(|k| self.cells.remove(&k).map(|c| (k, c)))
            .collect();
        moved.sort_by(|a, b| b.0 .1.cmp(&a.0 .1));
        for ((r, c), cell) in moved {
            self.cells.insert((r, c + 1), cell);
        }

        let at = (after_col + 1).min(self.cols);
        self.col_widths.insert(at, DEFAULT_COL_WIDTH);
        self.cols += 1;
    }

    /// Delete `col`.
    pub fn delete_col(&mut self, col: usize) {
        if self.cols <= 1 || col >= self.cols {
            return;
        }
        self.cells.retain(|&(_, c), _| c != col);
        let shifted: Vec<_> = self
            .cells
            .keys()
            .filter(|&&(_, c)| c > col)
            .copied()
            .collect();
        let mut moved: Vec<_> = shifted
            .into_iter()
            .filter_map(|k| self.cells.remove(&k).map(|c| (k, c)))
            .collect();
        moved.sort_by(|a, b| a.0 .1.cmp(&b.0 .1));
        for ((r, c), cell) in moved {
            self.cells.insert((r, c - 1), cell);
        }

        self.col_widths.remove(col);
        self.cols -= 1;
        self.frozen_cols = self.frozen_cols.min(self.cols.saturating_sub(1));
    }

    /// Physically reorder rows: `order[new_row] = old_row`.
    ///
    /// Every occupied cell travels with its row, as do row heights. Rows not
    /// named in `order` (beyond its length) stay where they are.
    pub fn apply_row_order(&mut self, order: &[usize]) {
        let mut old_cells = std::mem::take(&mut self.cells);
        let mut new_cells = FxHashMap::default();

        // Inverse map old -> new for cells in the reordered span
        let mut dest_of = FxHashMap::default();
        for (new_row, &old_row) in order.iter().enumerate() {
            dest_of.insert(old_row, new_row);
        }

        for ((r, c), cell) in old_cells.drain() {
            let row = dest_of.get(&r).copied().unwrap_or(r);
            new_cells.insert((row, c), cell);
        }
        self.cells = new_cells;

        let old_heights = self.row_heights.clone();
        for (new_row, &old_row) in order.iter().enumerate() {
            if let (Some(&h), true) = (old_heights.get(old_row), new_row < self.row_heights.len()) {
                self.row_heights[new_row] = h;
            }
        }
    }

    // =========================================================================
    // Merged blocks
    // =========================================================================

    /// Merge the given range. The top-left cell becomes the master carrying
    /// the spans; the rest are value-cleared but keep their style.
    ///
    /// Rejected (returns `false`, sheet untouched) when the range is a single
    /// cell or any covered cell already belongs to a merge.
    pub fn merge_range(&mut self, range: CellRange) -> bool {
        let range = range.normalized();
        if range.is_single_cell() {
            log::warn!("merge rejected: {range} is a single cell");
            return false;
        }
        for pos in range.iter() {
            if self.merge_info(pos).is_some() {
                log::warn!("merge rejected: {pos} already belongs to a merge");
                return false;
            }
        }

        for pos in range.iter() {
            if pos == range.start {
                continue;
            }
            self.clear_cell_content(pos);
        }
        let master = self
            .cells
            .entry((range.start.row, range.start.col))
            .or_default();
        master.row_span = Some(range.rows());
        master.col_span = Some(range.cols());
        true
    }

    /// Remove the spans of every merge master whose block touches `range`.
    /// No cell positions move and no values change. Returns whether any
    /// span was removed.
    pub fn unmerge_range(&mut self, range: CellRange) -> bool {
        let range = range.normalized();
        let masters: Vec<(usize, usize)> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.is_merge_master())
            .filter(|(&(r, c), cell)| {
                let block = CellRange::new(
                    CellPos::new(r, c),
                    CellPos::new(
                        r + cell.row_span.unwrap_or(1) - 1,
                        c + cell.col_span.unwrap_or(1) - 1,
                    ),
                );
                block.intersects(&range)
            })
            .map(|(&k, _)| k)
            .collect();

        let removed = !masters.is_empty();
        for key in masters {
            if let Some(cell) = self.cells.get_mut(&key) {
                cell.row_span = None;
                cell.col_span = None;
                if cell.is_vacant() {
                    self.cells.remove(&key);
                }
            }
        }
        removed
    }

    /// Merge lookup. Linear over span-carrying cells; merges are rare
    /// relative to cell count so O(#merges) per query is acceptable.
    pub fn merge_info(&self, pos: CellPos) -> Option<MergeInfo> {
        if let Some(cell) = self.get_cell(pos) {
            if cell.is_merge_master() {
                return Some(MergeInfo {
                    master: pos,
                    rows: cell.row_span.unwrap_or(1),
                    cols: cell.col_span.unwrap_or(1),
                    is_master: true,
                });
            }
        }
        for (master, cell) in self.cells_iter() {
            if !cell.is_merge_master() {
                continue;
            }
            let rows = cell.row_span.unwrap_or(1);
            let cols = cell.col_span.unwrap_or(1);
            let covers = pos.row >= master.row
                && pos.row < master.row + rows
                && pos.col >= master.col
                && pos.col < master.col + cols;
            if covers && pos != master {
                return Some(MergeInfo {
                    master,
                    rows,
                    cols,
                    is_master: false,
                });
            }
        }
        None
    }

    /// True for merge slaves: positions covered by a block but not its master.
    pub fn is_merge_hidden(&self, pos: CellPos) -> bool {
        self.merge_info(pos).map(|m| !m.is_master).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::UnsupportedEvaluator;

    fn sheet() -> Sheet {
        Sheet::new(10, 10)
    }

    fn at(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    #[test]
    fn test_set_literal_and_display() {
        let mut s = sheet();
        s.set_cell_text(at(0, 0), "42", &UnsupportedEvaluator);
        s.set_cell_text(at(0, 1), "hello", &UnsupportedEvaluator);
        assert_eq!(s.get_display(at(0, 0)), "42");
        assert_eq!(s.get_display(at(0, 1)), "hello");
        assert_eq!(s.get_display(at(5, 5)), "");
    }

    #[test]
    fn test_formula_error_with_stub_evaluator() {
        let mut s = sheet();
        s.set_cell_text(at(0, 0), "=SUM(A1)", &UnsupportedEvaluator);
        let cell = s.get_cell(at(0, 0)).unwrap();
        assert_eq!(cell.formula.as_deref(), Some("=SUM(A1)"));
        assert_eq!(s.get_display(at(0, 0)), "#ERROR!");
        assert_eq!(s.get_raw(at(0, 0)), "=SUM(A1)");
    }

    #[test]
    fn test_overwrite_preserves_style() {
        let mut s = sheet();
        s.update_style(at(1, 1), |st| st.bold = true);
        s.set_cell_text(at(1, 1), "text", &UnsupportedEvaluator);
        assert!(s.get_cell(at(1, 1)).unwrap().style.bold);
        s.set_cell_text(at(1, 1), "other", &UnsupportedEvaluator);
        assert!(s.get_cell(at(1, 1)).unwrap().style.bold);
    }

    #[test]
    fn test_clearing_literal_drops_vacant_cell() {
        let mut s = sheet();
        s.set_cell_text(at(2, 2), "x", &UnsupportedEvaluator);
        s.set_cell_text(at(2, 2), "", &UnsupportedEvaluator);
        assert!(s.get_cell(at(2, 2)).is_none());
        assert_eq!(s.occupied_count(), 0);
    }

    #[test]
    fn test_insert_row_shifts_below() {
        let mut s = sheet();
        s.set_cell_text(at(0, 0), "top", &UnsupportedEvaluator);
        s.set_cell_text(at(2, 0), "below", &UnsupportedEvaluator);
        s.insert_row_after(0);
        assert_eq!(s.rows(), 11);
        assert_eq!(s.get_display(at(0, 0)), "top");
        assert_eq!(s.get_display(at(2, 0)), "");
        assert_eq!(s.get_display(at(3, 0)), "below");
        assert_eq!(s.row_heights().len(), 11);
    }

    #[test]
    fn test_delete_row_drops_and_shifts() {
        let mut s = sheet();
        s.set_cell_text(at(1, 0), "doomed", &UnsupportedEvaluator);
        s.set_cell_text(at(3, 0), "keeper", &UnsupportedEvaluator);
        s.delete_row(1);
        assert_eq!(s.rows(), 9);
        assert_eq!(s.get_display(at(1, 0)), "");
        assert_eq!(s.get_display(at(2, 0)), "keeper");
    }

    #[test]
    fn test_insert_delete_col() {
        let mut s = sheet();
        s.set_cell_text(at(0, 1), "b", &UnsupportedEvaluator);
        s.insert_col_after(0);
        assert_eq!(s.cols(), 11);
        assert_eq!(s.get_display(at(0, 2)), "b");
        s.delete_col(2);
        assert_eq!(s.cols(), 10);
        assert_eq!(s.get_display(at(0, 1)), "");
        assert_eq!(s.get_display(at(0, 2)), "");
    }

    #[test]
    fn test_merge_and_lookup() {
        let mut s = sheet();
        s.set_cell_text(at(0, 0), "head", &UnsupportedEvaluator);
        s.set_cell_text(at(1, 1), "swallowed", &UnsupportedEvaluator);
        assert!(s.merge_range(CellRange::new(at(0, 0), at(1, 1))));

        let master = s.get_cell(at(0, 0)).unwrap();
        assert_eq!(master.row_span, Some(2));
        assert_eq!(master.col_span, Some(2));

        // Slaves are value-cleared
        assert_eq!(s.get_display(at(1, 1)), "");

        let info = s.merge_info(at(1, 1)).unwrap();
        assert!(!info.is_master);
        assert_eq!(info.master, at(0, 0));
        assert!(s.merge_info(at(0, 0)).unwrap().is_master);
        assert!(s.merge_info(at(5, 5)).is_none());
    }

    #[test]
    fn test_merge_over_merge_is_rejected() {
        let mut s = sheet();
        assert!(s.merge_range(CellRange::new(at(0, 0), at(1, 1))));
        // Overlapping block, including a slave of the first
        assert!(!s.merge_range(CellRange::new(at(1, 1), at(2, 2))));
        // Sheet unchanged: original master still spans 2x2
        assert_eq!(s.get_cell(at(0, 0)).unwrap().row_span, Some(2));
        assert!(s.get_cell(at(2, 2)).is_none());
    }

    #[test]
    fn test_single_cell_merge_rejected() {
        let mut s = sheet();
        assert!(!s.merge_range(CellRange::cell(at(3, 3))));
    }

    #[test]
    fn test_unmerge_keeps_values() {
        let mut s = sheet();
        s.set_cell_text(at(0, 0), "kept", &UnsupportedEvaluator);
        s.merge_range(CellRange::new(at(0, 0), at(1, 1)));
        assert!(s.unmerge_range(CellRange::cell(at(1, 0))));
        assert!(s.merge_info(at(0, 0)).is_none());
        assert_eq!(s.get_display(at(0, 0)), "kept");
    }

    #[test]
    fn test_unmerge_reports_whether_spans_removed() {
        let mut s = sheet();
        s.merge_range(CellRange::new(at(0, 0), at(1, 1)));
        // Range touching no merge removes nothing
        assert!(!s.unmerge_range(CellRange::new(at(5, 5), at(6, 6))));
        assert!(s.merge_info(at(0, 0)).is_some());
        assert!(s.unmerge_range(CellRange::cell(at(0, 0))));
    }

    #[test]
    fn test_merge_slave_keeps_style() {
        let mut s = sheet();
        s.update_style(at(0, 1), |st| st.italic = true);
        s.set_cell_text(at(0, 1), "gone", &UnsupportedEvaluator);
        s.merge_range(CellRange::new(at(0, 0), at(0, 1)));
        let slave = s.get_cell(at(0, 1)).unwrap();
        assert!(slave.style.italic);
        assert!(slave.value.is_empty());
    }

    #[test]
    fn test_frozen_clamped() {
        let mut s = sheet();
        s.set_frozen(99, 99);
        assert_eq!(s.frozen_rows(), 9);
        assert_eq!(s.frozen_cols(), 9);
        s.set_frozen(2, 0);
        assert_eq!(s.frozen_rows(), 2);
        assert_eq!(s.frozen_cols(), 0);
    }

    #[test]
    fn test_frozen_reclamped_after_delete() {
        let mut s = Sheet::new(3, 3);
        s.set_frozen(2, 2);
        s.delete_row(0);
        assert_eq!(s.frozen_rows(), 1);
    }

    #[test]
    fn test_col_width_fallback() {
        let s = sheet();
        assert_eq!(s.col_width(5), DEFAULT_COL_WIDTH);
        assert_eq!(s.col_width(999), DEFAULT_COL_WIDTH);
    }

    #[test]
    fn test_resize_and_splice() {
        let mut s = sheet();
        s.set_col_width(2, 150.0);
        s.insert_col_after(0);
        // Width followed the shifted column
        assert_eq!(s.col_width(3), 150.0);
        assert_eq!(s.col_width(1), DEFAULT_COL_WIDTH);
    }

    #[test]
    fn test_apply_row_order_moves_whole_rows() {
        let mut s = sheet();
        s.set_cell_text(at(0, 0), "a", &UnsupportedEvaluator);
        s.set_cell_text(at(0, 1), "1", &UnsupportedEvaluator);
        s.set_cell_text(at(1, 0), "b", &UnsupportedEvaluator);
        s.set_cell_text(at(1, 1), "2", &UnsupportedEvaluator);
        // Swap rows 0 and 1
        s.apply_row_order(&[1, 0, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(s.get_display(at(0, 0)), "b");
        assert_eq!(s.get_display(at(0, 1)), "2");
        assert_eq!(s.get_display(at(1, 0)), "a");
        assert_eq!(s.get_display(at(1, 1)), "1");
    }
}
