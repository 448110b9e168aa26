//! Copy/cut/paste of rectangular cell blocks.
//!
//! Copied cells are re-keyed relative to the source rectangle's top-left so
//! paste is position independent. The same rectangle serializes to
//! tab/newline-delimited text for the system clipboard; writing that text to
//! the OS is the host's job, the engine only produces the string.

use rustc_hash::FxHashMap;

use gridnote_core::{CellPos, CellRange};

use crate::cell::Cell;
use crate::formula::FormulaEvaluator;
use crate::sheet::Sheet;

/// A captured rectangle of cells, keyed relative to (0, 0).
#[derive(Debug, Clone)]
pub struct ClipboardData {
    cells: FxHashMap<(usize, usize), Cell>,
    rows: usize,
    cols: usize,
    /// Source rectangle for cut tracking, `None` after a plain copy.
    cut_source: Option<CellRange>,
}

impl ClipboardData {
    /// Snapshot `range` from the sheet.
    pub fn capture(sheet: &Sheet, range: CellRange, is_cut: bool) -> Self {
        let range = range.normalized();
        let mut cells = FxHashMap::default();
        for pos in range.iter() {
            if let Some(cell) = sheet.get_cell(pos) {
                cells.insert((pos.row - range.start.row, pos.col - range.start.col), cell.clone());
            }
        }
        Self {
            cells,
            rows: range.rows(),
            cols: range.cols(),
            cut_source: is_cut.then_some(range),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_cut(&self) -> bool {
        self.cut_source.is_some()
    }

    /// Tab/newline-delimited display text of the captured rectangle, for the
    /// system clipboard.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.cols {
                if col > 0 {
                    out.push('\t');
                }
                if let Some(cell) = self.cells.get(&(row, col)) {
                    out.push_str(&cell.display());
                }
            }
        }
        out
    }

    /// Paste anchored at `anchor`. Returns the destination rectangle.
    ///
    /// For a cut, source cells not covered by the destination rectangle are
    /// cleared; the overlap stays untouched because the paste just wrote it.
    pub fn paste(&self, sheet: &mut Sheet, anchor: CellPos, evaluator: &dyn FormulaEvaluator) -> CellRange {
        let dest = CellRange::new(
            anchor,
            CellPos::new(anchor.row + self.rows - 1, anchor.col + self.cols - 1),
        );
        sheet.ensure_size(dest.end.row + 1, dest.end.col + 1);

        if let Some(source) = self.cut_source {
            for pos in source.iter() {
                if !dest.contains(pos) {
                    sheet.remove_cell(pos);
                }
            }
        }

        // Pasted merge blocks may land on existing ones whose master sits
        // outside the destination; unmerge those first so no cell ends up
        // covered by two masters.
        for (&(row, col), cell) in &self.cells {
            if !cell.is_merge_master() {
                continue;
            }
            let target = CellPos::new(anchor.row + row, anchor.col + col);
            let block = CellRange::new(
                target,
                CellPos::new(
                    target.row + cell.row_span.unwrap_or(1) - 1,
                    target.col + cell.col_span.unwrap_or(1) - 1,
                ),
            );
            sheet.unmerge_range(block);
        }

        for row in 0..self.rows {
            for col in 0..self.cols {
                let target = CellPos::new(anchor.row + row, anchor.col + col);
                match self.cells.get(&(row, col)) {
                    Some(cell) => {
                        let mut pasted = cell.clone();
                        // Formulas re-evaluate at the destination
                        if let Some(expr) = pasted.formula.clone() {
                            sheet.put_cell(target, pasted);
                            sheet.set_cell_text(target, &expr, evaluator);
                        } else {
                            pasted.row_span = cell.row_span;
                            pasted.col_span = cell.col_span;
                            sheet.put_cell(target, pasted);
                        }
                    }
                    None => sheet.remove_cell(target),
                }
            }
        }

        dest
    }
}
