//! The document facade: one open spreadsheet.
//!
//! Owns the sheet, selection, history, clipboard, rules, and comments, and
//! is the only mutation surface the host sees. Every mutating call runs to
//! completion, then hands the host a [`StateDelta`] with the fields that
//! changed; the host merges and persists. The facade never performs I/O.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use gridnote_core::{CellPos, CellRange, Selection};

use crate::cell::{Cell, CellBorder, CellStyle, NumberFormat};
use crate::clipboard::ClipboardData;
use crate::comment::CellComment;
use crate::conditional::{self, ConditionalFormatRule};
use crate::events::{cell_key, parse_cell_key, ChangeListener, DocumentState, StateDelta};
use crate::fill::{self, FillDirection};
use crate::formula::{FormulaEvaluator, UnsupportedEvaluator};
use crate::history::History;
use crate::sheet::{MergeInfo, Sheet};
use crate::sort::{self, SortDirection};
use crate::validation::{self, DataValidationRule, ValidationResult};

pub struct Document {
    sheet: Sheet,
    selection: Selection,
    history: History,
    clipboard: Option<ClipboardData>,
    cf_rules: Vec<ConditionalFormatRule>,
    dv_rules: Vec<DataValidationRule>,
    comments: FxHashMap<(usize, usize), CellComment>,
    evaluator: Box<dyn FormulaEvaluator>,
    on_change: Option<ChangeListener>,
    next_comment_id: u64,
}

impl Document {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_evaluator(rows, cols, Box::new(UnsupportedEvaluator))
    }

    pub fn with_evaluator(rows: usize, cols: usize, evaluator: Box<dyn FormulaEvaluator>) -> Self {
        Self {
            sheet: Sheet::new(rows, cols),
            selection: Selection::new(),
            history: History::new(),
            clipboard: None,
            cf_rules: Vec::new(),
            dv_rules: Vec::new(),
            comments: FxHashMap::default(),
            evaluator,
            on_change: None,
            next_comment_id: 1,
        }
    }

    /// Register the host's persistence callback.
    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, pos: CellPos) {
        self.selection.set_active(pos);
    }

    pub fn select_range(&mut self, range: CellRange) {
        self.selection.set_range(range);
    }

    pub fn extend_selection(&mut self, to: CellPos) {
        self.selection.extend_to(to);
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn display_value(&self, pos: CellPos) -> String {
        self.sheet.get_display(pos)
    }

    pub fn raw_text(&self, pos: CellPos) -> String {
        self.sheet.get_raw(pos)
    }

    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.sheet.get_cell(pos)
    }

    pub fn set_cell_text(&mut self, pos: CellPos, raw: &str) {
        self.record();
        self.sheet.set_cell_text(pos, raw, self.evaluator.as_ref());
        let delta = self.cells_delta();
        self.emit(delta);
    }

    /// Clear content in `range`, keeping styles, borders, and spans.
    pub fn clear_range(&mut self, range: CellRange) {
        self.record();
        for pos in range.normalized().iter() {
            self.sheet.clear_cell_content(pos);
        }
        let delta = self.cells_delta();
        self.emit(delta);
    }

    pub fn clear_selection(&mut self) {
        if let Some(range) = self.selection.effective_range() {
            self.clear_range(range);
        }
    }

    pub fn set_style_range(&mut self, range: CellRange, f: impl Fn(&mut CellStyle)) {
        self.record();
        for pos in range.normalized().iter() {
            self.sheet.update_style(pos, &f);
        }
        let delta = self.cells_delta();
        self.emit(delta);
    }

    pub fn set_border_range(&mut self, range: CellRange, border: Option<CellBorder>) {
        self.record();
        for pos in range.normalized().iter() {
            self.sheet.set_border(pos, border.clone());
        }
        let delta = self.cells_delta();
        self.emit(delta);
    }

    pub fn set_format_range(&mut self, range: CellRange, format: NumberFormat) {
        self.record();
        for pos in range.normalized().iter() {
            self.sheet.set_format(pos, format);
        }
        let delta = self.cells_delta();
        self.emit(delta);
    }

    // =========================================================================
    // Undo / redo
    // =========================================================================

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let current = self.sheet.cells_snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.sheet.restore_cells(previous);
                let delta = self.cells_delta();
                self.emit(delta);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.sheet.cells_snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.sheet.restore_cells(next);
                let delta = self.cells_delta();
                self.emit(delta);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    pub fn insert_row(&mut self, after_row: usize) {
        self.record();
        self.sheet.insert_row_after(after_row);

        let rules_changed = self.shift_rule_ranges(|r| Some(r.after_row_insert(after_row)));
        self.shift_comments(|(row, col)| {
            Some(if row > after_row { (row + 1, col) } else { (row, col) })
        });

        let delta = self.structural_delta(rules_changed);
        self.emit(delta);
    }

    pub fn delete_row(&mut self, row: usize) {
        if self.sheet.rows() <= 1 || row >= self.sheet.rows() {
            return;
        }
        self.record();
        self.sheet.delete_row(row);

        let rules_changed = self.shift_rule_ranges(|r| r.after_row_delete(row));
        self.shift_comments(|(r, col)| match r.cmp(&row) {
            std::cmp::Ordering::Less => Some((r, col)),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some((r - 1, col)),
        });

        let delta = self.structural_delta(rules_changed);
        self.emit(delta);
    }

    pub fn insert_col(&mut self, after_col: usize) {
        self.record();
        self.sheet.insert_col_after(after_col);

        let rules_changed = self.shift_rule_ranges(|r| Some(r.after_col_insert(after_col)));
        self.shift_comments(|(row, col)| {
            Some(if col > after_col { (row, col + 1) } else { (row, col) })
        });

        let delta = self.structural_delta(rules_changed);
        self.emit(delta);
    }

    pub fn delete_col(&mut self, col: usize) {
        if self.sheet.cols() <= 1 || col >= self.sheet.cols() {
            return;
        }
        self.record();
        self.sheet.delete_col(col);

        let rules_changed = self.shift_rule_ranges(|r| r.after_col_delete(col));
        self.shift_comments(|(row, c)| match c.cmp(&col) {
            std::cmp::Ordering::Less => Some((row, c)),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some((row, c - 1)),
        });

        let delta = self.structural_delta(rules_changed);
        self.emit(delta);
    }

    pub fn set_column_width(&mut self, col: usize, width: f32) {
        self.sheet.set_col_width(col, width);
        let delta = StateDelta {
            column_widths: Some(self.sheet.col_widths().to_vec()),
            ..Default::default()
        };
        self.emit(delta);
    }

    pub fn set_row_height(&mut self, row: usize, height: f32) {
        self.sheet.set_row_height(row, height);
        let delta = StateDelta {
            row_heights: Some(self.sheet.row_heights().to_vec()),
            ..Default::default()
        };
        self.emit(delta);
    }

    pub fn freeze(&mut self, rows: usize, cols: usize) {
        self.sheet.set_frozen(rows, cols);
        let delta = StateDelta {
            frozen_rows: Some(self.sheet.frozen_rows()),
            frozen_cols: Some(self.sheet.frozen_cols()),
            ..Default::default()
        };
        self.emit(delta);
    }

    /// Freeze everything above and left of the active cell.
    pub fn freeze_at_selection(&mut self) {
        if let Some(active) = self.selection.active() {
            self.freeze(active.row, active.col);
        }
    }

    // =========================================================================
    // Merging
    // =========================================================================

    /// Merge the selected range. Returns `false` (and leaves the document
    /// untouched) when the selection is a single cell or overlaps an
    /// existing merge.
    pub fn merge_selected(&mut self) -> bool {
        let Some(range) = self.selection.effective_range() else {
            return false;
        };
        let before = self.sheet.cells_snapshot();
        if !self.sheet.merge_range(range) {
            return false;
        }
        self.history.record(before);
        let delta = self.cells_delta();
        self.emit(delta);
        true
    }

    pub fn unmerge_selected(&mut self) {
        let Some(range) = self.selection.effective_range() else {
            return;
        };
        // Only a selection that actually touched a merge makes an undo frame
        let before = self.sheet.cells_snapshot();
        if !self.sheet.unmerge_range(range) {
            return;
        }
        self.history.record(before);
        let delta = self.cells_delta();
        self.emit(delta);
    }

    pub fn merge_info(&self, pos: CellPos) -> Option<MergeInfo> {
        self.sheet.merge_info(pos)
    }

    // =========================================================================
    // Sort / fill
    // =========================================================================

    /// Sort all rows by `col`. Entire rows relocate; comments travel with
    /// their row.
    pub fn sort_column(&mut self, col: usize, direction: SortDirection) {
        self.record();
        let order = sort::sort_order(&self.sheet, col, direction);
        self.sheet.apply_row_order(&order);

        let mut dest_of = FxHashMap::default();
        for (new_row, &old_row) in order.iter().enumerate() {
            dest_of.insert(old_row, new_row);
        }
        self.shift_comments(|(row, c)| Some((dest_of.get(&row).copied().unwrap_or(row), c)));

        let delta = StateDelta {
            cells: Some(self.cells_map()),
            row_heights: Some(self.sheet.row_heights().to_vec()),
            cell_comments: Some(self.comments_map()),
            ..Default::default()
        };
        self.emit(delta);
    }

    /// Extend the selection's pattern by `count` cells in `direction`.
    /// The selection follows the fill.
    pub fn auto_fill(&mut self, direction: FillDirection, count: usize) -> Option<CellRange> {
        let source = self.selection.effective_range()?;
        self.record();
        let filled = fill::auto_fill(&mut self.sheet, source, direction, count, self.evaluator.as_ref());
        self.selection.set_range(filled);

        let delta = StateDelta {
            cells: Some(self.cells_map()),
            row_count: Some(self.sheet.rows()),
            col_count: Some(self.sheet.cols()),
            ..Default::default()
        };
        self.emit(delta);
        Some(filled)
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    /// Copy the selection. Returns the tab-delimited text for the system
    /// clipboard.
    pub fn copy(&mut self) -> Option<String> {
        let range = self.selection.effective_range()?;
        let clip = ClipboardData::capture(&self.sheet, range, false);
        let text = clip.to_tsv();
        self.clipboard = Some(clip);
        Some(text)
    }

    pub fn cut(&mut self) -> Option<String> {
        let range = self.selection.effective_range()?;
        let clip = ClipboardData::capture(&self.sheet, range, true);
        let text = clip.to_tsv();
        self.clipboard = Some(clip);
        Some(text)
    }

    /// Paste anchored at the active cell. Returns the destination rectangle,
    /// which also becomes the new selection.
    pub fn paste(&mut self) -> Option<CellRange> {
        let anchor = self.selection.active()?;
        let clip = self.clipboard.clone()?;
        self.record();
        let dest = clip.paste(&mut self.sheet, anchor, self.evaluator.as_ref());
        if clip.is_cut() {
            // A cut pastes once; a second paste would duplicate the move
            self.clipboard = None;
        }
        self.selection.set_range(dest);

        let delta = StateDelta {
            cells: Some(self.cells_map()),
            row_count: Some(self.sheet.rows()),
            col_count: Some(self.sheet.cols()),
            ..Default::default()
        };
        self.emit(delta);
        Some(dest)
    }

    // =========================================================================
    // Conditional formatting
    // =========================================================================

    pub fn conditional_format_rules(&self) -> &[ConditionalFormatRule] {
        &self.cf_rules
    }

    pub fn add_conditional_format_rule(&mut self, rule: ConditionalFormatRule) {
        let mut rules = self.cf_rules.clone();
        rules.push(rule);
        self.cf_rules = rules;
        let delta = self.cf_delta();
        self.emit(delta);
    }

    pub fn remove_conditional_format_rule(&mut self, id: &str) -> bool {
        let before = self.cf_rules.len();
        self.cf_rules = self
            .cf_rules
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        let removed = self.cf_rules.len() != before;
        if removed {
            let delta = self.cf_delta();
            self.emit(delta);
        }
        removed
    }

    /// Replace the rule with the same id, keeping its position in the array.
    pub fn update_conditional_format_rule(&mut self, rule: ConditionalFormatRule) -> bool {
        let mut rules = self.cf_rules.clone();
        let Some(slot) = rules.iter_mut().find(|r| r.id == rule.id) else {
            return false;
        };
        *slot = rule;
        self.cf_rules = rules;
        let delta = self.cf_delta();
        self.emit(delta);
        true
    }

    /// The style override conditional formatting produces for `pos`, if any.
    pub fn conditional_style(&self, pos: CellPos) -> Option<CellStyle> {
        conditional::style_for_cell(&self.cf_rules, &self.sheet, pos)
    }

    pub fn conditional_color_scale(&self, pos: CellPos) -> Option<crate::cell::Color> {
        conditional::color_scale_color(&self.cf_rules, &self.sheet, pos)
    }

    pub fn conditional_data_bar(&self, pos: CellPos) -> Option<(f64, crate::cell::Color)> {
        conditional::data_bar_fill(&self.cf_rules, &self.sheet, pos)
    }

    // =========================================================================
    // Data validation
    // =========================================================================

    pub fn data_validation_rules(&self) -> &[DataValidationRule] {
        &self.dv_rules
    }

    pub fn add_data_validation_rule(&mut self, rule: DataValidationRule) {
        let mut rules = self.dv_rules.clone();
        rules.push(rule);
        self.dv_rules = rules;
        let delta = self.dv_delta();
        self.emit(delta);
    }

    pub fn remove_data_validation_rule(&mut self, id: &str) -> bool {
        let before = self.dv_rules.len();
        self.dv_rules = self
            .dv_rules
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        let removed = self.dv_rules.len() != before;
        if removed {
            let delta = self.dv_delta();
            self.emit(delta);
        }
        removed
    }

    /// Advisory check of `candidate` as the prospective content of `pos`.
    /// The engine never blocks the edit itself; that call is the host's.
    pub fn validate_input(&self, pos: CellPos, candidate: &str) -> ValidationResult {
        validation::validate_cell_value(&self.dv_rules, &self.sheet, pos, candidate)
    }

    /// Dropdown items for a list-validated cell.
    pub fn validation_list_items(&self, pos: CellPos) -> Option<Vec<String>> {
        validation::validation_list_items(&self.dv_rules, &self.sheet, pos)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    pub fn comment(&self, pos: CellPos) -> Option<&CellComment> {
        self.comments.get(&(pos.row, pos.col))
    }

    /// Attach a comment to `pos`, replacing any existing one. Returns the
    /// generated comment id.
    pub fn add_comment(&mut self, pos: CellPos, author: &str, text: &str) -> String {
        let id = format!("c{}", self.next_comment_id);
        self.next_comment_id += 1;
        self.comments
            .insert((pos.row, pos.col), CellComment::new(id.clone(), author, text));
        let delta = self.comments_delta();
        self.emit(delta);
        id
    }

    pub fn edit_comment(&mut self, pos: CellPos, text: &str) -> bool {
        let Some(comment) = self.comments.get_mut(&(pos.row, pos.col)) else {
            return false;
        };
        comment.edit(text);
        let delta = self.comments_delta();
        self.emit(delta);
        true
    }

    pub fn add_comment_reply(&mut self, pos: CellPos, author: &str, text: &str) -> bool {
        let id = format!("c{}", self.next_comment_id);
        let Some(comment) = self.comments.get_mut(&(pos.row, pos.col)) else {
            return false;
        };
        self.next_comment_id += 1;
        comment.add_reply(id, author, text);
        let delta = self.comments_delta();
        self.emit(delta);
        true
    }

    pub fn resolve_comment(&mut self, pos: CellPos) -> bool {
        let Some(comment) = self.comments.get_mut(&(pos.row, pos.col)) else {
            return false;
        };
        comment.resolved = true;
        let delta = self.comments_delta();
        self.emit(delta);
        true
    }

    pub fn remove_comment(&mut self, pos: CellPos) -> bool {
        let removed = self.comments.remove(&(pos.row, pos.col)).is_some();
        if removed {
            let delta = self.comments_delta();
            self.emit(delta);
        }
        removed
    }

    // =========================================================================
    // Persisted state
    // =========================================================================

    /// Full persisted snapshot of the document.
    pub fn state(&self) -> DocumentState {
        DocumentState {
            cells: self.cells_map(),
            row_count: self.sheet.rows(),
            col_count: self.sheet.cols(),
            column_widths: self.sheet.col_widths().to_vec(),
            row_heights: self.sheet.row_heights().to_vec(),
            frozen_rows: self.sheet.frozen_rows(),
            frozen_cols: self.sheet.frozen_cols(),
            conditional_format_rules: self.cf_rules.clone(),
            data_validation_rules: self.dv_rules.clone(),
            cell_comments: self
                .comments
                .iter()
                .map(|(&(row, col), c)| (cell_key(row, col), c.clone()))
                .collect(),
        }
    }

    /// Rebuild a document from its persisted shape. Malformed cell keys are
    /// skipped rather than failing the load.
    pub fn from_state(state: DocumentState, evaluator: Box<dyn FormulaEvaluator>) -> Self {
        let mut doc = Self::with_evaluator(state.row_count, state.col_count, evaluator);

        let mut cells = FxHashMap::default();
        for (key, cell) in state.cells {
            match parse_cell_key(&key) {
                Some(pos) => {
                    cells.insert(pos, cell);
                }
                None => log::warn!("skipping cell with malformed key {key:?}"),
            }
        }
        doc.sheet.restore_cells(cells);

        for (col, &width) in state.column_widths.iter().enumerate() {
            doc.sheet.set_col_width(col, width);
        }
        for (row, &height) in state.row_heights.iter().enumerate() {
            doc.sheet.set_row_height(row, height);
        }
        doc.sheet.set_frozen(state.frozen_rows, state.frozen_cols);
        doc.cf_rules = state.conditional_format_rules;
        doc.dv_rules = state.data_validation_rules;
        for (key, comment) in state.cell_comments {
            match parse_cell_key(&key) {
                Some(pos) => {
                    doc.comments.insert(pos, comment);
                }
                None => log::warn!("skipping comment with malformed key {key:?}"),
            }
        }
        doc.next_comment_id = doc.comments.len() as u64 + 1;
        doc
    }

    /// Replace the whole cell table, growing bounds to fit. Used by import
    /// codecs; goes through undo history like any other content mutation.
    pub fn replace_cells(&mut self, cells: FxHashMap<(usize, usize), Cell>, rows: usize, cols: usize) {
        self.record();
        self.sheet.replace_cells(cells, rows, cols);

        let delta = StateDelta {
            cells: Some(self.cells_map()),
            row_count: Some(self.sheet.rows()),
            col_count: Some(self.sheet.cols()),
            column_widths: Some(self.sheet.col_widths().to_vec()),
            row_heights: Some(self.sheet.row_heights().to_vec()),
            ..Default::default()
        };
        self.emit(delta);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn record(&mut self) {
        self.history.record(self.sheet.cells_snapshot());
    }

    fn emit(&mut self, delta: StateDelta) {
        if delta.is_empty() {
            return;
        }
        if let Some(listener) = &mut self.on_change {
            listener(&delta);
        }
    }

    fn cells_map(&self) -> BTreeMap<String, Cell> {
        self.sheet
            .cells_iter()
            .map(|(pos, cell)| (cell_key(pos.row, pos.col), cell.clone()))
            .collect()
    }

    fn comments_map(&self) -> BTreeMap<String, CellComment> {
        self.comments
            .iter()
            .map(|(&(row, col), c)| (cell_key(row, col), c.clone()))
            .collect()
    }

    fn cells_delta(&self) -> StateDelta {
        StateDelta {
            cells: Some(self.cells_map()),
            ..Default::default()
        }
    }

    fn cf_delta(&self) -> StateDelta {
        StateDelta {
            conditional_format_rules: Some(self.cf_rules.clone()),
            ..Default::default()
        }
    }

    fn dv_delta(&self) -> StateDelta {
        StateDelta {
            data_validation_rules: Some(self.dv_rules.clone()),
            ..Default::default()
        }
    }

    fn comments_delta(&self) -> StateDelta {
        StateDelta {
            cell_comments: Some(self.comments_map()),
            ..Default::default()
        }
    }

    fn structural_delta(&self, rules_changed: bool) -> StateDelta {
        StateDelta {
            cells: Some(self.cells_map()),
            row_count: Some(self.sheet.rows()),
            col_count: Some(self.sheet.cols()),
            column_widths: Some(self.sheet.col_widths().to_vec()),
            row_heights: Some(self.sheet.row_heights().to_vec()),
            frozen_rows: Some(self.sheet.frozen_rows()),
            frozen_cols: Some(self.sheet.frozen_cols()),
            conditional_format_rules: rules_changed.then(|| self.cf_rules.clone()),
            data_validation_rules: rules_changed.then(|| self.dv_rules.clone()),
            cell_comments: Some(self.comments_map()),
        }
    }

    /// Re-key rule ranges after a structural edit. Ranges that collapse are
    /// dropped; a rule with no ranges left is dropped entirely. Returns
    /// whether anything changed.
    fn shift_rule_ranges(&mut self, shift: impl Fn(&CellRange) -> Option<CellRange>) -> bool {
        let mut changed = false;

        let mut cf = Vec::with_capacity(self.cf_rules.len());
        for rule in &self.cf_rules {
            let ranges: Vec<CellRange> = rule.ranges.iter().filter_map(&shift).collect();
            if ranges != rule.ranges {
                changed = true;
            }
            if !ranges.is_empty() {
                let mut rule = rule.clone();
                rule.ranges = ranges;
                cf.push(rule);
            }
        }
        self.cf_rules = cf;

        let mut dv = Vec::with_capacity(self.dv_rules.len());
        for rule in &self.dv_rules {
            let ranges: Vec<CellRange> = rule.ranges.iter().filter_map(&shift).collect();
            if ranges != rule.ranges {
                changed = true;
            }
            if !ranges.is_empty() {
                let mut rule = rule.clone();
                rule.ranges = ranges;
                dv.push(rule);
            }
        }
        self.dv_rules = dv;

        changed
    }

    fn shift_comments(&mut self, shift: impl Fn((usize, usize)) -> Option<(usize, usize)>) {
        let old = std::mem::take(&mut self.comments);
        for (key, comment) in old {
            if let Some(new_key) = shift(key) {
                self.comments.insert(new_key, comment);
            }
        }
    }
}
