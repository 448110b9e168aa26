//! Stable column sort with full-row relocation.
//!
//! Sorting one column moves the whole row, matching spreadsheet semantics:
//! the permutation is computed here and applied to the sheet by the caller
//! (via `Sheet::apply_row_order`), so every column's cells travel together.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use gridnote_core::CellPos;

use crate::sheet::Sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sortable key. Blank cells always sort last regardless of direction;
/// two non-blank keys compare numerically when both parse as numbers and
/// fall back to case-insensitive lexical order otherwise.
#[derive(Debug, Clone)]
struct SortKey {
    number: Option<OrderedFloat<f64>>,
    text: String,
    blank: bool,
}

impl SortKey {
    fn of(sheet: &Sheet, row: usize, col: usize) -> Self {
        let cell = sheet.get_cell(CellPos::new(row, col));
        let display = cell.map(|c| c.display()).unwrap_or_default();
        let number = cell.and_then(|c| c.value.as_number()).map(OrderedFloat);
        Self {
            blank: display.is_empty(),
            text: display.to_lowercase(),
            number,
        }
    }

    fn cmp_asc(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.text.cmp(&other.text),
        }
    }
}

/// Compute the row permutation for sorting `col`: `order[new_row] = old_row`.
///
/// Stable: equal keys keep their original relative order. The direction
/// flips the comparator sign, never the blanks-last rule.
pub fn sort_order(sheet: &Sheet, col: usize, direction: SortDirection) -> Vec<usize> {
    let mut rows: Vec<(usize, SortKey)> = (0..sheet.rows())
        .map(|row| (row, SortKey::of(sheet, row, col)))
        .collect();

    rows.sort_by(|(_, a), (_, b)| match (a.blank, b.blank) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.cmp_asc(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    });

    rows.into_iter().map(|(row, _)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::UnsupportedEvaluator;

    fn at(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    fn sheet_with_col(values: &[&str]) -> Sheet {
        let mut s = Sheet::new(values.len().max(2), 4);
        for (row, v) in values.iter().enumerate() {
            if !v.is_empty() {
                s.set_cell_text(at(row, 0), v, &UnsupportedEvaluator);
            }
        }
        s
    }

    fn col_after_sort(s: &mut Sheet, direction: SortDirection) -> Vec<String> {
        let order = sort_order(s, 0, direction);
        s.apply_row_order(&order);
        (0..s.rows()).map(|r| s.get_display(at(r, 0))).collect()
    }

    #[test]
    fn test_numeric_ascending_blanks_last() {
        let mut s = sheet_with_col(&["3", "", "1", "2"]);
        let sorted = col_after_sort(&mut s, SortDirection::Ascending);
        assert_eq!(sorted, vec!["1", "2", "3", ""]);
    }

    #[test]
    fn test_descending_keeps_blanks_last() {
        let mut s = sheet_with_col(&["3", "", "1", "2"]);
        let sorted = col_after_sort(&mut s, SortDirection::Descending);
        assert_eq!(sorted, vec!["3", "2", "1", ""]);
    }

    #[test]
    fn test_text_sort_case_insensitive() {
        let mut s = sheet_with_col(&["banana", "Apple", "cherry"]);
        let sorted = col_after_sort(&mut s, SortDirection::Ascending);
        assert_eq!(sorted, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_numbers_compare_numerically_not_lexically() {
        let mut s = sheet_with_col(&["10", "9", "100"]);
        let sorted = col_after_sort(&mut s, SortDirection::Ascending);
        assert_eq!(sorted, vec!["9", "10", "100"]);
    }

    #[test]
    fn test_rows_travel_together() {
        let mut s = sheet_with_col(&["30", "10", "20"]);
        s.set_cell_text(at(0, 1), "Alice", &UnsupportedEvaluator);
        s.set_cell_text(at(1, 1), "Bob", &UnsupportedEvaluator);
        s.set_cell_text(at(2, 1), "Charlie", &UnsupportedEvaluator);

        let order = sort_order(&s, 0, SortDirection::Ascending);
        s.apply_row_order(&order);

        assert_eq!(s.get_display(at(0, 0)), "10");
        assert_eq!(s.get_display(at(0, 1)), "Bob");
        assert_eq!(s.get_display(at(1, 1)), "Charlie");
        assert_eq!(s.get_display(at(2, 1)), "Alice");
    }

    #[test]
    fn test_stability_for_equal_keys() {
        let mut s = sheet_with_col(&["x", "x", "x"]);
        let order = sort_order(&s, 0, SortDirection::Ascending);
        assert_eq!(order[..3], [0, 1, 2]);
    }

    #[test]
    fn test_mixed_falls_back_to_lexical() {
        // "5" vs "zebra": not both numeric, so lexical order applies
        let mut s = sheet_with_col(&["zebra", "5"]);
        let sorted = col_after_sort(&mut s, SortDirection::Ascending);
        assert_eq!(sorted[0], "5");
        assert_eq!(sorted[1], "zebra");
    }
}
