//! Grid coordinates and rectangular ranges.
//!
//! A `CellRange` is stored exactly as the user dragged it: the endpoints are
//! not required to be ordered. Every consumer must go through `normalized()`
//! before interpreting the rectangle.

use serde::{Deserialize, Serialize};

/// A single cell coordinate (0-based row and column).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", col_to_letters(self.col), self.row + 1)
    }
}

/// A rectangular cell range with unordered endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellPos,
    pub end: CellPos,
}

impl CellRange {
    pub fn new(start: CellPos, end: CellPos) -> Self {
        Self { start, end }
    }

    /// Single-cell range.
    pub fn cell(pos: CellPos) -> Self {
        Self { start: pos, end: pos }
    }

    /// Return the same rectangle with `start` at the top-left and `end` at
    /// the bottom-right.
    pub fn normalized(&self) -> Self {
        Self {
            start: CellPos::new(
                self.start.row.min(self.end.row),
                self.start.col.min(self.end.col),
            ),
            end: CellPos::new(
                self.start.row.max(self.end.row),
                self.start.col.max(self.end.col),
            ),
        }
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        let r = self.normalized();
        pos.row >= r.start.row && pos.row <= r.end.row && pos.col >= r.start.col && pos.col <= r.end.col
    }

    pub fn rows(&self) -> usize {
        let r = self.normalized();
        r.end.row - r.start.row + 1
    }

    pub fn cols(&self) -> usize {
        let r = self.normalized();
        r.end.col - r.start.col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_single_cell(&self) -> bool {
        self.cell_count() == 1
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.start.row <= b.end.row
            && b.start.row <= a.end.row
            && a.start.col <= b.end.col
            && b.start.col <= a.end.col
    }

    /// Iterate positions row-major over the normalized rectangle.
    pub fn iter(&self) -> impl Iterator<Item = CellPos> {
        let r = self.normalized();
        (r.start.row..=r.end.row)
            .flat_map(move |row| (r.start.col..=r.end.col).map(move |col| CellPos::new(row, col)))
    }

    /// Range after inserting one row after `after_row`: rows strictly below
    /// the insertion point shift down by one.
    pub fn after_row_insert(&self, after_row: usize) -> Self {
        let shift = |row: usize| if row > after_row { row + 1 } else { row };
        Self {
            start: CellPos::new(shift(self.start.row), self.start.col),
            end: CellPos::new(shift(self.end.row), self.end.col),
        }
    }

    /// Range after deleting `row`. Returns `None` when the range collapses
    /// to nothing (it spanned exactly the deleted row).
    pub fn after_row_delete(&self, row: usize) -> Option<Self> {
        let r = self.normalized();
        if r.start.row == r.end.row && r.start.row == row {
            return None;
        }
        let shift_start = |v: usize| if v > row { v - 1 } else { v };
        // End shrinks when the deleted row is inside the range.
        let end_row = if r.end.row >= row { r.end.row - 1 } else { r.end.row };
        Some(Self {
            start: CellPos::new(shift_start(r.start.row), r.start.col),
            end: CellPos::new(end_row.max(shift_start(r.start.row)), r.end.col),
        })
    }

    /// Range after inserting one column after `after_col`.
    pub fn after_col_insert(&self, after_col: usize) -> Self {
        let shift = |col: usize| if col > after_col { col + 1 } else { col };
        Self {
            start: CellPos::new(self.start.row, shift(self.start.col)),
            end: CellPos::new(self.end.row, shift(self.end.col)),
        }
    }

    /// Range after deleting `col`. Returns `None` when the range collapses.
    pub fn after_col_delete(&self, col: usize) -> Option<Self> {
        let r = self.normalized();
        if r.start.col == r.end.col && r.start.col == col {
            return None;
        }
        let shift_start = |v: usize| if v > col { v - 1 } else { v };
        let end_col = if r.end.col >= col { r.end.col - 1 } else { r.end.col };
        Some(Self {
            start: CellPos::new(r.start.row, shift_start(r.start.col)),
            end: CellPos::new(r.end.row, end_col.max(shift_start(r.start.col))),
        })
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.normalized();
        write!(f, "{}:{}", r.start, r.end)
    }
}

/// Convert 0-based column index to letter(s): 0=A, 25=Z, 26=AA.
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Parse an A1-style reference ("B3") into a `CellPos`.
pub fn parse_a1(text: &str) -> Option<CellPos> {
    let text = text.trim();
    let split = text.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = text.split_at(split);
    if letters.is_empty() || digits.is_empty() {
        return None;
    }
    let mut col = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(CellPos::new(row - 1, col - 1))
}

/// Parse an A1-style range ("A1:B3"). A bare reference parses as a
/// single-cell range.
pub fn parse_a1_range(text: &str) -> Option<CellRange> {
    let text = text.trim().trim_start_matches('=');
    match text.split_once(':') {
        Some((a, b)) => Some(CellRange::new(parse_a1(a)?, parse_a1(b)?)),
        None => parse_a1(text).map(CellRange::cell),
    }
}
