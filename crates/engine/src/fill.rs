//! Fill-handle extrapolation.
//!
//! Each line (column for vertical fills, row for horizontal ones) is
//! extended independently. A line whose source cells are all numeric
//! continues as an arithmetic progression, all ISO dates step by the
//! inferred day delta, and anything else repeats cyclically. Styles come
//! along from the correspondingly wrapped source cell.

use chrono::{Duration, NaiveDate};

use gridnote_core::{CellPos, CellRange};

use crate::cell::{fmt_number, Cell, CellValue};
use crate::formula::FormulaEvaluator;
use crate::sheet::Sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    Down,
    Up,
    Right,
    Left,
}

impl FillDirection {
    fn is_vertical(self) -> bool {
        matches!(self, FillDirection::Down | FillDirection::Up)
    }

    fn is_reverse(self) -> bool {
        matches!(self, FillDirection::Up | FillDirection::Left)
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a single source line extrapolates to.
enum LinePattern {
    /// `last + step`, `last + 2*step`, ...
    Arithmetic { last: f64, step: f64 },
    /// Same progression over calendar days.
    Date { last: NaiveDate, step_days: i64 },
    /// Repeat the source cells verbatim, empties included.
    Cyclic,
}

impl LinePattern {
    fn detect(items: &[Option<Cell>]) -> Self {
        let numbers: Option<Vec<f64>> = items
            .iter()
            .map(|c| c.as_ref().and_then(|c| c.value.as_number()))
            .collect();
        if let Some(nums) = numbers {
            let step = if nums.len() < 2 {
                1.0
            } else {
                (nums[nums.len() - 1] - nums[0]) / (nums.len() - 1) as f64
            };
            return LinePattern::Arithmetic {
                last: nums[nums.len() - 1],
                step,
            };
        }

        let dates: Option<Vec<NaiveDate>> = items
            .iter()
            .map(|c| {
                c.as_ref().and_then(|c| match &c.value {
                    CellValue::Text(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
                    _ => None,
                })
            })
            .collect();
        if let Some(dates) = dates {
            let step_days = if dates.len() < 2 {
                1
            } else {
                (dates[dates.len() - 1] - dates[0]).num_days() / (dates.len() - 1) as i64
            };
            return LinePattern::Date {
                last: dates[dates.len() - 1],
                step_days,
            };
        }

        LinePattern::Cyclic
    }
}

/// Raw text that reproduces the cell when typed back in.
fn raw_text(cell: &Cell) -> String {
    if let Some(formula) = &cell.formula {
        return formula.clone();
    }
    match &cell.value {
        CellValue::Number(n) => fmt_number(*n),
        CellValue::Text(s) => s.clone(),
        CellValue::Empty => String::new(),
    }
}

/// Extend `source` by `count` cells in `direction` and return the combined
/// source-plus-fill rectangle.
///
/// Fills toward the sheet origin stop at row/column zero, so the effective
/// count can be smaller than requested. The sheet grows as needed for fills
/// away from the origin.
pub fn auto_fill(
    sheet: &mut Sheet,
    source: CellRange,
    direction: FillDirection,
    count: usize,
    evaluator: &dyn FormulaEvaluator,
) -> CellRange {
    let source = source.normalized();
    let count = match direction {
        FillDirection::Up => count.min(source.start.row),
        FillDirection::Left => count.min(source.start.col),
        _ => count,
    };
    if count == 0 {
        return source;
    }

    match direction {
        FillDirection::Down => sheet.ensure_size(source.end.row + count + 1, sheet.cols()),
        FillDirection::Right => sheet.ensure_size(sheet.rows(), source.end.col + count + 1),
        _ => {}
    }

    let lines: Vec<usize> = if direction.is_vertical() {
        (source.start.col..=source.end.col).collect()
    } else {
        (source.start.row..=source.end.row).collect()
    };

    for line in lines {
        // Source cells in extrapolation order, i.e. ending nearest the fill
        let mut items: Vec<Option<Cell>> = if direction.is_vertical() {
            (source.start.row..=source.end.row)
                .map(|row| sheet.get_cell(CellPos::new(row, line)).cloned())
                .collect()
        } else {
            (source.start.col..=source.end.col)
                .map(|col| sheet.get_cell(CellPos::new(line, col)).cloned())
                .collect()
        };
        if direction.is_reverse() {
            items.reverse();
        }

        let pattern = LinePattern::detect(&items);
        for k in 0..count {
            let target = match direction {
                FillDirection::Down => CellPos::new(source.end.row + 1 + k, line),
                FillDirection::Up => CellPos::new(source.start.row - 1 - k, line),
                FillDirection::Right => CellPos::new(line, source.end.col + 1 + k),
                FillDirection::Left => CellPos::new(line, source.start.col - 1 - k),
            };
            let wrapped = &items[k % items.len()];

            match &pattern {
                LinePattern::Arithmetic { last, step } => {
                    let next = last + step * (k as f64 + 1.0);
                    sheet.set_cell_text(target, &fmt_number(next), evaluator);
                }
                LinePattern::Date { last, step_days } => {
                    let next = *last + Duration::days(step_days * (k as i64 + 1));
                    sheet.set_cell_text(target, &next.format(DATE_FORMAT).to_string(), evaluator);
                }
                LinePattern::Cyclic => match wrapped {
                    Some(cell) => {
                        sheet.set_cell_text(target, &raw_text(cell), evaluator);
                    }
                    None => sheet.remove_cell(target),
                },
            }

            if let Some(cell) = wrapped {
                if !cell.style.is_default() {
                    sheet.set_style(target, cell.style.clone());
                }
            }
        }
    }

    let filled = match direction {
        FillDirection::Down => {
            CellRange::new(source.start, CellPos::new(source.end.row + count, source.end.col))
        }
        FillDirection::Up => {
            CellRange::new(CellPos::new(source.start.row - count, source.start.col), source.end)
        }
        FillDirection::Right => {
            CellRange::new(source.start, CellPos::new(source.end.row, source.end.col + count))
        }
        FillDirection::Left => {
            CellRange::new(CellPos::new(source.start.row, source.start.col - count), source.end)
        }
    };
    filled
}
