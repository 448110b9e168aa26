//! CSV import/export.
//!
//! Export writes display values: one record per row, RFC-4180 quoting,
//! trailing empty fields truncated and trailing all-empty rows omitted.
//! Interior blank rows survive so positions round-trip. Import coerces a
//! field to a number only when the parse is lossless (the number's own
//! stringification equals the field), and grows the grid when the file
//! exceeds the current bounds.

use rustc_hash::FxHashMap;

use gridnote_core::CellPos;
use gridnote_engine::cell::{fmt_number, Cell, CellValue};
use gridnote_engine::{Document, Sheet};

/// Serialize the sheet to CSV text.
pub fn export_to_string(sheet: &Sheet) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let last_row = (0..sheet.rows())
        .rev()
        .find(|&row| (0..sheet.cols()).any(|col| !display_at(sheet, row, col).is_empty()));
    let Some(last_row) = last_row else {
        return Ok(String::new());
    };

    for row in 0..=last_row {
        let mut record: Vec<String> = (0..sheet.cols())
            .map(|col| display_at(sheet, row, col))
            .collect();
        while record.len() > 1 && record.last().is_some_and(|f| f.is_empty()) {
            record.pop();
        }
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Hidden merge slaves export as empty so residual values never leak.
fn display_at(sheet: &Sheet, row: usize, col: usize) -> String {
    let pos = CellPos::new(row, col);
    if sheet.is_merge_hidden(pos) {
        String::new()
    } else {
        sheet.get_display(pos)
    }
}

/// Parse CSV text into a cell table plus its extent (rows, cols).
pub fn parse(content: &str) -> Result<(FxHashMap<(usize, usize), Cell>, usize, usize), String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut cells = FxHashMap::default();
    let mut rows = 0usize;
    let mut cols = 0usize;

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| e.to_string())?;
        rows = row + 1;
        for (col, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            cols = cols.max(col + 1);
            let mut cell = Cell::new();
            cell.value = coerce(field);
            cells.insert((row, col), cell);
        }
    }

    Ok((cells, rows, cols))
}

/// Replace the document's cells with the parsed CSV, growing the grid to
/// fit. Goes through undo history like any other content mutation.
pub fn import_into(doc: &mut Document, content: &str) -> Result<(), String> {
    let (cells, rows, cols) = parse(content)?;
    log::info!("csv import: {} cells over {rows}x{cols}", cells.len());
    let rows = rows.max(doc.sheet().rows());
    let cols = cols.max(doc.sheet().cols());
    doc.replace_cells(cells, rows, cols);
    Ok(())
}

/// A field becomes a number only when nothing is lost in translation:
/// its parse stringifies back to the exact field text.
fn coerce(field: &str) -> CellValue {
    if let Ok(n) = field.parse::<f64>() {
        if n.is_finite() && fmt_number(n) == field {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(field.to_string())
}
