//! Spreadsheet state engine: sparse cell table, rule evaluation, structural
//! edits, history, and the document facade the host embeds.
//!
//! The engine is synchronous and does no I/O. Formula evaluation is an
//! external collaborator behind [`formula::FormulaEvaluator`]; persistence
//! happens in the host, driven by [`events::StateDelta`] notifications.

pub mod cell;
pub mod clipboard;
pub mod comment;
pub mod conditional;
pub mod document;
pub mod events;
pub mod fill;
pub mod formula;
pub mod history;
pub mod sheet;
pub mod sort;
pub mod validation;

pub use cell::{Cell, CellBorder, CellError, CellStyle, CellValue, Color, NumberFormat};
pub use comment::CellComment;
pub use conditional::ConditionalFormatRule;
pub use document::Document;
pub use events::{DocumentState, StateDelta};
pub use fill::FillDirection;
pub use formula::{EvalValue, FormulaEvaluator, UnsupportedEvaluator};
pub use sheet::{MergeInfo, Sheet};
pub use sort::SortDirection;
pub use validation::{DataValidationRule, ValidationResult};

pub use gridnote_core::{CellPos, CellRange, Selection};
