//! The formula-evaluation seam.
//!
//! The engine does not parse or evaluate spreadsheet formulas itself; it
//! hands the raw expression and the current cell table to an external
//! evaluator and stores whatever comes back. Keeping the evaluator behind a
//! narrow trait lets the engine's own tests run with a stub.

use crate::cell::CellError;
use crate::sheet::Sheet;

/// A value produced by the external evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    Number(f64),
    Text(String),
    Bool(bool),
    /// Array results: the engine displays the first element.
    List(Vec<EvalValue>),
}

/// External formula evaluator contract.
///
/// Evaluators signal formula-level failures (`#DIV/0!`, `#REF!`, ...) via
/// `Err`. Implementations must not panic on malformed input; anything the
/// evaluator cannot handle should come back as `Err(CellError::Error)`.
pub trait FormulaEvaluator {
    /// Evaluate `expr` (including the leading `=`) against the sheet.
    fn evaluate(&self, expr: &str, sheet: &Sheet) -> Result<EvalValue, CellError>;
}

/// Evaluator used when the host wires no formula engine: every formula
/// resolves to `#ERROR!` instead of crashing or silently storing text.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedEvaluator;

impl FormulaEvaluator for UnsupportedEvaluator {
    fn evaluate(&self, _expr: &str, _sheet: &Sheet) -> Result<EvalValue, CellError> {
        Err(CellError::Error)
    }
}

impl EvalValue {
    /// Collapse to the scalar the cell stores: booleans lower to the strings
    /// `TRUE`/`FALSE`, lists collapse to their first element.
    pub fn into_scalar(self) -> EvalValue {
        match self {
            EvalValue::Bool(b) => EvalValue::Text(if b { "TRUE" } else { "FALSE" }.to_string()),
            EvalValue::List(items) => match items.into_iter().next() {
                Some(first) => first.into_scalar(),
                None => EvalValue::Text(String::new()),
            },
            other => other,
        }
    }
}
