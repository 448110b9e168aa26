//! Host-facing persisted state and change notifications.
//!
//! The engine never touches disk. After every mutating call it hands the
//! host a [`StateDelta`] holding only the fields that changed; the host
//! merges deltas into its own persisted copy of [`DocumentState`]. Cell
//! tables serialize as objects keyed `"row,col"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::comment::CellComment;
use crate::conditional::ConditionalFormatRule;
use crate::validation::DataValidationRule;

pub fn cell_key(row: usize, col: usize) -> String {
    format!("{row},{col}")
}

pub fn parse_cell_key(key: &str) -> Option<(usize, usize)> {
    let (row, col) = key.split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// The full persisted shape of one document, as the host stores it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentState {
    pub cells: BTreeMap<String, Cell>,
    pub row_count: usize,
    pub col_count: usize,
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub frozen_rows: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub frozen_cols: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_format_rules: Vec<ConditionalFormatRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_validation_rules: Vec<DataValidationRule>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cell_comments: BTreeMap<String, CellComment>,
}

/// A shallow partial of [`DocumentState`]: only changed fields are present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<BTreeMap<String, Cell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_heights: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_cols: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_format_rules: Option<Vec<ConditionalFormatRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_validation_rules: Option<Vec<DataValidationRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_comments: Option<BTreeMap<String, CellComment>>,
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        *self == StateDelta::default()
    }
}

/// Callback the host registers to receive deltas after every mutation.
pub type ChangeListener = Box<dyn FnMut(&StateDelta)>;
