//! Data validation rules.
//!
//! Unlike conditional formatting, validation rules have no priority: the
//! first rule in array order whose ranges cover the queried cell decides,
//! and the rest are ignored. Validation is advisory; the engine reports the
//! verdict and the host decides whether to reject the edit.

use serde::{Deserialize, Serialize};

use gridnote_core::range::parse_a1_range;
use gridnote_core::CellPos;

use crate::sheet::Sheet;

/// Cap on dropdown items resolved from a `listSource` range.
const MAX_LIST_ITEMS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationType {
    List,
    Number,
    Decimal,
    Integer,
    TextLength,
    Date,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationOperator {
    Between,
    NotBetween,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorStyle {
    #[default]
    Stop,
    Warning,
    Information,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValidationRule {
    pub id: String,
    pub ranges: Vec<gridnote_core::CellRange>,
    #[serde(rename = "type")]
    pub kind: ValidationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
    /// A1-style range reference resolved against the sheet at query time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ValidationOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
    /// Blank candidates pass unless this is explicitly `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_blank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_style: Option<ErrorStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DataValidationRule {
    pub fn new(
        id: impl Into<String>,
        ranges: Vec<gridnote_core::CellRange>,
        kind: ValidationType,
    ) -> Self {
        Self {
            id: id.into(),
            ranges,
            kind,
            list_items: None,
            list_source: None,
            operator: None,
            value1: None,
            value2: None,
            allow_blank: None,
            error_style: None,
            error_message: None,
        }
    }

    pub fn covers(&self, pos: CellPos) -> bool {
        self.ranges.iter().any(|r| r.contains(pos))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self { valid: true, error: None }
    }

    fn fail(rule: &DataValidationRule, default_msg: String) -> Self {
        Self {
            valid: false,
            error: Some(rule.error_message.clone().unwrap_or(default_msg)),
        }
    }
}

/// Validate `candidate` as the prospective content of `pos`. Cells not
/// covered by any rule are always valid.
pub fn validate_cell_value(
    rules: &[DataValidationRule],
    sheet: &Sheet,
    pos: CellPos,
    candidate: &str,
) -> ValidationResult {
    let Some(rule) = rules.iter().find(|r| r.covers(pos)) else {
        return ValidationResult::ok();
    };

    if candidate.trim().is_empty() {
        return if rule.allow_blank == Some(false) {
            ValidationResult::fail(rule, "This cell does not allow blank values".into())
        } else {
            ValidationResult::ok()
        };
    }

    match rule.kind {
        ValidationType::List => {
            let items = resolve_list_items(rule, sheet);
            if items.iter().any(|i| i == candidate) {
                ValidationResult::ok()
            } else {
                ValidationResult::fail(rule, "Value must be one of the allowed list items".into())
            }
        }
        ValidationType::Number | ValidationType::Decimal => {
            match candidate.trim().parse::<f64>() {
                Ok(n) => check_operator(rule, n, "Value"),
                Err(_) => ValidationResult::fail(rule, "Value must be a number".into()),
            }
        }
        ValidationType::Integer => match candidate.trim().parse::<f64>() {
            Ok(n) if n.fract() == 0.0 => check_operator(rule, n, "Value"),
            _ => ValidationResult::fail(rule, "Value must be a whole number".into()),
        },
        ValidationType::TextLength => {
            check_operator(rule, candidate.chars().count() as f64, "Text length")
        }
        ValidationType::Date => {
            if chrono::NaiveDate::parse_from_str(candidate.trim(), "%Y-%m-%d").is_ok() {
                ValidationResult::ok()
            } else {
                ValidationResult::fail(rule, "Value must be a date (YYYY-MM-DD)".into())
            }
        }
        ValidationType::Custom => ValidationResult::ok(),
    }
}

/// Dropdown items for `pos`, from the first covering list rule. `None` when
/// no list rule applies.
pub fn validation_list_items(
    rules: &[DataValidationRule],
    sheet: &Sheet,
    pos: CellPos,
) -> Option<Vec<String>> {
    let rule = rules
        .iter()
        .find(|r| r.kind == ValidationType::List && r.covers(pos))?;
    Some(resolve_list_items(rule, sheet))
}

fn resolve_list_items(rule: &DataValidationRule, sheet: &Sheet) -> Vec<String> {
    if let Some(items) = &rule.list_items {
        return items.clone();
    }
    let Some(range) = rule.list_source.as_deref().and_then(parse_a1_range) else {
        return Vec::new();
    };
    let mut items = Vec::new();
    for pos in range.normalized().iter() {
        let text = sheet.get_display(pos);
        if !text.is_empty() {
            items.push(text);
            if items.len() >= MAX_LIST_ITEMS {
                break;
            }
        }
    }
    items
}

/// Shared numeric operator check for number/decimal/integer/textLength.
/// A missing operator or unparsable bound fails closed with a message.
fn check_operator(rule: &DataValidationRule, n: f64, subject: &str) -> ValidationResult {
    let Some(op) = rule.operator else {
        return ValidationResult::ok();
    };
    let v1 = rule.value1.as_deref().and_then(|v| v.trim().parse::<f64>().ok());
    let Some(a) = v1 else {
        return ValidationResult::fail(rule, format!("{subject} rule is missing a bound"));
    };
    let v2 = rule.value2.as_deref().and_then(|v| v.trim().parse::<f64>().ok());

    let (passed, default_msg) = match op {
        ValidationOperator::Between => match v2 {
            Some(b) => (
                n >= a.min(b) && n <= a.max(b),
                format!("{subject} must be between {a} and {b}"),
            ),
            None => (false, format!("{subject} rule is missing a bound")),
        },
        ValidationOperator::NotBetween => match v2 {
            Some(b) => (
                n < a.min(b) || n > a.max(b),
                format!("{subject} must not be between {a} and {b}"),
            ),
            None => (false, format!("{subject} rule is missing a bound")),
        },
        ValidationOperator::EqualTo => (n == a, format!("{subject} must equal {a}")),
        ValidationOperator::NotEqualTo => (n != a, format!("{subject} must not equal {a}")),
        ValidationOperator::GreaterThan => (n > a, format!("{subject} must be greater than {a}")),
        ValidationOperator::GreaterThanOrEqual => {
            (n >= a, format!("{subject} must be at least {a}"))
        }
        ValidationOperator::LessThan => (n < a, format!("{subject} must be less than {a}")),
        ValidationOperator::LessThanOrEqual => (n <= a, format!("{subject} must be at most {a}")),
    };

    if passed {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(rule, default_msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::UnsupportedEvaluator;
    use gridnote_core::CellRange;

    fn at(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    fn whole_col() -> Vec<CellRange> {
        vec![CellRange::new(at(0, 0), at(99, 0))]
    }

    fn between_rule(lo: &str, hi: &str) -> DataValidationRule {
        let mut r = DataValidationRule::new("v1", whole_col(), ValidationType::Number);
        r.operator = Some(ValidationOperator::Between);
        r.value1 = Some(lo.into());
        r.value2 = Some(hi.into());
        r
    }

    #[test]
    fn test_between_accepts_and_rejects() {
        let s = Sheet::new(10, 4);
        let rules = [between_rule("1", "10")];

        assert!(validate_cell_value(&rules, &s, at(0, 0), "5").valid);
        let res = validate_cell_value(&rules, &s, at(0, 0), "15");
        assert!(!res.valid);
        assert_eq!(res.error.as_deref(), Some("Value must be between 1 and 10"));
    }

    #[test]
    fn test_blank_passes_unless_disallowed() {
        let s = Sheet::new(10, 4);
        let mut rule = between_rule("1", "10");
        assert!(validate_cell_value(&[rule.clone()], &s, at(0, 0), "").valid);

        rule.allow_blank = Some(false);
        assert!(!validate_cell_value(&[rule], &s, at(0, 0), "").valid);
    }

    #[test]
    fn test_first_covering_rule_wins() {
        let s = Sheet::new(10, 4);
        let loose = between_rule("0", "100");
        let strict = between_rule("1", "2");
        // Array order decides, not strictness
        assert!(validate_cell_value(&[loose, strict], &s, at(0, 0), "50").valid);
    }

    #[test]
    fn test_uncovered_cell_is_always_valid() {
        let s = Sheet::new(10, 4);
        let rules = [between_rule("1", "2")];
        assert!(validate_cell_value(&rules, &s, at(0, 3), "999").valid);
    }

    #[test]
    fn test_list_items_membership() {
        let s = Sheet::new(10, 4);
        let mut rule = DataValidationRule::new("v1", whole_col(), ValidationType::List);
        rule.list_items = Some(vec!["red".into(), "green".into()]);
        let rules = [rule];

        assert!(validate_cell_value(&rules, &s, at(0, 0), "red").valid);
        assert!(!validate_cell_value(&rules, &s, at(0, 0), "blue").valid);
    }

    #[test]
    fn test_list_source_resolves_from_sheet() {
        let mut s = Sheet::new(10, 4);
        s.set_cell_text(at(0, 2), "alpha", &UnsupportedEvaluator);
        s.set_cell_text(at(2, 2), "beta", &UnsupportedEvaluator);

        let mut rule = DataValidationRule::new("v1", whole_col(), ValidationType::List);
        rule.list_source = Some("C1:C5".into());
        let rules = [rule];

        assert!(validate_cell_value(&rules, &s, at(0, 0), "beta").valid);
        assert!(!validate_cell_value(&rules, &s, at(0, 0), "gamma").valid);
        assert_eq!(
            validation_list_items(&rules, &s, at(0, 0)),
            Some(vec!["alpha".into(), "beta".into()])
        );
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let s = Sheet::new(10, 4);
        let mut rule = DataValidationRule::new("v1", whole_col(), ValidationType::Integer);
        rule.operator = Some(ValidationOperator::GreaterThan);
        rule.value1 = Some("0".into());
        let rules = [rule];

        assert!(validate_cell_value(&rules, &s, at(0, 0), "3").valid);
        assert!(!validate_cell_value(&rules, &s, at(0, 0), "3.5").valid);
    }

    #[test]
    fn test_text_length_counts_chars() {
        let s = Sheet::new(10, 4);
        let mut rule = DataValidationRule::new("v1", whole_col(), ValidationType::TextLength);
        rule.operator = Some(ValidationOperator::LessThanOrEqual);
        rule.value1 = Some("3".into());
        let rules = [rule];

        assert!(validate_cell_value(&rules, &s, at(0, 0), "abc").valid);
        assert!(!validate_cell_value(&rules, &s, at(0, 0), "abcd").valid);
    }

    #[test]
    fn test_date_checks_parseability_only() {
        let s = Sheet::new(10, 4);
        let rules = [DataValidationRule::new("v1", whole_col(), ValidationType::Date)];
        assert!(validate_cell_value(&rules, &s, at(0, 0), "2024-02-29").valid);
        assert!(!validate_cell_value(&rules, &s, at(0, 0), "2023-02-29").valid);
        assert!(!validate_cell_value(&rules, &s, at(0, 0), "not a date").valid);
    }

    #[test]
    fn test_custom_always_valid() {
        let s = Sheet::new(10, 4);
        let rules = [DataValidationRule::new("v1", whole_col(), ValidationType::Custom)];
        assert!(validate_cell_value(&rules, &s, at(0, 0), "anything").valid);
    }

    #[test]
    fn test_custom_error_message_overrides_default() {
        let s = Sheet::new(10, 4);
        let mut rule = between_rule("1", "10");
        rule.error_message = Some("Pick a score from 1 to 10".into());
        let res = validate_cell_value(&[rule], &s, at(0, 0), "42");
        assert_eq!(res.error.as_deref(), Some("Pick a score from 1 to 10"));
    }
}
