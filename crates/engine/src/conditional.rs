//! Conditional formatting rules.
//!
//! Rules never mutate stored cell styles; they are evaluated at query time
//! against the live sheet. Style rules resolve through the priority chain,
//! while color scales and data bars are independent visual channels with
//! their own query functions.

use serde::{Deserialize, Serialize};

use gridnote_core::{CellPos, CellRange};

use crate::cell::{CellStyle, Color};
use crate::sheet::Sheet;

/// Predicate kinds. Color scale, data bar, and icon set are visual channels
/// rather than predicates; the style resolution path skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    EqualTo,
    NotEqualTo,
    Between,
    NotBetween,
    ContainsText,
    NotContainsText,
    BeginsWith,
    EndsWith,
    ContainsBlanks,
    NotContainsBlanks,
    ContainsErrors,
    NotContainsErrors,
    DuplicateValues,
    UniqueValues,
    Top10,
    Bottom10,
    AboveAverage,
    BelowAverage,
    ColorScale,
    DataBar,
    IconSet,
}

impl RuleKind {
    pub fn is_visual_channel(self) -> bool {
        matches!(self, RuleKind::ColorScale | RuleKind::DataBar | RuleKind::IconSet)
    }
}

/// Two or three stop colors, interpolated over the rule range's value span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScale {
    pub min_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_color: Option<Color>,
    pub max_color: Color,
}

/// Bound of a data bar axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum BarBound {
    Auto,
    Number(f64),
    Percentile(f64),
}

impl Default for BarBound {
    fn default() -> Self {
        BarBound::Auto
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBar {
    pub color: Color,
    #[serde(default)]
    pub min: BarBound,
    #[serde(default)]
    pub max: BarBound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatRule {
    pub id: String,
    pub ranges: Vec<CellRange>,
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<ColorScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_bar: Option<DataBar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub percent: bool,
    pub priority: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stop_if_true: bool,
}

impl ConditionalFormatRule {
    pub fn new(id: impl Into<String>, ranges: Vec<CellRange>, kind: RuleKind, priority: i32) -> Self {
        Self {
            id: id.into(),
            ranges,
            kind,
            value: None,
            value2: None,
            style: None,
            color_scale: None,
            data_bar: None,
            rank: None,
            percent: false,
            priority,
            stop_if_true: false,
        }
    }

    pub fn covers(&self, pos: CellPos) -> bool {
        self.ranges.iter().any(|r| r.contains(pos))
    }
}

/// Rules covering `pos`, ascending priority, ties kept in array order.
fn covering<'a>(rules: &'a [ConditionalFormatRule], pos: CellPos) -> Vec<&'a ConditionalFormatRule> {
    let mut hits: Vec<&ConditionalFormatRule> =
        rules.iter().filter(|r| r.covers(pos)).collect();
    hits.sort_by_key(|r| r.priority);
    hits
}

/// Resolve the style override for `pos`: the first matching rule with a
/// non-empty style wins; a matching `stopIfTrue` rule halts the chain even
/// when it contributes nothing.
pub fn style_for_cell(
    rules: &[ConditionalFormatRule],
    sheet: &Sheet,
    pos: CellPos,
) -> Option<CellStyle> {
    for rule in covering(rules, pos) {
        if rule.kind.is_visual_channel() {
            continue;
        }
        if !matches(rule, sheet, pos) {
            continue;
        }
        if let Some(style) = &rule.style {
            if !style.is_default() {
                return Some(style.clone());
            }
        }
        if rule.stop_if_true {
            return None;
        }
    }
    None
}

/// Interpolated color for `pos` from the first covering color-scale rule.
/// `None` for non-numeric cells or when no rule applies.
pub fn color_scale_color(
    rules: &[ConditionalFormatRule],
    sheet: &Sheet,
    pos: CellPos,
) -> Option<Color> {
    let rule = covering(rules, pos)
        .into_iter()
        .find(|r| r.kind == RuleKind::ColorScale && r.color_scale.is_some())?;
    let scale = rule.color_scale.as_ref()?;
    let value = cell_number(sheet, pos)?;

    let values = numeric_values(sheet, &rule.ranges);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || max <= min {
        return Some(scale.min_color);
    }

    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    Some(match &scale.mid_color {
        Some(mid) => {
            if t < 0.5 {
                scale.min_color.lerp(*mid, t * 2.0)
            } else {
                mid.lerp(scale.max_color, (t - 0.5) * 2.0)
            }
        }
        None => scale.min_color.lerp(scale.max_color, t),
    })
}

/// Fill percentage and bar color for `pos` from the first covering data-bar
/// rule. The percentage is clamped to `[0, 100]`.
pub fn data_bar_fill(
    rules: &[ConditionalFormatRule],
    sheet: &Sheet,
    pos: CellPos,
) -> Option<(f64, Color)> {
    let rule = covering(rules, pos)
        .into_iter()
        .find(|r| r.kind == RuleKind::DataBar && r.data_bar.is_some())?;
    let bar = rule.data_bar.as_ref()?;
    let value = cell_number(sheet, pos)?;

    let mut values = numeric_values(sheet, &rule.ranges);
    values.sort_by(|a, b| a.total_cmp(b));
    let min = resolve_bound(bar.min, &values, true)?;
    let max = resolve_bound(bar.max, &values, false)?;

    let percent = if max <= min {
        100.0
    } else {
        ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
    };
    Some((percent, bar.color))
}

fn resolve_bound(bound: BarBound, sorted: &[f64], is_min: bool) -> Option<f64> {
    match bound {
        BarBound::Number(n) => Some(n),
        BarBound::Auto => {
            if is_min {
                sorted.first().copied()
            } else {
                sorted.last().copied()
            }
        }
        BarBound::Percentile(p) => percentile(sorted, p.clamp(0.0, 100.0)),
    }
}

/// Linear-interpolation percentile over an ascending slice.
fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    let frac = idx - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn cell_number(sheet: &Sheet, pos: CellPos) -> Option<f64> {
    sheet.get_cell(pos).and_then(|c| c.value.as_number())
}

fn cell_display(sheet: &Sheet, pos: CellPos) -> String {
    sheet.get_display(pos)
}

/// Every numeric value in `ranges`, order unspecified.
fn numeric_values(sheet: &Sheet, ranges: &[CellRange]) -> Vec<f64> {
    let mut out = Vec::new();
    for range in ranges {
        for pos in range.normalized().iter() {
            if let Some(n) = cell_number(sheet, pos) {
                out.push(n);
            }
        }
    }
    out
}

fn matches(rule: &ConditionalFormatRule, sheet: &Sheet, pos: CellPos) -> bool {
    match rule.kind {
        RuleKind::GreaterThan
        | RuleKind::GreaterThanOrEqual
        | RuleKind::LessThan
        | RuleKind::LessThanOrEqual
        | RuleKind::EqualTo
        | RuleKind::NotEqualTo
        | RuleKind::Between
        | RuleKind::NotBetween => comparison_matches(rule, sheet, pos),

        RuleKind::ContainsText => text_matches(rule, sheet, pos, |hay, needle| hay.contains(needle)),
        RuleKind::NotContainsText => {
            !text_matches(rule, sheet, pos, |hay, needle| hay.contains(needle))
        }
        RuleKind::BeginsWith => text_matches(rule, sheet, pos, |hay, needle| hay.starts_with(needle)),
        RuleKind::EndsWith => text_matches(rule, sheet, pos, |hay, needle| hay.ends_with(needle)),

        RuleKind::ContainsBlanks => cell_display(sheet, pos).is_empty(),
        RuleKind::NotContainsBlanks => !cell_display(sheet, pos).is_empty(),
        RuleKind::ContainsErrors => sheet.get_cell(pos).is_some_and(|c| c.error.is_some()),
        RuleKind::NotContainsErrors => !sheet.get_cell(pos).is_some_and(|c| c.error.is_some()),

        RuleKind::DuplicateValues => occurrence_count(rule, sheet, pos) >= 2,
        RuleKind::UniqueValues => occurrence_count(rule, sheet, pos) == 1,

        RuleKind::AboveAverage | RuleKind::BelowAverage => {
            let Some(value) = cell_number(sheet, pos) else {
                return false;
            };
            let values = numeric_values(sheet, &rule.ranges);
            if values.is_empty() {
                return false;
            }
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            if rule.kind == RuleKind::AboveAverage {
                value > mean
            } else {
                value < mean
            }
        }

        RuleKind::Top10 | RuleKind::Bottom10 => rank_matches(rule, sheet, pos),

        RuleKind::ColorScale | RuleKind::DataBar | RuleKind::IconSet => true,
    }
}

/// Numeric compare when both sides coerce; equality kinds fall back to
/// case-insensitive string compare, ordering kinds are simply false.
fn comparison_matches(rule: &ConditionalFormatRule, sheet: &Sheet, pos: CellPos) -> bool {
    let display = cell_display(sheet, pos);
    if display.is_empty() {
        return false;
    }
    let lhs = cell_number(sheet, pos);
    let rhs = rule.value.as_deref().and_then(|v| v.trim().parse::<f64>().ok());

    if let (Some(a), Some(b)) = (lhs, rhs) {
        let b2 = rule.value2.as_deref().and_then(|v| v.trim().parse::<f64>().ok());
        return match rule.kind {
            RuleKind::GreaterThan => a > b,
            RuleKind::GreaterThanOrEqual => a >= b,
            RuleKind::LessThan => a < b,
            RuleKind::LessThanOrEqual => a <= b,
            RuleKind::EqualTo => a == b,
            RuleKind::NotEqualTo => a != b,
            RuleKind::Between => b2.is_some_and(|hi| a >= b.min(hi) && a <= b.max(hi)),
            RuleKind::NotBetween => b2.is_some_and(|hi| a < b.min(hi) || a > b.max(hi)),
            _ => false,
        };
    }

    match rule.kind {
        RuleKind::EqualTo => rule
            .value
            .as_deref()
            .is_some_and(|v| v.to_lowercase() == display.to_lowercase()),
        RuleKind::NotEqualTo => rule
            .value
            .as_deref()
            .is_some_and(|v| v.to_lowercase() != display.to_lowercase()),
        _ => false,
    }
}

fn text_matches(
    rule: &ConditionalFormatRule,
    sheet: &Sheet,
    pos: CellPos,
    pred: impl Fn(&str, &str) -> bool,
) -> bool {
    let Some(needle) = rule.value.as_deref() else {
        return false;
    };
    pred(&cell_display(sheet, pos).to_lowercase(), &needle.to_lowercase())
}

/// How many cells in the rule's ranges display the same (case-insensitive)
/// value as `pos`. Zero for blank cells.
fn occurrence_count(rule: &ConditionalFormatRule, sheet: &Sheet, pos: CellPos) -> usize {
    let target = cell_display(sheet, pos).to_lowercase();
    if target.is_empty() {
        return 0;
    }
    let mut count = 0;
    for range in &rule.ranges {
        for p in range.normalized().iter() {
            if cell_display(sheet, p).to_lowercase() == target {
                count += 1;
            }
        }
    }
    count
}

fn rank_matches(rule: &ConditionalFormatRule, sheet: &Sheet, pos: CellPos) -> bool {
    let Some(value) = cell_number(sheet, pos) else {
        return false;
    };
    let mut values = numeric_values(sheet, &rule.ranges);
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    if values.is_empty() {
        return false;
    }

    let rank = rule.rank.unwrap_or(10);
    let take = if rule.percent {
        ((rank as f64 / 100.0) * values.len() as f64).ceil() as usize
    } else {
        rank
    };
    let take = take.min(values.len());

    let threshold_idx = match rule.kind {
        // Top: the `take` largest of the deduplicated values
        RuleKind::Top10 => values.len() - take,
        _ => 0,
    };
    match rule.kind {
        RuleKind::Top10 => value >= values[threshold_idx],
        RuleKind::Bottom10 => take > 0 && value <= values[take - 1],
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::UnsupportedEvaluator;

    fn at(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    fn col_range(rows: usize) -> CellRange {
        CellRange::new(at(0, 0), at(rows - 1, 0))
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

    fn bold_style() -> CellStyle {
        let mut st = CellStyle::default();
        st.bold = true;
        st
    }

    fn red_style() -> CellStyle {
        let mut st = CellStyle::default();
        st.color = Some(Color::new(255, 0, 0));
        st
    }

    fn rule(kind: RuleKind, priority: i32, ranges: Vec<CellRange>) -> ConditionalFormatRule {
        ConditionalFormatRule::new(format!("r{priority}"), ranges, kind, priority)
    }

    #[test]
    fn test_greater_than_matches_numerically() {
        let s = sheet_with_col(&["5", "15"]);
        let mut r = rule(RuleKind::GreaterThan, 0, vec![col_range(2)]);
        r.value = Some("10".into());
        r.style = Some(bold_style());
        let rules = [r];

        assert!(style_for_cell(&rules, &s, at(0, 0)).is_none());
        assert!(style_for_cell(&rules, &s, at(1, 0)).is_some());
    }

    #[test]
    fn test_failed_coercion_is_false_not_panic() {
        let s = sheet_with_col(&["banana"]);
        let mut r = rule(RuleKind::LessThan, 0, vec![col_range(1)]);
        r.value = Some("10".into());
        r.style = Some(bold_style());
        assert!(style_for_cell(&[r], &s, at(0, 0)).is_none());
    }

    #[test]
    fn test_equal_to_falls_back_to_strings() {
        let s = sheet_with_col(&["Hello"]);
        let mut r = rule(RuleKind::EqualTo, 0, vec![col_range(1)]);
        r.value = Some("hello".into());
        r.style = Some(bold_style());
        assert!(style_for_cell(&[r], &s, at(0, 0)).is_some());
    }

    #[test]
    fn test_between_is_inclusive() {
        let s = sheet_with_col(&["1", "5", "10", "11"]);
        let mut r = rule(RuleKind::Between, 0, vec![col_range(4)]);
        r.value = Some("1".into());
        r.value2 = Some("10".into());
        r.style = Some(bold_style());
        let rules = [r];

        assert!(style_for_cell(&rules, &s, at(0, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(2, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(3, 0)).is_none());
    }

    #[test]
    fn test_priority_order_and_stop_if_true() {
        let s = sheet_with_col(&["5"]);
        // Both rules match; rule 0 stops the chain without contributing
        let mut stopper = rule(RuleKind::GreaterThan, 0, vec![col_range(1)]);
        stopper.value = Some("0".into());
        stopper.stop_if_true = true;
        let mut styled = rule(RuleKind::GreaterThan, 1, vec![col_range(1)]);
        styled.value = Some("0".into());
        styled.style = Some(red_style());

        // Array order deliberately reversed from priority order
        let rules = [styled, stopper];
        assert!(style_for_cell(&rules, &s, at(0, 0)).is_none());
    }

    #[test]
    fn test_lowest_priority_styled_rule_wins() {
        let s = sheet_with_col(&["5"]);
        let mut first = rule(RuleKind::GreaterThan, 1, vec![col_range(1)]);
        first.value = Some("0".into());
        first.style = Some(red_style());
        let mut second = rule(RuleKind::GreaterThan, 2, vec![col_range(1)]);
        second.value = Some("0".into());
        second.style = Some(bold_style());

        let got = style_for_cell(&[second, first], &s, at(0, 0));
        assert_eq!(got, Some(red_style()));
    }

    #[test]
    fn test_duplicate_and_unique() {
        let s = sheet_with_col(&["a", "b", "a"]);
        let mut dup = rule(RuleKind::DuplicateValues, 0, vec![col_range(3)]);
        dup.style = Some(bold_style());
        let mut uniq = rule(RuleKind::UniqueValues, 0, vec![col_range(3)]);
        uniq.style = Some(bold_style());

        assert!(style_for_cell(&[dup.clone()], &s, at(0, 0)).is_some());
        assert!(style_for_cell(&[dup], &s, at(1, 0)).is_none());
        assert!(style_for_cell(&[uniq], &s, at(1, 0)).is_some());
    }

    #[test]
    fn test_above_average_ignores_non_numeric() {
        let s = sheet_with_col(&["1", "2", "9", "note"]);
        let mut r = rule(RuleKind::AboveAverage, 0, vec![col_range(4)]);
        r.style = Some(bold_style());
        let rules = [r];

        // Mean of {1, 2, 9} is 4
        assert!(style_for_cell(&rules, &s, at(2, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(0, 0)).is_none());
        assert!(style_for_cell(&rules, &s, at(3, 0)).is_none());
    }

    #[test]
    fn test_top_rank_deduplicates() {
        let s = sheet_with_col(&["9", "9", "5", "1"]);
        let mut r = rule(RuleKind::Top10, 0, vec![col_range(4)]);
        r.rank = Some(2);
        r.style = Some(bold_style());
        let rules = [r];

        // Dedup set {1, 5, 9}; top 2 is {5, 9}
        assert!(style_for_cell(&rules, &s, at(0, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(2, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(3, 0)).is_none());
    }

    #[test]
    fn test_bottom_percent_uses_ceil() {
        let s = sheet_with_col(&["1", "2", "3", "4", "5"]);
        let mut r = rule(RuleKind::Bottom10, 0, vec![col_range(5)]);
        r.rank = Some(30);
        r.percent = true;
        r.style = Some(bold_style());
        let rules = [r];

        // ceil(30% of 5) = 2 entries: {1, 2}
        assert!(style_for_cell(&rules, &s, at(0, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(1, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(2, 0)).is_none());
    }

    #[test]
    fn test_color_scale_interpolates() {
        let s = sheet_with_col(&["0", "50", "100"]);
        let mut r = rule(RuleKind::ColorScale, 0, vec![col_range(3)]);
        r.color_scale = Some(ColorScale {
            min_color: Color::new(0, 0, 0),
            mid_color: None,
            max_color: Color::new(200, 200, 200),
        });
        let rules = [r];

        assert_eq!(color_scale_color(&rules, &s, at(0, 0)), Some(Color::new(0, 0, 0)));
        assert_eq!(
            color_scale_color(&rules, &s, at(1, 0)),
            Some(Color::new(100, 100, 100))
        );
        assert_eq!(
            color_scale_color(&rules, &s, at(2, 0)),
            Some(Color::new(200, 200, 200))
        );
    }

    #[test]
    fn test_color_scale_midpoint_splits_range() {
        let s = sheet_with_col(&["0", "100"]);
        let mut r = rule(RuleKind::ColorScale, 0, vec![col_range(2)]);
        r.color_scale = Some(ColorScale {
            min_color: Color::new(255, 0, 0),
            mid_color: Some(Color::new(255, 255, 0)),
            max_color: Color::new(0, 255, 0),
        });
        let rules = [r];

        assert_eq!(
            color_scale_color(&rules, &s, at(1, 0)),
            Some(Color::new(0, 255, 0))
        );
    }

    #[test]
    fn test_degenerate_color_scale_returns_min() {
        let s = sheet_with_col(&["7", "7"]);
        let mut r = rule(RuleKind::ColorScale, 0, vec![col_range(2)]);
        r.color_scale = Some(ColorScale {
            min_color: Color::new(1, 2, 3),
            mid_color: None,
            max_color: Color::new(9, 9, 9),
        });
        assert_eq!(color_scale_color(&[r], &s, at(0, 0)), Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn test_data_bar_percentage_clamped() {
        let s = sheet_with_col(&["0", "5", "10"]);
        let mut r = rule(RuleKind::DataBar, 0, vec![col_range(3)]);
        r.data_bar = Some(DataBar {
            color: Color::new(0, 0, 255),
            min: BarBound::Number(2.0),
            max: BarBound::Number(8.0),
        });
        let rules = [r];

        let (p0, _) = data_bar_fill(&rules, &s, at(0, 0)).unwrap();
        let (p1, _) = data_bar_fill(&rules, &s, at(1, 0)).unwrap();
        let (p2, _) = data_bar_fill(&rules, &s, at(2, 0)).unwrap();
        assert_eq!(p0, 0.0);
        assert_eq!(p1, 50.0);
        assert_eq!(p2, 100.0);
    }

    #[test]
    fn test_data_bar_auto_bounds() {
        let s = sheet_with_col(&["10", "20", "30"]);
        let mut r = rule(RuleKind::DataBar, 0, vec![col_range(3)]);
        r.data_bar = Some(DataBar {
            color: Color::new(0, 0, 255),
            min: BarBound::Auto,
            max: BarBound::Auto,
        });
        let (p, _) = data_bar_fill(&[r], &s, at(1, 0)).unwrap();
        assert_eq!(p, 50.0);
    }

    #[test]
    fn test_contains_text_case_insensitive() {
        let s = sheet_with_col(&["Overdue invoice", "paid"]);
        let mut r = rule(RuleKind::ContainsText, 0, vec![col_range(2)]);
        r.value = Some("OVERDUE".into());
        r.style = Some(bold_style());
        let rules = [r];

        assert!(style_for_cell(&rules, &s, at(0, 0)).is_some());
        assert!(style_for_cell(&rules, &s, at(1, 0)).is_none());
    }

    #[test]
    fn test_blanks_and_errors() {
        let mut s = sheet_with_col(&["x", ""]);
        s.set_cell_text(at(0, 1), "=BROKEN(", &UnsupportedEvaluator);

        let mut blanks = rule(RuleKind::ContainsBlanks, 0, vec![col_range(2)]);
        blanks.style = Some(bold_style());
        assert!(style_for_cell(&[blanks.clone()], &s, at(1, 0)).is_some());
        assert!(style_for_cell(&[blanks], &s, at(0, 0)).is_none());

        let mut errors = rule(
            RuleKind::ContainsErrors,
            0,
            vec![CellRange::new(at(0, 1), at(0, 1))],
        );
        errors.style = Some(bold_style());
        assert!(style_for_cell(&[errors], &s, at(0, 1)).is_some());
    }

    #[test]
    fn test_rules_outside_range_never_match() {
        let s = sheet_with_col(&["99"]);
        let mut r = rule(RuleKind::GreaterThan, 0, vec![CellRange::new(at(5, 5), at(6, 6))]);
        r.value = Some("0".into());
        r.style = Some(bold_style());
        assert!(style_for_cell(&[r], &s, at(0, 0)).is_none());
    }
}
