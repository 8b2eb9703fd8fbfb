//! Validate-and-clamp editors for user-supplied field values
//!
//! Every editor is a pure function: it returns the corrected value or an
//! [`Error::InvalidInput`], and never touches a record on failure.

use crate::error::{Error, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const STAT_RANGE: RangeInclusive<i64> = 0..=99;
pub const AGE_RANGE: RangeInclusive<i64> = 0..=99;
pub const YEARS_RANGE: RangeInclusive<i64> = 0..=30;
pub const SALARY_CAP_RANGE: RangeInclusive<i64> = 0..=260_000_000;
pub const SKILL_POINTS_RANGE: RangeInclusive<i64> = 0..=131_071;

/// Which editor validates a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Stored verbatim
    Raw,
    /// Current stat value, 0..=99, kept at or below its max
    Stat,
    /// Max stat value, 0..=99
    StatMax,
    Age,
    Years,
    SalaryCap,
    SkillPoints,
    /// Sanitized personal name
    Name,
}

impl FieldKind {
    /// Validate and clamp a numeric input; `Raw` and `Name` are not numeric
    pub fn clamp_input(self, input: &str) -> Result<i64> {
        match self {
            FieldKind::Stat | FieldKind::StatMax => edit_stat(input),
            FieldKind::Age => edit_age(input),
            FieldKind::Years => edit_years(input),
            FieldKind::SalaryCap => edit_salary_cap(input),
            FieldKind::SkillPoints => edit_skill_points(input),
            FieldKind::Raw | FieldKind::Name => Err(Error::invalid_input(
                format!("{self:?}"),
                "not a numeric field",
            )),
        }
    }
}

/// Parse an integer, saturating digit strings that overflow i64
pub fn parse_int(field: &str, input: &str) -> Result<i64> {
    let s = input.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }

    Err(Error::invalid_input(field, input))
}

fn clamp_to(v: i64, range: &RangeInclusive<i64>) -> i64 {
    v.clamp(*range.start(), *range.end())
}

/// Clamp a stat to 0..=99
pub fn clamp_stat(v: i64) -> i64 {
    clamp_to(v, &STAT_RANGE)
}

pub fn edit_stat(input: &str) -> Result<i64> {
    parse_int("stat", input).map(clamp_stat)
}

pub fn edit_age(input: &str) -> Result<i64> {
    parse_int("age", input).map(|v| clamp_to(v, &AGE_RANGE))
}

pub fn edit_years(input: &str) -> Result<i64> {
    parse_int("years", input).map(|v| clamp_to(v, &YEARS_RANGE))
}

pub fn edit_salary_cap(input: &str) -> Result<i64> {
    parse_int("salary cap", input).map(|v| clamp_to(v, &SALARY_CAP_RANGE))
}

/// `[+-]digits.digits`, nothing else
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    match unsigned.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Skill points also accept decimal input; the fraction is dropped
pub fn edit_skill_points(input: &str) -> Result<i64> {
    let v = match parse_int("skill points", input) {
        Ok(v) => v,
        Err(err) => {
            let trimmed = input.trim();
            if !is_plain_decimal(trimmed) {
                return Err(err);
            }
            let f: f64 = trimmed.parse().map_err(|_| err)?;
            if !f.is_finite() {
                return Err(Error::invalid_input("skill points", input));
            }
            f.trunc() as i64
        }
    };
    Ok(clamp_to(v, &SKILL_POINTS_RANGE))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\'' | '-' | '.') || c.is_whitespace()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce a name to letters, spaces, apostrophes, hyphens and periods.
///
/// Whitespace runs collapse to one space and the result is cut to `max_len`
/// characters. Idempotent.
pub fn sanitize_name(raw: &str, max_len: usize) -> String {
    let filtered: String = raw.trim().chars().filter(|&c| is_name_char(c)).collect();
    let collapsed = collapse_whitespace(&filtered);

    if collapsed.chars().count() > max_len {
        let cut: String = collapsed.chars().take(max_len).collect();
        cut.trim().to_string()
    } else {
        collapsed
    }
}

/// Outcome of a name edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEdit {
    /// What the user typed
    pub original: String,
    /// What will be stored
    pub sanitized: String,
}

impl NameEdit {
    /// True when the stored name differs from the input, so the user must be told
    pub fn changed(&self) -> bool {
        self.original != self.sanitized
    }
}

pub fn edit_name(raw: &str, max_len: usize) -> NameEdit {
    NameEdit {
        original: raw.to_string(),
        sanitized: sanitize_name(raw, max_len),
    }
}

/// Lower `current` to `max` when both parse and current is larger.
///
/// Returns true if the record changed. The max column is never altered.
pub fn enforce_le(record: &mut Record, current_col: &str, max_col: &str) -> bool {
    let (Some(current), Some(max)) = (record.get_int(current_col), record.get_int(max_col)) else {
        return false;
    };
    if current <= max {
        return false;
    }
    match record.value_mut(current_col) {
        Some(slot) => {
            *slot = max.to_string();
            true
        }
        None => false,
    }
}
