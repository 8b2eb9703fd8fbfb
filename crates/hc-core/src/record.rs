//! Record model for exported franchise tables

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One row of an export, keyed by normalized column name.
///
/// Fields keep the header order of the file they came from. Keys are fixed at
/// load time: values can change, keys cannot be added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from (column, value) pairs in header order
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get the raw value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Get the value of the `occurrence`-th column named `column` (0-based).
    ///
    /// Exports can repeat a header; each copy keeps its own value.
    pub fn get_nth(&self, column: &str, occurrence: usize) -> Option<&str> {
        self.position(column, occurrence)
            .map(|i| self.fields[i].1.as_str())
    }

    /// Get a column's value with surrounding whitespace removed, or "" if absent
    pub fn get_trimmed(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or("")
    }

    /// Parse a column as an integer; None when absent, blank or not numeric
    pub fn get_int(&self, column: &str) -> Option<i64> {
        let raw = self.get_trimmed(column);
        if raw.is_empty() {
            return None;
        }
        raw.parse().ok()
    }

    /// Check whether the record has a column
    pub fn contains(&self, column: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == column)
    }

    /// Overwrite an existing column, returning the previous value
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> Result<String> {
        let slot = self
            .value_mut(column)
            .ok_or_else(|| Error::missing_column(column))?;
        Ok(std::mem::replace(slot, value.into()))
    }

    pub(crate) fn value_mut(&mut self, column: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    pub(crate) fn position(&self, column: &str, occurrence: usize) -> Option<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, (k, _))| k == column)
            .nth(occurrence)
            .map(|(i, _)| i)
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> Option<&mut String> {
        self.fields.get_mut(index).map(|(_, v)| v)
    }

    /// Column names in header order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// (column, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All records of one category plus the header order they were read with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    /// Normalized header names in file order
    pub headers: Vec<String>,
    /// Row data
    pub records: Vec<Record>,
    /// File the set was loaded from, if any
    pub source_path: Option<PathBuf>,
}

impl RecordSet {
    /// Create an empty record set with no source
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check whether the header contains a column
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Get a record by index
    pub fn get(&self, index: usize) -> Result<&Record> {
        let len = self.records.len();
        self.records
            .get(index)
            .ok_or(Error::RecordOutOfRange { index, len })
    }

    /// Get a record by index for editing
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Record> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(Error::RecordOutOfRange { index, len })
    }

    /// Borrow two distinct records mutably at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Result<(&mut Record, &mut Record)> {
        if a == b {
            return Err(Error::InvariantViolation(format!(
                "record {a} cannot be paired with itself"
            )));
        }
        let len = self.records.len();
        for index in [a, b] {
            if index >= len {
                return Err(Error::RecordOutOfRange { index, len });
            }
        }

        if a < b {
            let (left, right) = self.records.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.records.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }
}
