//! Applying edits to records
//!
//! This module provides:
//! - The record-level edit operations behind each editor screen (stats,
//!   age/years, names, salary cap, raw columns)
//! - A batch file format (JSON) for applying many field edits at once

use crate::catalog::{columns, Catalog};
use crate::config::EditorConfig;
use crate::editors::{self, FieldKind, NameEdit};
use crate::error::{Error, Result};
use crate::record::{Record, RecordSet};
use crate::schema::SchemaMetadata;
use crate::store::{Category, Franchise};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Set a stat's max then current value, then keep current at or below max.
///
/// Either value may be omitted. Inputs are validated before anything is
/// written, so a bad value leaves the record unchanged. Only stats the
/// catalog describes can be edited this way.
pub fn apply_stat_edit(
    record: &mut Record,
    schema: &SchemaMetadata,
    catalog: &Catalog,
    base: &str,
    current: Option<&str>,
    max: Option<&str>,
) -> Result<()> {
    if catalog.stat(base).is_none() {
        return Err(Error::Validation(format!("'{}' is not an editable stat", base)));
    }
    let max_column = schema.max_for(base);
    let new_current = current.map(editors::edit_stat).transpose()?;
    let new_max = match (max, max_column) {
        (Some(input), Some(_)) => Some(editors::edit_stat(input)?),
        _ => None,
    };

    if new_current.is_some() && !record.contains(base) {
        return Err(Error::missing_column(base));
    }

    if let (Some(v), Some(col)) = (new_max, max_column) {
        record.set(col, v.to_string())?;
    }
    if let Some(v) = new_current {
        record.set(base, v.to_string())?;
    }
    if let Some(col) = max_column {
        editors::enforce_le(record, base, col);
    }
    Ok(())
}

/// Set age and/or years pro; columns missing from the export are skipped
pub fn apply_bio_edit(record: &mut Record, age: Option<&str>, years: Option<&str>) -> Result<()> {
    let age = age.map(editors::edit_age).transpose()?;
    let years = years.map(editors::edit_years).transpose()?;

    if let Some(v) = age {
        if record.contains(columns::AGE) {
            record.set(columns::AGE, v.to_string())?;
        }
    }
    if let Some(v) = years {
        if record.contains(columns::YEARS) {
            record.set(columns::YEARS, v.to_string())?;
        }
    }
    Ok(())
}

/// Set first and/or last name after sanitizing.
///
/// Returns the edits whose stored value differs from the input so the
/// caller can warn the user.
pub fn apply_name_edit(
    record: &mut Record,
    first: Option<&str>,
    last: Option<&str>,
    max_len: usize,
) -> Result<Vec<NameEdit>> {
    let mut changed = Vec::new();
    for (column, raw) in [(columns::FIRST_NAME, first), (columns::LAST_NAME, last)] {
        let Some(raw) = raw else { continue };
        let edit = editors::edit_name(raw, max_len);
        record.set(column, edit.sanitized.clone())?;
        if edit.changed() {
            warn!(column, original = %edit.original, sanitized = %edit.sanitized, "name sanitized");
            changed.push(edit);
        }
    }
    Ok(changed)
}

/// Current salary cap from the first salary row
pub fn salary_cap(salaries: &RecordSet) -> Option<&str> {
    salaries
        .records
        .first()
        .and_then(|r| r.get(columns::SALARY_CAP))
}

/// Clamp and store a new salary cap on the first salary row
pub fn set_salary_cap(salaries: &mut RecordSet, input: &str) -> Result<i64> {
    let value = editors::edit_salary_cap(input)?;
    let row = salaries
        .records
        .first_mut()
        .ok_or_else(|| Error::Validation("salary cap data not loaded".to_string()))?;
    row.set(columns::SALARY_CAP, value.to_string())?;
    Ok(value)
}

/// A single field edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdit {
    /// Record index within the category
    pub record: usize,
    /// Column name
    pub column: String,
    /// New value as typed by the user
    pub value: String,
    /// Editor that validates the value
    #[serde(default = "default_kind")]
    pub kind: FieldKind,
}

fn default_kind() -> FieldKind {
    FieldKind::Raw
}

impl FieldEdit {
    /// Create a new edit
    pub fn new(
        record: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        Self {
            record,
            column: column.into(),
            value: value.into(),
            kind,
        }
    }
}

/// A batch file containing edits for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBatch {
    /// Category the edits apply to
    pub category: Category,
    /// List of edits
    pub edits: Vec<FieldEdit>,
}

impl EditBatch {
    /// Create a new empty batch
    pub fn new(category: Category) -> Self {
        Self {
            category,
            edits: Vec::new(),
        }
    }

    /// Add an edit to the batch
    pub fn add_edit(&mut self, edit: FieldEdit) {
        self.edits.push(edit);
    }

    /// Load a batch file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the batch file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Result of applying a batch
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Number of edits applied
    pub applied: usize,
    /// Edits that failed, with the reason
    pub failed: Vec<(FieldEdit, String)>,
    /// Names stored in a different form than requested
    pub sanitized: Vec<NameEdit>,
}

/// Apply one field edit through the editor its kind selects
pub fn apply_field(
    record: &mut Record,
    edit: &FieldEdit,
    schema: &SchemaMetadata,
    config: &EditorConfig,
) -> Result<Option<NameEdit>> {
    if !record.contains(&edit.column) {
        return Err(Error::missing_column(&edit.column));
    }

    match edit.kind {
        FieldKind::Raw => {
            record.set(&edit.column, edit.value.clone())?;
        }
        FieldKind::Name => {
            let name = editors::edit_name(&edit.value, config.name_max_len);
            record.set(&edit.column, name.sanitized.clone())?;
            if name.changed() {
                return Ok(Some(name));
            }
        }
        FieldKind::Stat => {
            let v = editors::edit_stat(&edit.value)?;
            record.set(&edit.column, v.to_string())?;
            if let Some(max) = schema.max_for(&edit.column) {
                editors::enforce_le(record, &edit.column, max);
            }
        }
        FieldKind::StatMax => {
            let v = editors::edit_stat(&edit.value)?;
            record.set(&edit.column, v.to_string())?;
            if let Some(pair) = schema.stat_max.iter().find(|p| p.max == edit.column) {
                editors::enforce_le(record, &pair.base, &pair.max);
            }
        }
        kind => {
            let v = kind.clamp_input(&edit.value)?;
            record.set(&edit.column, v.to_string())?;
        }
    }
    Ok(None)
}

/// Apply every edit of a batch independently.
///
/// A failing edit is recorded and skipped; the others still apply.
pub fn apply_batch(franchise: &mut Franchise, batch: &EditBatch, config: &EditorConfig) -> BatchResult {
    let schema = franchise.schema.clone();
    let set = franchise.set_mut(batch.category);
    let mut result = BatchResult::default();

    for edit in &batch.edits {
        let outcome = set
            .get_mut(edit.record)
            .and_then(|record| apply_field(record, edit, &schema, config));
        match outcome {
            Ok(name) => {
                result.applied += 1;
                result.sanitized.extend(name);
            }
            Err(e) => result.failed.push((edit.clone(), e.to_string())),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::load_str;

    fn schema_for(headers: &[String]) -> SchemaMetadata {
        SchemaMetadata::from_headers(headers, &Catalog::builtin())
    }

    fn player() -> (Record, SchemaMetadata) {
        let set = load_str(
            "TGID,PFNA,PLNA,PAGE,PYRP,PSPD,PSDX\n1,Tom,Brady,31,8,85,90\n",
            "play.csv",
        )
        .unwrap();
        let schema = schema_for(&set.headers);
        (set.records[0].clone(), schema)
    }

    #[test]
    fn test_stat_edit_clamps_and_enforces_max() {
        let (mut r, schema) = player();
        apply_stat_edit(&mut r, &schema, &Catalog::builtin(), "PSPD", Some("120"), None).unwrap();
        // 99 clamped, then lowered to the max of 90
        assert_eq!(r.get("PSPD"), Some("90"));

        apply_stat_edit(&mut r, &schema, &Catalog::builtin(), "PSPD", None, Some("70")).unwrap();
        assert_eq!(r.get("PSDX"), Some("70"));
        assert_eq!(r.get("PSPD"), Some("70"));
    }

    #[test]
    fn test_stat_edit_invalid_leaves_record() {
        let (mut r, schema) = player();
        let before = r.clone();
        let catalog = Catalog::builtin();
        let err = apply_stat_edit(&mut r, &schema, &catalog, "PSPD", Some("50"), Some("fast"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert_eq!(r, before);
    }

    #[test]
    fn test_stat_edit_rejects_undescribed_columns() {
        let (mut r, schema) = player();
        let before = r.clone();
        let catalog = Catalog::builtin();

        let err = apply_stat_edit(&mut r, &schema, &catalog, "TGID", Some("5"), None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(apply_stat_edit(&mut r, &schema, &catalog, "PAGE", Some("5"), None).is_err());
        assert_eq!(r, before);
    }

    #[test]
    fn test_bio_edit() {
        let (mut r, _) = player();
        apply_bio_edit(&mut r, Some("150"), Some("40")).unwrap();
        assert_eq!(r.get("PAGE"), Some("99"));
        assert_eq!(r.get("PYRP"), Some("30"));

        let mut bare = Record::from_pairs([("PGID", "1")]);
        apply_bio_edit(&mut bare, Some("20"), Some("3")).unwrap();
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_name_edit_reports_sanitized() {
        let (mut r, _) = player();
        let changed = apply_name_edit(&mut r, Some("J@ke"), Some("Smith"), 15).unwrap();
        assert_eq!(r.get("PFNA"), Some("Jke"));
        assert_eq!(r.get("PLNA"), Some("Smith"));
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].original, "J@ke");
    }

    #[test]
    fn test_salary_cap() {
        let mut salaries = load_str("SCAD,OTHER\n150000000,x\n", "slri.csv").unwrap();
        assert_eq!(salary_cap(&salaries), Some("150000000"));
        assert_eq!(set_salary_cap(&mut salaries, "999999999").unwrap(), 260_000_000);
        assert_eq!(salary_cap(&salaries), Some("260000000"));

        let mut empty = RecordSet::new();
        assert!(set_salary_cap(&mut empty, "5").is_err());
    }

    #[test]
    fn test_batch_serialization() {
        let mut batch = EditBatch::new(Category::Players);
        batch.add_edit(FieldEdit::new(0, "PSPD", "90", FieldKind::Stat));
        let json = serde_json::to_string(&batch).unwrap();
        assert!(json.contains("\"players\""));
        assert!(json.contains("\"stat\""));

        let loaded: EditBatch =
            serde_json::from_str(r#"{"category":"draft_picks","edits":[{"record":1,"column":"DPID","value":"4"}]}"#)
                .unwrap();
        assert_eq!(loaded.category, Category::DraftPicks);
        assert_eq!(loaded.edits[0].kind, FieldKind::Raw);
    }

    #[test]
    fn test_apply_batch_isolates_failures() {
        let catalog = Catalog::builtin();
        let players = load_str(
            "TGID,PFNA,PSPD,PSDX,PAGE\n1,Tom,85,90,31\n2,Drew,80,80,36\n",
            "play.csv",
        )
        .unwrap();
        let mut franchise = Franchise::from_sets([(Category::Players, players)], &catalog).unwrap();

        let mut batch = EditBatch::new(Category::Players);
        batch.add_edit(FieldEdit::new(0, "PSPD", "oops", FieldKind::Stat));
        batch.add_edit(FieldEdit::new(0, "PAGE", "200", FieldKind::Age));
        batch.add_edit(FieldEdit::new(1, "PSDX", "50", FieldKind::StatMax));
        batch.add_edit(FieldEdit::new(1, "PFNA", "Dr3w", FieldKind::Name));
        batch.add_edit(FieldEdit::new(9, "PFNA", "X", FieldKind::Raw));
        batch.add_edit(FieldEdit::new(0, "NOPE", "X", FieldKind::Raw));

        let result = apply_batch(&mut franchise, &batch, &EditorConfig::default());
        assert_eq!(result.applied, 3);
        assert_eq!(result.failed.len(), 3);
        assert_eq!(result.sanitized.len(), 1);

        let players = franchise.players();
        assert_eq!(players.records[0].get("PSPD"), Some("85"));
        assert_eq!(players.records[0].get("PAGE"), Some("99"));
        assert_eq!(players.records[1].get("PSDX"), Some("50"));
        assert_eq!(players.records[1].get("PSPD"), Some("50"));
        assert_eq!(players.records[1].get("PFNA"), Some("Drw"));
    }
}
