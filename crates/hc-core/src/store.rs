//! Loading and saving franchise export files
//!
//! Each category of the export is a comma-separated file with a header row.
//! Headers and record keys are normalized on load; values are kept verbatim.
//! Saving never touches the source file: output goes to a sibling path with a
//! `_modified` suffix, numbered when that name is taken.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::record::{Record, RecordSet};
use crate::schema::SchemaMetadata;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Kinds of table in a franchise export
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Players,
    DraftPicks,
    SalaryCap,
    Coaches,
    Coordinators,
    Scouts,
}

impl Category {
    /// Every category, primary first
    pub const ALL: [Category; 6] = [
        Category::Players,
        Category::DraftPicks,
        Category::SalaryCap,
        Category::Coaches,
        Category::Coordinators,
        Category::Scouts,
    ];

    /// The category a franchise cannot be loaded without
    pub fn is_primary(self) -> bool {
        self == Category::Players
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Players => "players",
            Category::DraftPicks => "draft picks",
            Category::SalaryCap => "salary cap",
            Category::Coaches => "coaches",
            Category::Coordinators => "coordinators",
            Category::Scouts => "scouts",
        }
    }
}

/// Load one export file.
///
/// Fails with [`Error::NotFound`] when `path` is empty or not a regular file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RecordSet> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() || !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut set = read_records(BufReader::new(file), path)?;
    set.source_path = Some(path.to_path_buf());
    debug!(
        path = %path.display(),
        columns = set.headers.len(),
        rows = set.records.len(),
        "loaded export file"
    );
    Ok(set)
}

/// Parse export content from a string (useful for testing)
pub fn load_str(content: &str, source_name: &str) -> Result<RecordSet> {
    read_records(content.as_bytes(), Path::new(source_name))
}

fn read_records<R: Read>(reader: R, path: &Path) -> Result<RecordSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(normalize)
        .collect();

    let mut seen = HashSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            warn!(path = %path.display(), column = %name, "duplicate column after normalization");
        }
    }

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let row = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        if row.len() > headers.len() {
            warn!(
                path = %path.display(),
                row = row_idx + 1,
                "row has more cells than columns, truncating"
            );
        }

        // Short rows are padded so every record carries the full key set
        let record = Record::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), row.get(i).unwrap_or("").to_string())),
        );
        records.push(record);
    }

    Ok(RecordSet {
        headers,
        records,
        source_path: None,
    })
}

/// Save path for a source file: `<stem>_modified<.ext>`, numbered after attempt 0
pub fn modified_path(original: &Path, attempt: usize) -> PathBuf {
    let mut name: OsString = original
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    if attempt == 0 {
        name.push("_modified");
    } else {
        name.push(format!("_modified_{attempt}"));
    }
    if let Some(ext) = original.extension() {
        name.push(".");
        name.push(ext);
    }

    original.with_file_name(name)
}

/// Serialize records with the given header order
pub fn to_csv_bytes(records: &[Record], headers: &[String]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| Error::Csv {
            path: PathBuf::new(),
            source: e,
        })?;

    for record in records {
        // repeated headers take the matching repeat of the key, in order
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let row: Vec<&str> = headers
            .iter()
            .map(|h| {
                let n = seen.entry(h.as_str()).or_insert(0);
                let value = record.get_nth(h, *n).unwrap_or("");
                *n += 1;
                value
            })
            .collect();
        writer.write_record(row).map_err(|e| Error::Csv {
            path: PathBuf::new(),
            source: e,
        })?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// Save records next to `original` without overwriting anything.
///
/// Returns the path that was written. Fails with [`Error::Config`] when
/// `original` is empty.
pub fn save<P: AsRef<Path>>(records: &[Record], headers: &[String], original: P) -> Result<PathBuf> {
    let original = original.as_ref();
    if original.as_os_str().is_empty() {
        return Err(Error::Config("no original file path to save".to_string()));
    }

    // The whole file is rendered before any output exists on disk
    let bytes = to_csv_bytes(records, headers)?;

    let mut attempt = 0;
    loop {
        let candidate = modified_path(original, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => {
                write_or_discard(file, &bytes, &candidate)?;
                info!(path = %candidate.display(), rows = records.len(), "saved export file");
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(Error::Io(e)),
        }
    }
}

/// Write `bytes` to a freshly created `path`, removing it if the write fails
fn write_or_discard<W: Write>(mut out: W, bytes: &[u8], path: &Path) -> io::Result<()> {
    let written = out.write_all(bytes).and_then(|()| out.flush());
    if written.is_err() {
        drop(out);
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), "could not remove partial output: {e}");
        }
    }
    written
}

impl RecordSet {
    /// Save to a `_modified` sibling of the source file
    pub fn save(&self) -> Result<PathBuf> {
        let original = self
            .source_path
            .as_deref()
            .ok_or_else(|| Error::Config("record set has no source path".to_string()))?;
        save(&self.records, &self.headers, original)
    }
}

/// Input files for one franchise, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPaths {
    paths: BTreeMap<Category, PathBuf>,
}

impl ExportPaths {
    /// Start from the required player file
    pub fn new(players: impl Into<PathBuf>) -> Self {
        let mut paths = BTreeMap::new();
        paths.insert(Category::Players, players.into());
        Self { paths }
    }

    /// Add an optional category file
    pub fn with(mut self, category: Category, path: impl Into<PathBuf>) -> Self {
        self.set(category, path);
        self
    }

    pub fn set(&mut self, category: Category, path: impl Into<PathBuf>) {
        self.paths.insert(category, path.into());
    }

    pub fn get(&self, category: Category) -> Option<&Path> {
        self.paths.get(&category).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Path)> {
        self.paths.iter().map(|(c, p)| (*c, p.as_path()))
    }
}

/// Every loaded category plus the metadata derived from the player headers
#[derive(Debug, Clone)]
pub struct Franchise {
    sets: BTreeMap<Category, RecordSet>,
    /// Derived from the player headers on load
    pub schema: SchemaMetadata,
}

impl Franchise {
    /// Load the player file and any optional categories.
    ///
    /// Optional files that are missing load as empty sets. Fails with
    /// [`Error::Validation`] when the player file has no rows.
    pub fn load(paths: &ExportPaths, catalog: &Catalog) -> Result<Self> {
        let players_path = paths.get(Category::Players).unwrap_or(Path::new(""));
        let players = load(players_path)?;
        if players.is_empty() {
            return Err(Error::Validation(format!(
                "'{}' loaded 0 player rows",
                players_path.display()
            )));
        }

        let mut sets = BTreeMap::new();
        for category in Category::ALL.into_iter().filter(|c| !c.is_primary()) {
            let set = match paths.get(category) {
                Some(path) => match load(path) {
                    Ok(set) => set,
                    Err(e) if e.is_not_found() => {
                        warn!(category = category.label(), "{e}; treating as empty");
                        RecordSet::new()
                    }
                    Err(e) => return Err(e),
                },
                None => RecordSet::new(),
            };
            sets.insert(category, set);
        }

        let schema = SchemaMetadata::from_headers(&players.headers, catalog);
        debug!(
            team_column = schema.team_column.as_deref().unwrap_or("N/A"),
            stat_pairs = schema.stat_max.len(),
            "derived player schema"
        );
        sets.insert(Category::Players, players);

        Ok(Self { sets, schema })
    }

    /// Build a franchise from already-parsed sets
    pub fn from_sets(
        sets: impl IntoIterator<Item = (Category, RecordSet)>,
        catalog: &Catalog,
    ) -> Result<Self> {
        let mut sets: BTreeMap<Category, RecordSet> = sets.into_iter().collect();
        for category in Category::ALL {
            sets.entry(category).or_default();
        }
        let players = &sets[&Category::Players];
        if players.is_empty() {
            return Err(Error::Validation("player set has 0 rows".to_string()));
        }
        let schema = SchemaMetadata::from_headers(&players.headers, catalog);
        Ok(Self { sets, schema })
    }

    /// Records of a category
    pub fn set(&self, category: Category) -> &RecordSet {
        // every category is inserted on construction
        &self.sets[&category]
    }

    /// Records of a category for editing
    pub fn set_mut(&mut self, category: Category) -> &mut RecordSet {
        self.sets.entry(category).or_default()
    }

    pub fn players(&self) -> &RecordSet {
        self.set(Category::Players)
    }

    pub fn players_mut(&mut self) -> &mut RecordSet {
        self.set_mut(Category::Players)
    }

    /// Save every non-empty category that was loaded from a file
    pub fn save_all(&self) -> Result<Vec<(Category, PathBuf)>> {
        let mut written = Vec::new();
        for (category, set) in &self.sets {
            if set.is_empty() || set.source_path.is_none() {
                continue;
            }
            written.push((*category, set.save()?));
        }
        Ok(written)
    }
}
