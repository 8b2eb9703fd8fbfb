//! Directory scanner for locating the files of a franchise export

use crate::catalog::Catalog;
use crate::error::Result;
use crate::store::{Category, ExportPaths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of scanning a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Directory that was scanned
    pub root: PathBuf,
    /// Files matched to a category, one per category
    pub found: Vec<(Category, PathBuf)>,
    /// Number of CSV files seen
    pub total_files: usize,
}

impl ScanResult {
    /// Path found for a category
    pub fn get(&self, category: Category) -> Option<&Path> {
        self.found
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, p)| p.as_path())
    }

    /// Export paths for loading, if the player file was found
    pub fn export_paths(&self) -> Option<ExportPaths> {
        let mut paths = ExportPaths::new(self.get(Category::Players)?);
        for (category, path) in &self.found {
            paths.set(*category, path);
        }
        Some(paths)
    }
}

/// Scan a directory for export files and match them to categories.
///
/// File stems are compared case-insensitively with the catalog's stems.
/// Files we wrote ourselves (`*_modified*`) are ignored. When several files
/// match a category the first in path order wins.
pub fn scan_directory<P: AsRef<Path>>(root: P, catalog: &Catalog) -> Result<ScanResult> {
    let root = root.as_ref();
    let mut candidates: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            candidates.push(path.to_path_buf());
        }
    }

    let mut found: Vec<(Category, PathBuf)> = Vec::new();
    for path in &candidates {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.contains("_modified") {
            continue;
        }
        let Some(category) = category_for_stem(stem, catalog) else {
            continue;
        };
        if found.iter().all(|(c, _)| *c != category) {
            found.push((category, path.clone()));
        }
    }
    found.sort_by_key(|(c, _)| *c);

    Ok(ScanResult {
        root: root.to_path_buf(),
        found,
        total_files: candidates.len(),
    })
}

fn category_for_stem(stem: &str, catalog: &Catalog) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|c| catalog.file_stem(*c).eq_ignore_ascii_case(stem))
}
