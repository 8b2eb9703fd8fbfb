//! Per-load column discovery for the player table

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A described stat whose max column exists in the loaded header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPair {
    pub base: String,
    pub max: String,
}

/// Metadata derived from the player headers on every load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    /// Column that holds a player's team, if one was found
    pub team_column: Option<String>,
    /// Base -> max column pairs, in catalog order
    pub stat_max: Vec<StatPair>,
}

impl SchemaMetadata {
    /// Derive metadata from a header list
    pub fn from_headers(headers: &[String], catalog: &Catalog) -> Self {
        Self {
            team_column: detect_team_column(headers, catalog),
            stat_max: build_stat_max_map(headers, catalog),
        }
    }

    /// Max column paired with a base stat
    pub fn max_for(&self, base: &str) -> Option<&str> {
        self.stat_max
            .iter()
            .find(|p| p.base == base)
            .map(|p| p.max.as_str())
    }

    /// Whether players may be moved by rewriting the team column directly.
    ///
    /// Requires a detected team column that is not the locked identifier.
    pub fn can_move_players(&self, catalog: &Catalog) -> bool {
        matches!(&self.team_column, Some(col) if col != catalog.locked_team_column())
    }
}

/// Pick the team column: first candidate present in `headers`
pub fn detect_team_column(headers: &[String], catalog: &Catalog) -> Option<String> {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    catalog
        .team_column_candidates()
        .iter()
        .find(|c| present.contains(*c))
        .map(|c| c.to_string())
}

/// Pair each described stat with its max column when that column is present
pub fn build_stat_max_map(headers: &[String], catalog: &Catalog) -> Vec<StatPair> {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    catalog
        .stat_max_columns()
        .iter()
        .filter(|(base, max)| catalog.stat(base).is_some() && present.contains(max))
        .map(|(base, max)| StatPair {
            base: base.to_string(),
            max: max.to_string(),
        })
        .collect()
}
