//! Read-only views over the player and pick tables

use crate::catalog::{columns, Catalog};
use crate::record::{Record, RecordSet};
use crate::schema::SchemaMetadata;
use serde::Serialize;

/// Display name of a player: "First Last", or "(No Name)"
pub fn player_name(record: &Record) -> String {
    let first = record.get_trimmed(columns::FIRST_NAME);
    let last = record.get_trimmed(columns::LAST_NAME);
    let name = format!("{first} {last}");
    let name = name.trim();
    if name.is_empty() {
        "(No Name)".to_string()
    } else {
        name.to_string()
    }
}

/// Position abbreviation of a player, or "UNK"
pub fn player_position<'a>(record: &Record, catalog: &'a Catalog) -> &'a str {
    catalog
        .position(record.get_trimmed(columns::POSITION))
        .unwrap_or("UNK")
}

/// A player's team id, empty when no team column was detected
pub fn player_team<'r>(record: &'r Record, schema: &SchemaMetadata) -> &'r str {
    match &schema.team_column {
        Some(col) => record.get_trimmed(col),
        None => "",
    }
}

/// Indexes of the players on a team.
///
/// Without a detected team column every player is returned.
pub fn players_for_team(players: &RecordSet, schema: &SchemaMetadata, team_id: &str) -> Vec<usize> {
    match &schema.team_column {
        Some(col) => players
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.get_trimmed(col) == team_id)
            .map(|(i, _)| i)
            .collect(),
        None => (0..players.len()).collect(),
    }
}

/// Sort player indexes by position display order, keeping file order within a position
pub fn sort_by_position(players: &RecordSet, indexes: &mut [usize], catalog: &Catalog) {
    indexes.sort_by_key(|&i| {
        players
            .records
            .get(i)
            .map(|r| catalog.position_rank(player_position(r, catalog)))
            .unwrap_or(usize::MAX)
    });
}

/// One line of a roster listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub index: usize,
    pub position: String,
    pub name: String,
    pub age: String,
    pub years: String,
}

/// Roster of a team in position order
pub fn roster(
    players: &RecordSet,
    schema: &SchemaMetadata,
    catalog: &Catalog,
    team_id: &str,
) -> Vec<RosterEntry> {
    let mut indexes = players_for_team(players, schema, team_id);
    sort_by_position(players, &mut indexes, catalog);

    indexes
        .into_iter()
        .filter_map(|i| players.records.get(i).map(|r| (i, r)))
        .map(|(index, r)| RosterEntry {
            index,
            position: player_position(r, catalog).to_string(),
            name: player_name(r),
            age: r.get_trimmed(columns::AGE).to_string(),
            years: r.get_trimmed(columns::YEARS).to_string(),
        })
        .collect()
}

/// One described stat of a player, with whichever columns are present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRow {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub current_column: Option<String>,
    pub current: Option<String>,
    pub max_column: Option<String>,
    pub max: Option<String>,
}

/// Described stats of a player in catalog order.
///
/// A stat is listed when its current column or its paired max column exists.
pub fn stat_rows(
    record: &Record,
    headers: &[String],
    schema: &SchemaMetadata,
    catalog: &Catalog,
) -> Vec<StatRow> {
    catalog
        .stats()
        .iter()
        .filter_map(|stat| {
            let current_column = headers
                .iter()
                .any(|h| h == stat.code)
                .then(|| stat.code.to_string());
            let max_column = schema.max_for(stat.code).map(str::to_string);
            if current_column.is_none() && max_column.is_none() {
                return None;
            }
            Some(StatRow {
                code: stat.code,
                name: stat.name,
                description: stat.description,
                current: current_column
                    .as_deref()
                    .and_then(|c| record.get(c))
                    .map(str::to_string),
                max: max_column
                    .as_deref()
                    .and_then(|c| record.get(c))
                    .map(str::to_string),
                current_column,
                max_column,
            })
        })
        .collect()
}

/// One draft pick for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickEntry {
    pub index: usize,
    pub team_id: String,
    pub team_name: String,
    /// 1-based pick number
    pub pick: Option<i64>,
    pub year_offset: Option<i64>,
}

/// All draft picks in file order
pub fn pick_entries(picks: &RecordSet, catalog: &Catalog) -> Vec<PickEntry> {
    picks
        .records
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let team_id = p.get_trimmed(columns::PICK_TEAM).to_string();
            let team_name = match catalog.team_name(&team_id) {
                Some(name) => name.to_string(),
                None if team_id.is_empty() => "Unknown".to_string(),
                None => team_id.clone(),
            };
            PickEntry {
                index,
                team_name,
                team_id,
                pick: p.get_int(columns::PICK_NUMBER).map(|n| n + 1),
                year_offset: p.get_int(columns::PICK_YEAR_OFFSET),
            }
        })
        .collect()
}
