//! Static reference tables for the franchise export
//!
//! These tables describe the export's column naming and must match the game
//! data exactly. Column names are case-sensitive; the stat/max table carries
//! one lowercase suffix (`PSMx`) because that is how the export spells it.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::store::Category;

/// Team id -> display name
pub const TEAM_NAMES: &[(&str, &str)] = &[
    ("1", "Bears (Chicago)"),
    ("2", "Bengals (Cincinnati)"),
    ("3", "Bills (Buffalo)"),
    ("4", "Broncos (Denver)"),
    ("5", "Browns (Cleveland)"),
    ("6", "Buccaneers (Tampa Bay)"),
    ("7", "Cardinals (Arizona)"),
    ("8", "Chargers (Los Angeles)"),
    ("9", "Chiefs (Kansas City)"),
    ("10", "Colts (Indianapolis)"),
    ("11", "Cowboys (Dallas)"),
    ("12", "Dolphins (Miami)"),
    ("13", "Eagles (Philadelphia)"),
    ("14", "Falcons (Atlanta)"),
    ("15", "49ers (San Francisco)"),
    ("16", "Giants (New York)"),
    ("17", "Jaguars (Jacksonville)"),
    ("18", "Jets (New York)"),
    ("19", "Lions (Detroit)"),
    ("20", "Packers (Green Bay)"),
    ("21", "Panthers (Carolina)"),
    ("22", "Patriots (New England)"),
    ("23", "Raiders (Las Vegas)"),
    ("24", "Rams (Los Angeles)"),
    ("25", "Ravens (Baltimore)"),
    ("26", "Commanders (Washington)"),
    ("27", "Saints (New Orleans)"),
    ("28", "Seahawks (Seattle)"),
    ("29", "Steelers (Pittsburgh)"),
    ("30", "Titans (Tennessee)"),
    ("31", "Vikings (Minnesota)"),
    ("32", "Texans (Houston)"),
    ("33", "Free Agents"),
    ("1015", "Draft Class"),
];

/// Position code -> abbreviation
pub const POSITIONS: &[(&str, &str)] = &[
    ("0", "QB"),
    ("1", "HB"),
    ("2", "FB"),
    ("3", "WR"),
    ("4", "TE"),
    ("5", "LT"),
    ("6", "LG"),
    ("7", "C"),
    ("8", "RG"),
    ("9", "RT"),
    ("10", "LE"),
    ("11", "RE"),
    ("12", "DT"),
    ("13", "LOLB"),
    ("14", "MLB"),
    ("15", "ROLB"),
    ("16", "CB"),
    ("17", "FS"),
    ("18", "SS"),
    ("19", "K"),
    ("20", "P"),
];

/// Order in which positions are listed on a roster
pub const POSITION_ORDER: &[&str] = &[
    "QB", "HB", "FB", "WR", "TE", "LT", "LG", "C", "RG", "RT", "LE", "RE", "DT", "LOLB", "MLB",
    "ROLB", "CB", "FS", "SS", "K", "P",
];

/// Stat code -> (display name, description)
pub const STAT_META: &[(&str, &str, &str)] = &[
    ("PSPD", "Speed", "Top-end running speed"),
    ("PAGI", "Agility", "Change of direction / lateral movement"),
    ("PACC", "Acceleration", "Burst to top speed"),
    ("PSTR", "Strength", "Power of player (blocking/tackling)"),
    ("PAWR", "Awareness", "Football IQ and reaction time"),
    ("PSTA", "Stamina", "Fatigue resistance"),
    ("PINJ", "Injury", "Durability / injury resistance"),
    ("PLTR", "Trucking", "Run through tackles / power after contact"),
    ("PTGH", "Toughness", "Plays through hits / durability vs big contact"),
    ("PELU", "Elusiveness", "Jukes and evasive moves"),
    ("PBCV", "Vision", "Ball carrier vision / cutbacks"),
    ("PLSA", "Stiff Arm", "Stiff-arm effectiveness"),
    ("PLSM", "Spin Move", "Spin move success"),
    ("PLJM", "Juke Move", "Juke effectiveness"),
    ("PCAR", "Carrying", "Ball security"),
    ("PTHP", "Throw Power", "QB arm strength"),
    ("PTHA", "Throw Accuracy", "Overall QB accuracy"),
    ("PCTH", "Catching", "Catch reliability"),
    ("PLSC", "Spectacular Catch", "Aggressive catches"),
    ("PLCI", "Catch In Traffic", "Catches through contact"),
    ("PLRR", "Route Running", "Route precision"),
    ("PLRL", "Release", "Beating press coverage"),
    ("PJMP", "Jump", "Vertical leap"),
    ("PPBK", "Pass Block", "Pass protection"),
    ("PPBS", "Pass Block Power", "Anchor vs power rush"),
    ("PPBF", "Pass Block Finesse", "Mirror finesse rush"),
    ("PRBK", "Run Block", "Run blocking"),
    ("PRBS", "Run Block Strength", "Run blocking strength / anchor"),
    ("PLIB", "Impact Blocking", "Dominant run-game blocks"),
    ("PTAK", "Tackling", "Tackle success"),
    ("PLHT", "Hit Power", "Big hit strength"),
    ("PRBF", "Pass Rush Finesse", "Speed/finesse rush"),
    ("PLPm", "Power Move", "DL power pass rush move"),
    ("PFMS", "Finesse Move", "DL finesse pass rush move"),
    ("PBSG", "Block Shed", "Shedding blockers"),
    ("PLPU", "Pursuit", "Closing speed & angles"),
    ("PLPR", "Play Recognition", "Reads plays faster"),
    ("PLMC", "Man Coverage", "Man-to-man coverage"),
    ("PLZC", "Zone Coverage", "Zone awareness"),
    ("PLPE", "Press", "Jam WRs at line"),
    ("PKPR", "Kick Power", "Kicker leg strength"),
    ("PKAC", "Kick Accuracy", "FG accuracy"),
    ("PKRT", "Kick Return", "Return ability"),
    ("PLRN", "Learning", "Development speed"),
];

/// Base stat column -> max-value column
pub const STAT_MAX_COLUMNS: &[(&str, &str)] = &[
    ("PSPD", "PSDX"),
    ("PAGI", "PAGX"),
    ("PACC", "PACX"),
    ("PSTR", "PSTX"),
    ("PAWR", "PAWX"),
    ("PSTA", "PSAX"),
    ("PINJ", "PINX"),
    ("PLTR", "PLTX"),
    ("PTGH", "PTGX"),
    ("PELU", "PELX"),
    ("PBCV", "PBCX"),
    ("PLSA", "PLSX"),
    // lowercase suffix in the export
    ("PLSM", "PSMx"),
    ("PLJM", "PLJX"),
    ("PCAR", "PCAX"),
    ("PTHP", "PTPX"),
    ("PTHA", "PTAX"),
    ("PCTH", "PCTX"),
    ("PLSC", "PSCX"),
    ("PLCI", "PLCX"),
    ("PLRR", "PRRX"),
    ("PLRL", "PRLX"),
    ("PJMP", "PJMX"),
    ("PPBK", "PPBX"),
    ("PPBS", "PPSX"),
    ("PPBF", "PPFX"),
    ("PRBK", "PRBX"),
    ("PRBS", "PRSX"),
    ("PLIB", "PIBX"),
    ("PTAK", "PTKX"),
    ("PLHT", "PLHX"),
    ("PRBF", "PRFX"),
    ("PLPm", "PPMX"),
    ("PFMS", "PFMX"),
    ("PBSG", "PBSX"),
    ("PLPU", "PPUX"),
    ("PLPR", "PPRX"),
    ("PLMC", "PLMX"),
    ("PLZC", "PLZX"),
    ("PLPE", "PPEX"),
    ("PKPR", "PKPX"),
    ("PKAC", "PKAX"),
    ("PKRT", "PKRX"),
    ("PLRN", "PLRX"),
];

/// Team column candidates, highest priority first
pub const TEAM_COLUMN_CANDIDATES: &[&str] = &["TID", "TEAM", "TMID", "TGID"];

/// The team column that must never be rewritten directly
pub const LOCKED_TEAM_COLUMN: &str = "TGID";

/// Fields a player swap never touches
pub const DEFAULT_IMMUTABLE_KEYS: &[&str] = &["TGID", "PGID", "POID"];

/// Column names used by the editors
pub mod columns {
    pub const FIRST_NAME: &str = "PFNA";
    pub const LAST_NAME: &str = "PLNA";
    pub const POSITION: &str = "PPOS";
    pub const AGE: &str = "PAGE";
    pub const YEARS: &str = "PYRP";

    pub const PICK_TEAM: &str = "DPID";
    pub const PICK_NUMBER: &str = "DPNM";
    pub const PICK_YEAR_OFFSET: &str = "DPYO";

    pub const SALARY_CAP: &str = "SCAD";
}

/// A described stat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Read-only lookup tables, built once and shared by reference
#[derive(Debug, Clone)]
pub struct Catalog {
    team_names: Vec<(&'static str, &'static str)>,
    positions: HashMap<&'static str, &'static str>,
    position_rank: HashMap<&'static str, usize>,
    stats: Vec<StatInfo>,
    stat_max: Vec<(&'static str, &'static str)>,
    team_column_candidates: Vec<&'static str>,
    locked_team_column: &'static str,
}

impl Catalog {
    /// Build the catalog from the built-in tables
    pub fn builtin() -> Self {
        Self {
            team_names: TEAM_NAMES.to_vec(),
            positions: POSITIONS.iter().copied().collect(),
            position_rank: POSITION_ORDER
                .iter()
                .enumerate()
                .map(|(rank, abbr)| (*abbr, rank))
                .collect(),
            stats: STAT_META
                .iter()
                .map(|&(code, name, description)| StatInfo {
                    code,
                    name,
                    description,
                })
                .collect(),
            stat_max: STAT_MAX_COLUMNS.to_vec(),
            team_column_candidates: TEAM_COLUMN_CANDIDATES.to_vec(),
            locked_team_column: LOCKED_TEAM_COLUMN,
        }
    }

    /// Process-wide catalog instance
    pub fn global() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Catalog::builtin)
    }

    /// All teams in display order
    pub fn teams(&self) -> &[(&'static str, &'static str)] {
        &self.team_names
    }

    /// Look up a team's display name
    pub fn team_name(&self, team_id: &str) -> Option<&'static str> {
        self.team_names
            .iter()
            .find(|(id, _)| *id == team_id)
            .map(|(_, name)| *name)
    }

    /// Position abbreviation for a position code
    pub fn position(&self, code: &str) -> Option<&'static str> {
        self.positions.get(code).copied()
    }

    /// Sort rank of a position abbreviation; unknown positions sort last
    pub fn position_rank(&self, abbr: &str) -> usize {
        self.position_rank
            .get(abbr)
            .copied()
            .unwrap_or(self.position_rank.len())
    }

    /// Described stats in display order
    pub fn stats(&self) -> &[StatInfo] {
        &self.stats
    }

    /// Look up a described stat
    pub fn stat(&self, code: &str) -> Option<&StatInfo> {
        self.stats.iter().find(|s| s.code == code)
    }

    /// The static base -> max column table
    pub fn stat_max_columns(&self) -> &[(&'static str, &'static str)] {
        &self.stat_max
    }

    pub fn team_column_candidates(&self) -> &[&'static str] {
        &self.team_column_candidates
    }

    pub fn locked_team_column(&self) -> &'static str {
        self.locked_team_column
    }

    /// File stem an export uses for a category
    pub fn file_stem(&self, category: Category) -> &'static str {
        match category {
            Category::Players => "play",
            Category::DraftPicks => "drpk",
            Category::SalaryCap => "slri",
            Category::Coaches => "coch",
            Category::Coordinators => "cord",
            Category::Scouts => "scot",
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(TEAM_NAMES.len(), 34);
        assert_eq!(POSITIONS.len(), 21);
        assert_eq!(POSITION_ORDER.len(), 21);
        assert_eq!(STAT_META.len(), 44);
        assert_eq!(STAT_MAX_COLUMNS.len(), 44);
    }

    #[test]
    fn test_irregular_max_column_kept() {
        let catalog = Catalog::builtin();
        let pair = catalog
            .stat_max_columns()
            .iter()
            .find(|(base, _)| *base == "PLSM")
            .unwrap();
        assert_eq!(pair.1, "PSMx");
    }

    #[test]
    fn test_every_max_entry_is_described() {
        let catalog = Catalog::builtin();
        for (base, _) in catalog.stat_max_columns() {
            assert!(catalog.stat(base).is_some(), "{base} has no description");
        }
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::global();
        assert_eq!(catalog.team_name("33"), Some("Free Agents"));
        assert_eq!(catalog.team_name("1015"), Some("Draft Class"));
        assert_eq!(catalog.team_name("99"), None);
        assert_eq!(catalog.position("13"), Some("LOLB"));
        assert_eq!(catalog.position_rank("QB"), 0);
        assert_eq!(catalog.position_rank("P"), 20);
        assert_eq!(catalog.position_rank("UNK"), 21);
    }
}
