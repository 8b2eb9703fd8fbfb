//! hc-core: Core library for editing franchise CSV exports
//!
//! This library provides functionality to:
//! - Load the players, draft picks, salary cap and staff tables of an export
//! - Normalize header names and discover team and stat/max columns
//! - Validate and clamp edited values
//! - Trade players without touching ownership or identity columns
//! - Save edited tables next to the originals without overwriting them

pub mod catalog;
pub mod config;
pub mod editors;
pub mod error;
pub mod normalize;
pub mod patch;
pub mod record;
pub mod roster;
pub mod scanner;
pub mod schema;
pub mod store;
pub mod trade;

pub use catalog::Catalog;
pub use config::EditorConfig;
pub use editors::{
    clamp_stat, edit_age, edit_name, edit_salary_cap, edit_skill_points, edit_stat, edit_years,
    enforce_le, sanitize_name, FieldKind, NameEdit,
};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use patch::{apply_batch, BatchResult, EditBatch, FieldEdit};
pub use record::{Record, RecordSet};
pub use scanner::{scan_directory, ScanResult};
pub use schema::{build_stat_max_map, detect_team_column, SchemaMetadata, StatPair};
pub use store::{load, save, Category, ExportPaths, Franchise};
pub use trade::{acquire_picks, move_player, reassign_draft_pick, safe_swap, MoveOutcome};
