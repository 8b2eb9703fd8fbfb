//! HC Franchise Editor CLI
//!
//! Command-line tool for viewing, editing and trading within franchise CSV exports.

use clap::{Args, Parser, Subcommand, ValueEnum};
use hc_core::catalog::columns;
use hc_core::patch::{apply_bio_edit, apply_name_edit, apply_stat_edit, salary_cap, set_salary_cap};
use hc_core::roster::{pick_entries, player_name, roster, stat_rows};
use hc_core::{
    acquire_picks, apply_batch, move_player, safe_swap, scan_directory, Catalog, Category,
    EditBatch, EditorConfig, Error, ExportPaths, FieldEdit, FieldKind, Franchise, MoveOutcome,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hc-cli")]
#[command(about = "Franchise CSV Editor", long_about = None)]
#[command(version)]
struct Cli {
    /// Editor settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to find the export files
#[derive(Args)]
struct ExportArgs {
    /// Directory to scan for export files
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Players file (play.csv)
    #[arg(long)]
    play: Option<PathBuf>,

    /// Draft picks file (drpk.csv)
    #[arg(long)]
    picks: Option<PathBuf>,

    /// Salary cap file (slri.csv)
    #[arg(long)]
    cap: Option<PathBuf>,

    /// Coaches file
    #[arg(long)]
    coaches: Option<PathBuf>,

    /// Coordinators file
    #[arg(long)]
    coordinators: Option<PathBuf>,

    /// Scouts file
    #[arg(long)]
    scouts: Option<PathBuf>,
}

impl ExportArgs {
    fn paths(&self) -> hc_core::Result<ExportPaths> {
        let mut paths = match &self.root {
            Some(root) => scan_directory(root, Catalog::global())?
                .export_paths()
                .ok_or_else(|| {
                    Error::Config(format!("no players file found under '{}'", root.display()))
                })?,
            None => match &self.play {
                Some(play) => ExportPaths::new(play),
                None => return Err(Error::Config("pass --root or --play".to_string())),
            },
        };

        let overrides = [
            (Category::Players, &self.play),
            (Category::DraftPicks, &self.picks),
            (Category::SalaryCap, &self.cap),
            (Category::Coaches, &self.coaches),
            (Category::Coordinators, &self.coordinators),
            (Category::Scouts, &self.scouts),
        ];
        for (category, path) in overrides {
            if let Some(path) = path {
                paths.set(category, path);
            }
        }
        for (category, path) in paths.iter() {
            debug!(category = category.label(), path = %path.display(), "export file");
        }
        Ok(paths)
    }

    fn load(&self) -> hc_core::Result<Franchise> {
        Franchise::load(&self.paths()?, Catalog::global())
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Players,
    DraftPicks,
    SalaryCap,
    Coaches,
    Coordinators,
    Scouts,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Players => Category::Players,
            CategoryArg::DraftPicks => Category::DraftPicks,
            CategoryArg::SalaryCap => Category::SalaryCap,
            CategoryArg::Coaches => Category::Coaches,
            CategoryArg::Coordinators => Category::Coordinators,
            CategoryArg::Scouts => Category::Scouts,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory for export files
    Scan {
        /// Directory to scan
        #[arg(short, long)]
        root: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a loaded export
    Info {
        #[command(flatten)]
        export: ExportArgs,
    },

    /// List teams, or the roster of one team
    Roster {
        #[command(flatten)]
        export: ExportArgs,

        /// Team id to list
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Show the described stats of a player
    Stats {
        #[command(flatten)]
        export: ExportArgs,

        /// Player row index
        #[arg(long)]
        player: usize,
    },

    /// List draft picks
    Picks {
        #[command(flatten)]
        export: ExportArgs,
    },

    /// Swap two players' data, keeping ids and team ownership in place
    Swap {
        #[command(flatten)]
        export: ExportArgs,

        /// First player row index
        #[arg(long)]
        a: usize,

        /// Second player row index
        #[arg(long)]
        b: usize,
    },

    /// Move a player to another team (only when the team column allows it)
    Move {
        #[command(flatten)]
        export: ExportArgs,

        /// Player row index
        #[arg(long)]
        player: usize,

        /// Destination team id
        #[arg(short, long)]
        team: String,
    },

    /// Move draft picks from one team to another
    AcquirePicks {
        #[command(flatten)]
        export: ExportArgs,

        /// Team giving up the picks
        #[arg(long)]
        from: String,

        /// Team receiving the picks
        #[arg(long)]
        to: String,

        /// Comma-separated indexes within the from-team's picks
        #[arg(long)]
        indexes: String,
    },

    /// Set a stat's current and/or max value
    SetStat {
        #[command(flatten)]
        export: ExportArgs,

        /// Player row index
        #[arg(long)]
        player: usize,

        /// Stat code (e.g. PSPD)
        #[arg(long)]
        stat: String,

        /// New current value
        #[arg(long)]
        current: Option<String>,

        /// New max value
        #[arg(long)]
        max: Option<String>,
    },

    /// Set a player's first and/or last name
    SetName {
        #[command(flatten)]
        export: ExportArgs,

        /// Player row index
        #[arg(long)]
        player: usize,

        #[arg(long)]
        first: Option<String>,

        #[arg(long)]
        last: Option<String>,
    },

    /// Set a player's age and/or years pro
    SetBio {
        #[command(flatten)]
        export: ExportArgs,

        /// Player row index
        #[arg(long)]
        player: usize,

        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        years: Option<String>,
    },

    /// Set the salary cap
    SetCap {
        #[command(flatten)]
        export: ExportArgs,

        /// New cap value
        #[arg(long)]
        value: String,
    },

    /// Set any column of any record verbatim
    SetRaw {
        #[command(flatten)]
        export: ExportArgs,

        #[arg(long, value_enum, default_value = "players")]
        category: CategoryArg,

        /// Record row index
        #[arg(long)]
        record: usize,

        #[arg(long)]
        column: String,

        #[arg(long)]
        value: String,
    },

    /// Apply a batch file of field edits
    Apply {
        #[command(flatten)]
        export: ExportArgs,

        /// Path to batch file (JSON)
        #[arg(short, long)]
        batch: PathBuf,
    },

    /// Create a batch file template
    CreateBatch {
        #[arg(long, value_enum, default_value = "players")]
        category: CategoryArg,

        /// Output path for the batch file
        #[arg(short, long)]
        output: PathBuf,

        /// Example edits to include (record:column:value)
        #[arg(short, long)]
        example: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "hc_core=debug,hc_cli=debug"
    } else {
        "hc_core=info,hc_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> hc_core::Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Scan { root, json } => cmd_scan(&root, json),
        Commands::Info { export } => cmd_info(&export),
        Commands::Roster { export, team } => cmd_roster(&export, team.as_deref()),
        Commands::Stats { export, player } => cmd_stats(&export, player),
        Commands::Picks { export } => cmd_picks(&export),
        Commands::Swap { export, a, b } => cmd_swap(&export, a, b, &config),
        Commands::Move {
            export,
            player,
            team,
        } => cmd_move(&export, player, &team),
        Commands::AcquirePicks {
            export,
            from,
            to,
            indexes,
        } => cmd_acquire_picks(&export, &from, &to, &indexes),
        Commands::SetStat {
            export,
            player,
            stat,
            current,
            max,
        } => cmd_set_stat(&export, player, &stat, current.as_deref(), max.as_deref()),
        Commands::SetName {
            export,
            player,
            first,
            last,
        } => cmd_set_name(&export, player, first.as_deref(), last.as_deref(), &config),
        Commands::SetBio {
            export,
            player,
            age,
            years,
        } => cmd_set_bio(&export, player, age.as_deref(), years.as_deref()),
        Commands::SetCap { export, value } => cmd_set_cap(&export, &value),
        Commands::SetRaw {
            export,
            category,
            record,
            column,
            value,
        } => cmd_set_raw(&export, category.into(), record, &column, &value),
        Commands::Apply { export, batch } => cmd_apply(&export, &batch, &config),
        Commands::CreateBatch {
            category,
            output,
            example,
        } => cmd_create_batch(category.into(), &output, &example),
    }
}

fn save_category(franchise: &Franchise, category: Category) -> hc_core::Result<()> {
    let path = franchise.set(category).save()?;
    println!("Saved {}: {}", category.label(), path.display());
    Ok(())
}

fn cmd_scan(root: &Path, json: bool) -> hc_core::Result<()> {
    let result = scan_directory(root, Catalog::global())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Scanned {}", result.root.display());
    println!("Found {} CSV files", result.total_files);
    println!();
    for category in Category::ALL {
        match result.get(category) {
            Some(path) => println!("  {:<13} {}", category.label(), path.display()),
            None => println!("  {:<13} -", category.label()),
        }
    }

    Ok(())
}

fn cmd_info(export: &ExportArgs) -> hc_core::Result<()> {
    let franchise = export.load()?;
    let catalog = Catalog::global();
    let schema = &franchise.schema;

    match &schema.team_column {
        Some(col) => println!("Team column: {}", col),
        None => println!("Team column: N/A (all players shown as one pool)"),
    }
    if schema.can_move_players(catalog) {
        println!("Direct player moves: enabled");
    } else {
        println!("Direct player moves: disabled (use swap)");
    }
    println!();

    for category in Category::ALL {
        let set = franchise.set(category);
        match &set.source_path {
            Some(path) => println!(
                "{:<13} {} rows, {} columns  ({})",
                category.label(),
                set.len(),
                set.headers.len(),
                path.display()
            ),
            None => println!("{:<13} not loaded", category.label()),
        }
    }
    println!();

    println!("Stat/max pairs ({}):", schema.stat_max.len());
    for pair in &schema.stat_max {
        let name = catalog.stat(&pair.base).map(|s| s.name).unwrap_or("");
        println!("  {} -> {}  {}", pair.base, pair.max, name);
    }

    Ok(())
}

fn cmd_roster(export: &ExportArgs, team: Option<&str>) -> hc_core::Result<()> {
    let franchise = export.load()?;
    let catalog = Catalog::global();
    let players = franchise.players();

    let Some(team) = team else {
        println!("Teams ({}):", catalog.teams().len());
        for (id, name) in catalog.teams() {
            let count = roster(players, &franchise.schema, catalog, id).len();
            println!("  {:>4}: {:<28} {} players", id, name, count);
        }
        return Ok(());
    };

    let entries = roster(players, &franchise.schema, catalog, team);
    println!(
        "{}: {} ({} players)",
        team,
        catalog.team_name(team).unwrap_or("Unknown"),
        entries.len()
    );
    println!();
    println!("{:>5}  {:<5} {:<24} {:>4} {:>4}", "ROW", "POS", "NAME", "AGE", "YRS");
    for e in &entries {
        let age = if e.age.is_empty() { "-" } else { e.age.as_str() };
        let years = if e.years.is_empty() { "-" } else { e.years.as_str() };
        println!("{:>5}  {:<5} {:<24} {:>4} {:>4}", e.index, e.position, e.name, age, years);
    }

    Ok(())
}

fn cmd_stats(export: &ExportArgs, index: usize) -> hc_core::Result<()> {
    let franchise = export.load()?;
    let players = franchise.players();
    let record = players.get(index)?;

    println!("Player {}: {}", index, player_name(record));
    println!();
    println!("{:<20} {:>5} {:>6} {:>5} {:>6}", "STAT", "COL", "CUR", "MAXCOL", "MAX");
    for row in stat_rows(record, &players.headers, &franchise.schema, Catalog::global()) {
        println!(
            "{:<20} {:>5} {:>6} {:>5} {:>6}",
            row.name,
            row.current_column.as_deref().unwrap_or("N/A"),
            row.current.as_deref().unwrap_or("-"),
            row.max_column.as_deref().unwrap_or("N/A"),
            row.max.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

fn cmd_picks(export: &ExportArgs) -> hc_core::Result<()> {
    let franchise = export.load()?;
    let picks = franchise.set(Category::DraftPicks);
    if picks.is_empty() {
        println!("No draft picks loaded.");
        return Ok(());
    }

    println!("{:>5}  {:<34} {:>5} {:>5}", "ROW", "TEAM", "PICK", "YEAR");
    for entry in pick_entries(picks, Catalog::global()) {
        let team = format!("{}: {}", entry.team_id, entry.team_name);
        let pick = entry.pick.map_or("-".to_string(), |p| p.to_string());
        let year = entry.year_offset.map_or("-".to_string(), |y| y.to_string());
        println!("{:>5}  {:<34} {:>5} {:>5}", entry.index, team, pick, year);
    }

    Ok(())
}

fn cmd_swap(export: &ExportArgs, a: usize, b: usize, config: &EditorConfig) -> hc_core::Result<()> {
    let mut franchise = export.load()?;

    let name_a = player_name(franchise.players().get(a)?);
    let name_b = player_name(franchise.players().get(b)?);
    let swapped = safe_swap(franchise.players_mut(), a, b, &config.immutable_keys)?;

    println!("Swap trade completed: {}  <->  {}", name_a, name_b);
    println!("{} fields exchanged", swapped);
    println!(
        "Not swapped: {}",
        config
            .immutable_keys
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    save_category(&franchise, Category::Players)
}

fn cmd_move(export: &ExportArgs, index: usize, team: &str) -> hc_core::Result<()> {
    let mut franchise = export.load()?;
    let schema = franchise.schema.clone();

    match move_player(franchise.players_mut(), index, team, &schema, Catalog::global())? {
        MoveOutcome::AlreadyOnTeam => {
            println!("Player already on team {}; nothing to save.", team);
            Ok(())
        }
        MoveOutcome::Moved { from, to } => {
            let record = franchise.players().get(index)?;
            println!("Moved {} from {} to {}", player_name(record), from, to);
            save_category(&franchise, Category::Players)
        }
    }
}

fn cmd_acquire_picks(export: &ExportArgs, from: &str, to: &str, indexes: &str) -> hc_core::Result<()> {
    let mut franchise = export.load()?;

    let parsed: Vec<usize> = indexes
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();

    let moved = acquire_picks(franchise.set_mut(Category::DraftPicks), from, to, &parsed)?;
    println!("Moved {} pick(s) from {} to {}", moved.len(), from, to);

    save_category(&franchise, Category::DraftPicks)
}

fn cmd_set_stat(
    export: &ExportArgs,
    index: usize,
    stat: &str,
    current: Option<&str>,
    max: Option<&str>,
) -> hc_core::Result<()> {
    let mut franchise = export.load()?;
    let schema = franchise.schema.clone();
    let record = franchise.players_mut().get_mut(index)?;

    apply_stat_edit(record, &schema, Catalog::global(), stat, current, max)?;
    println!(
        "{} = {}, max = {}",
        stat,
        record.get(stat).unwrap_or("-"),
        schema
            .max_for(stat)
            .and_then(|col| record.get(col))
            .unwrap_or("-")
    );

    save_category(&franchise, Category::Players)
}

fn cmd_set_name(
    export: &ExportArgs,
    index: usize,
    first: Option<&str>,
    last: Option<&str>,
    config: &EditorConfig,
) -> hc_core::Result<()> {
    let mut franchise = export.load()?;
    let record = franchise.players_mut().get_mut(index)?;

    let changed = apply_name_edit(record, first, last, config.name_max_len)?;
    for edit in &changed {
        println!(
            "Warning: name sanitized: '{}' -> '{}'",
            edit.original, edit.sanitized
        );
    }
    println!("Name set to {}", player_name(record));

    save_category(&franchise, Category::Players)
}

fn cmd_set_bio(
    export: &ExportArgs,
    index: usize,
    age: Option<&str>,
    years: Option<&str>,
) -> hc_core::Result<()> {
    let mut franchise = export.load()?;
    let record = franchise.players_mut().get_mut(index)?;

    apply_bio_edit(record, age, years)?;
    println!(
        "Age {}, years {}",
        record.get(columns::AGE).unwrap_or("-"),
        record.get(columns::YEARS).unwrap_or("-")
    );

    save_category(&franchise, Category::Players)
}

fn cmd_set_cap(export: &ExportArgs, value: &str) -> hc_core::Result<()> {
    let mut franchise = export.load()?;
    let salaries = franchise.set_mut(Category::SalaryCap);

    let before = salary_cap(salaries).unwrap_or("-").to_string();
    let applied = set_salary_cap(salaries, value)?;
    println!("Salary cap: {} -> {}", before, applied);

    save_category(&franchise, Category::SalaryCap)
}

fn cmd_set_raw(
    export: &ExportArgs,
    category: Category,
    index: usize,
    column: &str,
    value: &str,
) -> hc_core::Result<()> {
    let mut franchise = export.load()?;
    let record = franchise.set_mut(category).get_mut(index)?;

    let previous = record.set(column, value)?;
    println!("{}[{}].{}: '{}' -> '{}'", category.label(), index, column, previous, value);

    save_category(&franchise, category)
}

fn cmd_apply(export: &ExportArgs, batch_path: &Path, config: &EditorConfig) -> hc_core::Result<()> {
    let batch = EditBatch::load(batch_path)?;
    println!(
        "Loaded batch for {} with {} edits",
        batch.category.label(),
        batch.edits.len()
    );

    let mut franchise = export.load()?;
    let result = apply_batch(&mut franchise, &batch, config);

    println!("{} edits applied", result.applied);
    for name in &result.sanitized {
        println!("  name sanitized: '{}' -> '{}'", name.original, name.sanitized);
    }
    if !result.failed.is_empty() {
        println!("\nWarning: {} edits could not be applied:", result.failed.len());
        for (edit, reason) in &result.failed {
            println!("  - Record {}, Column '{}': {}", edit.record, edit.column, reason);
        }
    }

    if result.applied == 0 {
        println!("\nNo changes to save.");
        return Ok(());
    }
    save_category(&franchise, batch.category)
}

fn cmd_create_batch(category: Category, output: &Path, examples: &[String]) -> hc_core::Result<()> {
    let mut batch = EditBatch::new(category);

    // Parse example edits: "record:column:value"
    for example in examples {
        let parts: Vec<&str> = example.splitn(3, ':').collect();
        if parts.len() != 3 {
            eprintln!("Warning: Invalid example format '{}', expected 'record:column:value'", example);
            continue;
        }

        let record: usize = match parts[0].parse() {
            Ok(i) => i,
            Err(_) => {
                eprintln!("Warning: Invalid record index '{}' in example", parts[0]);
                continue;
            }
        };

        batch.add_edit(FieldEdit::new(record, parts[1], parts[2], FieldKind::Raw));
    }

    // If no examples provided, add a placeholder
    if batch.edits.is_empty() {
        batch.add_edit(FieldEdit::new(0, "PSPD", "90", FieldKind::Stat));
    }

    batch.save(output)?;
    println!("Created batch file: {}", output.display());
    println!("Category: {}", category.label());
    println!("Edits: {}", batch.edits.len());
    println!();
    println!("Edit the file to add your changes, then run:");
    println!("  hc-cli apply --play <play.csv> --batch {}", output.display());

    Ok(())
}
