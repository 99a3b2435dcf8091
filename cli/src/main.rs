//! `permits` - command-line front end for the parking permit store
//!
//! Commands:
//! - permits series create|list|activate|prune|delete
//! - permits permit import|show|delete
//! - permits area import
//! - permits query [--active] [--time] [--subject] [--area]
//! - permits maintenance [--force]

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use parking_permits::PermitStore;
use parking_permits::types::{
    AppConfig, AreaIdentifier, Config, MultiPolygon, PermitDraft, PermitId, PermitSeries,
    PruneConfig, SeriesId,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser)]
#[command(name = "permits")]
#[command(about = "Parking permit validity cache", long_about = None)]
struct Cli {
    /// Directory holding the database
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to config.toml in the data directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Permit series commands
    Series {
        #[command(subcommand)]
        command: SeriesCommands,
    },

    /// Permit commands
    Permit {
        #[command(subcommand)]
        command: PermitCommands,
    },

    /// Permit area commands
    Area {
        #[command(subcommand)]
        command: AreaCommands,
    },

    /// Look up permits; prints one JSON object per line
    Query {
        /// Only permits of the active series
        #[arg(long)]
        active: bool,

        /// Valid at this RFC 3339 timestamp
        #[arg(long, value_parser = parse_timestamp)]
        time: Option<DateTime<Utc>>,

        /// Covering this registration number (any formatting)
        #[arg(long)]
        subject: Option<String>,

        /// Covering this area identifier
        #[arg(long)]
        area: Option<String>,
    },

    /// Prune old inactive series if the maintenance interval has elapsed
    Maintenance {
        /// Run even if the interval has not elapsed
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SeriesCommands {
    /// Create a new, inactive series
    Create,
    /// List all series
    List,
    /// Make a series the only active one
    Activate { id: u64 },
    /// Delete inactive series older than the retention window
    Prune,
    /// Delete a series without permits
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum PermitCommands {
    /// Bulk-create permits from a JSON array of {external_id?, subjects, areas}
    Import {
        file: PathBuf,

        /// Target series
        #[arg(short, long)]
        series: u64,
    },
    /// Print a permit and its cache rows
    Show { id: u64 },
    /// Delete a permit and its cache rows
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum AreaCommands {
    /// Insert or replace areas from a JSON array of {identifier, name, geometry}
    Import { file: PathBuf },
}

#[derive(Deserialize)]
struct PermitInput {
    #[serde(default)]
    external_id: Option<String>,
    #[serde(default)]
    subjects: Value,
    #[serde(default)]
    areas: Value,
}

#[derive(Deserialize)]
struct AreaInput {
    identifier: String,
    name: String,
    geometry: MultiPolygon,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (data_dir, app_config) = resolve_config(&cli)?;
    let store = PermitStore::open(Config {
        base_path: data_dir.clone(),
    })
    .with_context(|| format!("opening permit store in {}", data_dir.display()))?;

    let prune = PruneConfig::from(&app_config.retention);
    let now = Utc::now();

    match cli.command {
        Commands::Series { command } => run_series(&store, command, prune, now),
        Commands::Permit { command } => run_permit(&store, command, now),
        Commands::Area { command } => run_area(&store, command, now),
        Commands::Query {
            active,
            time,
            subject,
            area,
        } => {
            let mut query = store.query();
            if active {
                query = query.active();
            }
            if let Some(time) = time {
                query = query.by_time(time);
            }
            if let Some(subject) = &subject {
                query = query.by_subject(subject);
            }
            if let Some(area) = &area {
                query = query.by_area(area);
            }
            for permit in query.run()? {
                println!("{}", permit.to_json());
            }
            Ok(())
        }
        Commands::Maintenance { force } => {
            let outcome = if force {
                Some(store.force_maintenance(prune, now)?)
            } else {
                store.maintenance(prune, now)?
            };
            match outcome {
                Some(outcome) => println!(
                    "{}",
                    json!({
                        "pruned": outcome.pruned.iter().map(|id| id.into_inner()).collect::<Vec<_>>(),
                        "skipped": outcome.skipped.iter().map(|(id, n)| json!({"series": id.into_inner(), "permits": n})).collect::<Vec<_>>(),
                    })
                ),
                None => println!("maintenance not due"),
            }
            Ok(())
        }
    }
}

/// Data directory precedence: `--data-dir`, then `[storage] data_dir`, then `./data`.
fn resolve_config(cli: &Cli) -> anyhow::Result<(PathBuf, AppConfig)> {
    let fallback_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| AppConfig::path(&fallback_dir));

    let mut config = AppConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            tracing::warn!(path = %config_path.display(), "invalid config: {error}");
        }
        config = config.with_defaults_for_invalid();
    }

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.storage.data_dir.clone())
        .unwrap_or(fallback_dir);
    Ok((data_dir, config))
}

fn run_series(
    store: &PermitStore,
    command: SeriesCommands,
    prune: PruneConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    match command {
        SeriesCommands::Create => {
            let series = store.create_series(now)?;
            println!("{}", series_json(&series));
        }
        SeriesCommands::List => {
            for series in store.list_series()? {
                println!("{}", series_json(&series));
            }
        }
        SeriesCommands::Activate { id } => {
            store
                .activate_series(SeriesId::new(id), now)
                .with_context(|| format!("activating series {id}"))?;
        }
        SeriesCommands::Prune => {
            let outcome = store.prune_series(prune.retention, now)?;
            for id in outcome.pruned {
                println!("{id}");
            }
        }
        SeriesCommands::Delete { id } => {
            store
                .delete_series(SeriesId::new(id))
                .with_context(|| format!("deleting series {id}"))?;
        }
    }
    Ok(())
}

fn run_permit(store: &PermitStore, command: PermitCommands, now: DateTime<Utc>) -> anyhow::Result<()> {
    match command {
        PermitCommands::Import { file, series } => {
            let inputs: Vec<PermitInput> = read_json(&file)?;
            let series = SeriesId::new(series);

            let drafts = inputs
                .iter()
                .enumerate()
                .map(|(index, input)| {
                    PermitDraft::from_json(
                        series,
                        input.external_id.as_deref(),
                        &input.subjects,
                        &input.areas,
                    )
                    .with_context(|| format!("permit #{index} in {}", file.display()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let created = store
                .bulk_create_permits(drafts, now)
                .with_context(|| format!("importing {}", file.display()))?;
            for permit in created {
                println!("{}", permit.id);
            }
        }
        PermitCommands::Show { id } => {
            let id = PermitId::new(id);
            let Some(permit) = store.get_permit(id)? else {
                bail!("permit {id} does not exist");
            };
            let rows: Vec<_> = store
                .cache_items(id)?
                .iter()
                .map(|item| {
                    json!({
                        "registration_number": item.registration_number.as_str(),
                        "area": item.area_identifier.as_str(),
                        "start_time": item.start_time.to_rfc3339(),
                        "end_time": item.end_time.to_rfc3339(),
                    })
                })
                .collect();

            let mut output = permit.to_json();
            output["cache"] = Value::Array(rows);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        PermitCommands::Delete { id } => {
            store
                .delete_permit(PermitId::new(id))
                .with_context(|| format!("deleting permit {id}"))?;
        }
    }
    Ok(())
}

fn run_area(store: &PermitStore, command: AreaCommands, now: DateTime<Utc>) -> anyhow::Result<()> {
    match command {
        AreaCommands::Import { file } => {
            let inputs: Vec<AreaInput> = read_json(&file)?;
            for input in inputs {
                let identifier = AreaIdentifier::try_new(input.identifier.clone())
                    .with_context(|| format!("area identifier {:?}", input.identifier))?;
                store
                    .save_area(&identifier, &input.name, &input.geometry, now)
                    .with_context(|| format!("saving area {identifier}"))?;
                println!("{identifier}");
            }
        }
    }
    Ok(())
}

fn series_json(series: &PermitSeries) -> Value {
    json!({
        "id": series.id.into_inner(),
        "active": series.active,
        "created_at": series.created_at.to_rfc3339(),
        "modified_at": series.modified_at.to_rfc3339(),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}
