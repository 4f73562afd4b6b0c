//! # Carnage Schema Seeder Entry Point
//!
//! Loads a monster catalog, generates dungeon schemas and writes them as JSON
//! for the persistence layer to store.

use carnage::generation::utils;
use carnage::{
    records_to_json, write_records, CarnageResult, DifficultyTier, DungeonSchemaRecord,
    DungeonSchemaSeed, GenerationConfig, MonsterCatalog,
};
use clap::Parser;
use log::{error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command line arguments for the schema seeder.
#[derive(Parser, Debug)]
#[command(name = "carnage")]
#[command(about = "Generates dungeon schema seed records from a monster catalog")]
#[command(version)]
struct Args {
    /// JSON file holding the monster catalog
    #[arg(short, long)]
    catalog: PathBuf,

    /// Generate a single tier (Easy, Medium, Hard, Nightmare)
    #[arg(short, long, conflicts_with = "all")]
    tier: Option<String>,

    /// Generate every tier (the default when no tier is given)
    #[arg(long)]
    all: bool,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Optional generation config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = carnage::config::DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Carnage schema seeder v{}", carnage::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Seeding aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes env_logger, letting `RUST_LOG` override the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn run(args: &Args) -> CarnageResult<()> {
    let config = resolve_config(args.config.as_deref(), args.seed)?;
    let tiers = select_tiers(args.tier.as_deref(), args.all)?;

    let catalog = MonsterCatalog::load(&args.catalog)?;
    let seed = DungeonSchemaSeed::from_config(&config)?.with_tiers(tiers);

    match config.seed {
        Some(seed) => info!("Generating with seed {}", seed),
        None => info!("Generating with a random seed"),
    }
    let mut rng = utils::create_rng(config.seed);
    let records = seed.build(&catalog, &mut rng)?;

    emit_records(
        &records,
        args.output.as_deref(),
        args.pretty,
        &mut io::stdout().lock(),
    )?;

    info!("Seeding finished successfully.");
    Ok(())
}

/// Loads the config file when given; a `--seed` flag wins over its seed.
fn resolve_config(path: Option<&Path>, seed: Option<u64>) -> CarnageResult<GenerationConfig> {
    let mut config = match path {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// A named tier, or every tier when none is named or `--all` is set.
fn select_tiers(tier: Option<&str>, all: bool) -> CarnageResult<Vec<DifficultyTier>> {
    match (tier, all) {
        (Some(name), false) => Ok(vec![name.parse::<DifficultyTier>()?]),
        _ => Ok(DifficultyTier::ALL.to_vec()),
    }
}

/// Writes records to `output`, or to `stdout` when no file is given.
fn emit_records(
    records: &[DungeonSchemaRecord],
    output: Option<&Path>,
    pretty: bool,
    stdout: &mut dyn Write,
) -> CarnageResult<()> {
    match output {
        Some(path) => write_records(path, records, pretty),
        None => {
            writeln!(stdout, "{}", records_to_json(records, pretty)?)?;
            Ok(())
        }
    }
}
