mod config;
mod logging;
mod menu;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use plastgen_core::{
    validate_records, BranchPolicy, Error as CoreError, IdPolicy, RunConfig, RunReport,
};
use plastgen_generate::BatchDriver;
use plastgen_store::{admin, MemStore, PostgresStore};

use crate::config::DbSettings;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "plastgen", version, about = "Synthetic data seeder for the plastics schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one or more batches of synthetic records.
    Generate(GenerateArgs),
    /// Truncate every table in the schema and restart identity sequences.
    Reset(ResetArgs),
    /// Interactive menu: generate, reset, exit.
    Menu(MenuArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum IdPolicyArg {
    /// Uniform random DNIs/RUCs; collisions possible, low volumes only.
    Random,
    /// Event-index-derived identities; collision-free at any volume.
    Sequential,
}

impl From<IdPolicyArg> for IdPolicy {
    fn from(value: IdPolicyArg) -> Self {
        match value {
            IdPolicyArg::Random => IdPolicy::Random,
            IdPolicyArg::Sequential => IdPolicy::Sequential,
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Database connection string; falls back to the environment.
    #[arg(long, value_name = "CONNECTION_STRING")]
    conn: Option<String>,
    /// Target volume(s); each volume is generated as its own run.
    #[arg(long = "records", value_name = "N", num_args = 1.., required = true)]
    records: Vec<u64>,
    /// Seed for the run RNG; omitted means seeded from the OS.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = IdPolicyArg::Sequential)]
    id_policy: IdPolicyArg,
    /// Probability that a buyer gets a legal representative.
    #[arg(long, default_value_t = 0.5)]
    p_legal: f64,
    /// Probability that the sale line references the quoted product.
    #[arg(long, default_value_t = 0.5)]
    p_quoted: f64,
    /// Generate into the in-memory store instead of Postgres.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Print run reports as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct ResetArgs {
    /// Database connection string; falls back to the environment.
    #[arg(long, value_name = "CONNECTION_STRING")]
    conn: Option<String>,
}

#[derive(Args, Debug)]
struct MenuArgs {
    /// Database connection string; falls back to the environment.
    #[arg(long, value_name = "CONNECTION_STRING")]
    conn: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Reset(args) => run_reset(args).await,
        Command::Menu(args) => run_menu(args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let branches = branch_policy(args.p_legal, args.p_quoted)?;
    let policy: IdPolicy = args.id_policy.into();
    for &records in &args.records {
        validate_records(records, policy)?;
    }
    // One invocation shares one event sequence across its volumes, so
    // sequential identities (and fixed seeds) never repeat mid-invocation.
    let run_config = |volume: u64| RunConfig {
        id_policy: policy,
        branches,
        seed: args.seed.map(|seed| seed.wrapping_add(volume)),
    };
    let mut next_event = 0;

    if args.dry_run {
        let database = MemStore::new();
        for (volume, &records) in args.records.iter().enumerate() {
            let report = BatchDriver::new(database.handle(), run_config(volume as u64))
                .starting_at(next_event)
                .generate(records)
                .await?;
            next_event += records;
            emit_report(&report, args.json)?;
        }
        return Ok(());
    }

    let settings = DbSettings::resolve(args.conn.as_deref())?;
    let pool = settings.connect().await?;
    for (volume, &records) in args.records.iter().enumerate() {
        let store = PostgresStore::begin(&pool).await?;
        let report = BatchDriver::new(store, run_config(volume as u64))
            .starting_at(next_event)
            .generate(records)
            .await?;
        next_event += records;
        emit_report(&report, args.json)?;
    }
    Ok(())
}

async fn run_reset(args: ResetArgs) -> Result<(), CliError> {
    let settings = DbSettings::resolve(args.conn.as_deref())?;
    let pool = settings.connect().await?;
    let cleared = admin::reset_all(&pool, &settings.schema).await?;
    println!("cleared {cleared} tables in schema '{}'", settings.schema);
    Ok(())
}

async fn run_menu(args: MenuArgs) -> Result<(), CliError> {
    let settings = DbSettings::resolve(args.conn.as_deref())?;
    let pool = settings.connect().await?;
    menu::run(&pool, &settings.schema, RunConfig::default()).await
}

fn branch_policy(p_legal: f64, p_quoted: f64) -> Result<BranchPolicy, CliError> {
    for (name, value) in [("--p-legal", p_legal), ("--p-quoted", p_quoted)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(CliError::InvalidConfig(format!(
                "{name} must be within 0.0..=1.0, got {value}"
            )));
        }
    }
    Ok(BranchPolicy {
        legal_representation: p_legal,
        quoted_sale: p_quoted,
    })
}

fn emit_report(report: &RunReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!(
            "run {}: {} records committed in {} ms ({} legal buyers, {} quoted sales)",
            report.run_id,
            report.records,
            report.elapsed_ms,
            report.counts.legal_buyers,
            report.quoted_sale_events
        );
    }
    Ok(())
}
