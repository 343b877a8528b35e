//! `hiredw` — hiring-candidate ETL warehouse driver.
//!
//! # Usage
//!
//! ```
//! hiredw load --csv data/candidates.csv --db dw/dw_hiring.db --rebuild
//! hiredw report --db dw/dw_hiring.db --out-dir kpi/out
//! hiredw run-all --rebuild
//! ```
//!
//! Settings resolve as: defaults ← optional TOML file (`--config`) ←
//! `HIREDW_*` environment ← flags.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use hiredw_cli::{
  pipeline,
  settings::{FileSettings, Overrides, Settings},
};
use hiredw_core::summary::LoadSummary;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Hiring-candidate ETL warehouse")]
struct Cli {
  /// Path to an optional TOML configuration file.
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
  /// Source CSV path (';'-delimited, header line first).
  #[arg(long)]
  csv: Option<PathBuf>,

  /// Warehouse SQLite file.
  #[arg(long)]
  db: Option<PathBuf>,

  /// External schema DDL file, applied verbatim instead of the embedded
  /// schema.
  #[arg(long)]
  schema: Option<PathBuf>,

  /// Output directory for KPI CSVs.
  #[arg(long)]
  out_dir: Option<PathBuf>,

  /// Abort the load when the rejected fraction of rows exceeds this value.
  #[arg(long)]
  max_reject_rate: Option<f64>,
}

impl From<CommonArgs> for Overrides {
  fn from(args: CommonArgs) -> Self {
    Self {
      csv:             args.csv,
      db:              args.db,
      schema:          args.schema,
      out_dir:         args.out_dir,
      max_reject_rate: args.max_reject_rate,
    }
  }
}

#[derive(Subcommand)]
enum Command {
  /// Load the source CSV into the warehouse.
  Load {
    #[command(flatten)]
    common: CommonArgs,

    /// Drop and recreate the warehouse file before loading.
    #[arg(long)]
    rebuild: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
  },
  /// Run the KPI catalogue against a loaded warehouse.
  Report {
    #[command(flatten)]
    common: CommonArgs,
  },
  /// Load, then report — the whole pipeline in one invocation.
  RunAll {
    #[command(flatten)]
    common: CommonArgs,

    /// Drop and recreate the warehouse file before loading.
    #[arg(long)]
    rebuild: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
  },
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let file = FileSettings::layered(cli.config.as_deref())
    .context("failed to read configuration")?;

  match cli.command {
    Command::Load {
      common,
      rebuild,
      json,
    } => {
      let settings = Settings::resolve(file, common.into());
      let summary =
        pipeline::run_load(&settings, rebuild).context("load failed")?;
      print_summary(&summary, json)?;
    }
    Command::Report { common } => {
      let settings = Settings::resolve(file, common.into());
      pipeline::run_report(&settings).context("report failed")?;
    }
    Command::RunAll {
      common,
      rebuild,
      json,
    } => {
      let settings = Settings::resolve(file, common.into());
      let (summary, _tables) =
        pipeline::run_all(&settings, rebuild).context("pipeline failed")?;
      print_summary(&summary, json)?;
    }
  }

  Ok(())
}

fn print_summary(summary: &LoadSummary, json: bool) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(summary)?);
  } else {
    println!("{summary}");
  }
  Ok(())
}
