//! Layered configuration: defaults ← optional TOML file ← `HIREDW_*` env
//! ← CLI flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CSV: &str = "data/candidates.csv";
pub const DEFAULT_DB: &str = "dw/dw_hiring.db";
pub const DEFAULT_OUT_DIR: &str = "kpi/out";

/// Abort the load when more than this fraction of rows is rejected.
pub const DEFAULT_MAX_REJECT_RATE: f64 = 0.2;

// ─── File / environment layer ────────────────────────────────────────────────

/// Values as they appear in the config file or environment. Everything is
/// optional; the effective settings come from [`Settings::resolve`].
#[derive(Debug, Default, Deserialize)]
pub struct FileSettings {
  pub csv:             Option<PathBuf>,
  pub db:              Option<PathBuf>,
  pub schema:          Option<PathBuf>,
  pub out_dir:         Option<PathBuf>,
  pub max_reject_rate: Option<f64>,
}

impl FileSettings {
  /// Read the config file (required when a path is given) layered under
  /// `HIREDW_*` environment overrides.
  pub fn layered(path: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder =
        builder.add_source(config::File::from(path.to_path_buf()).required(true));
    }
    let settings = builder
      .add_source(config::Environment::with_prefix("HIREDW"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }
}

// ─── Flag layer ──────────────────────────────────────────────────────────────

/// Flag-level overrides collected by the binary.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub csv:             Option<PathBuf>,
  pub db:              Option<PathBuf>,
  pub schema:          Option<PathBuf>,
  pub out_dir:         Option<PathBuf>,
  pub max_reject_rate: Option<f64>,
}

// ─── Effective settings ──────────────────────────────────────────────────────

/// Effective settings after flag-over-file-over-default resolution.
#[derive(Debug, Clone)]
pub struct Settings {
  pub csv:             PathBuf,
  pub db:              PathBuf,
  /// External schema DDL applied verbatim instead of the embedded one.
  pub schema:          Option<PathBuf>,
  pub out_dir:         PathBuf,
  pub max_reject_rate: f64,
}

impl Settings {
  /// CLI flags win over the file/env layer, which wins over defaults.
  pub fn resolve(file: FileSettings, flags: Overrides) -> Self {
    Self {
      csv: flags
        .csv
        .or(file.csv)
        .unwrap_or_else(|| DEFAULT_CSV.into()),
      db: flags.db.or(file.db).unwrap_or_else(|| DEFAULT_DB.into()),
      schema: flags.schema.or(file.schema),
      out_dir: flags
        .out_dir
        .or(file.out_dir)
        .unwrap_or_else(|| DEFAULT_OUT_DIR.into()),
      max_reject_rate: flags
        .max_reject_rate
        .or(file.max_reject_rate)
        .unwrap_or(DEFAULT_MAX_REJECT_RATE),
    }
  }
}
