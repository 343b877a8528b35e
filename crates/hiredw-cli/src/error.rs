//! Error type for the pipeline layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("config: {0}")]
  Config(#[from] config::ConfigError),

  #[error("extract: {0}")]
  Extract(#[from] hiredw_csv::Error),

  #[error("schema: cannot read DDL file {path}: {source}")]
  SchemaRead {
    path:   String,
    source: std::io::Error,
  },

  #[error("load: {0}")]
  Store(#[from] hiredw_store_sqlite::Error),

  #[error("report: {0}")]
  Report(#[from] hiredw_report::Error),

  #[error("warehouse not found at {0}; run `hiredw load` first")]
  MissingWarehouse(String),

  #[error(
    "rejection rate {rate:.1}% over {rows_read} rows exceeds the {max:.1}% \
     limit; warehouse left untouched"
  )]
  RejectionRateExceeded {
    rate:      f64,
    max:       f64,
    rows_read: usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
