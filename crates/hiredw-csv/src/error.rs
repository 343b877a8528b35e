//! Error types for `hiredw-csv`.

use thiserror::Error;

/// Fatal extraction errors. Row-scoped validation failures are *not*
/// errors — they are rejections, collected in
/// [`crate::Extraction::rejections`].
#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open source file {path}: {source}")]
  Open { path: String, source: csv::Error },

  #[error("source file is missing required column `{0}`")]
  MissingColumn(&'static str),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
