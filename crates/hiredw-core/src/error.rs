//! Error types for `hiredw-core`.

use thiserror::Error;

/// Why a single input row was rejected during validation.
///
/// Rejections are counted and reported, never individually fatal; the
/// partial-success policy is enforced one level up, where the aggregate
/// rejection rate is compared against the configured limit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
  #[error("missing field `{0}`")]
  MissingField(&'static str),

  #[error("empty email")]
  EmptyEmail,

  #[error("implausible email: {0:?}")]
  ImplausibleEmail(String),

  #[error("years of experience is not a non-negative integer: {0:?}")]
  InvalidYoe(String),

  #[error("{field} is not a number: {value:?}")]
  UnparsableScore { field: &'static str, value: String },

  #[error("{field} {value} is outside the 0-10 scale")]
  ScoreOutOfRange { field: &'static str, value: f64 },

  #[error("unparsable application date: {0:?}")]
  UnparsableDate(String),

  #[error("malformed line: {0}")]
  MalformedLine(String),
}

pub type Result<T, E = RejectReason> = std::result::Result<T, E>;
