//! Candidate records — the validated unit of input.
//!
//! One record is one *application* (the fact grain), not one person:
//! the same candidate may apply more than once and every accepted row
//! becomes its own fact.

use chrono::NaiveDate;

use crate::{
  error::{RejectReason, Result},
  normalize,
};

/// Inclusive pass mark applied to both interview scores.
pub const HIRED_THRESHOLD: f64 = 7.0;

/// Documented bounds of the two scores.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Raw, untyped field values of one input row, in source column order.
#[derive(Debug, Clone, Copy)]
pub struct RawFields<'a> {
  pub first_name:                &'a str,
  pub last_name:                 &'a str,
  pub email:                     &'a str,
  pub application_date:          &'a str,
  pub country:                   &'a str,
  pub yoe:                       &'a str,
  pub seniority:                 &'a str,
  pub technology:                &'a str,
  pub code_challenge_score:      &'a str,
  pub technical_interview_score: &'a str,
}

/// One validated hiring application, ready to be loaded.
///
/// Field values are already normalized: names and labels trimmed, the
/// country mapped to its canonical display form. There is deliberately no
/// `hired` field — the flag is derived (see [`CandidateRecord::hired`])
/// and never stored on the record, so a stray `hired` column in the
/// source can never leak through.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
  pub first_name:                String,
  pub last_name:                 String,
  pub email:                     String,
  pub application_date:          NaiveDate,
  pub country:                   String,
  pub yoe:                       i64,
  pub seniority:                 String,
  pub technology:                String,
  pub code_challenge_score:      f64,
  pub technical_interview_score: f64,
}

impl CandidateRecord {
  /// Validate raw field values into a record.
  ///
  /// Enforces the loader contract: plausible email, non-negative integer
  /// yoe, both scores on the 0-10 scale, ISO application date. Any
  /// failure rejects the whole row.
  pub fn parse(raw: RawFields<'_>) -> Result<Self> {
    let email = raw.email.trim();
    if email.is_empty() {
      return Err(RejectReason::EmptyEmail);
    }
    if !normalize::email_plausible(email) {
      return Err(RejectReason::ImplausibleEmail(email.to_string()));
    }

    let date_str = raw.application_date.trim();
    let application_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
      .map_err(|_| RejectReason::UnparsableDate(date_str.to_string()))?;

    let yoe_str = raw.yoe.trim();
    let yoe: i64 = yoe_str
      .parse()
      .map_err(|_| RejectReason::InvalidYoe(yoe_str.to_string()))?;
    if yoe < 0 {
      return Err(RejectReason::InvalidYoe(yoe_str.to_string()));
    }

    let code_challenge_score =
      parse_score("code_challenge_score", raw.code_challenge_score)?;
    let technical_interview_score =
      parse_score("technical_interview_score", raw.technical_interview_score)?;

    Ok(Self {
      first_name: raw.first_name.trim().to_string(),
      last_name: raw.last_name.trim().to_string(),
      email: email.to_string(),
      application_date,
      country: normalize::canonical_country(raw.country),
      yoe,
      seniority: raw.seniority.trim().to_string(),
      technology: raw.technology.trim().to_string(),
      code_challenge_score,
      technical_interview_score,
    })
  }

  /// The business rule: hired iff both scores reach [`HIRED_THRESHOLD`],
  /// inclusive. Always recomputed from the scores on this record.
  pub fn hired(&self) -> bool {
    self.code_challenge_score >= HIRED_THRESHOLD
      && self.technical_interview_score >= HIRED_THRESHOLD
  }
}

fn parse_score(field: &'static str, value: &str) -> Result<f64> {
  let trimmed = value.trim();
  let score: f64 = trimmed.parse().map_err(|_| RejectReason::UnparsableScore {
    field,
    value: trimmed.to_string(),
  })?;
  // NaN falls out here too: it is never inside the range.
  if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
    return Err(RejectReason::ScoreOutOfRange { field, value: score });
  }
  Ok(score)
}
