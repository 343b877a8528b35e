//! Source-file extraction.
//!
//! Pipeline:
//!   raw `;`-delimited text
//!     └─ normalized header → column index map
//!          └─ per-row field lookup → RawFields
//!               └─ CandidateRecord::parse → accept / reject

use std::{io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord};
use hiredw_core::{
  CandidateRecord, RejectReason, record::RawFields, summary::LoadSummary,
};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// The source file's field delimiter.
pub const DELIMITER: u8 = b';';

// ─── Output types ────────────────────────────────────────────────────────────

/// One rejected input row.
#[derive(Debug, Clone)]
pub struct RowRejection {
  /// 1-based line number in the source file (the header is line 1).
  pub line:   u64,
  pub reason: RejectReason,
}

/// Everything [`extract`] produces: the validated records plus the
/// rejection ledger.
#[derive(Debug, Default)]
pub struct Extraction {
  pub records:    Vec<CandidateRecord>,
  pub rejections: Vec<RowRejection>,
}

impl Extraction {
  /// Data rows seen, header excluded.
  pub fn rows_read(&self) -> usize {
    self.records.len() + self.rejections.len()
  }

  /// Fold the extraction into the run summary (counts plus the first few
  /// rejection reasons).
  pub fn summary(&self) -> LoadSummary {
    let mut summary = LoadSummary::default();
    for _ in &self.records {
      summary.record_accepted();
    }
    for rejection in &self.rejections {
      summary.record_rejected(rejection.line, &rejection.reason);
    }
    summary
  }
}

// ─── Column resolution ───────────────────────────────────────────────────────

/// Indexes of the ten required columns after header normalization.
struct Columns {
  first_name:                usize,
  last_name:                 usize,
  email:                     usize,
  application_date:          usize,
  country:                   usize,
  yoe:                       usize,
  seniority:                 usize,
  technology:                usize,
  code_challenge_score:      usize,
  technical_interview_score: usize,
}

impl Columns {
  fn from_headers(headers: &StringRecord) -> Result<Self> {
    let normalized: Vec<String> =
      headers.iter().map(normalize_header).collect();
    let index = |name: &'static str| -> Result<usize> {
      normalized
        .iter()
        .position(|h| h == name)
        .ok_or(Error::MissingColumn(name))
    };
    Ok(Self {
      first_name:                index("first_name")?,
      last_name:                 index("last_name")?,
      email:                     index("email")?,
      application_date:          index("application_date")?,
      country:                   index("country")?,
      yoe:                       index("yoe")?,
      seniority:                 index("seniority")?,
      technology:                index("technology")?,
      code_challenge_score:      index("code_challenge_score")?,
      technical_interview_score: index("technical_interview_score")?,
    })
  }
}

/// `" First Name "` → `"first_name"` — mirrors the source system's header
/// cleanup so either spelling binds. Extra columns (e.g. a stray `Hired`)
/// are simply never read.
fn normalize_header(header: &str) -> String {
  header.trim().to_lowercase().replace(' ', "_")
}

// ─── Extraction ──────────────────────────────────────────────────────────────

/// Read and validate the source CSV at `path`.
///
/// An unreadable file or a missing required column is fatal; anything
/// row-scoped lands in the rejection ledger instead.
pub fn extract(path: impl AsRef<Path>) -> Result<Extraction> {
  let path = path.as_ref();
  let reader = ReaderBuilder::new()
    .delimiter(DELIMITER)
    .flexible(true)
    .from_path(path)
    .map_err(|source| Error::Open {
      path: path.display().to_string(),
      source,
    })?;
  extract_from(reader)
}

/// Same as [`extract`] over any reader — used by tests and pipes.
pub fn extract_reader(input: impl Read) -> Result<Extraction> {
  let reader = ReaderBuilder::new()
    .delimiter(DELIMITER)
    .flexible(true)
    .from_reader(input);
  extract_from(reader)
}

fn extract_from<R: Read>(mut reader: csv::Reader<R>) -> Result<Extraction> {
  let columns = Columns::from_headers(reader.headers()?)?;
  let mut out = Extraction::default();

  // Fallback when the reader cannot report a position; one record is one
  // line in this format (no quoted newlines in practice).
  let mut fallback_line: u64 = 1;
  for row in reader.records() {
    fallback_line += 1;
    match row {
      Ok(record) => {
        let line = record.position().map_or(fallback_line, |p| p.line());
        match parse_row(&columns, &record) {
          Ok(rec) => out.records.push(rec),
          Err(reason) => {
            warn!(line, %reason, "row rejected");
            out.rejections.push(RowRejection { line, reason });
          }
        }
      }
      Err(e) if row_scoped(&e) => {
        let line = e.position().map_or(fallback_line, |p| p.line());
        let reason = RejectReason::MalformedLine(e.to_string());
        warn!(line, %reason, "row rejected");
        out.rejections.push(RowRejection { line, reason });
      }
      // I/O failures mid-stream are fatal, not row-scoped.
      Err(e) => return Err(Error::Csv(e)),
    }
  }

  debug!(
    records = out.records.len(),
    rejections = out.rejections.len(),
    "extraction finished"
  );
  Ok(out)
}

/// Errors that spoil one row but not the stream.
fn row_scoped(e: &csv::Error) -> bool {
  matches!(
    e.kind(),
    csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. }
  )
}

fn parse_row(
  columns: &Columns,
  record: &StringRecord,
) -> std::result::Result<CandidateRecord, RejectReason> {
  let field = |idx: usize, name: &'static str| {
    record.get(idx).ok_or(RejectReason::MissingField(name))
  };
  let raw = RawFields {
    first_name:                field(columns.first_name, "first_name")?,
    last_name:                 field(columns.last_name, "last_name")?,
    email:                     field(columns.email, "email")?,
    application_date:          field(columns.application_date, "application_date")?,
    country:                   field(columns.country, "country")?,
    yoe:                       field(columns.yoe, "yoe")?,
    seniority:                 field(columns.seniority, "seniority")?,
    technology:                field(columns.technology, "technology")?,
    code_challenge_score:      field(columns.code_challenge_score, "code_challenge_score")?,
    technical_interview_score: field(columns.technical_interview_score, "technical_interview_score")?,
  };
  CandidateRecord::parse(raw)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
