//! Integration tests for [`Warehouse`] against an in-memory database.

use chrono::NaiveDate;
use hiredw_core::CandidateRecord;
use rusqlite::types::Value;

use crate::{Error, Warehouse};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A valid record with middle-of-the-road values; tests tweak fields.
fn base_record() -> CandidateRecord {
  CandidateRecord {
    first_name:                "Alice".into(),
    last_name:                 "Liddell".into(),
    email:                     "alice@example.com".into(),
    application_date:          date(2021, 3, 4),
    country:                   "Colombia".into(),
    yoe:                       5,
    seniority:                 "Junior".into(),
    technology:                "Rust".into(),
    code_challenge_score:      8.0,
    technical_interview_score: 8.0,
  }
}

fn count(warehouse: &Warehouse, sql: &str) -> i64 {
  let (_, rows) = warehouse.query(sql).unwrap();
  match &rows[0][0] {
    Value::Integer(n) => *n,
    other => panic!("expected integer count, got {other:?}"),
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[test]
fn open_is_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dw.db");

  let mut first = Warehouse::open(&path).unwrap();
  first.load(&[base_record()]).unwrap();
  drop(first);

  // Re-opening applies the DDL again without clobbering data.
  let second = Warehouse::open(&path).unwrap();
  assert_eq!(second.fact_count().unwrap(), 1);
}

#[test]
fn open_creates_parent_directories() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dw").join("nested").join("dw.db");
  Warehouse::open(&path).unwrap();
  assert!(path.exists());
}

#[test]
fn malformed_ddl_is_fatal() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dw.db");
  let err = Warehouse::open_with_ddl(&path, "CREATE TABLEE oops (").unwrap_err();
  assert!(matches!(err, Error::Sqlite(_)));
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn end_to_end_three_row_scenario() {
  let mut wh = Warehouse::open_in_memory().unwrap();

  let mut hired = base_record();
  hired.email = "a@example.com".into();

  let mut not_hired = base_record();
  not_hired.email = "b@example.com".into();
  not_hired.code_challenge_score = 7.0;
  not_hired.technical_interview_score = 6.5;

  let mut boundary = base_record();
  boundary.email = "c@example.com".into();
  boundary.code_challenge_score = 7.0;
  boundary.technical_interview_score = 7.0;

  let inserted = wh.load(&[hired, not_hired, boundary]).unwrap();
  assert_eq!(inserted, 3);
  assert_eq!(wh.fact_count().unwrap(), 3);
  assert_eq!(wh.hired_total().unwrap(), 2);

  // One dimension row per distinct value among the three rows.
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimTechnology"), 1);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimSeniority"), 1);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimCountry"), 1);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimDate"), 1);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimCandidate"), 3);
}

#[test]
fn hired_is_recomputed_never_trusted() {
  let mut wh = Warehouse::open_in_memory().unwrap();

  let mut rec = base_record();
  rec.code_challenge_score = 6.99;
  wh.load(&[rec]).unwrap();

  assert_eq!(wh.hired_total().unwrap(), 0);
}

#[test]
fn labels_dedup_case_insensitively() {
  let mut wh = Warehouse::open_in_memory().unwrap();

  let mut a = base_record();
  a.technology = "Rust".into();
  let mut b = base_record();
  b.email = "b@example.com".into();
  b.technology = " rust ".into();
  let mut c = base_record();
  c.email = "c@example.com".into();
  c.technology = "RUST".into();

  wh.load(&[a, b, c]).unwrap();

  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimTechnology"), 1);
  // First-seen display form is stored.
  let (_, rows) = wh.query("SELECT technology FROM DimTechnology").unwrap();
  assert_eq!(rows[0][0], Value::Text("Rust".into()));
  // All three facts reference the single row.
  assert_eq!(
    count(
      &wh,
      "SELECT COUNT(DISTINCT technology_id) FROM FactHiring"
    ),
    1
  );
}

#[test]
fn duplicate_email_reuses_candidate_first_name_wins() {
  let mut wh = Warehouse::open_in_memory().unwrap();

  let first = base_record();
  let mut second = base_record();
  second.first_name = "Alicia".into();
  second.application_date = date(2022, 1, 10);

  wh.load(&[first, second]).unwrap();

  // Grain is "application": two facts, one candidate.
  assert_eq!(wh.fact_count().unwrap(), 2);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimCandidate"), 1);
  let (_, rows) = wh.query("SELECT first_name FROM DimCandidate").unwrap();
  assert_eq!(rows[0][0], Value::Text("Alice".into()));
}

#[test]
fn date_dimension_attributes_derive_from_the_date() {
  let mut wh = Warehouse::open_in_memory().unwrap();

  let mut a = base_record();
  a.application_date = date(2021, 7, 15);
  let mut b = base_record();
  b.email = "b@example.com".into();
  b.application_date = date(2021, 7, 15);

  wh.load(&[a, b]).unwrap();

  let (columns, rows) = wh
    .query(
      "SELECT date_id, full_date, day, month, month_name, quarter, year
       FROM DimDate",
    )
    .unwrap();
  assert_eq!(columns.len(), 7);
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0][0], Value::Integer(20_210_715));
  assert_eq!(rows[0][1], Value::Text("2021-07-15".into()));
  assert_eq!(rows[0][2], Value::Integer(15));
  assert_eq!(rows[0][3], Value::Integer(7));
  assert_eq!(rows[0][4], Value::Text("July".into()));
  assert_eq!(rows[0][5], Value::Integer(3));
  assert_eq!(rows[0][6], Value::Integer(2021));
}

#[test]
fn second_load_reuses_existing_dimensions() {
  let mut wh = Warehouse::open_in_memory().unwrap();

  wh.load(&[base_record()]).unwrap();

  let mut again = base_record();
  again.technology = "rust".into(); // same label, different case
  wh.load(&[again]).unwrap();

  assert_eq!(wh.fact_count().unwrap(), 2);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimTechnology"), 1);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimCandidate"), 1);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimDate"), 1);
}

#[test]
fn failed_load_rolls_back_entirely() {
  // A schema without the fact table: dimension inserts succeed, the fact
  // insert fails, and the whole transaction must vanish.
  const DIMS_ONLY: &str = "
    CREATE TABLE IF NOT EXISTS DimDate (
        date_id INTEGER PRIMARY KEY, full_date TEXT NOT NULL,
        day INTEGER NOT NULL, month INTEGER NOT NULL,
        month_name TEXT NOT NULL, quarter INTEGER NOT NULL,
        year INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS DimTechnology (
        technology_id INTEGER PRIMARY KEY AUTOINCREMENT,
        technology TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS DimSeniority (
        seniority_id INTEGER PRIMARY KEY AUTOINCREMENT,
        seniority TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS DimCountry (
        country_id INTEGER PRIMARY KEY AUTOINCREMENT,
        country TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS DimCandidate (
        candidate_id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL, last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    );
  ";
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dw.db");
  let mut wh = Warehouse::open_with_ddl(&path, DIMS_ONLY).unwrap();

  assert!(wh.load(&[base_record()]).is_err());
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimTechnology"), 0);
  assert_eq!(count(&wh, "SELECT COUNT(*) FROM DimCandidate"), 0);
}

// ─── Rebuild ─────────────────────────────────────────────────────────────────

#[test]
fn rebuild_drops_and_recreates() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dw.db");

  let mut wh = Warehouse::open(&path).unwrap();
  wh.load(&[base_record()]).unwrap();
  assert_eq!(wh.fact_count().unwrap(), 1);
  drop(wh);

  let rebuilt = Warehouse::rebuild(&path).unwrap();
  assert_eq!(rebuilt.fact_count().unwrap(), 0);
  assert_eq!(count(&rebuilt, "SELECT COUNT(*) FROM DimCandidate"), 0);
}

#[test]
fn rebuild_then_load_is_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dw.db");
  let records = vec![base_record()];

  let mut first = Warehouse::rebuild(&path).unwrap();
  first.load(&records).unwrap();
  let facts_first = first.fact_count().unwrap();
  let hired_first = first.hired_total().unwrap();
  drop(first);

  let mut second = Warehouse::rebuild(&path).unwrap();
  second.load(&records).unwrap();
  assert_eq!(second.fact_count().unwrap(), facts_first);
  assert_eq!(second.hired_total().unwrap(), hired_first);
}

#[test]
fn rebuild_on_missing_file_is_fine() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("fresh.db");
  let wh = Warehouse::rebuild(&path).unwrap();
  assert_eq!(wh.fact_count().unwrap(), 0);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[test]
fn query_returns_columns_and_typed_values() {
  let mut wh = Warehouse::open_in_memory().unwrap();
  wh.load(&[base_record()]).unwrap();

  let (columns, rows) = wh
    .query("SELECT yoe, code_challenge_score, hired FROM FactHiring")
    .unwrap();
  assert_eq!(columns, vec!["yoe", "code_challenge_score", "hired"]);
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0][0], Value::Integer(5));
  assert_eq!(rows[0][1], Value::Real(8.0));
  assert_eq!(rows[0][2], Value::Integer(1));
}
