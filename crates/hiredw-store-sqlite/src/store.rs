//! [`Warehouse`] — the SQLite star-schema store and its batch loader.

use std::{
  collections::{HashMap, HashSet},
  path::Path,
};

use chrono::NaiveDate;
use hiredw_core::{CandidateRecord, date::DateKey, normalize};
use rusqlite::{Connection, Transaction, params};
use tracing::{debug, info};

use crate::{Error, Result, schema::SCHEMA};

// ─── Warehouse ───────────────────────────────────────────────────────────────

/// A hiring warehouse backed by a single SQLite file.
///
/// Opening applies the schema (idempotently); loading is a single
/// transaction per batch. Exactly one writer touches the file at a time —
/// the reporting layer opens it read-only after the load has committed.
#[derive(Debug)]
pub struct Warehouse {
  conn: Connection,
}

impl Warehouse {
  /// Open (or create) the warehouse at `path` and apply the embedded
  /// schema. Parent directories are created as needed.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with_ddl(path, SCHEMA)
  }

  /// Open (or create) the warehouse, applying a caller-supplied DDL
  /// verbatim instead of the embedded schema. A DDL that fails to apply
  /// aborts before any data is touched.
  pub fn open_with_ddl(path: impl AsRef<Path>, ddl: &str) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    let warehouse = Self { conn };
    warehouse.apply_ddl(ddl)?;
    Ok(warehouse)
  }

  /// Open an in-memory warehouse — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    let warehouse = Self { conn };
    warehouse.apply_ddl(SCHEMA)?;
    Ok(warehouse)
  }

  /// Delete the warehouse file (and its WAL side files) and recreate it
  /// empty but schema-valid.
  pub fn rebuild(path: impl AsRef<Path>) -> Result<Self> {
    Self::rebuild_with_ddl(path, SCHEMA)
  }

  /// [`Warehouse::rebuild`] with a caller-supplied DDL.
  pub fn rebuild_with_ddl(path: impl AsRef<Path>, ddl: &str) -> Result<Self> {
    let path = path.as_ref();
    for suffix in ["", "-wal", "-shm"] {
      let mut side = path.as_os_str().to_owned();
      side.push(suffix);
      match std::fs::remove_file(Path::new(&side)) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::Io(e)),
      }
    }
    info!(path = %path.display(), "warehouse dropped for rebuild");
    Self::open_with_ddl(path, ddl)
  }

  fn apply_ddl(&self, ddl: &str) -> Result<()> {
    self.conn.execute_batch(ddl)?;
    Ok(())
  }

  // ─── Loading ───────────────────────────────────────────────────────────

  /// Load a batch of validated records as one transaction; returns the
  /// number of fact rows inserted.
  ///
  /// Dimension rows are resolved against the existing tables first, so a
  /// second load against a populated warehouse reuses them. Any storage
  /// error rolls the whole batch back (the transaction is dropped
  /// uncommitted).
  pub fn load(&mut self, records: &[CandidateRecord]) -> Result<usize> {
    let tx = self.conn.transaction()?;
    let mut dims = DimCaches::preload(&tx)?;

    for record in records {
      let candidate_id = dims.resolve_candidate(&tx, record)?;
      let technology_id = dims.technology.resolve(&tx, &record.technology)?;
      let seniority_id = dims.seniority.resolve(&tx, &record.seniority)?;
      let country_id = dims.country.resolve(&tx, &record.country)?;
      let date_id = dims.resolve_date(&tx, record.application_date)?;

      tx.execute(
        "INSERT INTO FactHiring (
           candidate_id, technology_id, seniority_id, country_id, date_id,
           yoe, code_challenge_score, technical_interview_score, hired
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
          candidate_id,
          technology_id,
          seniority_id,
          country_id,
          date_id,
          record.yoe,
          record.code_challenge_score,
          record.technical_interview_score,
          record.hired() as i64,
        ],
      )?;
    }

    tx.commit()?;
    info!(rows = records.len(), "fact rows committed");
    Ok(records.len())
  }

  // ─── Reads ─────────────────────────────────────────────────────────────

  /// Row count of `FactHiring`.
  pub fn fact_count(&self) -> Result<i64> {
    Ok(
      self
        .conn
        .query_row("SELECT COUNT(*) FROM FactHiring", [], |r| r.get(0))?,
    )
  }

  /// `SUM(hired)` over the fact table (0 when empty).
  pub fn hired_total(&self) -> Result<i64> {
    Ok(self.conn.query_row(
      "SELECT COALESCE(SUM(hired), 0) FROM FactHiring",
      [],
      |r| r.get(0),
    )?)
  }

  /// Run a read-only query and return column names plus rows of dynamic
  /// values. The reporting layer is built on this.
  pub fn query(
    &self,
    sql: &str,
  ) -> Result<(Vec<String>, Vec<Vec<rusqlite::types::Value>>)> {
    let mut stmt = self.conn.prepare(sql)?;
    let columns: Vec<String> =
      stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();
    let rows = stmt
      .query_map([], |row| {
        (0..width)
          .map(|i| row.get::<_, rusqlite::types::Value>(i))
          .collect::<rusqlite::Result<Vec<_>>>()
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok((columns, rows))
  }
}

// ─── Dimension caches ────────────────────────────────────────────────────────

/// Resolve-or-create cache for one label dimension.
///
/// Keys are the case-folded trimmed label, so `Rust` and ` rust ` resolve
/// to the same row; the stored display form is the first one seen
/// (countries arrive already canonicalized).
struct LabelCache {
  insert_sql: &'static str,
  by_key:     HashMap<String, i64>,
}

impl LabelCache {
  fn preload(
    tx: &Transaction<'_>,
    select_sql: &'static str,
    insert_sql: &'static str,
  ) -> Result<Self> {
    let mut by_key = HashMap::new();
    let mut stmt = tx.prepare(select_sql)?;
    let rows = stmt
      .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
      let (id, label) = row?;
      by_key.insert(normalize::lookup_key(&label), id);
    }
    Ok(Self { insert_sql, by_key })
  }

  fn resolve(&mut self, tx: &Transaction<'_>, label: &str) -> Result<i64> {
    let key = normalize::lookup_key(label);
    if let Some(&id) = self.by_key.get(&key) {
      return Ok(id);
    }
    tx.execute(self.insert_sql, params![label.trim()])?;
    let id = tx.last_insert_rowid();
    self.by_key.insert(key, id);
    Ok(id)
  }
}

/// All per-run dimension state, preloaded from the open warehouse so
/// repeat loads reuse existing rows instead of duplicating them.
struct DimCaches {
  technology:  LabelCache,
  seniority:   LabelCache,
  country:     LabelCache,
  /// email → candidate_id. Emails are matched verbatim (trimmed upstream).
  candidates:  HashMap<String, i64>,
  known_dates: HashSet<i64>,
}

impl DimCaches {
  fn preload(tx: &Transaction<'_>) -> Result<Self> {
    let technology = LabelCache::preload(
      tx,
      "SELECT technology_id, technology FROM DimTechnology",
      "INSERT INTO DimTechnology (technology) VALUES (?1)",
    )?;
    let seniority = LabelCache::preload(
      tx,
      "SELECT seniority_id, seniority FROM DimSeniority",
      "INSERT INTO DimSeniority (seniority) VALUES (?1)",
    )?;
    let country = LabelCache::preload(
      tx,
      "SELECT country_id, country FROM DimCountry",
      "INSERT INTO DimCountry (country) VALUES (?1)",
    )?;

    let mut candidates = HashMap::new();
    let mut stmt = tx.prepare("SELECT candidate_id, email FROM DimCandidate")?;
    let rows = stmt
      .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
      let (id, email) = row?;
      candidates.insert(email, id);
    }

    let mut known_dates = HashSet::new();
    let mut stmt = tx.prepare("SELECT date_id FROM DimDate")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
    for row in rows {
      known_dates.insert(row?);
    }

    debug!(
      technologies = technology.by_key.len(),
      seniorities = seniority.by_key.len(),
      countries = country.by_key.len(),
      candidates = candidates.len(),
      dates = known_dates.len(),
      "dimension caches preloaded"
    );

    Ok(Self {
      technology,
      seniority,
      country,
      candidates,
      known_dates,
    })
  }

  /// First-seen name wins: a recurring email reuses the existing row and
  /// any differing name on later rows is ignored.
  fn resolve_candidate(
    &mut self,
    tx: &Transaction<'_>,
    record: &CandidateRecord,
  ) -> Result<i64> {
    if let Some(&id) = self.candidates.get(&record.email) {
      return Ok(id);
    }
    tx.execute(
      "INSERT INTO DimCandidate (first_name, last_name, email)
       VALUES (?1, ?2, ?3)",
      params![record.first_name, record.last_name, record.email],
    )?;
    let id = tx.last_insert_rowid();
    self.candidates.insert(record.email.clone(), id);
    Ok(id)
  }

  /// The date key is a pure function of the date, so resolution needs no
  /// lookup — only an insert the first time the date is seen.
  fn resolve_date(&mut self, tx: &Transaction<'_>, date: NaiveDate) -> Result<i64> {
    let key = DateKey::from_date(date);
    if self.known_dates.insert(key.date_id) {
      tx.execute(
        "INSERT INTO DimDate (date_id, full_date, day, month, month_name, quarter, year)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
          key.date_id,
          key.full_date,
          key.day,
          key.month,
          key.month_name,
          key.quarter,
          key.year,
        ],
      )?;
    }
    Ok(key.date_id)
  }
}
