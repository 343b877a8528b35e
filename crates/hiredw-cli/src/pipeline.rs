//! The sequential load/report pipeline.

use std::{fs, path::Path};

use hiredw_core::summary::LoadSummary;
use hiredw_report::KpiTable;
use hiredw_store_sqlite::Warehouse;
use tracing::info;

use crate::{
  error::{Error, Result},
  settings::Settings,
};

/// Extract, gate on the rejection rate, and load — the whole ETL run.
///
/// The gate runs before the warehouse is opened for writing, so an
/// aborted run leaves the file in its prior state (on a rebuild that has
/// not happened yet, it does not even exist).
pub fn run_load(settings: &Settings, rebuild: bool) -> Result<LoadSummary> {
  info!(csv = %settings.csv.display(), "extract");
  let extraction = hiredw_csv::extract(&settings.csv)?;
  let summary = extraction.summary();

  let rate = summary.rejection_rate();
  if summary.rows_read > 0 && rate > settings.max_reject_rate {
    return Err(Error::RejectionRateExceeded {
      rate:      rate * 100.0,
      max:       settings.max_reject_rate * 100.0,
      rows_read: summary.rows_read,
    });
  }

  let ddl = read_ddl(settings)?;
  info!(db = %settings.db.display(), rebuild, "load");
  let mut warehouse = open_warehouse(&settings.db, ddl.as_deref(), rebuild)?;
  let inserted = warehouse.load(&extraction.records)?;
  info!(
    inserted,
    total_facts = warehouse.fact_count()?,
    "load committed"
  );
  Ok(summary)
}

/// Run the KPI catalogue against an already-loaded warehouse and write one
/// CSV per KPI under `out_dir`. Never writes to the warehouse itself.
pub fn run_report(settings: &Settings) -> Result<Vec<KpiTable>> {
  if !settings.db.exists() {
    return Err(Error::MissingWarehouse(settings.db.display().to_string()));
  }
  info!(db = %settings.db.display(), "report");
  let warehouse = Warehouse::open(&settings.db)?;
  let tables = hiredw_report::run_all(&warehouse)?;
  let paths = hiredw_report::export::write_all(&tables, &settings.out_dir)?;
  for path in &paths {
    info!(path = %path.display(), "kpi written");
  }
  Ok(tables)
}

/// Load, then report — the run-all driver.
pub fn run_all(
  settings: &Settings,
  rebuild: bool,
) -> Result<(LoadSummary, Vec<KpiTable>)> {
  let summary = run_load(settings, rebuild)?;
  let tables = run_report(settings)?;
  Ok((summary, tables))
}

fn read_ddl(settings: &Settings) -> Result<Option<String>> {
  match &settings.schema {
    None => Ok(None),
    Some(path) => fs::read_to_string(path).map(Some).map_err(|source| {
      Error::SchemaRead {
        path: path.display().to_string(),
        source,
      }
    }),
  }
}

fn open_warehouse(
  db: &Path,
  ddl: Option<&str>,
  rebuild: bool,
) -> Result<Warehouse> {
  let warehouse = match (rebuild, ddl) {
    (true, Some(ddl)) => Warehouse::rebuild_with_ddl(db, ddl)?,
    (true, None) => Warehouse::rebuild(db)?,
    (false, Some(ddl)) => Warehouse::open_with_ddl(db, ddl)?,
    (false, None) => Warehouse::open(db)?,
  };
  Ok(warehouse)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
