//! CSV export of KPI results.

use std::{
  fs,
  path::{Path, PathBuf},
};

use tracing::info;

use crate::{KpiTable, error::Result};

/// Write one KPI result as `<out_dir>/<name>.csv`; returns the path.
pub fn write_csv(table: &KpiTable, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
  let out_dir = out_dir.as_ref();
  fs::create_dir_all(out_dir)?;
  let path = out_dir.join(format!("{}.csv", table.name));

  let mut writer = csv::Writer::from_path(&path)?;
  writer.write_record(&table.columns)?;
  for row in &table.rows {
    writer.write_record(row.iter().map(|cell| cell.to_string()))?;
  }
  writer.flush()?;

  info!(path = %path.display(), rows = table.rows.len(), "kpi exported");
  Ok(path)
}

/// Export the whole catalogue; returns the written paths in order.
pub fn write_all(
  tables: &[KpiTable],
  out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
  let out_dir = out_dir.as_ref();
  tables
    .iter()
    .map(|table| write_csv(table, out_dir))
    .collect()
}
