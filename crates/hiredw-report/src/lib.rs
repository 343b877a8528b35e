//! Read-only KPI catalogue over the hiring warehouse.
//!
//! Each KPI is a fixed aggregate query against `FactHiring` joined to its
//! dimensions. This layer consumes the warehouse contract
//! (table/column names); it never writes.

pub mod error;
pub mod export;

pub use error::{Error, Result};

use std::fmt;

use hiredw_store_sqlite::Warehouse;
use rusqlite::types::Value;
use tracing::debug;

// ─── Catalogue ───────────────────────────────────────────────────────────────

/// A named, fixed KPI query.
#[derive(Debug, Clone, Copy)]
pub struct Kpi {
  pub name: &'static str,
  pub sql:  &'static str,
}

/// The full catalogue, in report order.
pub const KPIS: &[Kpi] = &[
  Kpi {
    name: "hires_by_technology",
    sql:  "
SELECT t.technology,
       SUM(f.hired) AS hires,
       COUNT(*) AS total_candidates,
       ROUND(100.0 * SUM(f.hired) / COUNT(*), 2) AS hire_rate_pct
FROM FactHiring f
JOIN DimTechnology t USING(technology_id)
GROUP BY t.technology
ORDER BY hires DESC",
  },
  Kpi {
    name: "hires_by_year",
    sql:  "
SELECT d.year,
       SUM(f.hired) AS hires,
       COUNT(*) AS total_candidates,
       ROUND(100.0 * SUM(f.hired) / COUNT(*), 2) AS hire_rate_pct
FROM FactHiring f
JOIN DimDate d USING(date_id)
GROUP BY d.year
ORDER BY d.year",
  },
  Kpi {
    name: "hires_by_seniority",
    sql:  "
SELECT s.seniority,
       SUM(f.hired) AS hires,
       COUNT(*) AS total_candidates,
       ROUND(100.0 * SUM(f.hired) / COUNT(*), 2) AS hire_rate_pct
FROM FactHiring f
JOIN DimSeniority s USING(seniority_id)
GROUP BY s.seniority
ORDER BY hires DESC",
  },
  Kpi {
    name: "hires_by_country_over_years_focus",
    sql:  "
SELECT d.year, c.country, SUM(f.hired) AS hires
FROM FactHiring f
JOIN DimDate d USING(date_id)
JOIN DimCountry c USING(country_id)
WHERE c.country IN ('United States','Brazil','Colombia','Ecuador')
GROUP BY d.year, c.country
ORDER BY d.year, hires DESC",
  },
  Kpi {
    name: "hire_rate_by_technology",
    sql:  "
SELECT t.technology,
       ROUND(100.0 * SUM(f.hired) / COUNT(*), 2) AS hire_rate_pct,
       SUM(f.hired) AS hires,
       COUNT(*) AS total_candidates
FROM FactHiring f
JOIN DimTechnology t USING(technology_id)
GROUP BY t.technology
ORDER BY hire_rate_pct DESC, t.technology",
  },
  Kpi {
    name: "hires_by_yoe_band",
    sql:  "
SELECT CASE
         WHEN f.yoe < 3 THEN '0-2'
         WHEN f.yoe BETWEEN 3 AND 5 THEN '3-5'
         WHEN f.yoe BETWEEN 6 AND 10 THEN '6-10'
         ELSE '11+'
       END AS yoe_band,
       SUM(f.hired) AS hires,
       COUNT(*) AS total_candidates
FROM FactHiring f
GROUP BY yoe_band
ORDER BY CASE yoe_band
           WHEN '0-2' THEN 1
           WHEN '3-5' THEN 2
           WHEN '6-10' THEN 3
           ELSE 4
         END",
  },
  Kpi {
    name: "avg_scores_by_hired",
    sql:  "
SELECT hired,
       ROUND(AVG(code_challenge_score), 2) AS avg_code_challenge,
       ROUND(AVG(technical_interview_score), 2) AS avg_tech_interview
FROM FactHiring
GROUP BY hired
ORDER BY hired DESC",
  },
];

/// Look a KPI up by name.
pub fn find(name: &str) -> Option<&'static Kpi> {
  KPIS.iter().find(|kpi| kpi.name == name)
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// A single result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Null,
  Int(i64),
  Real(f64),
  Text(String),
}

impl From<Value> for Cell {
  fn from(value: Value) -> Self {
    match value {
      Value::Null => Cell::Null,
      Value::Integer(n) => Cell::Int(n),
      Value::Real(x) => Cell::Real(x),
      Value::Text(s) => Cell::Text(s),
      // No KPI selects blobs; render a placeholder rather than bytes.
      Value::Blob(_) => Cell::Text("<blob>".into()),
    }
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Cell::Null => Ok(()),
      Cell::Int(n) => write!(f, "{n}"),
      Cell::Real(x) => write!(f, "{x}"),
      Cell::Text(s) => write!(f, "{s}"),
    }
  }
}

/// One materialised KPI result.
#[derive(Debug, Clone)]
pub struct KpiTable {
  pub name:    &'static str,
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Cell>>,
}

// ─── Execution ───────────────────────────────────────────────────────────────

/// Run one KPI against the warehouse.
pub fn run_kpi(warehouse: &Warehouse, kpi: &Kpi) -> Result<KpiTable> {
  let (columns, raw_rows) = warehouse.query(kpi.sql)?;
  let rows = raw_rows
    .into_iter()
    .map(|row| row.into_iter().map(Cell::from).collect())
    .collect::<Vec<Vec<Cell>>>();
  debug!(kpi = kpi.name, rows = rows.len(), "kpi executed");
  Ok(KpiTable {
    name: kpi.name,
    columns,
    rows,
  })
}

/// Run every KPI in the catalogue, in report order.
pub fn run_all(warehouse: &Warehouse) -> Result<Vec<KpiTable>> {
  KPIS.iter().map(|kpi| run_kpi(warehouse, kpi)).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
