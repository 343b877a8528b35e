//! The date dimension's surrogate key and calendar attributes.

use chrono::{Datelike, NaiveDate};

/// A fully-derived `DimDate` row.
///
/// The surrogate key is the digits `YYYYMMDD` of the date itself — a pure
/// function of the calendar date, so the same date always derives the
/// same key and no collision handling is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKey {
  pub date_id:    i64,
  /// ISO `YYYY-MM-DD` rendering.
  pub full_date:  String,
  pub day:        u32,
  pub month:      u32,
  /// English month name, e.g. `July`.
  pub month_name: String,
  pub quarter:    u32,
  pub year:       i32,
}

impl DateKey {
  pub fn from_date(date: NaiveDate) -> Self {
    let (year, month, day) = (date.year(), date.month(), date.day());
    Self {
      date_id: i64::from(year) * 10_000 + i64::from(month) * 100 + i64::from(day),
      full_date: date.format("%Y-%m-%d").to_string(),
      day,
      month,
      month_name: date.format("%B").to_string(),
      quarter: (month - 1) / 3 + 1,
      year,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn date_id_is_yyyymmdd() {
    assert_eq!(DateKey::from_date(date(2021, 3, 4)).date_id, 20_210_304);
    assert_eq!(DateKey::from_date(date(2022, 12, 31)).date_id, 20_221_231);
  }

  #[test]
  fn attributes_derive_from_the_date() {
    let key = DateKey::from_date(date(2021, 7, 15));
    assert_eq!(key.full_date, "2021-07-15");
    assert_eq!(key.day, 15);
    assert_eq!(key.month, 7);
    assert_eq!(key.month_name, "July");
    assert_eq!(key.quarter, 3);
    assert_eq!(key.year, 2021);
  }

  #[test]
  fn quarter_boundaries() {
    assert_eq!(DateKey::from_date(date(2021, 1, 1)).quarter, 1);
    assert_eq!(DateKey::from_date(date(2021, 3, 31)).quarter, 1);
    assert_eq!(DateKey::from_date(date(2021, 4, 1)).quarter, 2);
    assert_eq!(DateKey::from_date(date(2021, 10, 1)).quarter, 4);
  }
}
