//! SQL schema for the hiring warehouse.
//!
//! Applied on every open; idempotent thanks to `CREATE ... IF NOT EXISTS`.
//! Table and column names are the public contract consumed by the
//! reporting layer and any downstream query — do not rename.

/// Full schema DDL for the star schema.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per distinct calendar date ever loaded. The key is the digits
-- YYYYMMDD of the date itself.
CREATE TABLE IF NOT EXISTS DimDate (
    date_id    INTEGER PRIMARY KEY,
    full_date  TEXT    NOT NULL,
    day        INTEGER NOT NULL,
    month      INTEGER NOT NULL,
    month_name TEXT    NOT NULL,
    quarter    INTEGER NOT NULL,
    year       INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS DimTechnology (
    technology_id INTEGER PRIMARY KEY AUTOINCREMENT,
    technology    TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS DimSeniority (
    seniority_id INTEGER PRIMARY KEY AUTOINCREMENT,
    seniority    TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS DimCountry (
    country_id INTEGER PRIMARY KEY AUTOINCREMENT,
    country    TEXT NOT NULL UNIQUE
);

-- Candidates are unique by email; duplicate applications reuse the row.
CREATE TABLE IF NOT EXISTS DimCandidate (
    candidate_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    email        TEXT NOT NULL UNIQUE
);

-- Fact grain: one row per application. Inserted once, never updated.
CREATE TABLE IF NOT EXISTS FactHiring (
    fact_id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    candidate_id              INTEGER NOT NULL REFERENCES DimCandidate(candidate_id),
    technology_id             INTEGER NOT NULL REFERENCES DimTechnology(technology_id),
    seniority_id              INTEGER NOT NULL REFERENCES DimSeniority(seniority_id),
    country_id                INTEGER NOT NULL REFERENCES DimCountry(country_id),
    date_id                   INTEGER NOT NULL REFERENCES DimDate(date_id),
    yoe                       INTEGER NOT NULL,
    code_challenge_score      REAL    NOT NULL,
    technical_interview_score REAL    NOT NULL,
    hired                     INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS facthiring_technology_idx ON FactHiring(technology_id);
CREATE INDEX IF NOT EXISTS facthiring_seniority_idx  ON FactHiring(seniority_id);
CREATE INDEX IF NOT EXISTS facthiring_country_idx    ON FactHiring(country_id);
CREATE INDEX IF NOT EXISTS facthiring_date_idx       ON FactHiring(date_id);
";
