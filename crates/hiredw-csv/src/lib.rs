//! Extraction of the `;`-delimited candidates CSV into validated
//! [`hiredw_core::CandidateRecord`]s.
//!
//! Per-row validation failures are collected, not raised: the loader's
//! partial-success policy needs the full rejection ledger to decide
//! whether a run proceeds. Only an unreadable source file or a header
//! missing a required column is fatal.

pub mod error;
mod parse;

pub use error::{Error, Result};
pub use parse::{DELIMITER, Extraction, RowRejection, extract, extract_reader};
