//! Core types and rules for the hiring warehouse ETL.
//!
//! This crate is deliberately free of file and database dependencies.
//! All other crates depend on it; it depends on nothing heavier than
//! `chrono` and `serde`.

pub mod date;
pub mod error;
pub mod normalize;
pub mod record;
pub mod summary;

pub use error::RejectReason;
pub use record::CandidateRecord;
