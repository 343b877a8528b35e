//! Pipeline orchestration for the `hiredw` binary.
//!
//! The pipeline is strictly sequential: extract → rejection gate → load,
//! then optionally the KPI report. Each stage's fatal errors carry a
//! stage-identifying variant so the binary can say *where* a run died.

pub mod error;
pub mod pipeline;
pub mod settings;

pub use error::{Error, Result};
