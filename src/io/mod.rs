//! Input/output helpers.
//!
//! - points ingest + validation, CSV or JSON (`ingest`)
//! - result and sample exports (CSV) (`export`)
//! - point-set JSON read/write (`points_json`)

pub mod export;
pub mod ingest;
pub mod points_json;

pub use export::*;
pub use ingest::*;
pub use points_json::*;
