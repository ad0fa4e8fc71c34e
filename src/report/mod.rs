//! Reporting: residuals, outlier ranking, and formatted terminal output.

pub mod format;

pub use format::*;
