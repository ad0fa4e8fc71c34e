//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit each candidate family (polynomial, exponential, logarithmic, trig)
//! - evaluate trigonometric grid nodes (parallel)
//! - select the best candidate by minimum error

pub mod fitter;
pub mod session;

pub use fitter::*;
pub use session::*;
