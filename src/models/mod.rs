//! Function-family model implementations.
//!
//! Models are implemented as small, pure functions so that fitting/search
//! code can stay generic. Evaluation and display rendering live side by
//! side because they must agree on parameter meaning.

pub mod expression;
pub mod model;

pub use model::*;
