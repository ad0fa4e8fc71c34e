//! Mathematical utilities: a dense linear solver and simple regression.

pub mod linreg;
pub mod solver;

pub use linreg::*;
pub use solver::*;
