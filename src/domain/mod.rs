//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration enums (`FamilySpec`, `FitFamily`, `TrigKind`)
//! - plotted observation points (`Point`) and their stats
//! - fit outputs (`FunctionFit`, `CandidateFit`, `CurveParams`, etc.)

pub mod types;

pub use types::*;
