//! Command-line parsing for the function fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FamilySpec, FitFamily, SampleFormat, TrigKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gfit", version, about = "Least-squares function fitter for 2D point sets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit candidate functions to a point set and report the best match.
    Fit(FitArgs),
    /// Generate a noisy synthetic point set for a chosen family.
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input points: CSV with x,y columns (and an optional label column),
    /// or a JSON point-set file.
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Which function families to try.
    #[arg(long, value_enum, default_value_t = FamilySpec::Auto)]
    pub family: FamilySpec,

    /// Highest polynomial degree to try (1..=8).
    #[arg(long, default_value_t = 3)]
    pub max_degree: usize,

    /// Show the top-N largest residuals.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write a markdown debug bundle to ./debug.
    #[arg(long)]
    pub debug_bundle: bool,
}

/// Options for sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Function family to sample from.
    #[arg(long, value_enum)]
    pub family: FitFamily,

    /// Trigonometric shape (only consulted with --family trigonometric).
    #[arg(long, value_enum, default_value_t = TrigKind::Sine)]
    pub trig: TrigKind,

    /// Family parameters, comma-separated (defaults per family).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Option<Vec<f64>>,

    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 25)]
    pub count: usize,

    /// Random seed for reproducible samples.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Gaussian noise sigma added to each y.
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Start of the x range (defaults per family).
    #[arg(long)]
    pub x_min: Option<f64>,

    /// End of the x range (defaults per family).
    #[arg(long)]
    pub x_max: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = SampleFormat::Csv)]
    pub format: SampleFormat,

    /// Output path.
    #[arg(short = 'o', long, default_value = "sample.csv")]
    pub out: PathBuf,
}
