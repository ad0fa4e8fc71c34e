//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - read back from point-set files written by the companion tools

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A plotted observation in the x/y plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which function family (or families) to try.
///
/// `Auto` means: run every candidate and keep the lowest-error one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FamilySpec {
    Auto,
    Polynomial,
    Exponential,
    Logarithmic,
    Trigonometric,
}

/// Concrete function family (no `Auto`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitFamily {
    Polynomial,
    Exponential,
    Logarithmic,
    Trigonometric,
}

impl FamilySpec {
    /// Families to run for this selection, in candidate order.
    ///
    /// The order is load-bearing: when two candidates tie on error, the one
    /// enumerated first wins.
    pub fn families(self) -> &'static [FitFamily] {
        match self {
            FamilySpec::Auto => &[
                FitFamily::Polynomial,
                FitFamily::Exponential,
                FitFamily::Logarithmic,
                FitFamily::Trigonometric,
            ],
            FamilySpec::Polynomial => &[FitFamily::Polynomial],
            FamilySpec::Exponential => &[FitFamily::Exponential],
            FamilySpec::Logarithmic => &[FitFamily::Logarithmic],
            FamilySpec::Trigonometric => &[FitFamily::Trigonometric],
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            FamilySpec::Auto => "auto",
            FamilySpec::Polynomial => "polynomial",
            FamilySpec::Exponential => "exponential",
            FamilySpec::Logarithmic => "logarithmic",
            FamilySpec::Trigonometric => "trigonometric",
        }
    }
}

impl FitFamily {
    pub fn display_name(self) -> &'static str {
        match self {
            FitFamily::Polynomial => "polynomial",
            FitFamily::Exponential => "exponential",
            FitFamily::Logarithmic => "logarithmic",
            FitFamily::Trigonometric => "trigonometric",
        }
    }
}

/// Sine vs cosine for the trigonometric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrigKind {
    Sine,
    Cosine,
}

impl TrigKind {
    /// The function name as it appears in rendered expressions.
    pub fn func_name(self) -> &'static str {
        match self {
            TrigKind::Sine => "sin",
            TrigKind::Cosine => "cos",
        }
    }
}

/// One concrete fit attempt (family plus its shape knobs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum CandidateKind {
    Polynomial { degree: usize },
    Exponential,
    Logarithmic,
    Trigonometric { kind: TrigKind },
}

impl CandidateKind {
    pub fn family(self) -> FitFamily {
        match self {
            CandidateKind::Polynomial { .. } => FitFamily::Polynomial,
            CandidateKind::Exponential => FitFamily::Exponential,
            CandidateKind::Logarithmic => FitFamily::Logarithmic,
            CandidateKind::Trigonometric { .. } => FitFamily::Trigonometric,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> String {
        match self {
            CandidateKind::Polynomial { degree } => format!("poly deg {degree}"),
            CandidateKind::Exponential => "exponential".to_string(),
            CandidateKind::Logarithmic => "logarithmic".to_string(),
            CandidateKind::Trigonometric { kind } => match kind {
                TrigKind::Sine => "sine".to_string(),
                TrigKind::Cosine => "cosine".to_string(),
            },
        }
    }

    /// Number of fitted parameters (for diagnostics).
    pub fn param_count(self) -> usize {
        match self {
            CandidateKind::Polynomial { degree } => degree + 1,
            CandidateKind::Exponential => 2,
            CandidateKind::Logarithmic => 2,
            CandidateKind::Trigonometric { .. } => 4,
        }
    }
}

/// Fitted parameters for a successful candidate.
///
/// Kept alongside the rendered expression so residuals and debug output can
/// re-evaluate the model without parsing the display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum CurveParams {
    /// Coefficients in ascending powers: `coeffs[j]` multiplies `x^j`.
    Polynomial { coeffs: Vec<f64> },
    /// `y = a * e^(b*x)`
    Exponential { a: f64, b: f64 },
    /// `y = a * ln(x) + b`
    Logarithmic { a: f64, b: f64 },
    /// `y = amplitude * trig(frequency*x + phase) + offset`
    Trigonometric {
        kind: TrigKind,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        offset: f64,
    },
}

impl CurveParams {
    pub fn family(&self) -> FitFamily {
        match self {
            CurveParams::Polynomial { .. } => FitFamily::Polynomial,
            CurveParams::Exponential { .. } => FitFamily::Exponential,
            CurveParams::Logarithmic { .. } => FitFamily::Logarithmic,
            CurveParams::Trigonometric { .. } => FitFamily::Trigonometric,
        }
    }
}

/// The outcome of a single fit attempt.
///
/// A failed attempt carries an empty `expression` and the `f64::MAX`
/// sentinel error; both fields must be read together. Successful fits carry
/// the sum of squared residuals in `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionFit {
    pub expression: String,
    pub error: f64,
}

impl FunctionFit {
    /// The sentinel for "this candidate produced nothing usable".
    pub fn failed() -> Self {
        Self {
            expression: String::new(),
            error: f64::MAX,
        }
    }

    /// Usability is defined by the expression, not the error value.
    pub fn is_usable(&self) -> bool {
        !self.expression.is_empty()
    }
}

/// A fit attempt together with its evaluable parameters.
///
/// `params` is `Some` exactly when `fit.is_usable()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFit {
    pub kind: CandidateKind,
    pub params: Option<CurveParams>,
    pub fit: FunctionFit,
}

impl CandidateFit {
    pub fn failed(kind: CandidateKind) -> Self {
        Self {
            kind,
            params: None,
            fit: FunctionFit::failed(),
        }
    }
}

/// Summary statistics over an ingested point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    /// `None` when the slice is empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut stats = DatasetStats {
            n_points: points.len(),
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for p in &points[1..] {
            stats.x_min = stats.x_min.min(p.x);
            stats.x_max = stats.x_max.max(p.x);
            stats.y_min = stats.y_min.min(p.y);
            stats.y_max = stats.y_max.max(p.y);
        }
        Some(stats)
    }
}

/// A per-point result under the winning fit (used for ranking and exports).
///
/// `y_fit`/`residual` are `None` where the model is undefined at the point's
/// x (e.g. a logarithmic fit evaluated at `x <= 0`).
#[derive(Debug, Clone)]
pub struct PointResidual {
    pub id: String,
    pub point: Point,
    pub y_fit: Option<f64>,
    pub residual: Option<f64>,
}

/// A full `fit` run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input_path: PathBuf,
    pub family: FamilySpec,
    /// Polynomial degrees `1..=max_degree` are attempted.
    pub max_degree: usize,
    pub top_n: usize,
    pub export_results: Option<PathBuf>,
    pub debug_bundle: bool,
}

/// On-disk format for generated point sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    Csv,
    Json,
}

/// Configuration for synthetic sample generation (`gfit sample`).
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub family: FitFamily,
    /// Only consulted for the trigonometric family.
    pub trig: TrigKind,
    /// Family-specific parameter list; `None` uses built-in defaults.
    pub params: Option<Vec<f64>>,
    pub count: usize,
    pub seed: u64,
    /// Gaussian noise sigma added to each y.
    pub noise: f64,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub format: SampleFormat,
    pub out_path: PathBuf,
}

/// A portable point-set file (JSON), interchangeable with the companion
/// plotting tools.
///
/// Only `points` is required when reading; everything else is advisory
/// metadata, and unknown keys in the file are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsFile {
    /// Family name the points were drawn from, when known.
    #[serde(default)]
    pub function_type: Option<String>,
    /// Display label for the source curve (e.g. a rendered expression).
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub generated: Option<NaiveDate>,
    /// `[x_min, x_max]` of the generating range.
    #[serde(default)]
    pub x_range: Option<[f64; 2]>,
    pub points: Vec<Point>,
}
