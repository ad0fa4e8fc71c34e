//! Synthetic point-set generation.
//!
//! `gfit sample` writes noisy observations of a known model (CSV or points
//! JSON) so the whole pipeline can be exercised without hand-plotting points.
//!
//! Layout: `count` x positions on a jittered even grid across the range
//! (deterministic for a given seed), with `y = model(x) + noise`. The
//! jitter is bounded so neighboring points always stay further apart than
//! the ingest duplicate tolerance.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{CurveParams, DatasetStats, FitFamily, Point, SampleConfig};
use crate::error::AppError;
use crate::io::ingest::X_TOLERANCE;
use crate::models::predict;

/// Default x range for families defined on the whole axis.
const DEFAULT_RANGE: (f64, f64) = (-5.0, 5.0);
/// Default x range for the logarithmic family (needs x > 0).
const LOG_RANGE: (f64, f64) = (0.5, 10.0);
/// Jitter as a fraction of the slot width. At 0.25, two neighbors can close
/// at most half a slot of distance between them.
const JITTER_FRACTION: f64 = 0.25;

/// Output of sample generation.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub points: Vec<Point>,
    /// The true model the points were drawn from.
    pub params: CurveParams,
    pub stats: DatasetStats,
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.count < 2 {
        return Err(AppError::new(2, "Sample count must be at least 2."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise sigma must be finite and >= 0."));
    }

    let params = resolve_params(config)?;
    let (x_min, x_max) = resolve_range(config)?;

    let spacing = (x_max - x_min) / config.count as f64;
    if spacing * (1.0 - 2.0 * JITTER_FRACTION) < X_TOLERANCE {
        return Err(AppError::new(
            2,
            format!(
                "{} samples over [{x_min}, {x_max}] pack points closer than the {X_TOLERANCE} \
                 x-tolerance; reduce -n or widen the range.",
                config.count
            ),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut points = Vec::with_capacity(config.count);
    for i in 0..config.count {
        let base = x_min + (i as f64 + 0.5) * spacing;
        let jitter = rng.gen_range(-JITTER_FRACTION..=JITTER_FRACTION) * spacing;
        let x = base + jitter;
        let y = predict(&params, x) + noise.sample(&mut rng);
        if !y.is_finite() {
            return Err(AppError::new(
                2,
                format!("Model value is not finite at x={x}; adjust parameters or range."),
            ));
        }
        points.push(Point::new(x, y));
    }

    let stats = DatasetStats::from_points(&points)
        .ok_or_else(|| AppError::new(4, "Failed to compute sample stats."))?;

    Ok(SampleData {
        points,
        params,
        stats,
    })
}

/// Resolve the model parameters, falling back to per-family defaults.
fn resolve_params(config: &SampleConfig) -> Result<CurveParams, AppError> {
    if let Some(values) = &config.params {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AppError::new(2, "Model parameters must be finite."));
        }
    }

    let params = match config.family {
        FitFamily::Polynomial => {
            let coeffs = match &config.params {
                Some(values) if !values.is_empty() => values.clone(),
                Some(_) => {
                    return Err(AppError::new(
                        2,
                        "Polynomial sampling needs at least one coefficient (ascending powers).",
                    ));
                }
                None => vec![1.0, -2.0, 0.5],
            };
            CurveParams::Polynomial { coeffs }
        }
        FitFamily::Exponential => {
            let (a, b) = two_params(config, 3.0, 0.5, "exponential needs --params a,b")?;
            CurveParams::Exponential { a, b }
        }
        FitFamily::Logarithmic => {
            let (a, b) = two_params(config, 2.0, 1.0, "logarithmic needs --params a,b")?;
            CurveParams::Logarithmic { a, b }
        }
        FitFamily::Trigonometric => {
            let (amplitude, frequency, phase, offset) = match &config.params {
                Some(values) if values.len() == 4 => (values[0], values[1], values[2], values[3]),
                Some(_) => {
                    return Err(AppError::new(
                        2,
                        "Trigonometric sampling needs --params amplitude,frequency,phase,offset.",
                    ));
                }
                None => (2.0, 1.0, 0.0, 0.0),
            };
            CurveParams::Trigonometric {
                kind: config.trig,
                amplitude,
                frequency,
                phase,
                offset,
            }
        }
    };
    Ok(params)
}

fn two_params(
    config: &SampleConfig,
    default_a: f64,
    default_b: f64,
    usage: &str,
) -> Result<(f64, f64), AppError> {
    match &config.params {
        Some(values) if values.len() == 2 => Ok((values[0], values[1])),
        Some(_) => Err(AppError::new(2, format!("Wrong parameter count: {usage}."))),
        None => Ok((default_a, default_b)),
    }
}

fn resolve_range(config: &SampleConfig) -> Result<(f64, f64), AppError> {
    let default = match config.family {
        FitFamily::Logarithmic => LOG_RANGE,
        _ => DEFAULT_RANGE,
    };
    let x_min = config.x_min.unwrap_or(default.0);
    let x_max = config.x_max.unwrap_or(default.1);

    if !(x_min.is_finite() && x_max.is_finite() && x_max > x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if config.family == FitFamily::Logarithmic && x_min <= 0.0 {
        return Err(AppError::new(
            2,
            "Logarithmic sampling needs x-min > 0 (the model is undefined otherwise).",
        ));
    }
    Ok((x_min, x_max))
}
