//! Low-level fitting routines, one per function family.
//!
//! Given a slice of plotted points, each routine produces a `CandidateFit`:
//! - fitted parameters (when usable)
//! - a rendered display expression
//! - the sum of squared residuals
//!
//! Every routine is total. Singular systems, too few qualifying points and
//! non-finite arithmetic all come back as the sentinel fit (empty
//! expression, `f64::MAX` error), so the session layer can run every
//! candidate and take a minimum without special-casing failures.
//!
//! Residual domains differ by family and are part of the contract:
//! - exponential: trained on the `y > 0` subset, charged over all points
//! - logarithmic: trained and charged on the `x > 0` subset only

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{CandidateFit, CandidateKind, CurveParams, FunctionFit, Point, TrigKind};
use crate::math::{LinearRegression, solve_linear_system};
use crate::models::{expression, predict};

/// Frequency grid for the trigonometric search: `[0.1, 5.0]` in `0.1` steps.
const FREQ_START: f64 = 0.1;
const FREQ_END: f64 = 5.0;
const FREQ_STEP: f64 = 0.1;
/// Phase grid: `[0, 2π]` in `π/4` steps.
const PHASE_STEP: f64 = std::f64::consts::FRAC_PI_4;

/// Fit a polynomial of the given degree via the normal equations.
///
/// Coefficients come back in ascending powers. A degree too high for the
/// data makes the moment matrix singular, which is reported as the sentinel
/// fit rather than an error.
pub fn fit_polynomial(points: &[Point], degree: usize) -> CandidateFit {
    let kind = CandidateKind::Polynomial { degree };
    let n = degree + 1;

    // Normal equations: M[i][j] = Σ x^(i+j), V[i] = Σ y * x^i.
    let mut matrix = DMatrix::<f64>::zeros(n, n);
    let mut vector = DVector::<f64>::zeros(n);
    for i in 0..n {
        for j in 0..n {
            matrix[(i, j)] = points.iter().map(|p| p.x.powi((i + j) as i32)).sum();
        }
        vector[i] = points.iter().map(|p| p.y * p.x.powi(i as i32)).sum();
    }

    let Ok(coeffs) = solve_linear_system(matrix, vector) else {
        return CandidateFit::failed(kind);
    };
    if coeffs.iter().any(|c| !c.is_finite()) {
        return CandidateFit::failed(kind);
    }

    let params = CurveParams::Polynomial {
        coeffs: coeffs.iter().copied().collect(),
    };
    let error = sum_squared_error(points, &params);
    finish(kind, params, error)
}

/// Fit `y = a * e^(b*x)` by regressing `ln(y)` on `x`.
///
/// Only points with `y > 0` can train the regression, but the residual
/// error is charged over every input point.
pub fn fit_exponential(points: &[Point]) -> CandidateFit {
    let kind = CandidateKind::Exponential;

    let mut reg = LinearRegression::default();
    for p in points.iter().filter(|p| p.y > 0.0) {
        reg.push(p.x, p.y.ln());
    }
    let Some(line) = reg.solve() else {
        return CandidateFit::failed(kind);
    };

    let a = line.intercept.exp();
    let b = line.slope;
    if !a.is_finite() {
        return CandidateFit::failed(kind);
    }

    let params = CurveParams::Exponential { a, b };
    let error = sum_squared_error(points, &params);
    finish(kind, params, error)
}

/// Fit `y = a * ln(x) + b` by regressing `y` on `ln(x)`.
///
/// Points with `x <= 0` are outside the model's domain; they neither train
/// the regression nor count against the error.
pub fn fit_logarithmic(points: &[Point]) -> CandidateFit {
    let kind = CandidateKind::Logarithmic;

    let qualifying: Vec<&Point> = points.iter().filter(|p| p.x > 0.0).collect();
    let mut reg = LinearRegression::default();
    for p in &qualifying {
        reg.push(p.x.ln(), p.y);
    }
    let Some(line) = reg.solve() else {
        return CandidateFit::failed(kind);
    };

    let params = CurveParams::Logarithmic {
        a: line.slope,
        b: line.intercept,
    };
    let mut error = 0.0;
    for p in &qualifying {
        let r = p.y - predict(&params, p.x);
        error += r * r;
    }
    finish(kind, params, error)
}

#[derive(Debug, Clone, Copy)]
struct GridCandidate {
    idx: usize,
    frequency: f64,
    phase: f64,
    error: f64,
}

/// Fit `y = A * trig(f*x + φ) + C` by grid search.
///
/// Amplitude and offset are closed-form from the observed y-range; the
/// frequency/phase pair comes from an exhaustive grid scan.
pub fn fit_trigonometric(points: &[Point], trig: TrigKind) -> CandidateFit {
    let kind = CandidateKind::Trigonometric { kind: trig };
    if points.is_empty() {
        return CandidateFit::failed(kind);
    }

    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let amplitude = (max_y - min_y) / 2.0;
    let offset = (max_y + min_y) / 2.0;

    // The grid is materialized with accumulating steps; downstream error
    // values depend on the exact accumulated frequencies.
    let mut grid = Vec::new();
    let mut frequency = FREQ_START;
    while frequency <= FREQ_END {
        let mut phase = 0.0;
        while phase <= 2.0 * std::f64::consts::PI {
            grid.push((frequency, phase));
            phase += PHASE_STEP;
        }
        frequency += FREQ_STEP;
    }

    // Evaluate each grid node independently (parallel).
    let candidates: Vec<GridCandidate> = grid
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &(frequency, phase))| {
            let params = CurveParams::Trigonometric {
                kind: trig,
                amplitude,
                frequency,
                phase,
                offset,
            };
            let error = sum_squared_error(points, &params);
            error.is_finite().then_some(GridCandidate {
                idx,
                frequency,
                phase,
                error,
            })
        })
        .collect();

    if candidates.is_empty() {
        return CandidateFit::failed(kind);
    }

    // Deterministic selection: minimum error, ties broken by grid index.
    let mut best = &candidates[0];
    for c in &candidates[1..] {
        if c.error < best.error || (c.error == best.error && c.idx < best.idx) {
            best = c;
        }
    }

    let params = CurveParams::Trigonometric {
        kind: trig,
        amplitude,
        frequency: best.frequency,
        phase: best.phase,
        offset,
    };
    finish(kind, params, best.error)
}

/// Sum of squared residuals of `params` over `points`.
fn sum_squared_error(points: &[Point], params: &CurveParams) -> f64 {
    let mut sse = 0.0;
    for p in points {
        let r = p.y - predict(params, p.x);
        sse += r * r;
    }
    sse
}

/// Wrap fitted parameters and their error into a `CandidateFit`.
fn finish(kind: CandidateKind, params: CurveParams, error: f64) -> CandidateFit {
    if !error.is_finite() {
        return CandidateFit::failed(kind);
    }
    let expression = expression::render(&params);
    if expression.is_empty() {
        // Every term was suppressed. Report "no usable fit" but keep the
        // computed error so diagnostics can still show it.
        return CandidateFit {
            kind,
            params: None,
            fit: FunctionFit { expression, error },
        };
    }
    CandidateFit {
        kind,
        params: Some(params),
        fit: FunctionFit { expression, error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points_from(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<Point> {
        xs.iter().map(|&x| Point::new(x, f(x))).collect()
    }

    #[test]
    fn polynomial_recovers_exact_quadratic() {
        let points = points_from(&[-2.0, -1.0, 0.0, 1.0, 2.0, 3.0], |x| {
            x * x - 2.0 * x + 1.0
        });
        let fit = fit_polynomial(&points, 2);

        assert!(fit.fit.is_usable());
        assert!(fit.fit.error < 1e-12);
        assert_eq!(fit.fit.expression, "1.00x^2-2.00x + 1.00");
        match fit.params {
            Some(CurveParams::Polynomial { coeffs }) => {
                assert_eq!(coeffs.len(), 3);
                assert!((coeffs[0] - 1.0).abs() < 1e-6);
                assert!((coeffs[1] + 2.0).abs() < 1e-6);
                assert!((coeffs[2] - 1.0).abs() < 1e-6);
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn polynomial_recovers_exact_line() {
        let points = points_from(&[0.0, 1.0, 2.0, 5.0], |x| 2.0 * x + 0.5);
        let fit = fit_polynomial(&points, 1);

        assert!(fit.fit.error < 1e-12);
        assert_eq!(fit.fit.expression, "2.00x + 0.50");
    }

    #[test]
    fn polynomial_underdetermined_degree_is_sentinel() {
        // Two points cannot pin down a cubic; the moment matrix is singular.
        let points = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let fit = fit_polynomial(&points, 3);

        assert!(!fit.fit.is_usable());
        assert!(fit.params.is_none());
        assert_eq!(fit.fit.error, f64::MAX);
    }

    #[test]
    fn exponential_roundtrip() {
        let points = points_from(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], |x| 3.0 * (0.5 * x).exp());
        let fit = fit_exponential(&points);

        assert_eq!(fit.fit.expression, "3.00e^(0.50x)");
        assert!(fit.fit.error < 1e-12);
        match fit.params {
            Some(CurveParams::Exponential { a, b }) => {
                assert!((a - 3.0).abs() < 1e-9);
                assert!((b - 0.5).abs() < 1e-9);
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn exponential_needs_two_positive_y() {
        let points = vec![
            Point::new(0.0, -1.0),
            Point::new(1.0, -2.0),
            Point::new(2.0, 5.0),
        ];
        assert!(!fit_exponential(&points).fit.is_usable());

        let all_nonpositive = vec![
            Point::new(0.0, -1.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, -3.0),
        ];
        let fit = fit_exponential(&all_nonpositive);
        assert_eq!(fit.fit.error, f64::MAX);
        assert!(fit.fit.expression.is_empty());
    }

    #[test]
    fn exponential_error_charges_nonpositive_points() {
        // The y <= 0 point cannot train the model but still counts against it.
        let mut points = points_from(&[0.0, 1.0, 2.0], |x| 2.0 * (0.3 * x).exp());
        points.push(Point::new(10.0, -1.0));

        let fit = fit_exponential(&points);
        let expected = {
            let r = 2.0 * (3.0_f64).exp() + 1.0;
            r * r
        };
        assert!(fit.fit.is_usable());
        assert!((fit.fit.error - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn logarithmic_roundtrip() {
        let points = points_from(&[0.5, 1.0, 2.0, 4.0, 8.0], |x| 2.0 * x.ln() + 1.0);
        let fit = fit_logarithmic(&points);

        assert_eq!(fit.fit.expression, "2.00ln(x) + 1.00");
        assert!(fit.fit.error < 1e-12);
        match fit.params {
            Some(CurveParams::Logarithmic { a, b }) => {
                assert!((a - 2.0).abs() < 1e-9);
                assert!((b - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn logarithmic_excludes_nonpositive_x_from_error() {
        // A wild point at x <= 0 is outside the model's domain and must not
        // change the parameters or the error.
        let mut points = points_from(&[0.5, 1.0, 2.0, 4.0, 8.0], |x| 2.0 * x.ln() + 1.0);
        points.push(Point::new(-3.0, 99.0));

        let fit = fit_logarithmic(&points);
        assert!(fit.fit.is_usable());
        assert!(fit.fit.error < 1e-12);
    }

    #[test]
    fn logarithmic_needs_two_positive_x() {
        let points = vec![Point::new(-1.0, 1.0), Point::new(0.0, 2.0)];
        let fit = fit_logarithmic(&points);
        assert!(!fit.fit.is_usable());
    }

    #[test]
    fn trig_recovers_amplitude_and_frequency() {
        // y = 2 sin(x) sampled so the peaks are hit exactly.
        let xs: Vec<f64> = (0..=32).map(|k| k as f64 * std::f64::consts::FRAC_PI_8).collect();
        let points = points_from(&xs, |x| 2.0 * x.sin());
        let fit = fit_trigonometric(&points, TrigKind::Sine);

        assert!(fit.fit.is_usable());
        assert!(fit.fit.error < 1e-6);
        assert!(fit.fit.expression.starts_with("2.00sin("));
        match fit.params {
            Some(CurveParams::Trigonometric {
                amplitude,
                frequency,
                offset,
                ..
            }) => {
                assert!((amplitude - 2.0).abs() < 1e-12);
                assert!((frequency - 1.0).abs() < 0.05);
                assert!(offset.abs() < 1e-12);
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn trig_flat_data_picks_first_grid_node() {
        // Zero amplitude makes every grid node tie at zero error; the first
        // node must win.
        let points = points_from(&[0.0, 1.0, 2.0, 3.0], |_| 3.0);
        let fit = fit_trigonometric(&points, TrigKind::Sine);

        assert_eq!(fit.fit.error, 0.0);
        match fit.params {
            Some(CurveParams::Trigonometric {
                amplitude,
                frequency,
                phase,
                offset,
                ..
            }) => {
                assert_eq!(amplitude, 0.0);
                assert_eq!(frequency, 0.1);
                assert_eq!(phase, 0.0);
                assert_eq!(offset, 3.0);
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn trig_empty_points_is_sentinel() {
        let fit = fit_trigonometric(&[], TrigKind::Cosine);
        assert!(!fit.fit.is_usable());
        assert_eq!(fit.fit.error, f64::MAX);
    }
}
