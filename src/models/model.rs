//! Model evaluation for the four function families.
//!
//! The fitter and the report layer rely on one primitive: predict `y(x)`
//! from fitted parameters. Evaluation is total over `f64`; where the model
//! is mathematically undefined (logarithms at `x <= 0`) it returns a
//! non-finite value and callers decide what to do with it.

use crate::domain::{CurveParams, TrigKind};

/// Predict `y(x)` for the given fitted parameters.
pub fn predict(params: &CurveParams, x: f64) -> f64 {
    match params {
        CurveParams::Polynomial { coeffs } => {
            let mut y = 0.0;
            for (j, c) in coeffs.iter().enumerate() {
                y += c * x.powi(j as i32);
            }
            y
        }
        CurveParams::Exponential { a, b } => a * (b * x).exp(),
        CurveParams::Logarithmic { a, b } => a * x.ln() + b,
        CurveParams::Trigonometric {
            kind,
            amplitude,
            frequency,
            phase,
            offset,
        } => {
            let arg = frequency * x + phase;
            let wave = match kind {
                TrigKind::Sine => arg.sin(),
                TrigKind::Cosine => arg.cos(),
            };
            amplitude * wave + offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_polynomial_ascending_powers() {
        // coeffs[j] multiplies x^j: y = 1 - 2x + 0.5x^2
        let params = CurveParams::Polynomial {
            coeffs: vec![1.0, -2.0, 0.5],
        };
        assert!((predict(&params, 0.0) - 1.0).abs() < 1e-12);
        assert!((predict(&params, 2.0) - (1.0 - 4.0 + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn predict_exponential() {
        let params = CurveParams::Exponential { a: 3.0, b: 0.5 };
        assert!((predict(&params, 0.0) - 3.0).abs() < 1e-12);
        assert!((predict(&params, 2.0) - 3.0 * 1.0_f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn predict_logarithmic_undefined_left_of_zero() {
        let params = CurveParams::Logarithmic { a: 2.0, b: 1.0 };
        assert!((predict(&params, 1.0) - 1.0).abs() < 1e-12);
        assert!(predict(&params, 0.0).is_infinite());
        assert!(predict(&params, -1.0).is_nan());
    }

    #[test]
    fn predict_trig_sine_vs_cosine() {
        let sine = CurveParams::Trigonometric {
            kind: TrigKind::Sine,
            amplitude: 2.0,
            frequency: 1.0,
            phase: 0.0,
            offset: 1.0,
        };
        let cosine = CurveParams::Trigonometric {
            kind: TrigKind::Cosine,
            amplitude: 2.0,
            frequency: 1.0,
            phase: 0.0,
            offset: 1.0,
        };
        assert!((predict(&sine, 0.0) - 1.0).abs() < 1e-12);
        assert!((predict(&cosine, 0.0) - 3.0).abs() < 1e-12);
    }
}
