//! Human-readable expression rendering.
//!
//! The rendered strings are part of the engine contract: downstream
//! consumers display them verbatim and compare them for equality, so the
//! format is frozen. Two quirks of the polynomial form are deliberate:
//!
//! - terms join with `" + "` only before a positive coefficient; negative
//!   terms concatenate directly (`"2.00x^2-1.23x + 0.50"`)
//! - coefficients with magnitude below `1e-4` are left out entirely, which
//!   can render an all-zero polynomial as the empty string

use crate::domain::CurveParams;

/// Coefficients smaller than this do not appear in polynomial expressions.
const COEFF_DISPLAY_EPS: f64 = 1e-4;

/// Render fitted parameters as a display expression.
pub fn render(params: &CurveParams) -> String {
    match params {
        CurveParams::Polynomial { coeffs } => render_polynomial(coeffs),
        CurveParams::Exponential { a, b } => format!("{a:.2}e^({b:.2}x)"),
        CurveParams::Logarithmic { a, b } => format!("{a:.2}ln(x) + {b:.2}"),
        CurveParams::Trigonometric {
            kind,
            amplitude,
            frequency,
            phase,
            offset,
        } => format!(
            "{amplitude:.2}{}({frequency:.2}x + {phase:.2}) + {offset:.2}",
            kind.func_name()
        ),
    }
}

/// Highest power first, near-zero terms suppressed.
fn render_polynomial(coeffs: &[f64]) -> String {
    let mut expression = String::new();
    for i in (0..coeffs.len()).rev() {
        let c = coeffs[i];
        if c.abs() < COEFF_DISPLAY_EPS {
            continue;
        }
        let term = match i {
            0 => format!("{c:.2}"),
            1 => format!("{c:.2}x"),
            _ => format!("{c:.2}x^{i}"),
        };
        if !expression.is_empty() && c > 0.0 {
            expression.push_str(" + ");
        }
        expression.push_str(&term);
    }
    expression
}
