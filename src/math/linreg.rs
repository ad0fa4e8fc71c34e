//! Simple linear regression over transformed samples.
//!
//! The exponential and logarithmic fits linearize their models (`ln(y)`
//! against `x`, and `y` against `ln(x)`) and then need the least-squares
//! slope and intercept of the resulting pairs. The closed form only needs
//! running sums, so the accumulator is O(1) in space and a single pass.

/// Running sums for a least-squares line of `v` against `u`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression {
    sum_u: f64,
    sum_v: f64,
    sum_uv: f64,
    sum_uu: f64,
    n: usize,
}

/// A fitted line `v = slope * u + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn push(&mut self, u: f64, v: f64) {
        self.sum_u += u;
        self.sum_v += v;
        self.sum_uv += u * v;
        self.sum_uu += u * u;
        self.n += 1;
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Closed-form least-squares solve.
    ///
    /// `None` with fewer than 2 samples, or when the slope degenerates
    /// (all `u` equal makes the denominator zero and the slope non-finite).
    pub fn solve(&self) -> Option<Line> {
        if self.n < 2 {
            return None;
        }
        let n = self.n as f64;
        let denom = n * self.sum_uu - self.sum_u * self.sum_u;
        let slope = (n * self.sum_uv - self.sum_u * self.sum_v) / denom;
        let intercept = (self.sum_v - slope * self.sum_u) / n;
        (slope.is_finite() && intercept.is_finite()).then_some(Line { slope, intercept })
    }
}
