//! Dense linear system solver.
//!
//! The polynomial fitter builds small square normal-equation systems
//! (`(degree+1) x (degree+1)`) and needs exact control over the failure
//! mode: a singular system must surface as a typed error, never as NaN or
//! infinite coefficients leaking into a rendered expression.
//!
//! Implementation choices:
//! - Gaussian elimination with partial pivoting. Each elimination step
//!   divides by the largest remaining entry in the pivot column.
//! - The inputs are taken by value: elimination rewrites both the matrix
//!   and the right-hand side in place, so ownership makes the destruction
//!   explicit. Callers that still need the system afterwards pass a clone.

use nalgebra::{DMatrix, DVector};

/// Pivot magnitudes below this are treated as zero.
const PIVOT_EPS: f64 = 1e-12;

/// Why a linear system could not be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// No usable pivot in this column: the system is singular to working
    /// precision.
    Singular { column: usize },
    /// The matrix is not square, or the right-hand side has the wrong length.
    ShapeMismatch { rows: usize, cols: usize, len: usize },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Singular { column } => {
                write!(f, "singular system: no usable pivot in column {column}")
            }
            SolveError::ShapeMismatch { rows, cols, len } => {
                write!(f, "shape mismatch: {rows}x{cols} matrix with length-{len} rhs")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Solve `A * x = b` by Gaussian elimination with partial pivoting.
///
/// Consumes both inputs and returns the solution vector, or a typed error
/// when the system is singular or the shapes do not line up.
pub fn solve_linear_system(
    mut matrix: DMatrix<f64>,
    mut vector: DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let n = vector.len();
    if matrix.nrows() != n || matrix.ncols() != n {
        return Err(SolveError::ShapeMismatch {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
            len: n,
        });
    }

    // Forward elimination.
    for i in 0..n {
        // Partial pivot: largest remaining entry in column i.
        let mut max_row = i;
        for k in (i + 1)..n {
            if matrix[(k, i)].abs() > matrix[(max_row, i)].abs() {
                max_row = k;
            }
        }
        if matrix[(max_row, i)].abs() < PIVOT_EPS {
            return Err(SolveError::Singular { column: i });
        }
        if max_row != i {
            matrix.swap_rows(i, max_row);
            vector.swap_rows(i, max_row);
        }

        for k in (i + 1)..n {
            let c = -matrix[(k, i)] / matrix[(i, i)];
            for j in i..n {
                if j == i {
                    // Assign the exact zero rather than relying on cancellation.
                    matrix[(k, j)] = 0.0;
                } else {
                    matrix[(k, j)] += c * matrix[(i, j)];
                }
            }
            vector[k] += c * vector[i];
        }
    }

    // Back substitution.
    let mut solution = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += matrix[(i, j)] * solution[j];
        }
        solution[i] = (vector[i] - sum) / matrix[(i, i)];
    }
    Ok(solution)
}
