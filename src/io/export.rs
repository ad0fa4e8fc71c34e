//! Export per-point results and generated samples to CSV.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Point, PointResidual};
use crate::error::AppError;

/// Write per-point results under the winning fit to a CSV file.
///
/// `y_fit`/`residual` are left empty where the model is undefined at the
/// point's x.
pub fn write_results_csv(path: &Path, residuals: &[PointResidual]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "id,x,y_obs,y_fit,residual")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        writeln!(
            file,
            "{},{:.10},{:.6},{},{}",
            r.id,
            r.point.x,
            r.point.y,
            r.y_fit.map(|v| format!("{v:.6}")).unwrap_or_default(),
            r.residual.map(|v| format!("{v:.6}")).unwrap_or_default(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a generated point set to a CSV file ready for `gfit fit -f`.
///
/// Values are written with full `f64` precision so they survive a
/// round-trip through ingest unchanged.
pub fn write_points_csv(path: &Path, points: &[Point]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create points CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "x,y")
        .map_err(|e| AppError::new(2, format!("Failed to write points CSV header: {e}")))?;

    for p in points {
        writeln!(file, "{},{}", p.x, p.y)
            .map_err(|e| AppError::new(2, format!("Failed to write points CSV row: {e}")))?;
    }

    Ok(())
}
