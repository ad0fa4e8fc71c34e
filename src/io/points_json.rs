//! Read/write point-set JSON files.
//!
//! The schema is shared with the companion plotting tools: a `points` array
//! of `{x, y}` objects plus advisory metadata (`function_type`, `label`,
//! `x_range`). Files written by those tools load here, and files written
//! here load there.
//!
//! The schema is defined by `domain::PointsFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveParams, DatasetStats, Point, PointsFile};
use crate::error::AppError;
use crate::models::expression;

/// Write a generated point set to a JSON file ready for `gfit fit -f`.
pub fn write_points_json(
    path: &Path,
    points: &[Point],
    params: &CurveParams,
    stats: &DatasetStats,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create points JSON '{}': {e}", path.display()))
    })?;

    let points_file = PointsFile {
        function_type: Some(params.family().display_name().to_string()),
        label: Some(expression::render(params)),
        generated: Some(chrono::Local::now().date_naive()),
        x_range: Some([stats.x_min, stats.x_max]),
        points: points.to_vec(),
    };

    serde_json::to_writer_pretty(file, &points_file)
        .map_err(|e| AppError::new(2, format!("Failed to write points JSON: {e}")))?;

    Ok(())
}

/// Read a point-set JSON file.
pub fn read_points_json(path: &Path) -> Result<PointsFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open points JSON '{}': {e}", path.display()))
    })?;
    let points_file: PointsFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid points JSON: {e}")))?;
    Ok(points_file)
}
