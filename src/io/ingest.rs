//! Points ingest and validation.
//!
//! This module turns a plotted-points file (CSV, or the companion tools'
//! points JSON) into a clean `Vec<Point>` that is safe to fit.
//!
//! Design goals:
//! - **Strict schema** for required CSV columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Distinct x positions**: two points closer than the plotting tolerance
//!   along x describe the same position, and the second one is rejected
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DatasetStats, Point};
use crate::error::AppError;

/// Two points closer than this along x occupy the same plotted position.
pub const X_TOLERANCE: f64 = 0.1;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based CSV line number, or 1-based position in a JSON points array.
    pub line: usize,
    pub message: String,
}

/// Ingest output: usable points + per-point ids + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: Vec<Point>,
    /// Parallel to `points`; the `label` column when present, else `P<n>`.
    pub ids: Vec<String>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load points from a file on disk.
///
/// `.json` files use the companion points-JSON schema; anything else is
/// read as CSV.
pub fn load_points(path: &Path) -> Result<IngestedPoints, AppError> {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        let points_file = crate::io::points_json::read_points_json(path)?;
        return ingest_raw_points(points_file.points);
    }

    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_points(file)
}

/// Validate a raw point list (e.g. from points JSON) with the same rules
/// as CSV rows: finite values only, distinct x positions, at least 2 left.
pub fn ingest_raw_points(raw: Vec<Point>) -> Result<IngestedPoints, AppError> {
    let mut points: Vec<Point> = Vec::new();
    let mut ids: Vec<String> = Vec::new();
    let mut row_errors = Vec::new();
    let rows_read = raw.len();

    for (idx, point) in raw.into_iter().enumerate() {
        let line = idx + 1;
        if !(point.x.is_finite() && point.y.is_finite()) {
            row_errors.push(RowError {
                line,
                message: format!("Non-finite point ({}, {}).", point.x, point.y),
            });
            continue;
        }
        if let Some(clash) = points.iter().find(|p| (p.x - point.x).abs() < X_TOLERANCE) {
            row_errors.push(RowError {
                line,
                message: format!(
                    "x={} duplicates an existing point at x={} (tolerance {X_TOLERANCE})",
                    point.x, clash.x
                ),
            });
            continue;
        }
        ids.push(format!("P{}", points.len() + 1));
        points.push(point);
    }

    finalize(points, ids, row_errors, rows_read)
}

/// Read points from any CSV source.
///
/// Required columns: `x`, `y` (case-insensitive, BOM tolerated). Optional:
/// `label`. Fails with exit code 3 when fewer than 2 usable points remain.
pub fn read_points<R: Read>(source: R) -> Result<IngestedPoints, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    if !header_map.contains_key("x") {
        return Err(AppError::new(2, "Missing required column: `x`"));
    }
    if !header_map.contains_key("y") {
        return Err(AppError::new(2, "Missing required column: `y`"));
    }

    let mut points: Vec<Point> = Vec::new();
    let mut ids: Vec<String> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok((point, label)) => {
                if let Some(clash) = points.iter().find(|p| (p.x - point.x).abs() < X_TOLERANCE) {
                    row_errors.push(RowError {
                        line,
                        message: format!(
                            "x={} duplicates an existing point at x={} (tolerance {X_TOLERANCE})",
                            point.x, clash.x
                        ),
                    });
                    continue;
                }
                ids.push(label.unwrap_or_else(|| format!("P{}", points.len() + 1)));
                points.push(point);
            }
            Err(e) => row_errors.push(RowError { line, message: e }),
        }
    }

    finalize(points, ids, row_errors, rows_read)
}

fn finalize(
    points: Vec<Point>,
    ids: Vec<String>,
    row_errors: Vec<RowError>,
    rows_read: usize,
) -> Result<IngestedPoints, AppError> {
    if points.len() < 2 {
        return Err(AppError::new(
            3,
            format!(
                "At least 2 distinct points are required to fit (got {}).",
                points.len()
            ),
        ));
    }

    let stats = DatasetStats::from_points(&points)
        .ok_or_else(|| AppError::new(3, "No valid points remain after validation."))?;

    Ok(IngestedPoints {
        points,
        ids,
        stats,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "﻿x"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<(Point, Option<String>), String> {
    let x = parse_f64(get_required(record, header_map, "x")?, "x")?;
    let y = parse_f64(get_required(record, header_map, "y")?, "y")?;
    let label = get_optional(record, header_map, "label").map(str::to_string);
    Ok((Point::new(x, y), label))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `{name}` value '{s}'."));
    }
    Ok(v)
}
