//! Debug bundle writer for inspecting ingested points and candidate fits.

use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::domain::{CurveParams, FitConfig};
use crate::error::AppError;
use crate::fit::session::FitSession;
use crate::io::ingest::IngestedPoints;
use crate::models::predict;

/// Write a markdown bundle describing one `fit` run to `debug/`.
///
/// Returns the path of the file written.
pub fn write_debug_bundle(
    config: &FitConfig,
    ingest: &IngestedPoints,
    session: &FitSession,
) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    fs::create_dir_all(&dir)
        .map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("gfit_debug_{ts}.md"));

    let bundle = render_bundle(config, ingest, session);
    fs::write(&path, bundle)
        .map_err(|e| AppError::new(4, format!("Failed to write debug file: {e}")))?;

    Ok(path)
}

fn render_bundle(config: &FitConfig, ingest: &IngestedPoints, session: &FitSession) -> String {
    let mut out = String::new();

    out.push_str("# gfit debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- input: {}\n", config.input_path.display()));
    out.push_str(&format!(
        "- family: {} | max polynomial degree {}\n",
        config.family.display_name(),
        config.max_degree
    ));
    out.push_str(&format!(
        "- points: n={} ({} rows read, {} skipped)\n",
        ingest.stats.n_points,
        ingest.rows_read,
        ingest.row_errors.len()
    ));

    out.push_str("\n## Points\n");
    out.push_str("| id | x | y |\n");
    out.push_str("| - | - | - |\n");
    for (id, p) in ingest.ids.iter().zip(ingest.points.iter()) {
        out.push_str(&format!("| {} | {:.6} | {:.6} |\n", id, p.x, p.y));
    }

    if !ingest.row_errors.is_empty() {
        out.push_str("\n## Skipped rows\n");
        for err in &ingest.row_errors {
            out.push_str(&format!("- line {}: {}\n", err.line, err.message));
        }
    }

    out.push_str("\n## Candidates\n");
    out.push_str("| candidate | error | expression | params |\n");
    out.push_str("| - | - | - | - |\n");
    for c in &session.candidates {
        if c.fit.is_usable() {
            let params = c
                .params
                .as_ref()
                .map(fmt_params)
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "| {} | {:.6} | {} | {} |\n",
                c.kind.display_name(),
                c.fit.error,
                c.fit.expression,
                params
            ));
        } else {
            out.push_str(&format!(
                "| {} | - | (no usable fit) | - |\n",
                c.kind.display_name()
            ));
        }
    }

    out.push_str("\n## Chosen fit\n");
    out.push_str(&format!("- f(x) = {}\n", session.best.fit.expression));
    out.push_str(&format!("- error: {:.6}\n", session.best.fit.error));

    if let Some(params) = &session.best.params {
        out.push_str("\n## Curve samples\n");
        out.push_str("| x | y |\n");
        out.push_str("| - | - |\n");
        let span = ingest.stats.x_max - ingest.stats.x_min;
        let step = if span > 0.0 { span / 40.0 } else { 0.5 };
        let mut x = ingest.stats.x_min;
        while x <= ingest.stats.x_max + 1e-9 {
            out.push_str(&format!("| {:.3} | {} |\n", x, fmt_opt(predict(params, x))));
            x += step;
        }
    }

    out
}

fn fmt_params(params: &CurveParams) -> String {
    match params {
        CurveParams::Polynomial { coeffs } => fmt_vec(coeffs),
        CurveParams::Exponential { a, b } | CurveParams::Logarithmic { a, b } => {
            format!("a={a:.6}, b={b:.6}")
        }
        CurveParams::Trigonometric {
            amplitude,
            frequency,
            phase,
            offset,
            ..
        } => format!("A={amplitude:.6}, f={frequency:.6}, phi={phase:.6}, C={offset:.6}"),
    }
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_opt(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.6}")
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatasetStats, FamilySpec, Point};
    use crate::fit::session::fit_and_select;

    #[test]
    fn bundle_lists_points_and_candidates() {
        let points: Vec<Point> = (1..=10)
            .map(|i| {
                let x = i as f64;
                Point::new(x, 3.0 * x - 1.0)
            })
            .collect();
        let session = fit_and_select(&points, FamilySpec::Polynomial, 2).unwrap();
        let ingest = IngestedPoints {
            ids: (1..=points.len()).map(|i| format!("P{i}")).collect(),
            stats: DatasetStats::from_points(&points).unwrap(),
            points,
            row_errors: Vec::new(),
            rows_read: 10,
        };
        let config = FitConfig {
            input_path: std::path::PathBuf::from("points.csv"),
            family: FamilySpec::Polynomial,
            max_degree: 2,
            top_n: 5,
            export_results: None,
            debug_bundle: true,
        };

        let bundle = render_bundle(&config, &ingest, &session);
        assert!(bundle.contains("# gfit debug bundle"));
        assert!(bundle.contains("| P1 | 1.000000 |"));
        assert!(bundle.contains("## Candidates"));
        assert!(bundle.contains("## Curve samples"));
    }

    #[test]
    fn curve_samples_mark_undefined_values() {
        let points = vec![
            Point::new(-2.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.7),
            Point::new(4.0, 1.4),
        ];
        let session = fit_and_select(&points, FamilySpec::Logarithmic, 3).unwrap();
        let ingest = IngestedPoints {
            ids: (1..=points.len()).map(|i| format!("P{i}")).collect(),
            stats: DatasetStats::from_points(&points).unwrap(),
            points,
            row_errors: Vec::new(),
            rows_read: 4,
        };
        let config = FitConfig {
            input_path: std::path::PathBuf::from("points.csv"),
            family: FamilySpec::Logarithmic,
            max_degree: 3,
            top_n: 5,
            export_results: None,
            debug_bundle: true,
        };

        let bundle = render_bundle(&config, &ingest, &session);
        // The grid starts at x=-2 where ln(x) is undefined.
        assert!(bundle.contains("| -2.000 | - |"));
    }
}
