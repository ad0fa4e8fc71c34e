//! Reporting utilities: residuals, outlier ranking, and formatted terminal
//! output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{CurveParams, FitConfig, Point, PointResidual};
use crate::fit::session::FitSession;
use crate::io::ingest::IngestedPoints;
use crate::models::predict;

/// Compute fitted values and residuals for each point under the winning fit.
///
/// The model may be undefined at some x (a logarithmic fit left of zero);
/// those entries carry `None` rather than failing the run.
pub fn compute_residuals(
    points: &[Point],
    ids: &[String],
    params: &CurveParams,
) -> Vec<PointResidual> {
    points
        .iter()
        .zip(ids.iter())
        .map(|(p, id)| {
            let y_fit = predict(params, p.x);
            if y_fit.is_finite() {
                PointResidual {
                    id: id.clone(),
                    point: *p,
                    y_fit: Some(y_fit),
                    residual: Some(p.y - y_fit),
                }
            } else {
                PointResidual {
                    id: id.clone(),
                    point: *p,
                    y_fit: None,
                    residual: None,
                }
            }
        })
        .collect()
}

/// Rank the top-N points by absolute residual, worst first.
///
/// Points where the model is undefined are left out of the ranking.
pub fn rank_outliers(residuals: &[PointResidual], top_n: usize) -> Vec<PointResidual> {
    let mut sorted: Vec<PointResidual> = residuals
        .iter()
        .filter(|r| r.residual.is_some())
        .cloned()
        .collect();
    sorted.sort_by(|a, b| {
        let ra = a.residual.unwrap_or(0.0).abs();
        let rb = b.residual.unwrap_or(0.0).abs();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}

/// Format the full run summary (dataset stats + candidate diagnostics +
/// chosen fit).
pub fn format_run_summary(
    config: &FitConfig,
    ingest: &IngestedPoints,
    session: &FitSession,
) -> String {
    let mut out = String::new();

    out.push_str("=== gfit - Function Fit ===\n");
    out.push_str(&format!("Input: {}\n", config.input_path.display()));
    out.push_str(&format!(
        "Family: {} | polynomial degrees 1..{}\n",
        config.family.display_name(),
        config.max_degree
    ));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        ingest.stats.n_points,
        ingest.stats.x_min,
        ingest.stats.x_max,
        ingest.stats.y_min,
        ingest.stats.y_max
    ));
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!(
            "Skipped rows: {} of {} (see --debug-bundle for details)\n",
            ingest.row_errors.len(),
            ingest.rows_read
        ));
    }

    out.push_str("\nCandidate diagnostics:\n");
    for c in &session.candidates {
        let chosen = if c.kind == session.best.kind { "*" } else { " " };
        if c.fit.is_usable() {
            out.push_str(&format!(
                "{chosen} {:<14} error={:<14.6} {}\n",
                c.kind.display_name(),
                c.fit.error,
                c.fit.expression
            ));
        } else {
            out.push_str(&format!(
                "{chosen} {:<14} (no usable fit)\n",
                c.kind.display_name()
            ));
        }
    }

    out.push_str("\nChosen fit:\n");
    out.push_str(&format!("- f(x) = {}\n", session.best.fit.expression));
    out.push_str(&format!("- fit error: {:.4}\n", session.best.fit.error));
    out.push('\n');

    out
}

/// Format the largest-residual table.
pub fn format_outliers(outliers: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str("Largest residuals:\n");
    out.push_str(&format_table(outliers));
    out
}

fn format_table(rows: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:>10} {:>12} {:>12} {:>12}\n",
            "id", "x", "y_obs", "y_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<12} {:-<10} {:-<12} {:-<12} {:-<12}\n",
            "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<12} {:>10.3} {:>12.4} {:>12} {:>12}\n",
                truncate(&r.id, 12),
                r.point.x,
                r.point.y,
                fmt_opt(r.y_fit),
                fmt_opt(r.residual),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:>12.4}"),
        None => format!("{:>12}", "-"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatasetStats, FamilySpec};
    use crate::fit::session::fit_and_select;
    use std::path::PathBuf;

    fn ids_for(points: &[Point]) -> Vec<String> {
        (1..=points.len()).map(|i| format!("P{i}")).collect()
    }

    #[test]
    fn compute_residuals_basic() {
        let params = CurveParams::Polynomial {
            coeffs: vec![0.0, 1.0],
        };
        let points = vec![Point::new(1.0, 1.5), Point::new(2.0, 2.0)];
        let ids = ids_for(&points);

        let residuals = compute_residuals(&points, &ids, &params);
        assert_eq!(residuals.len(), 2);
        assert!((residuals[0].residual.unwrap() - 0.5).abs() < 1e-12);
        assert!((residuals[1].residual.unwrap() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn compute_residuals_marks_undefined_points() {
        let params = CurveParams::Logarithmic { a: 1.0, b: 0.0 };
        let points = vec![Point::new(-1.0, 5.0), Point::new(1.0, 0.0)];
        let ids = ids_for(&points);

        let residuals = compute_residuals(&points, &ids, &params);
        assert!(residuals[0].y_fit.is_none());
        assert!(residuals[0].residual.is_none());
        assert!(residuals[1].y_fit.is_some());
    }

    #[test]
    fn rank_outliers_sorts_by_abs_residual() {
        let params = CurveParams::Polynomial { coeffs: vec![0.0] };
        let points = vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, -4.0),
            Point::new(2.0, 2.0),
        ];
        let ids = ids_for(&points);
        let residuals = compute_residuals(&points, &ids, &params);

        let top = rank_outliers(&residuals, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "P2");
        assert_eq!(top[1].id, "P3");
    }

    #[test]
    fn run_summary_marks_the_chosen_candidate() {
        let points: Vec<Point> = (0..10).map(|i| {
            let x = i as f64;
            Point::new(x, 2.0 * x + 0.5)
        }).collect();
        let session = fit_and_select(&points, FamilySpec::Polynomial, 1).unwrap();
        let ingest = IngestedPoints {
            ids: ids_for(&points),
            stats: DatasetStats::from_points(&points).unwrap(),
            points,
            row_errors: Vec::new(),
            rows_read: 10,
        };
        let config = FitConfig {
            input_path: PathBuf::from("points.csv"),
            family: FamilySpec::Polynomial,
            max_degree: 1,
            top_n: 5,
            export_results: None,
            debug_bundle: false,
        };

        let summary = format_run_summary(&config, &ingest, &session);
        assert!(summary.contains("* poly deg 1"));
        assert!(summary.contains("f(x) = 2.00x + 0.50"));
        assert!(summary.contains("Points: n=10"));
    }
}
