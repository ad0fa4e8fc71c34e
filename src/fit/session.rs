//! Candidate enumeration and winner selection.
//!
//! A fit session:
//! 1. runs every candidate applicable to the requested family
//! 2. keeps all attempts (usable or not) for diagnostics
//! 3. picks the lowest-error usable fit; the first encountered wins ties
//!
//! Selection lives outside the per-family routines so each of those stays a
//! pure, independently testable unit.

use crate::domain::{CandidateFit, FamilySpec, FitFamily, Point, TrigKind};
use crate::error::AppError;
use crate::fit::fitter::{fit_exponential, fit_logarithmic, fit_polynomial, fit_trigonometric};

/// Output of a full fit session.
#[derive(Debug, Clone)]
pub struct FitSession {
    /// Every attempt in candidate order, including unusable ones.
    pub candidates: Vec<CandidateFit>,
    /// The winning candidate; `params` is always `Some` here.
    pub best: CandidateFit,
}

/// Run every candidate for `family` over `points`.
///
/// Candidate order is contractual because it doubles as the tie-break
/// order: polynomial degrees ascending, then exponential, logarithmic,
/// sine, cosine. `FamilySpec::Auto` runs all of them.
pub fn run_candidates(points: &[Point], family: FamilySpec, max_degree: usize) -> Vec<CandidateFit> {
    let mut out = Vec::new();
    for fam in family.families() {
        match fam {
            FitFamily::Polynomial => {
                for degree in 1..=max_degree {
                    out.push(fit_polynomial(points, degree));
                }
            }
            FitFamily::Exponential => out.push(fit_exponential(points)),
            FitFamily::Logarithmic => out.push(fit_logarithmic(points)),
            FitFamily::Trigonometric => {
                out.push(fit_trigonometric(points, TrigKind::Sine));
                out.push(fit_trigonometric(points, TrigKind::Cosine));
            }
        }
    }
    out
}

/// Pick the lowest-error usable candidate.
///
/// Comparison is strictly `<`, so among equal errors the earliest candidate
/// stays selected. `None` when nothing usable exists.
pub fn select_best(candidates: &[CandidateFit]) -> Option<&CandidateFit> {
    let mut best: Option<&CandidateFit> = None;
    for c in candidates {
        if !c.fit.is_usable() {
            continue;
        }
        match best {
            None => best = Some(c),
            Some(b) if c.fit.error < b.fit.error => best = Some(c),
            _ => {}
        }
    }
    best
}

/// Run a session and select the winner.
///
/// Fails with exit code 3 when no candidate produced a usable fit.
pub fn fit_and_select(
    points: &[Point],
    family: FamilySpec,
    max_degree: usize,
) -> Result<FitSession, AppError> {
    let candidates = run_candidates(points, family, max_degree);
    let best = select_best(&candidates)
        .cloned()
        .ok_or_else(|| AppError::new(3, "Could not find a suitable function fit."))?;
    Ok(FitSession { candidates, best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateKind, CurveParams, FunctionFit};

    fn usable(kind: CandidateKind, error: f64) -> CandidateFit {
        CandidateFit {
            kind,
            params: Some(CurveParams::Exponential { a: 1.0, b: 1.0 }),
            fit: FunctionFit {
                expression: "stub".to_string(),
                error,
            },
        }
    }

    #[test]
    fn candidate_order_is_stable() {
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
            Point::new(3.0, 2.0),
        ];
        let candidates = run_candidates(&points, FamilySpec::Auto, 2);
        let kinds: Vec<CandidateKind> = candidates.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CandidateKind::Polynomial { degree: 1 },
                CandidateKind::Polynomial { degree: 2 },
                CandidateKind::Exponential,
                CandidateKind::Logarithmic,
                CandidateKind::Trigonometric {
                    kind: TrigKind::Sine
                },
                CandidateKind::Trigonometric {
                    kind: TrigKind::Cosine
                },
            ]
        );
    }

    #[test]
    fn selection_ties_keep_first_candidate() {
        let candidates = vec![
            usable(CandidateKind::Polynomial { degree: 1 }, 5.0),
            usable(CandidateKind::Exponential, 3.0),
            usable(CandidateKind::Logarithmic, 3.0),
        ];
        let best = select_best(&candidates).unwrap();
        assert_eq!(best.kind, CandidateKind::Exponential);
    }

    #[test]
    fn selection_skips_unusable_candidates() {
        // A sentinel with a small error field must never win.
        let mut sentinel = CandidateFit::failed(CandidateKind::Exponential);
        sentinel.fit.error = 0.5;
        let candidates = vec![
            sentinel,
            usable(CandidateKind::Polynomial { degree: 1 }, 2.0),
        ];
        let best = select_best(&candidates).unwrap();
        assert_eq!(best.kind, CandidateKind::Polynomial { degree: 1 });
    }

    #[test]
    fn selection_empty_when_nothing_usable() {
        let candidates = vec![
            CandidateFit::failed(CandidateKind::Exponential),
            CandidateFit::failed(CandidateKind::Logarithmic),
        ];
        assert!(select_best(&candidates).is_none());
    }

    #[test]
    fn fit_and_select_fails_with_code_3() {
        // Non-positive y everywhere leaves the exponential family nothing to
        // train on.
        let points = vec![Point::new(0.0, -1.0), Point::new(1.0, -2.0)];
        let err = fit_and_select(&points, FamilySpec::Exponential, 3).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn auto_picks_logarithmic_on_logarithmic_data() {
        let points: Vec<Point> = (1..=20)
            .map(|i| {
                let x = i as f64 * 0.5;
                Point::new(x, 2.0 * x.ln() + 1.0)
            })
            .collect();
        let session = fit_and_select(&points, FamilySpec::Auto, 3).unwrap();
        assert_eq!(session.best.kind, CandidateKind::Logarithmic);
        assert!(session.best.fit.error < 1e-12);
        assert_eq!(session.candidates.len(), 7);
    }
}
