//! Column normalization strategies.
//!
//! - `MaxBased`  (benefit, SAW): `r = x / max(x)`
//! - `MinBased`  (cost, SAW):    `r = min(x) / x`
//! - `Vector`    (TOPSIS):       `r = x / sqrt(Σ x²)`
//! - `Sum`       (AHP simple):   `r = x / Σ x`
//!
//! Zero denominators go through `DivGuard`. A zero column sum maps the whole
//! column to 0, whatever its values.

use madm_core::CriterionKind;

use crate::guard::DivGuard;
use crate::matrix::{column, column_max, column_min, Matrix};
use crate::AlgoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    MaxBased,
    MinBased,
    Vector,
    Sum,
}

impl Normalization {
    /// SAW picks its strategy from the criterion kind.
    pub fn for_kind(kind: CriterionKind) -> Self {
        match kind {
            CriterionKind::Benefit => Normalization::MaxBased,
            CriterionKind::Cost => Normalization::MinBased,
        }
    }

    /// Per-column divisor reported in traces (max, min, norm or sum).
    pub fn reference(self, m: &Matrix, j: usize) -> f64 {
        match self {
            Normalization::MaxBased => column_max(m, j),
            Normalization::MinBased => column_min(m, j),
            Normalization::Vector => column(m, j).iter().map(|x| x * x).sum::<f64>().sqrt(),
            Normalization::Sum => column(m, j).iter().sum(),
        }
    }
}

/// Normalize every column of `m` with its own strategy.
///
/// Returns the normalized matrix and the per-column reference values.
pub fn normalize_matrix(
    m: &Matrix,
    strategies: &[Normalization],
    guard: &mut DivGuard,
    stage: &'static str,
) -> Result<(Matrix, Vec<f64>), AlgoError> {
    let refs: Vec<f64> = strategies.iter().enumerate().map(|(j, s)| s.reference(m, j)).collect();
    let mut out = Vec::with_capacity(m.len());
    for row in m {
        let mut r = Vec::with_capacity(row.len());
        for (j, (&x, &s)) in row.iter().zip(strategies).enumerate() {
            let v = match s {
                Normalization::MinBased => guard.div(refs[j], x, stage, Some(j))?,
                // a zero sum over mixed-sign values makes the whole column 0
                Normalization::Sum if refs[j] == 0.0 => guard.div(0.0, 0.0, stage, Some(j))?,
                _ => guard.div(x, refs[j], stage, Some(j))?,
            };
            r.push(v);
        }
        out.push(r);
    }
    Ok((out, refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use madm_core::DegeneratePolicy;

    #[test]
    fn each_strategy_matches_its_formula() {
        let m = vec![vec![3.0, 2.0, 3.0, 1.0], vec![4.0, 4.0, 4.0, 3.0]];
        let s = [Normalization::MaxBased, Normalization::MinBased, Normalization::Vector, Normalization::Sum];
        let mut g = DivGuard::new(DegeneratePolicy::Lenient);
        let (r, refs) = normalize_matrix(&m, &s, &mut g, "normalize").unwrap();
        assert_eq!(refs, vec![4.0, 2.0, 5.0, 4.0]);
        assert_eq!(r[0], vec![0.75, 1.0, 0.6, 0.25]);
        assert_eq!(r[1], vec![1.0, 0.5, 0.8, 0.75]);
        assert!(g.into_events().is_empty());
    }

    #[test]
    fn all_zero_column_is_guarded() {
        let m = vec![vec![0.0], vec![0.0]];
        let mut g = DivGuard::new(DegeneratePolicy::Lenient);
        let (r, _) = normalize_matrix(&m, &[Normalization::Vector], &mut g, "normalize").unwrap();
        assert_eq!(r, vec![vec![0.0], vec![0.0]]);
        assert_eq!(g.into_events().len(), 1);

        let mut strict = DivGuard::new(DegeneratePolicy::Strict);
        assert!(normalize_matrix(&m, &[Normalization::MaxBased], &mut strict, "normalize").is_err());
    }

    #[test]
    fn zero_sum_column_is_zero_not_infinite() {
        let m = vec![vec![-1.0, 2.0], vec![1.0, 2.0]];
        let s = [Normalization::Sum, Normalization::Sum];
        let mut g = DivGuard::new(DegeneratePolicy::Lenient);
        let (r, refs) = normalize_matrix(&m, &s, &mut g, "normalize").unwrap();
        assert_eq!(refs, vec![0.0, 4.0]);
        assert_eq!(r, vec![vec![0.0, 0.5], vec![0.0, 0.5]]);
        assert_eq!(g.into_events(), vec![crate::GuardEvent { stage: "normalize", column: Some(0) }]);

        let mut strict = DivGuard::new(DegeneratePolicy::Strict);
        assert!(normalize_matrix(&m, &s, &mut strict, "normalize").is_err());
    }
}
