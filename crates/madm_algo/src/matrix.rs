//! Decision matrix construction and column helpers.

use madm_core::{Alternative, Criterion};

/// Row-major `alternatives × criteria` matrix.
pub type Matrix = Vec<Vec<f64>>;

/// `X[i][j]` = value of alternative `i` for criterion `j`; missing values are 0.
pub fn decision_matrix(alternatives: &[Alternative], criteria: &[Criterion]) -> Matrix {
    decision_matrix_with(alternatives, criteria, |v| v.unwrap_or(0.0))
}

/// Same shape as `decision_matrix`, with a caller-supplied mapping for each
/// looked-up value (used by WP to substitute its epsilon).
pub fn decision_matrix_with<F>(alternatives: &[Alternative], criteria: &[Criterion], mut cell: F) -> Matrix
where
    F: FnMut(Option<f64>) -> f64,
{
    alternatives
        .iter()
        .map(|a| criteria.iter().map(|c| cell(a.value(c.id))).collect())
        .collect()
}

pub fn column(m: &Matrix, j: usize) -> Vec<f64> {
    m.iter().map(|row| row[j]).collect()
}

pub fn column_max(m: &Matrix, j: usize) -> f64 {
    m.iter().map(|row| row[j]).fold(f64::NEG_INFINITY, f64::max)
}

pub fn column_min(m: &Matrix, j: usize) -> f64 {
    m.iter().map(|row| row[j]).fold(f64::INFINITY, f64::min)
}

/// Multiply column `j` by `weights[j]`.
pub fn weighted(m: &Matrix, weights: &[f64]) -> Matrix {
    m.iter()
        .map(|row| row.iter().zip(weights).map(|(x, w)| x * w).collect())
        .collect()
}

pub fn row_sums(m: &Matrix) -> Vec<f64> {
    m.iter().map(|row| row.iter().sum()).collect()
}

pub fn weights_of(criteria: &[Criterion]) -> Vec<f64> {
    criteria.iter().map(|c| c.weight).collect()
}

pub fn criterion_names(criteria: &[Criterion]) -> Vec<String> {
    criteria.iter().map(|c| c.name.clone()).collect()
}

pub fn alternative_names(alternatives: &[Alternative]) -> Vec<String> {
    alternatives.iter().map(|a| a.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use madm_core::CriterionKind;

    #[test]
    fn missing_values_default_to_zero_in_slice_order() {
        let criteria = vec![
            Criterion::new(2, "B", 0.5, CriterionKind::Benefit),
            Criterion::new(1, "A", 0.5, CriterionKind::Cost),
        ];
        let alts = vec![Alternative::new(1, "x").with_value(1, 3.0), Alternative::new(2, "y").with_value(2, 4.0)];
        let m = decision_matrix(&alts, &criteria);
        assert_eq!(m, vec![vec![0.0, 3.0], vec![4.0, 0.0]]);
        assert_eq!(column(&m, 1), vec![3.0, 0.0]);
        assert_eq!(column_max(&m, 0), 4.0);
        assert_eq!(column_min(&m, 0), 0.0);
        assert_eq!(row_sums(&weighted(&m, &[0.5, 2.0])), vec![6.0, 2.0]);
    }
}
