//! AHP priority vectors and Saaty consistency.
//!
//! Priority vector: normalize each column by its sum, then average each row.
//! Consistency: `λmax = mean_i((A·w)_i / w_i)`, `CI = (λmax − n) / (n − 1)`,
//! `CR = CI / RI(n)` (0 when `RI(n) = 0`).

use madm_core::{ConsistencyReport, PairwiseMatrix};

use crate::matrix::Matrix;

/// Random index by matrix size, n = 1..=10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// `RI(n)`; sizes above 10 reuse the last entry.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// Everything derived from one pairwise matrix, kept for the trace.
#[derive(Clone, Debug, PartialEq)]
pub struct PriorityAnalysis {
    pub column_sums: Vec<f64>,
    pub normalized: Matrix,
    pub priority: Vec<f64>,
    /// `A · w`
    pub weighted_sum: Vec<f64>,
    pub report: ConsistencyReport,
}

pub fn analyze(m: &PairwiseMatrix, threshold: f64) -> PriorityAnalysis {
    let n = m.size();
    let column_sums: Vec<f64> = (0..n).map(|j| (0..n).map(|i| m.get(i, j)).sum()).collect();
    // Judgments are ≥ 1/9, so column sums are strictly positive.
    let normalized: Matrix = (0..n)
        .map(|i| (0..n).map(|j| m.get(i, j) / column_sums[j]).collect())
        .collect();
    let priority: Vec<f64> = normalized
        .iter()
        .map(|row| row.iter().sum::<f64>() / n as f64)
        .collect();
    let weighted_sum: Vec<f64> = (0..n)
        .map(|i| (0..n).map(|j| m.get(i, j) * priority[j]).sum())
        .collect();
    let report = consistency_report(n, &weighted_sum, &priority, threshold);
    PriorityAnalysis { column_sums, normalized, priority, weighted_sum, report }
}

fn consistency_report(n: usize, weighted_sum: &[f64], priority: &[f64], threshold: f64) -> ConsistencyReport {
    let lambda_max = if n == 0 {
        0.0
    } else {
        weighted_sum.iter().zip(priority).map(|(ws, p)| ws / p).sum::<f64>() / n as f64
    };
    let ci = if n > 1 { (lambda_max - n as f64) / (n as f64 - 1.0) } else { 0.0 };
    let ri = random_index(n);
    let cr = if ri == 0.0 { 0.0 } else { ci / ri };
    ConsistencyReport { size: n, lambda_max, ci, ri, cr, consistent: cr < threshold }
}
