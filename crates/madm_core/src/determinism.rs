//! Determinism utilities: stable score ordering.
//!
//! This module is **I/O-free**. Ranking must be identical across platforms and
//! runs, so the comparison is a total order over `f64`:
//! - larger scores first;
//! - NaN sorts after every number;
//! - equal scores compare `Equal`, letting a stable sort keep input order.

use core::cmp::Ordering;

/// Descending comparison with NaN last.
#[inline]
pub fn cmp_scores_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Indices of `scores` in ranking order; ties keep the original index order.
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..scores.len()).collect();
    // `sort_by` is stable, which is the tie-break rule.
    idx.sort_by(|&i, &j| cmp_scores_desc(scores[i], scores[j]));
    idx
}
