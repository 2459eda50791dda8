//! Final ordering of scored alternatives.

use madm_core::determinism::rank_order;
use madm_core::{Alternative, CalculationStep, RankedResult};

/// Pair each alternative with its score and sort descending.
/// Equal scores keep input order; NaN scores sort last. Ranks are 1-based
/// positions in the sorted list.
pub fn rank_results(alternatives: &[Alternative], scores: &[f64]) -> Vec<RankedResult> {
    rank_order(scores)
        .into_iter()
        .enumerate()
        .map(|(pos, i)| RankedResult {
            id: alternatives[i].id,
            name: alternatives[i].name.clone(),
            score: scores[i],
            rank: pos + 1,
        })
        .collect()
}

/// Closing trace step shared by every method.
pub fn ranking_step(results: &[RankedResult], score_label: &str) -> CalculationStep {
    CalculationStep::new(
        "Ranking",
        format!("Alternatives sorted by {score_label}, highest first."),
    )
    .with_vector(results.iter().map(|r| r.score).collect())
    .with_headers(results.iter().map(|r| r.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_sorted_position() {
        let alts = vec![Alternative::new(1, "A"), Alternative::new(2, "B"), Alternative::new(3, "C")];
        let r = rank_results(&alts, &[0.3, 0.5, 0.3]);
        let names: Vec<_> = r.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(r.iter().map(|x| x.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        let step = ranking_step(&r, "V");
        assert_eq!(step.vector, Some(vec![0.5, 0.3, 0.3]));
    }
}
