//! Pairwise comparison matrices for AHP.
//!
//! Judgments are stored densely and addressed by index (criterion order or
//! alternative order), never by concatenated string keys:
//! - the diagonal is fixed at 1;
//! - `set(i, j, v)` writes `v` at (i, j) **and** `1 / v` at (j, i), so the
//!   reciprocal relationship holds by construction;
//! - entries that were never written stay at 1 ("equal importance") and are
//!   reported by `missing_pairs()` so a strict caller can reject them.
//!
//! `AhpJudgments` is the arena: one criteria matrix plus one alternatives
//! matrix per criterion id.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::{Alternative, Criterion};
use crate::errors::CoreError;
use crate::ids::{AlternativeId, CriterionId};

/// Smallest and largest admissible judgment on the Saaty scale.
pub const SCALE_MIN: f64 = 1.0 / 9.0;
pub const SCALE_MAX: f64 = 9.0;
const SCALE_SLACK: f64 = 1e-9;

#[inline]
fn in_scale(v: f64) -> bool {
    v.is_finite() && v >= SCALE_MIN - SCALE_SLACK && v <= SCALE_MAX + SCALE_SLACK
}

/// Dense n×n reciprocal judgment matrix.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PairwiseParts"))]
pub struct PairwiseMatrix {
    n: usize,
    cells: Vec<f64>,
    supplied: Vec<bool>,
}

/// Wire shape of `PairwiseMatrix`; checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PairwiseParts {
    n: usize,
    cells: Vec<f64>,
    supplied: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<PairwiseParts> for PairwiseMatrix {
    type Error = CoreError;

    /// Replays the supplied upper triangle through `set`, so the lower
    /// triangle and the diagonal are rebuilt rather than trusted.
    fn try_from(p: PairwiseParts) -> Result<Self, CoreError> {
        let size = p.n.checked_mul(p.n).ok_or(CoreError::IndexOutOfBounds { index: p.n, size: 0 })?;
        for len in [p.cells.len(), p.supplied.len()] {
            if len != size {
                return Err(CoreError::IndexOutOfBounds { index: len, size });
            }
        }
        let mut m = Self::identity(p.n);
        for i in 0..p.n {
            for j in (i + 1)..p.n {
                if p.supplied[i * p.n + j] {
                    m.set(i, j, p.cells[i * p.n + j])?;
                }
            }
        }
        Ok(m)
    }
}

impl PairwiseMatrix {
    /// All-ones matrix (every pair "equally important"), nothing supplied yet.
    pub fn identity(n: usize) -> Self {
        let mut supplied = vec![false; n * n];
        for i in 0..n {
            supplied[i * n + i] = true;
        }
        Self { n, cells: vec![1.0; n * n], supplied }
    }

    /// Build from a full row-major table; every off-diagonal upper entry is
    /// written through `set`, so the lower triangle is derived, not trusted.
    pub fn from_upper_rows(rows: &[Vec<f64>]) -> Result<Self, CoreError> {
        let n = rows.len();
        let mut m = Self::identity(n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(CoreError::IndexOutOfBounds { index: row.len(), size: n });
            }
            for j in (i + 1)..n {
                m.set(i, j, row[j])?;
            }
        }
        Ok(m)
    }

    #[inline]
    pub fn size(&self) -> usize { self.n }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 { self.cells[i * self.n + j] }

    /// Record "row `i` is `value` times as important as row `j`".
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), CoreError> {
        let n = self.n;
        for idx in [i, j] {
            if idx >= n {
                return Err(CoreError::IndexOutOfBounds { index: idx, size: n });
            }
        }
        if i == j {
            return if (value - 1.0).abs() <= SCALE_SLACK { Ok(()) } else { Err(CoreError::DiagonalNotOne) };
        }
        if !in_scale(value) {
            return Err(CoreError::JudgmentOutOfRange(value));
        }
        self.cells[i * n + j] = value;
        self.cells[j * n + i] = 1.0 / value;
        self.supplied[i * n + j] = true;
        self.supplied[j * n + i] = true;
        Ok(())
    }

    #[inline]
    pub fn is_supplied(&self, i: usize, j: usize) -> bool { self.supplied[i * self.n + j] }

    /// Upper-triangle pairs `(i, j)` with `i < j` that were never written.
    pub fn missing_pairs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if !self.is_supplied(i, j) {
                    out.push((i, j));
                }
            }
        }
        out
    }

    #[inline]
    pub fn is_complete(&self) -> bool { self.missing_pairs().is_empty() }

    /// Row-major copy for traces and reports.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells.chunks(self.n.max(1)).take(self.n).map(|r| r.to_vec()).collect()
    }
}

/// All AHP judgments for one scenario.
///
/// Matrix rows follow the slice order of `criteria` / `alternatives` given to
/// `for_scenario`; the id → index maps are kept so loaders can address cells
/// by id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AhpJudgments {
    pub criteria: PairwiseMatrix,
    pub alternatives: BTreeMap<CriterionId, PairwiseMatrix>,
    criterion_index: BTreeMap<CriterionId, usize>,
    alternative_index: BTreeMap<AlternativeId, usize>,
}

impl AhpJudgments {
    /// Identity matrices sized to the scenario, one alternatives matrix per criterion.
    pub fn for_scenario(criteria: &[Criterion], alternatives: &[Alternative]) -> Self {
        let criterion_index: BTreeMap<CriterionId, usize> =
            criteria.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let alternative_index: BTreeMap<AlternativeId, usize> =
            alternatives.iter().enumerate().map(|(i, a)| (a.id, i)).collect();
        let per_criterion = criteria
            .iter()
            .map(|c| (c.id, PairwiseMatrix::identity(alternatives.len())))
            .collect();
        Self {
            criteria: PairwiseMatrix::identity(criteria.len()),
            alternatives: per_criterion,
            criterion_index,
            alternative_index,
        }
    }

    fn criterion_idx(&self, id: CriterionId) -> Result<usize, CoreError> {
        self.criterion_index.get(&id).copied().ok_or(CoreError::UnknownCriterion(id.get()))
    }

    fn alternative_idx(&self, id: AlternativeId) -> Result<usize, CoreError> {
        self.alternative_index.get(&id).copied().ok_or(CoreError::UnknownAlternative(id.get()))
    }

    /// Criterion `a` is `value` times as important as criterion `b`.
    pub fn set_criteria(&mut self, a: CriterionId, b: CriterionId, value: f64) -> Result<(), CoreError> {
        let (i, j) = (self.criterion_idx(a)?, self.criterion_idx(b)?);
        self.criteria.set(i, j, value)
    }

    /// Under `criterion`, alternative `a` is `value` times as preferred as `b`.
    pub fn set_alternatives(
        &mut self,
        criterion: CriterionId,
        a: AlternativeId,
        b: AlternativeId,
        value: f64,
    ) -> Result<(), CoreError> {
        let (i, j) = (self.alternative_idx(a)?, self.alternative_idx(b)?);
        let m = self
            .alternatives
            .get_mut(&criterion)
            .ok_or(CoreError::UnknownCriterion(criterion.get()))?;
        m.set(i, j, value)
    }

    /// Judgment lookup by ids (1 for unknown pairs, matching the default).
    pub fn alternative_value(&self, criterion: CriterionId, a: AlternativeId, b: AlternativeId) -> f64 {
        match (self.alternatives.get(&criterion), self.alternative_idx(a), self.alternative_idx(b)) {
            (Some(m), Ok(i), Ok(j)) => m.get(i, j),
            _ => 1.0,
        }
    }

    /// True when no off-diagonal judgment was supplied anywhere.
    pub fn is_empty(&self) -> bool {
        let criteria_empty = self.criteria.missing_pairs().len() == pair_count(self.criteria.size());
        criteria_empty
            && self
                .alternatives
                .values()
                .all(|m| m.missing_pairs().len() == pair_count(m.size()))
    }
}

#[inline]
fn pair_count(n: usize) -> usize { n * n.saturating_sub(1) / 2 }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CriterionKind;

    #[test]
    fn set_writes_reciprocal_exactly_on_integer_scale() {
        let mut m = PairwiseMatrix::identity(2);
        for v in 1..=9 {
            let v = v as f64;
            m.set(0, 1, v).unwrap();
            assert_eq!(m.get(0, 1) * m.get(1, 0), 1.0);
            m.set(1, 0, v).unwrap();
            assert_eq!(m.get(0, 1) * m.get(1, 0), 1.0);
        }
    }

    #[test]
    fn diagonal_and_scale_rules() {
        let mut m = PairwiseMatrix::identity(3);
        assert!(m.set(1, 1, 1.0).is_ok());
        assert_eq!(m.set(1, 1, 2.0), Err(CoreError::DiagonalNotOne));
        assert_eq!(m.set(0, 1, 10.0), Err(CoreError::JudgmentOutOfRange(10.0)));
        assert!(m.set(0, 1, 0.1).is_err());
        assert!(m.set(0, 1, f64::NAN).is_err());
        assert!(m.set(0, 1, 1.0 / 9.0).is_ok());
        assert_eq!(m.set(0, 3, 2.0), Err(CoreError::IndexOutOfBounds { index: 3, size: 3 }));
    }

    #[test]
    fn missing_pairs_tracks_unwritten_upper_triangle() {
        let mut m = PairwiseMatrix::identity(3);
        assert_eq!(m.missing_pairs(), vec![(0, 1), (0, 2), (1, 2)]);
        m.set(2, 0, 3.0).unwrap();
        assert_eq!(m.missing_pairs(), vec![(0, 1), (1, 2)]);
        m.set(0, 1, 2.0).unwrap();
        m.set(1, 2, 0.5).unwrap();
        assert!(m.is_complete());
    }

    #[test]
    fn from_upper_rows_derives_lower_triangle() {
        let m = PairwiseMatrix::from_upper_rows(&[
            vec![1.0, 2.0, 4.0],
            vec![9.0, 1.0, 2.0], // lower entries ignored
            vec![9.0, 9.0, 1.0],
        ])
        .unwrap();
        assert_eq!(m.get(1, 0), 0.5);
        assert_eq!(m.get(2, 0), 0.25);
        assert_eq!(m.get(2, 1), 0.5);
        assert_eq!(m.to_rows().len(), 3);
    }

    #[test]
    fn judgments_addressed_by_id() {
        let criteria = vec![
            Criterion::new(10, "Price", 0.5, CriterionKind::Cost),
            Criterion::new(20, "Quality", 0.5, CriterionKind::Benefit),
        ];
        let alts = vec![Alternative::new(7, "A"), Alternative::new(3, "B")];
        let mut j = AhpJudgments::for_scenario(&criteria, &alts);
        assert!(j.is_empty());

        j.set_criteria(CriterionId(20), CriterionId(10), 3.0).unwrap();
        assert_eq!(j.criteria.get(1, 0), 3.0);
        assert!((j.criteria.get(0, 1) - 1.0 / 3.0).abs() < 1e-15);

        j.set_alternatives(CriterionId(10), AlternativeId(7), AlternativeId(3), 5.0).unwrap();
        assert_eq!(j.alternative_value(CriterionId(10), AlternativeId(7), AlternativeId(3)), 5.0);
        assert_eq!(j.alternative_value(CriterionId(10), AlternativeId(3), AlternativeId(7)), 0.2);
        assert_eq!(j.alternative_value(CriterionId(20), AlternativeId(3), AlternativeId(7)), 1.0);
        assert!(!j.is_empty());

        assert_eq!(
            j.set_alternatives(CriterionId(99), AlternativeId(7), AlternativeId(3), 2.0),
            Err(CoreError::UnknownCriterion(99))
        );
        assert_eq!(
            j.set_criteria(CriterionId(10), CriterionId(11), 2.0),
            Err(CoreError::UnknownCriterion(11))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_checks_shape() {
        let mut m = PairwiseMatrix::identity(3);
        m.set(0, 2, 4.0).unwrap();
        let text = serde_json::to_string(&m).unwrap();
        let back: PairwiseMatrix = serde_json::from_str(&text).unwrap();
        assert_eq!(back, m);

        let short = r#"{"n": 3, "cells": [1.0, 1.0], "supplied": [true, true]}"#;
        assert!(serde_json::from_str::<PairwiseMatrix>(short).is_err());
        let off_scale = r#"{"n": 2, "cells": [1.0, 20.0, 0.05, 1.0], "supplied": [true, true, true, true]}"#;
        assert!(serde_json::from_str::<PairwiseMatrix>(off_scale).is_err());
    }
}
