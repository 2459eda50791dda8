//! Division with the degenerate-input policy applied.
//!
//! Lenient: `0 / 0` yields `0` and is recorded as a `GuardEvent`; any other
//! `x / 0` follows IEEE-754 (±∞) so the result shows the problem.
//! Strict: any zero denominator, or any non-finite score, is an error.

use madm_core::DegeneratePolicy;

use crate::AlgoError;

/// A zero denominator that was resolved to `0` under the lenient policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardEvent {
    pub stage: &'static str,
    pub column: Option<usize>,
}

#[derive(Debug)]
pub struct DivGuard {
    policy: DegeneratePolicy,
    events: Vec<GuardEvent>,
}

impl DivGuard {
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy, events: Vec::new() }
    }

    pub fn div(
        &mut self,
        num: f64,
        den: f64,
        stage: &'static str,
        column: Option<usize>,
    ) -> Result<f64, AlgoError> {
        if den != 0.0 {
            return Ok(num / den);
        }
        match self.policy {
            DegeneratePolicy::Strict => Err(AlgoError::Degenerate { stage, column }),
            DegeneratePolicy::Lenient if num == 0.0 => {
                let ev = GuardEvent { stage, column };
                if !self.events.contains(&ev) {
                    self.events.push(ev);
                }
                Ok(0.0)
            }
            DegeneratePolicy::Lenient => Ok(num / den),
        }
    }

    /// Strict policy only: reject NaN/±∞ in a finished score vector.
    pub fn check_scores(&self, scores: &[f64], stage: &'static str) -> Result<(), AlgoError> {
        if self.policy == DegeneratePolicy::Strict && scores.iter().any(|s| !s.is_finite()) {
            return Err(AlgoError::Degenerate { stage, column: None });
        }
        Ok(())
    }

    pub fn into_events(self) -> Vec<GuardEvent> { self.events }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_zero_over_zero_is_zero_and_recorded_once() {
        let mut g = DivGuard::new(DegeneratePolicy::Lenient);
        assert_eq!(g.div(0.0, 0.0, "normalize", Some(1)).unwrap(), 0.0);
        assert_eq!(g.div(0.0, 0.0, "normalize", Some(1)).unwrap(), 0.0);
        assert_eq!(g.div(6.0, 3.0, "normalize", Some(0)).unwrap(), 2.0);
        assert_eq!(g.into_events(), vec![GuardEvent { stage: "normalize", column: Some(1) }]);
    }

    #[test]
    fn lenient_nonzero_over_zero_propagates() {
        let mut g = DivGuard::new(DegeneratePolicy::Lenient);
        assert_eq!(g.div(-1.0, 0.0, "normalize", None).unwrap(), f64::NEG_INFINITY);
        assert!(g.check_scores(&[f64::NAN], "score").is_ok());
    }

    #[test]
    fn strict_rejects() {
        let mut g = DivGuard::new(DegeneratePolicy::Strict);
        assert_eq!(
            g.div(0.0, 0.0, "closeness", Some(2)),
            Err(AlgoError::Degenerate { stage: "closeness", column: Some(2) })
        );
        assert!(g.check_scores(&[1.0, f64::INFINITY], "score").is_err());
        assert!(g.check_scores(&[1.0, 0.5], "score").is_ok());
    }
}
