//! Scenario entities: criteria, alternatives, and the method selector.
//!
//! Row order of every engine matrix is the order of the `alternatives` slice and
//! column order is the order of the `criteria` slice; nothing here re-sorts.

use std::collections::BTreeMap;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::{AlternativeId, CriterionId};

/// Whether a higher raw value is preferred (benefit) or a lower one (cost).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CriterionKind {
    Benefit,
    Cost,
}

impl CriterionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CriterionKind::Benefit => "benefit",
            CriterionKind::Cost => "cost",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for CriterionKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefit" => Ok(CriterionKind::Benefit),
            "cost" => Ok(CriterionKind::Cost),
            _ => Err(CoreError::InvalidToken),
        }
    }
}

/// A weighted criterion. `weight` is ignored by AHP in pairwise mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub weight: f64,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: CriterionKind,
}

impl Criterion {
    pub fn new(id: u32, name: impl Into<String>, weight: f64, kind: CriterionKind) -> Self {
        Self { id: CriterionId(id), name: name.into(), weight, kind }
    }

    #[inline]
    pub fn is_benefit(&self) -> bool { self.kind == CriterionKind::Benefit }
}

/// An alternative with its raw value per criterion id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alternative {
    pub id: AlternativeId,
    pub name: String,
    pub values: BTreeMap<CriterionId, f64>,
}

impl Alternative {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id: AlternativeId(id), name: name.into(), values: BTreeMap::new() }
    }

    /// Builder-style value insertion (used heavily in tests and fixtures).
    pub fn with_value(mut self, criterion: u32, value: f64) -> Self {
        self.values.insert(CriterionId(criterion), value);
        self
    }

    #[inline]
    pub fn value(&self, criterion: CriterionId) -> Option<f64> {
        self.values.get(&criterion).copied()
    }
}

/// One row of the final ranking. `score` is only comparable within one
/// method and run; `rank` is 1-based.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedResult {
    pub id: AlternativeId,
    pub name: String,
    pub score: f64,
    pub rank: usize,
}

/// The four supported ranking methods. Parsing is the dispatcher's
/// unknown-method check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    #[cfg_attr(feature = "serde", serde(rename = "SAW"))]
    Saw,
    #[cfg_attr(feature = "serde", serde(rename = "WP"))]
    Wp,
    #[cfg_attr(feature = "serde", serde(rename = "AHP"))]
    Ahp,
    #[cfg_attr(feature = "serde", serde(rename = "TOPSIS"))]
    Topsis,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Saw, Method::Wp, Method::Ahp, Method::Topsis];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Saw => "SAW",
            Method::Wp => "WP",
            Method::Ahp => "AHP",
            Method::Topsis => "TOPSIS",
        }
    }

    pub fn long_name(self) -> &'static str {
        match self {
            Method::Saw => "Simple Additive Weighting",
            Method::Wp => "Weighted Product",
            Method::Ahp => "Analytic Hierarchy Process",
            Method::Topsis => "Technique for Order Preference by Similarity to Ideal Solution",
        }
    }

    /// SAW/WP/TOPSIS consume caller weights; AHP derives its own (pairwise mode).
    #[inline]
    pub fn uses_supplied_weights(self) -> bool { !matches!(self, Method::Ahp) }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Method {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAW" => Ok(Method::Saw),
            "WP" => Ok(Method::Wp),
            "AHP" => Ok(Method::Ahp),
            "TOPSIS" => Ok(Method::Topsis),
            _ => Err(CoreError::InvalidToken),
        }
    }
}
