//! madm_report: pure offline report model + renderers (JSON/HTML/text).
//!
//! - No network, no I/O here. Callers supply the result document already in memory.
//! - Inputs are accepted as `serde_json::Value` so this crate does not depend on
//!   the pipeline's concrete types; a `result.json` read back from disk works
//!   the same as one just produced.
//! - Section order is fixed: cover, criteria, ranking, steps, consistency,
//!   notes, integrity.

#![deny(unsafe_code)]

use thiserror::Error;

pub mod structure;

#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_text")]
pub mod render_text;

pub use structure::{build_model, ReportModel};

#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_text")]
pub use render_text::render_text;

/// A parsed `result.json`.
pub type ResultArtifact = serde_json::Value;

/// Scores are shown with this many decimals everywhere.
pub const SCORE_DECIMALS: usize = 6;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(String),
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("inconsistent result document: {0}")]
    Inconsistent(&'static str),
}

#[cfg(test)]
pub(crate) mod tests_support {
    use serde_json::{json, Value};

    pub fn sample_result() -> Value {
        json!({
            "id": format!("CALC:{}", "ab".repeat(32)),
            "method": "SAW",
            "input_sha256": "cd".repeat(32),
            "params": {
                "weight_tolerance": 0.01, "consistency_threshold": 0.1, "wp_epsilon": 0.0001,
                "degenerate_policy": "lenient", "missing_judgment": "default_one", "ahp_mode": "pairwise"
            },
            "criteria": [
                {"id": 1, "name": "Harga", "weight": 0.5, "type": "cost"},
                {"id": 2, "name": "Kualitas", "weight": 0.499, "type": "benefit"}
            ],
            "results": [
                {"id": 1, "name": "A", "score": 0.9, "rank": 1},
                {"id": 2, "name": "B <b>", "score": 0.75, "rank": 2}
            ],
            "steps": [
                {"title": "Decision Matrix", "description": "Raw values",
                 "matrix": [[10.0, 8.0], [20.0, 10.0]], "headers": ["Harga", "Kualitas"]},
                {"title": "Ranking", "description": "Sorted by score", "vector": [0.9, 0.75]}
            ],
            "warnings": [{"code": "Weights.NearMiss", "message": "weights sum to 0.999"}]
        })
    }
}
