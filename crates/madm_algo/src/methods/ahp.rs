//! AHP: Analytic Hierarchy Process.
//!
//! Pairwise mode (default) runs three stages, each a plain value handed to
//! the next:
//! 1. `CriteriaStage`: criteria weights + consistency from the criteria matrix.
//! 2. `LocalPriorities`: per criterion, the alternatives' local priority vector
//!    + consistency. Criteria are independent of each other.
//! 3. global score `g_i = Σ_c local_c[i] · w_c`, then rank.
//!
//! Consistency is advisory: an inconsistent matrix is reported, never rejected.
//!
//! Simple mode uses the supplied weights with sum-normalized columns.

use madm_core::{
    AhpJudgments, AhpMode, Alternative, CalculationStep, Criterion, CriterionId, EngineParams,
    Method, MissingJudgmentPolicy, PairwiseMatrix, StepData, StepRecorder,
};

use crate::consistency::{analyze, PriorityAnalysis};
use crate::guard::DivGuard;
use crate::matrix::{alternative_names, criterion_names, decision_matrix, row_sums, weighted, weights_of, Matrix};
use crate::normalize::{normalize_matrix, Normalization};
use crate::rank::{rank_results, ranking_step};
use crate::{ensure_non_empty, AhpSummary, AlgoError, Calculation};

/// Output of the criteria weighting stage.
#[derive(Clone, Debug, PartialEq)]
pub struct CriteriaStage {
    pub matrix: PairwiseMatrix,
    pub analysis: PriorityAnalysis,
}

impl CriteriaStage {
    pub fn weights(&self) -> &[f64] { &self.analysis.priority }
}

/// Local priorities of the alternatives under one criterion.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalPriority {
    pub criterion: CriterionId,
    pub matrix: PairwiseMatrix,
    pub analysis: PriorityAnalysis,
}

pub type LocalPriorities = Vec<LocalPriority>;

pub fn calculate(
    alternatives: &[Alternative],
    criteria: &[Criterion],
    judgments: &AhpJudgments,
    params: &EngineParams,
) -> Result<Calculation, AlgoError> {
    ensure_non_empty(alternatives, criteria)?;
    match params.ahp_mode {
        AhpMode::Pairwise => pairwise(alternatives, criteria, judgments, params),
        AhpMode::Simple => simple(alternatives, criteria, params),
    }
}

fn check_matrix(
    m: &PairwiseMatrix,
    expected: usize,
    what: &'static str,
    criterion: Option<CriterionId>,
    policy: MissingJudgmentPolicy,
) -> Result<(), AlgoError> {
    if m.size() != expected {
        return Err(AlgoError::DimensionMismatch { what, expected, got: m.size() });
    }
    if policy == MissingJudgmentPolicy::Reject {
        if let Some(&(row, col)) = m.missing_pairs().first() {
            return Err(AlgoError::MissingJudgment { criterion, row, col });
        }
    }
    Ok(())
}

/// Stage 1: criteria weights.
pub fn criteria_stage(
    criteria: &[Criterion],
    judgments: &AhpJudgments,
    params: &EngineParams,
) -> Result<CriteriaStage, AlgoError> {
    let m = &judgments.criteria;
    check_matrix(m, criteria.len(), "criteria matrix", None, params.missing_judgment)?;
    Ok(CriteriaStage { matrix: m.clone(), analysis: analyze(m, params.consistency_threshold) })
}

/// Stage 2: local priorities, one per criterion in criteria order.
/// A criterion without a matrix is treated as all-missing.
pub fn local_priorities(
    alternatives: &[Alternative],
    criteria: &[Criterion],
    judgments: &AhpJudgments,
    params: &EngineParams,
) -> Result<LocalPriorities, AlgoError> {
    let n = alternatives.len();
    criteria
        .iter()
        .map(|c| {
            let matrix = judgments
                .alternatives
                .get(&c.id)
                .cloned()
                .unwrap_or_else(|| PairwiseMatrix::identity(n));
            check_matrix(&matrix, n, "alternatives matrix", Some(c.id), params.missing_judgment)?;
            let analysis = analyze(&matrix, params.consistency_threshold);
            Ok(LocalPriority { criterion: c.id, matrix, analysis })
        })
        .collect()
}

/// Stage 3: `n × m` local priority matrix and global scores.
pub fn global_scores(stage: &CriteriaStage, local: &LocalPriorities, n: usize) -> (Matrix, Vec<f64>) {
    let table: Matrix = (0..n)
        .map(|i| local.iter().map(|l| l.analysis.priority[i]).collect())
        .collect();
    let scores = row_sums(&weighted(&table, stage.weights()));
    (table, scores)
}

fn consistency_formulas(a: &PriorityAnalysis) -> Vec<String> {
    let r = &a.report;
    vec![
        "w_i = mean_j(a_ij / Σ_k a_kj)".into(),
        format!("λmax = mean_i((A·w)_i / w_i) = {}", r.lambda_max),
        format!("CI = (λmax − n) / (n − 1) = {}", r.ci),
        format!("CR = CI / RI = {} / {} = {}", r.ci, r.ri, r.cr),
    ]
}

fn pairwise(
    alternatives: &[Alternative],
    criteria: &[Criterion],
    judgments: &AhpJudgments,
    params: &EngineParams,
) -> Result<Calculation, AlgoError> {
    let mut rec = StepRecorder::new();
    let headers = criterion_names(criteria);
    let alt_names = alternative_names(alternatives);

    let stage = criteria_stage(criteria, judgments, params)?;
    rec.record(
        CalculationStep::new(
            "Criteria Pairwise Comparison Matrix",
            "a_ij states how many times more important criterion i is than criterion j; a_ji = 1 / a_ij.",
        )
        .with_matrix(stage.matrix.to_rows())
        .with_headers(headers.clone())
        .with_data(StepData::ColumnReference {
            label: "column sum".into(),
            values: stage.analysis.column_sums.clone(),
        }),
    );
    rec.record(
        CalculationStep::new("Normalized Criteria Matrix", "Each entry divided by its column sum.")
            .with_matrix(stage.analysis.normalized.clone())
            .with_headers(headers.clone())
            .with_formulas(vec!["a'_ij = a_ij / Σ_k a_kj".into()]),
    );
    let verdict = if stage.analysis.report.consistent { "consistent" } else { "inconsistent" };
    rec.record(
        CalculationStep::new(
            "Criteria Priority Vector & Consistency",
            format!("Row averages of the normalized matrix give the criteria weights; judgments are {verdict}."),
        )
        .with_vector(stage.analysis.priority.clone())
        .with_headers(headers.clone())
        .with_formulas(consistency_formulas(&stage.analysis))
        .with_data(StepData::Consistency(stage.analysis.report.clone())),
    );

    let local = local_priorities(alternatives, criteria, judgments, params)?;
    for (c, l) in criteria.iter().zip(&local) {
        let verdict = if l.analysis.report.consistent { "consistent" } else { "inconsistent" };
        rec.record(
            CalculationStep::new(
                format!("Alternative Priorities: {}", c.name),
                format!("Pairwise comparison of the alternatives under {}; judgments are {verdict}.", c.name),
            )
            .with_matrix(l.matrix.to_rows())
            .with_vector(l.analysis.priority.clone())
            .with_headers(alt_names.clone())
            .with_formulas(consistency_formulas(&l.analysis))
            .with_data(StepData::LocalConsistency { criterion: c.id, report: l.analysis.report.clone() }),
        );
    }

    let (table, scores) = global_scores(&stage, &local, alternatives.len());
    rec.record(
        CalculationStep::new(
            "Global Priorities",
            "Local priorities (rows: alternatives, columns: criteria) weighted by the criteria priority vector.",
        )
        .with_matrix(table)
        .with_vector(scores.clone())
        .with_headers(headers)
        .with_formulas(vec!["g_i = Σ_c p_ic · w_c".into()]),
    );

    let results = rank_results(alternatives, &scores);
    rec.record(ranking_step(&results, "global priority"));

    let summary = AhpSummary {
        criteria_weights: stage.analysis.priority.clone(),
        criteria: stage.analysis.report.clone(),
        local: local.iter().map(|l| (l.criterion, l.analysis.report.clone())).collect(),
    };
    Ok(Calculation {
        method: Method::Ahp,
        results,
        steps: rec.finish(),
        guards: Vec::new(),
        ahp: Some(summary),
    })
}

fn simple(alternatives: &[Alternative], criteria: &[Criterion], params: &EngineParams) -> Result<Calculation, AlgoError> {
    let mut guard = DivGuard::new(params.degenerate_policy);
    let mut rec = StepRecorder::new();
    let headers = criterion_names(criteria);

    let x = decision_matrix(alternatives, criteria);
    rec.record(
        CalculationStep::new("Decision Matrix", "Raw values; missing entries are 0.")
            .with_matrix(x.clone())
            .with_headers(headers.clone()),
    );

    let strategies = vec![Normalization::Sum; criteria.len()];
    let (r, sums) = normalize_matrix(&x, &strategies, &mut guard, "ahp.normalize")?;
    rec.record(
        CalculationStep::new("Normalized Matrix", "Each value divided by its column sum.")
            .with_matrix(r.clone())
            .with_headers(headers)
            .with_formulas(vec!["r_ij = x_ij / Σ_k x_kj".into()])
            .with_data(StepData::ColumnReference { label: "column sum".into(), values: sums }),
    );

    let scores = row_sums(&weighted(&r, &weights_of(criteria)));
    guard.check_scores(&scores, "ahp.score")?;
    rec.record(
        CalculationStep::new("Priority Scores", "Weighted sum of the normalized row using the supplied weights.")
            .with_vector(scores.clone())
            .with_headers(alternative_names(alternatives))
            .with_formulas(vec!["P_i = Σ_j w_j · r_ij".into()]),
    );

    let results = rank_results(alternatives, &scores);
    rec.record(ranking_step(&results, "priority score"));

    Ok(Calculation {
        method: Method::Ahp,
        results,
        steps: rec.finish(),
        guards: guard.into_events(),
        ahp: None,
    })
}
