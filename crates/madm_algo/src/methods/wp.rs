//! WP: Weighted Product.
//!
//! `S_i = Π_j x_ij^(w_j)` for benefit and `Π_j (1 / x_ij)^(w_j)` for cost,
//! then `V_i = S_i / Σ S`. Missing or zero values become `params.wp_epsilon`
//! before exponentiation.

use madm_core::{Alternative, CalculationStep, Criterion, EngineParams, Method, StepData, StepRecorder};

use crate::guard::DivGuard;
use crate::matrix::{alternative_names, criterion_names, decision_matrix_with, Matrix};
use crate::rank::{rank_results, ranking_step};
use crate::{ensure_non_empty, AlgoError, Calculation};

pub fn calculate(
    alternatives: &[Alternative],
    criteria: &[Criterion],
    params: &EngineParams,
) -> Result<Calculation, AlgoError> {
    ensure_non_empty(alternatives, criteria)?;
    let mut guard = DivGuard::new(params.degenerate_policy);
    let mut rec = StepRecorder::new();
    let headers = criterion_names(criteria);
    let eps = params.wp_epsilon;

    let x = decision_matrix_with(alternatives, criteria, |v| match v {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => eps,
    });
    rec.record(
        CalculationStep::new(
            "Decision Matrix",
            format!("Raw values; missing or zero entries are replaced by {eps}."),
        )
        .with_matrix(x.clone())
        .with_headers(headers.clone()),
    );

    // Per-cell factor x^w or (1/x)^w, kept for the trace.
    let factors: Matrix = x
        .iter()
        .map(|row| {
            row.iter()
                .zip(criteria)
                .map(|(&v, c)| if c.is_benefit() { v.powf(c.weight) } else { (1.0 / v).powf(c.weight) })
                .collect()
        })
        .collect();
    let s: Vec<f64> = factors.iter().map(|row| row.iter().product()).collect();
    let exponents: Vec<f64> = criteria.iter().map(|c| if c.is_benefit() { c.weight } else { -c.weight }).collect();
    rec.record(
        CalculationStep::new(
            "Vector S",
            "Product of each value raised to its weight (cost criteria use the reciprocal value).",
        )
        .with_matrix(factors)
        .with_vector(s.clone())
        .with_headers(headers)
        .with_formulas(vec![
            "S_i = Π_j x_ij^(w_j)        (benefit)".into(),
            "S_i = Π_j (1 / x_ij)^(w_j)  (cost)".into(),
        ])
        .with_data(StepData::ColumnReference { label: "signed exponent".into(), values: exponents }),
    );

    let total: f64 = s.iter().sum();
    let v = s
        .iter()
        .map(|&si| guard.div(si, total, "wp.normalize", None))
        .collect::<Result<Vec<f64>, _>>()?;
    guard.check_scores(&v, "wp.score")?;
    rec.record(
        CalculationStep::new("Vector V", "Each S divided by the sum of all S; the V values sum to 1.")
            .with_vector(v.clone())
            .with_headers(alternative_names(alternatives))
            .with_formulas(vec!["V_i = S_i / Σ_k S_k".into()])
            .with_data(StepData::Total { label: "Σ S".into(), value: total }),
    );

    let results = rank_results(alternatives, &v);
    rec.record(ranking_step(&results, "relative preference V"));

    Ok(Calculation {
        method: Method::Wp,
        results,
        steps: rec.finish(),
        guards: guard.into_events(),
        ahp: None,
    })
}
