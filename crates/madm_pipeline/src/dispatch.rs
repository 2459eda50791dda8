//! Method selection and engine invocation.

use madm_algo::{AlgoError, Calculation};
use madm_core::{EngineParams, Method};
use madm_io::loader::Scenario;

use crate::PipelineError;

/// Parse a method token (`SAW|WP|AHP|TOPSIS`, any case).
pub fn parse_method(token: &str) -> Result<Method, PipelineError> {
    token.parse::<Method>().map_err(|_| PipelineError::UnknownMethod(token.trim().to_string()))
}

/// Caller choice wins over the scenario's `method` field.
pub fn select_method(scenario: &Scenario, requested: Option<&str>) -> Result<Method, PipelineError> {
    match requested.or(scenario.method.as_deref()) {
        Some(token) => parse_method(token),
        None => Err(PipelineError::NoMethod),
    }
}

/// Run the engine for `method` and log what it had to work around.
pub fn dispatch(scenario: &Scenario, method: Method, params: &EngineParams) -> Result<Calculation, AlgoError> {
    tracing::debug!(
        method = %method,
        alternatives = scenario.alternatives.len(),
        criteria = scenario.criteria.len(),
        "dispatch"
    );
    let calc = madm_algo::calculate(
        method,
        &scenario.alternatives,
        &scenario.criteria,
        Some(&scenario.judgments),
        params,
    )?;

    for step in &calc.steps {
        tracing::debug!(method = %method, step = %step.title, "step recorded");
    }
    for g in &calc.guards {
        tracing::warn!(stage = g.stage, column = ?g.column, "zero denominator resolved to 0");
    }
    if let Some(ahp) = &calc.ahp {
        if !ahp.criteria.consistent {
            tracing::warn!(cr = ahp.criteria.cr, threshold = params.consistency_threshold, "criteria matrix is inconsistent");
        }
        for (criterion, report) in ahp.local.iter().filter(|(_, r)| !r.consistent) {
            tracing::warn!(criterion = %criterion, cr = report.cr, "alternatives matrix is inconsistent");
        }
    }
    Ok(calc)
}
