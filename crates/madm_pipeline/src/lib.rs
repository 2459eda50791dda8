//! madm_pipeline: deterministic pipeline surface (load → validate → dispatch → calculate → build).
//! This crate stays I/O-free apart from `run_path`, delegating JSON/schema/hashing
//! to `madm_io` and the math to `madm_algo`.

#![forbid(unsafe_code)]

use std::path::Path;

use madm_algo::{AlgoError, Calculation};
use madm_core::{CoreError, EngineParams, Method};
use madm_io::{loader::Scenario, IoError};
use thiserror::Error;

pub mod build_result;
pub mod dispatch;
pub mod params;
pub mod validate;

pub use build_result::{build_result, verify_result_id, ConsistencyDoc, ResultDoc};
pub use params::{resolve_params, ParamOverrides};
pub use validate::{validate, Severity, ValidationIssue, ValidationReport};

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("invalid parameters: {0}")]
    Params(#[from] CoreError),

    #[error("no method given (expected SAW, WP, AHP or TOPSIS)")]
    NoMethod,

    #[error("method {0} is not available")]
    UnknownMethod(String),

    #[error("validation failed with {} error(s)", .0.errors().count())]
    Validation(ValidationReport),

    #[error("engine error: {0}")]
    Engine(#[from] AlgoError),
}

/// Top-level pipeline outputs.
#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub result: ResultDoc,
    pub validation: ValidationReport,
    pub calculation: Calculation,
}

/// Run the scenario with its own `method` field.
pub fn run(scenario: &Scenario, params: &EngineParams) -> Result<PipelineOutputs, PipelineError> {
    let method = dispatch::select_method(scenario, None)?;
    run_with_method(scenario, method, params)
}

/// Validate, calculate and build the result document for an explicit method.
pub fn run_with_method(
    scenario: &Scenario,
    method: Method,
    params: &EngineParams,
) -> Result<PipelineOutputs, PipelineError> {
    // VALIDATE
    let validation = validate::validate(scenario, method, params);
    for w in validation.warnings() {
        tracing::warn!(code = w.code, "{}", w.message);
    }
    if !validation.pass {
        return Err(PipelineError::Validation(validation));
    }
    tracing::debug!(method = %method, issues = validation.issues.len(), "validation passed");

    // DISPATCH / CALCULATE
    let calculation = dispatch::dispatch(scenario, method, params)?;

    // BUILD_RESULT
    let result = build_result::build_result(&scenario.input_sha256, params, &scenario.criteria, &calculation, &validation)?;
    tracing::debug!(id = %result.id, "result built");

    Ok(PipelineOutputs { result, validation, calculation })
}

/// Load a scenario file and run it. `method` and `overrides` take precedence
/// over the scenario's own `method` and `options`.
pub fn run_path(
    path: &Path,
    method: Option<&str>,
    overrides: &ParamOverrides,
) -> Result<PipelineOutputs, PipelineError> {
    let scenario = madm_io::loader::load_scenario_path(path)?;
    let method = dispatch::select_method(&scenario, method)?;
    let params = params::resolve_params(scenario.options.as_ref(), overrides)?;
    run_with_method(&scenario, method, &params)
}
