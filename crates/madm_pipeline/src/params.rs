//! Final `EngineParams` for a run: CLI overrides > scenario `options` > defaults.

use madm_core::{
    variables::validate_domains, AhpMode, CoreError, DegeneratePolicy, EngineParams,
    MissingJudgmentPolicy,
};

/// Per-field overrides supplied by the caller (usually CLI flags).
/// `None` leaves the lower-precedence value in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParamOverrides {
    pub weight_tolerance: Option<f64>,
    pub consistency_threshold: Option<f64>,
    pub degenerate_policy: Option<DegeneratePolicy>,
    pub missing_judgment: Option<MissingJudgmentPolicy>,
    pub ahp_mode: Option<AhpMode>,
}

pub fn resolve_params(
    scenario_options: Option<&EngineParams>,
    overrides: &ParamOverrides,
) -> Result<EngineParams, CoreError> {
    let mut p = scenario_options.copied().unwrap_or_default();
    if let Some(v) = overrides.weight_tolerance {
        p.weight_tolerance = v;
    }
    if let Some(v) = overrides.consistency_threshold {
        p.consistency_threshold = v;
    }
    if let Some(v) = overrides.degenerate_policy {
        p.degenerate_policy = v;
    }
    if let Some(v) = overrides.missing_judgment {
        p.missing_judgment = v;
    }
    if let Some(v) = overrides.ahp_mode {
        p.ahp_mode = v;
    }
    validate_domains(&p)?;
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_override_then_options_then_default() {
        let scenario = EngineParams { ahp_mode: AhpMode::Simple, consistency_threshold: 0.2, ..EngineParams::default() };
        let o = ParamOverrides { consistency_threshold: Some(0.05), ..ParamOverrides::default() };
        let p = resolve_params(Some(&scenario), &o).unwrap();
        assert_eq!(p.consistency_threshold, 0.05);
        assert_eq!(p.ahp_mode, AhpMode::Simple);
        assert_eq!(p.wp_epsilon, 0.0001);

        assert_eq!(resolve_params(None, &ParamOverrides::default()).unwrap(), EngineParams::default());
    }

    #[test]
    fn overrides_are_domain_checked() {
        let o = ParamOverrides { weight_tolerance: Some(2.0), ..ParamOverrides::default() };
        assert_eq!(resolve_params(None, &o), Err(CoreError::DomainOutOfRange("weight_tolerance")));
    }
}
