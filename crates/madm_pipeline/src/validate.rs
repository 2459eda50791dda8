//! crates/madm_pipeline/src/validate.rs
//! Caller-side validation before any computation.
//!
//! The engines trust their inputs; everything a user can get wrong in a
//! scenario file is reported here as an issue with a stable code. Errors stop
//! the run, warnings are echoed into the result document.

use std::collections::BTreeSet;
use std::fmt;

use madm_core::{
    variables::validate_domains, AhpMode, AlternativeId, CriterionId, EngineParams, Method,
    MissingJudgmentPolicy,
};
use madm_io::loader::Scenario;

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityRef {
    Root,
    Param(&'static str),
    Criterion(CriterionId),
    Alternative(AlternativeId),
    /// `None` = criteria matrix, otherwise the alternatives matrix of a criterion.
    Judgments(Option<CriterionId>),
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Root => f.write_str("scenario"),
            EntityRef::Param(p) => write!(f, "options.{p}"),
            EntityRef::Criterion(id) => write!(f, "criterion {id}"),
            EntityRef::Alternative(id) => write!(f, "alternative {id}"),
            EntityRef::Judgments(None) => f.write_str("criteria judgments"),
            EntityRef::Judgments(Some(c)) => write!(f, "judgments under criterion {c}"),
        }
    }
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

impl ValidationIssue {
    fn error(code: &'static str, where_: EntityRef, message: String) -> Self {
        Self { severity: Severity::Error, code, message, where_ }
    }

    fn warning(code: &'static str, where_: EntityRef, message: String) -> Self {
        Self { severity: Severity::Warning, code, message, where_ }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]: {}", self.severity, self.code, self.where_, self.message)
    }
}

/// pass = no Error; issue order is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Top-level entry point.
pub fn validate(scenario: &Scenario, method: Method, params: &EngineParams) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if let Err(e) = validate_domains(params) {
        issues.push(ValidationIssue::error("Params.Domain", EntityRef::Root, e.to_string()));
    }
    issues.extend(check_non_empty(scenario));
    issues.extend(check_unique_ids(scenario));
    issues.extend(check_weights(scenario, method, params));
    issues.extend(check_values(scenario, method));
    if method == Method::Ahp && params.ahp_mode == AhpMode::Pairwise {
        issues.extend(check_judgments(scenario, params));
    }

    sort_issues_stably(&mut issues);
    ValidationReport { pass: !issues.iter().any(|i| i.severity == Severity::Error), issues }
}

fn check_non_empty(s: &Scenario) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if s.criteria.is_empty() {
        issues.push(ValidationIssue::error("Scenario.NoCriteria", EntityRef::Root, "no criteria".into()));
    }
    if s.alternatives.is_empty() {
        issues.push(ValidationIssue::error("Scenario.NoAlternatives", EntityRef::Root, "no alternatives".into()));
    }
    issues
}

fn check_unique_ids(s: &Scenario) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();
    for c in &s.criteria {
        if !seen.insert(c.id) {
            issues.push(ValidationIssue::error(
                "Criterion.DuplicateId",
                EntityRef::Criterion(c.id),
                format!("duplicate criterion id {}", c.id),
            ));
        }
    }
    let mut seen = BTreeSet::new();
    for a in &s.alternatives {
        if !seen.insert(a.id) {
            issues.push(ValidationIssue::error(
                "Alternative.DuplicateId",
                EntityRef::Alternative(a.id),
                format!("duplicate alternative id {}", a.id),
            ));
        }
    }
    issues
}

/// Weights must be finite, non-negative and, when the method consumes them,
/// sum to 1 within `weight_tolerance`.
fn check_weights(s: &Scenario, method: Method, params: &EngineParams) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for c in &s.criteria {
        if !c.weight.is_finite() || c.weight < 0.0 {
            issues.push(ValidationIssue::error(
                "Criterion.WeightInvalid",
                EntityRef::Criterion(c.id),
                format!("weight {} of '{}' must be a finite, non-negative number", c.weight, c.name),
            ));
        }
    }
    let uses_weights = method.uses_supplied_weights() || params.ahp_mode == AhpMode::Simple;
    if !uses_weights || s.criteria.is_empty() {
        return issues;
    }
    let sum: f64 = s.criteria.iter().map(|c| c.weight).sum();
    let off = (sum - 1.0).abs();
    if off > params.weight_tolerance {
        issues.push(ValidationIssue::error(
            "Weights.InvalidSum",
            EntityRef::Param("weight_tolerance"),
            format!("weights sum to {sum}, expected 1 ± {}", params.weight_tolerance),
        ));
    } else if off > 1e-9 {
        issues.push(ValidationIssue::warning(
            "Weights.NearMiss",
            EntityRef::Param("weight_tolerance"),
            format!("weights sum to {sum}; accepted within tolerance"),
        ));
    }
    issues
}

fn check_values(s: &Scenario, method: Method) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let known: BTreeSet<CriterionId> = s.criteria.iter().map(|c| c.id).collect();
    for a in &s.alternatives {
        for c in &s.criteria {
            match a.value(c.id) {
                None => issues.push(ValidationIssue::warning(
                    "Value.Missing",
                    EntityRef::Alternative(a.id),
                    format!(
                        "'{}' has no value for '{}'; using {}",
                        a.name,
                        c.name,
                        if method == Method::Wp { "epsilon" } else { "0" }
                    ),
                )),
                Some(v) if method == Method::Wp && v < 0.0 => issues.push(ValidationIssue::warning(
                    "Value.NonPositive",
                    EntityRef::Alternative(a.id),
                    format!("'{}' has negative value {v} for '{}'; WP is undefined there", a.name, c.name),
                )),
                Some(_) => {}
            }
        }
        for id in a.values.keys().filter(|id| !known.contains(id)) {
            issues.push(ValidationIssue::warning(
                "Value.UnknownCriterion",
                EntityRef::Alternative(a.id),
                format!("'{}' has a value for unknown criterion {id}; ignored", a.name),
            ));
        }
    }
    issues
}

/// Under `Reject` a missing judgment is an error; otherwise it defaults to 1
/// and is only worth a warning.
fn check_judgments(s: &Scenario, params: &EngineParams) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let reject = params.missing_judgment == MissingJudgmentPolicy::Reject;
    let mut report = |where_: EntityRef, what: String, missing: usize| {
        if missing == 0 {
            return;
        }
        let message = format!("{missing} pairwise judgment(s) missing in {what}");
        issues.push(if reject {
            ValidationIssue::error("Judgment.Missing", where_, message)
        } else {
            ValidationIssue::warning("Judgment.DefaultedToOne", where_, format!("{message}; treated as 1"))
        });
    };

    report(EntityRef::Judgments(None), "the criteria matrix".into(), s.judgments.criteria.missing_pairs().len());
    let n = s.alternatives.len();
    for c in &s.criteria {
        let missing = match s.judgments.alternatives.get(&c.id) {
            Some(m) => m.missing_pairs().len(),
            None => n * n.saturating_sub(1) / 2,
        };
        report(EntityRef::Judgments(Some(c.id)), format!("the alternatives matrix of '{}'", c.name), missing);
    }
    issues
}

fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| {
        a.code
            .cmp(b.code)
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });
}
