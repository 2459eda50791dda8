//! End-to-end pipeline runs over scenario files written to a temp dir.

use std::path::PathBuf;

use madm_core::{AhpMode, AlternativeId, DegeneratePolicy, Method, MissingJudgmentPolicy};
use madm_pipeline::{run_path, verify_result_id, ParamOverrides, PipelineError};

const HARGA_KUALITAS: &str = r#"{
    "method": "SAW",
    "criteria": [
        {"id": 1, "name": "Harga", "weight": 0.5, "type": "cost"},
        {"id": 2, "name": "Kualitas", "weight": 0.5, "type": "benefit"}
    ],
    "alternatives": [
        {"id": 1, "name": "A", "values": {"1": 10, "2": 8}},
        {"id": 2, "name": "B", "values": {"1": 20, "2": 10}}
    ]
}"#;

const AHP_123: &str = r#"{
    "method": "AHP",
    "criteria": [
        {"id": 1, "name": "C1", "weight": 0, "type": "benefit"},
        {"id": 2, "name": "C2", "weight": 0, "type": "benefit"},
        {"id": 3, "name": "C3", "weight": 0, "type": "benefit"}
    ],
    "alternatives": [
        {"id": 1, "name": "X", "values": {"1_2": 2, "2_2": 2, "3_2": 2}},
        {"id": 2, "name": "Y", "values": {}}
    ],
    "criteria_comparison": [
        {"a": 2, "b": 1, "value": 2},
        {"a": 3, "b": 1, "value": 3},
        {"a": 3, "b": 2, "value": 1.5}
    ]
}"#;

fn write_scenario(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let p = dir.path().join(name);
    std::fs::write(&p, text).unwrap();
    p
}

#[test]
fn saw_scenario_ranks_a_first() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(&dir, "saw.json", HARGA_KUALITAS);

    let out = run_path(&p, None, &ParamOverrides::default()).unwrap();
    let r = &out.result;
    assert_eq!(r.method, Method::Saw);
    assert_eq!(r.results[0].id, AlternativeId(1));
    assert!((r.results[0].score - 0.9).abs() < 1e-12);
    assert!((r.results[1].score - 0.75).abs() < 1e-12);
    assert_eq!(r.steps.len(), 4);
    assert!(r.warnings.is_empty());
    assert!(r.id.as_str().starts_with("CALC:"));
}

#[test]
fn every_method_runs_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(&dir, "s.json", HARGA_KUALITAS);
    for m in Method::ALL {
        let a = run_path(&p, Some(m.as_str()), &ParamOverrides::default()).unwrap();
        let b = run_path(&p, Some(m.as_str()), &ParamOverrides::default()).unwrap();
        assert_eq!(a.result, b.result, "{m}");
        assert_eq!(a.result.method, m);
    }
}

#[test]
fn written_result_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(&dir, "s.json", HARGA_KUALITAS);
    let out = run_path(&p, Some("topsis"), &ParamOverrides::default()).unwrap();

    let result_path = dir.path().join("out").join("result.json");
    madm_io::canonical_json::write_canonical_file(&result_path, &out.result).unwrap();
    let text = std::fs::read_to_string(&result_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(verify_result_id(&value).unwrap());
    assert_eq!(value["steps"].as_array().unwrap().len(), 7);
}

#[test]
fn ahp_pairwise_reports_consistency() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(&dir, "ahp.json", AHP_123);
    let out = run_path(&p, None, &ParamOverrides::default()).unwrap();

    let c = out.result.consistency.as_ref().unwrap();
    let expected = [1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0];
    for (w, e) in c.criteria_weights.iter().zip(expected) {
        assert!((w - e).abs() < 1e-9);
    }
    assert!(c.criteria.cr.abs() < 1e-9);
    assert!(c.all_consistent);
    assert_eq!(out.result.results[0].name, "X");
    assert_eq!(out.result.steps.len(), 5 + 3);
}

#[test]
fn ahp_reject_policy_stops_at_validation() {
    let dir = tempfile::tempdir().unwrap();
    let text = AHP_123.replace(r#""1_2": 2, "#, "");
    let p = write_scenario(&dir, "ahp.json", &text);
    let o = ParamOverrides { missing_judgment: Some(MissingJudgmentPolicy::Reject), ..ParamOverrides::default() };
    match run_path(&p, None, &o) {
        Err(PipelineError::Validation(report)) => {
            assert!(report.errors().all(|i| i.code == "Judgment.Missing"));
            assert_eq!(report.errors().count(), 1);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn ahp_simple_mode_needs_weights() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(&dir, "ahp.json", AHP_123);
    let o = ParamOverrides { ahp_mode: Some(AhpMode::Simple), ..ParamOverrides::default() };
    let err = run_path(&p, None, &o).unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)), "{err}");
}

#[test]
fn bad_weight_sum_and_unknown_method() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(&dir, "s.json", &HARGA_KUALITAS.replace("\"weight\": 0.5, \"type\": \"cost\"", "\"weight\": 0.6, \"type\": \"cost\""));
    let err = run_path(&p, None, &ParamOverrides::default()).unwrap_err();
    match err {
        PipelineError::Validation(r) => assert!(r.errors().any(|i| i.code == "Weights.InvalidSum")),
        other => panic!("{other}"),
    }

    let p = write_scenario(&dir, "ok.json", HARGA_KUALITAS);
    let err = run_path(&p, Some("ELECTRE"), &ParamOverrides::default()).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownMethod(_)));
}

#[test]
fn strict_policy_turns_guards_into_errors() {
    let dir = tempfile::tempdir().unwrap();
    let text = HARGA_KUALITAS.replace("\"2\": 8", "\"2\": 0").replace("\"2\": 10", "\"2\": 0");
    let p = write_scenario(&dir, "zero.json", &text);

    let lenient = run_path(&p, None, &ParamOverrides::default()).unwrap();
    assert_eq!(lenient.result.degenerate.len(), 1);
    assert_eq!(lenient.result.degenerate[0].stage, "saw.normalize");

    let o = ParamOverrides { degenerate_policy: Some(DegeneratePolicy::Strict), ..ParamOverrides::default() };
    let err = run_path(&p, None, &o).unwrap_err();
    assert!(matches!(err, PipelineError::Engine(_)), "{err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_path(&dir.path().join("nope.json"), None, &ParamOverrides::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}
