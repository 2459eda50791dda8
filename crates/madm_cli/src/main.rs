// crates/madm_cli/src/main.rs
//
// load → (validate-only | pipeline) → result.json → optional reports → ranking on stdout.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const ENGINE: i32 = 3;
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use madm_io::{canonical_json, loader, IoError};
use madm_pipeline::{dispatch, resolve_params, PipelineError, PipelineOutputs, ValidationReport};
use madm_report::{build_model, ReportError, ReportModel};
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

use args::{parse_and_validate as parse_cli, Args, CliError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Schema / JSON shape / parameter / scenario validation failures
    Validation(String),
    /// Engine refused the input (strict degenerate policy, missing judgments, ...)
    Engine(String),
    /// Read/write/path errors
    Io(String),
    /// Report build or rendering errors
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Engine(m) => write!(f, "engine: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("madm: error: {e}");
            let rc = match e {
                CliError::NotFound(_) => exitcodes::IO,
                CliError::NonLocalPath(_) => exitcodes::VALIDATION,
            };
            return ExitCode::from(rc as u8);
        }
    };
    init_tracing(&args);

    let outcome = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("madm: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(args: &Args) {
    let filter = match (args.quiet, args.verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        (false, 1) => EnvFilter::new("info"),
        (false, 2) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load + schema + scenario validation; nothing is calculated or written.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let scenario = loader::load_scenario_path(&args.input).map_err(map_io_err)?;
    let method = dispatch::select_method(&scenario, args.method.as_deref()).map_err(map_pipeline_err)?;
    let params = resolve_params(scenario.options.as_ref(), &args.overrides())
        .map_err(|e| MainError::Validation(e.to_string()))?;

    let report = madm_pipeline::validate(&scenario, method, &params);
    print_issues(&report);
    if !report.pass {
        return Err(MainError::Validation(format!("{} error(s)", report.errors().count())));
    }
    if !args.quiet {
        eprintln!("validate-only: {method} scenario OK ({} warning(s))", report.warnings().count());
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let scenario = loader::load_scenario_path(&args.input).map_err(map_io_err)?;
    let method = dispatch::select_method(&scenario, args.method.as_deref()).map_err(map_pipeline_err)?;
    let params = resolve_params(scenario.options.as_ref(), &args.overrides())
        .map_err(|e| MainError::Validation(e.to_string()))?;
    tracing::info!(method = %method, input = %args.input.display(), "running");

    let outs = madm_pipeline::run_with_method(&scenario, method, &params).map_err(|e| {
        if let PipelineError::Validation(report) = &e {
            print_issues(report);
        }
        map_pipeline_err(e)
    })?;

    let result_val = serde_json::to_value(&outs.result)
        .map_err(|e| MainError::Render(format!("result to JSON: {e}")))?;
    write_artifacts(&args.out, &outs)?;

    let model = build_model(&result_val).map_err(map_report_err)?;
    maybe_render_reports(args, &model, &args.out)?;

    if !args.quiet {
        print!("{}", render_summary(&model, args.show_steps)?);
        eprintln!("run: result written to {}", args.out.join("result.json").display());
    }
    Ok(())
}

fn write_artifacts(out_dir: &Path, outs: &PipelineOutputs) -> Result<(), MainError> {
    let res_path = out_dir.join("result.json");
    canonical_json::write_canonical_file(&res_path, &outs.result)
        .map_err(|e| MainError::Io(format!("write result.json: {e}")))
}

fn maybe_render_reports(args: &Args, model: &ReportModel, out_dir: &Path) -> Result<(), MainError> {
    for kind in &args.render {
        let (name, body) = match kind.as_str() {
            "json" => ("report.json", render_json_report(model)?),
            "html" => ("report.html", render_html_report(model)?),
            "text" => ("report.txt", render_summary(model, true)?),
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        };
        canonical_json::write_atomic(&out_dir.join(name), body.as_bytes())
            .map_err(|e| MainError::Io(format!("write {name}: {e}")))?;
    }
    Ok(())
}

fn render_json_report(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-json")]
    {
        madm_report::render_json(model).map_err(map_report_err)
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = model;
        Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_html_report(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-html")]
    {
        madm_report::render_html(model).map_err(map_report_err)
    }
    #[cfg(not(feature = "report-html"))]
    {
        let _ = model;
        Err(MainError::Render("html renderer not enabled (build with feature `report-html`)".into()))
    }
}

fn render_summary(model: &ReportModel, with_steps: bool) -> Result<String, MainError> {
    #[cfg(feature = "report-text")]
    {
        madm_report::render_text(model, with_steps).map_err(map_report_err)
    }
    #[cfg(not(feature = "report-text"))]
    {
        let _ = with_steps;
        Ok(model
            .ranking
            .iter()
            .map(|r| format!("{}\t{}\t{}\n", r.rank, r.name, r.score))
            .collect())
    }
}

fn print_issues(report: &ValidationReport) {
    for issue in &report.issues {
        eprintln!("{issue}");
    }
}

/// Map typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Engine(_) => ENGINE,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(m),
        other @ (IoError::Json { .. } | IoError::Schema(_) | IoError::Invalid(_)) => {
            MainError::Validation(other.to_string())
        }
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Engine(a) => MainError::Engine(a.to_string()),
        other @ (PipelineError::Params(_)
        | PipelineError::NoMethod
        | PipelineError::UnknownMethod(_)
        | PipelineError::Validation(_)) => MainError::Validation(other.to_string()),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}
