// crates/madm_cli/src/args.rs
//
// Offline CLI argument surface.
// - No networked paths (any scheme:// is rejected, including file://)
// - Output: --out dir, --render [json|html|text]*
// - Engine knobs override the scenario's `options` block

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use madm_core::{AhpMode, DegeneratePolicy, MissingJudgmentPolicy};
use madm_pipeline::ParamOverrides;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "madm",
    version,
    disable_help_subcommand = true,
    about = "Rank alternatives with SAW, WP, AHP or TOPSIS"
)]
pub struct Args {
    /// Scenario JSON path.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Method (SAW, WP, AHP, TOPSIS). Overrides the scenario's `method`.
    #[arg(long, short = 'm')]
    pub method: Option<String>,

    /// Output directory for result.json and reports (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Report(s) to emit next to result.json.
    #[arg(long, value_parser = ["json", "html", "text"], num_args = 0..=3)]
    pub render: Vec<String>,

    /// Fail on zero denominators and non-finite scores instead of guarding them.
    #[arg(long)]
    pub strict: bool,

    /// Treat missing AHP pairwise judgments as errors instead of 1.
    #[arg(long)]
    pub reject_missing_judgments: bool,

    /// AHP flavour.
    #[arg(long, value_parser = parse_ahp_mode)]
    pub ahp_mode: Option<AhpMode>,

    /// Allowed |Σ weights − 1|.
    #[arg(long)]
    pub weight_tolerance: Option<f64>,

    /// CR below this is reported as consistent.
    #[arg(long)]
    pub consistency_threshold: Option<f64>,

    /// Print every calculation step after the ranking.
    #[arg(long)]
    pub show_steps: bool,

    /// Load and validate only; do not calculate or write anything.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress the ranking table and non-error logs.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Flags that map onto engine parameters; unset flags leave the scenario's value.
    pub fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            weight_tolerance: self.weight_tolerance,
            consistency_threshold: self.consistency_threshold,
            degenerate_policy: self.strict.then_some(DegeneratePolicy::Strict),
            missing_judgment: self.reject_missing_judgments.then_some(MissingJudgmentPolicy::Reject),
            ahp_mode: self.ahp_mode,
        }
    }
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

fn parse_ahp_mode(s: &str) -> Result<AhpMode, String> {
    s.parse::<AhpMode>().map_err(|_| format!("expected pairwise or simple, got {s}"))
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

fn validate(mut args: Args) -> Result<Args, CliError> {
    ensure_local_path(&args.out)?;
    ensure_local_exists(&args.input, "--input")?;
    args.input = normalize_path(&args.input);
    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    madm_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort absolute path; falls back to CWD-relative when the path does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("madm").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn schemes_are_rejected() {
        assert!(has_scheme("https://example.com/s.json"));
        assert!(has_scheme("FILE:///tmp/s.json"));
        assert!(!has_scheme("scenarios/s.json"));

        let a = parse(&["--input", "http://x/s.json"]);
        assert!(matches!(validate(a), Err(CliError::NonLocalPath(_))));
    }

    #[test]
    fn missing_input_is_not_found() {
        let a = parse(&["--input", "definitely/not/here.json"]);
        assert!(matches!(validate(a), Err(CliError::NotFound(_))));
    }

    #[test]
    fn flags_map_to_overrides() {
        let a = parse(&["-i", "s.json", "--strict", "--ahp-mode", "simple", "--render", "json", "html"]);
        let o = a.overrides();
        assert_eq!(o.degenerate_policy, Some(DegeneratePolicy::Strict));
        assert_eq!(o.ahp_mode, Some(AhpMode::Simple));
        assert_eq!(o.missing_judgment, None);
        assert_eq!(a.render, vec!["json", "html"]);

        assert!(Args::try_parse_from(["madm", "-i", "s.json", "--ahp-mode", "fuzzy"]).is_err());
        assert!(Args::try_parse_from(["madm", "-i", "s.json", "--quiet", "-v"]).is_err());
    }
}
