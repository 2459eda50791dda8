//! Plain-text report for terminals.

use std::fmt::Write as _;

use crate::{ReportError, ReportModel};

/// Ranking table plus consistency and notes. With `with_steps`, every trace
/// step is printed as well.
pub fn render_text(model: &ReportModel, with_steps: bool) -> Result<String, ReportError> {
    let mut out = String::new();
    write_text(&mut out, model, with_steps).map_err(|e| ReportError::Template(format!("render_text: {e}")))?;
    Ok(out)
}

fn write_text(out: &mut String, m: &ReportModel, with_steps: bool) -> std::fmt::Result {
    writeln!(out, "{} ({})", m.cover.method_name, m.cover.method)?;
    writeln!(out)?;

    let name_w = m.ranking.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max("Alternative".len());
    writeln!(out, "{:>4}  {:<name_w$}  {:>12}", "Rank", "Alternative", "Score")?;
    for r in &m.ranking {
        writeln!(out, "{:>4}  {:<name_w$}  {:>12}", r.rank, r.name, r.score)?;
    }

    if with_steps {
        for s in &m.steps {
            writeln!(out)?;
            writeln!(out, "{}. {}", s.number, s.title)?;
            if !s.description.is_empty() {
                writeln!(out, "   {}", s.description)?;
            }
            if !s.headers.is_empty() {
                writeln!(out, "   {}", s.headers.join(" | "))?;
            }
            for row in &s.matrix {
                writeln!(out, "   {}", row.join("  "))?;
            }
            if !s.vector.is_empty() {
                writeln!(out, "   [{}]", s.vector.join(", "))?;
            }
            for f in &s.formulas {
                writeln!(out, "   {f}")?;
            }
        }
    }

    if let Some(c) = &m.consistency {
        writeln!(out)?;
        writeln!(out, "Consistency (CR < threshold is consistent)")?;
        for row in std::iter::once(&c.criteria).chain(&c.local) {
            writeln!(
                out,
                "  {:<16} λmax={} CI={} RI={} CR={} {}",
                row.label,
                row.lambda_max,
                row.ci,
                row.ri,
                row.cr,
                if row.consistent { "ok" } else { "INCONSISTENT" }
            )?;
        }
    }

    if !m.notes.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notes")?;
        for n in &m.notes {
            writeln!(out, "  - {n}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", m.integrity.result_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_model, tests_support::sample_result};

    #[test]
    fn table_has_fixed_decimals() {
        let m = build_model(&sample_result()).unwrap();
        let text = render_text(&m, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Simple Additive Weighting (SAW)");
        assert!(lines[3].starts_with("   1  A "));
        assert!(lines[3].ends_with("0.900000"));
        assert!(text.contains("Weights.NearMiss"));
        assert!(!text.contains("Decision Matrix"));
    }

    #[test]
    fn steps_are_optional() {
        let m = build_model(&sample_result()).unwrap();
        let text = render_text(&m, true).unwrap();
        assert!(text.contains("1. Decision Matrix"));
        assert!(text.contains("   Harga | Kualitas"));
    }
}
