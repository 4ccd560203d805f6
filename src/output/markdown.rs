// Markdown report for batch runs.
//
// Layout: summary counts by tier, a ranked overview table, then one section
// per profile with its factor breakdown. Pipe characters in user-supplied
// text are escaped so they can't break the tables.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::pipeline::batch::BatchResult;
use crate::scoring::RiskTier;

/// Render the report and write it to `output_path`. Returns the Markdown.
pub fn generate_report(results: &[BatchResult], output_path: &str) -> Result<String> {
    let markdown = render(results)?;
    std::fs::write(output_path, &markdown)
        .with_context(|| format!("Failed to write report to {output_path}"))?;
    Ok(markdown)
}

/// Render the report without touching the filesystem.
pub fn render(results: &[BatchResult]) -> Result<String> {
    let mut md = String::new();

    writeln!(md, "# Veracity Risk Report")?;
    writeln!(md)?;
    writeln!(
        md,
        "Generated {} for {} profiles.",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC"),
        results.len()
    )?;
    writeln!(md)?;

    writeln!(md, "## Summary")?;
    writeln!(md)?;
    writeln!(md, "| Tier | Count |")?;
    writeln!(md, "|------|-------|")?;
    for tier in [RiskTier::HighRisk, RiskTier::Suspicious, RiskTier::Authentic] {
        let count = results.iter().filter(|r| r.report.tier == tier).count();
        writeln!(md, "| {} | {} |", tier.label(), count)?;
    }
    writeln!(md, "| **Total** | **{}** |", results.len())?;

    if results.is_empty() {
        return Ok(md);
    }

    let mut ranked: Vec<&BatchResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.report.score.cmp(&a.report.score));

    writeln!(md)?;
    writeln!(md, "## Profiles")?;
    writeln!(md)?;
    writeln!(md, "| Rank | Username | Platform | Score | Tier |")?;
    writeln!(md, "|------|----------|----------|-------|------|")?;
    for (i, result) in ranked.iter().enumerate() {
        writeln!(
            md,
            "| {} | @{} | {} | {} | {} |",
            i + 1,
            escape(&result.record.username),
            result.record.platform.display_name(),
            result.report.score,
            result.report.tier.label(),
        )?;
    }

    writeln!(md)?;
    writeln!(md, "## Factor Breakdown")?;
    for result in &ranked {
        writeln!(md)?;
        writeln!(
            md,
            "### @{} ({}/100, {})",
            escape(&result.record.username),
            result.report.score,
            result.report.tier.label()
        )?;
        writeln!(md)?;
        writeln!(md, "| Factor | Score | Weight | Details |")?;
        writeln!(md, "|--------|-------|--------|---------|")?;
        for factor in &result.report.factors {
            writeln!(
                md,
                "| {} | {} | {:.0}% | {} |",
                factor.name,
                factor.score,
                factor.weight * 100.0,
                escape(&factor.description)
            )?;
        }
    }

    Ok(md)
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
