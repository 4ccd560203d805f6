// Colored terminal output for reports, history and batch runs.
//
// This module handles all terminal-specific formatting: colors, tables,
// bars. The main.rs command handlers delegate here.

use colored::Colorize;

use super::{score_bar, truncate_chars};
use crate::assistant::RESOURCES;
use crate::history::HistoryEntry;
use crate::pipeline::batch::BatchResult;
use crate::profile::ProfileRecord;
use crate::recommendations::Recommendation;
use crate::scoring::{RiskTier, ScoringEngine, ScoringReport};

/// Display one analyzed profile with its factor breakdown and advice.
pub fn display_report(
    record: &ProfileRecord,
    report: &ScoringReport,
    recommendation: &Recommendation,
) {
    println!(
        "\n{}",
        format!(
            "=== Risk report for @{} ({}) ===",
            record.username,
            record.platform.display_name()
        )
        .bold()
    );
    println!(
        "  Risk score: {}  {}",
        colorize_score(report.score, report.tier),
        colorize_tier(report.tier)
    );
    println!();

    println!(
        "  {:<20} {:>5} {:>6}  {:<20}  {}",
        "Factor".dimmed(),
        "Score".dimmed(),
        "Weight".dimmed(),
        "".dimmed(),
        "Why".dimmed(),
    );
    println!("  {}", "-".repeat(85).dimmed());
    for factor in &report.factors {
        // A factor with no weight is shown but doesn't move the score.
        let weight = format!("{:.0}%", factor.weight * 100.0);
        println!(
            "  {:<20} {:>5} {:>6}  {:<20}  {}",
            factor.name,
            factor.score,
            if factor.weight > 0.0 { weight.normal() } else { weight.dimmed() },
            score_bar(factor.score, 20).dimmed(),
            factor.description,
        );
    }

    let action = &recommendation.action;
    println!("\n  {} {}", action.title.bold(), format!("[{}]", action.action).cyan());
    println!("  {}", action.description);

    if !recommendation.suggestions.is_empty() {
        println!("\n  Suggestions:");
        for suggestion in &recommendation.suggestions {
            println!("    - {suggestion}");
        }
    }
    println!();
}

/// Display saved history. Scores are recomputed with the current engine.
pub fn display_history(entries: &[HistoryEntry], engine: &ScoringEngine) {
    if entries.is_empty() {
        println!("No saved analyses yet. Run `veracity analyze` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== History ({} entries) ===", entries.len()).bold()
    );
    println!();
    println!(
        "  {:<16}  {:<24} {:<10} {:>5}  {:<12}  {:<7}  {}",
        "Id".dimmed(),
        "Username".dimmed(),
        "Platform".dimmed(),
        "Score".dimmed(),
        "Tier".dimmed(),
        "Source".dimmed(),
        "Saved".dimmed(),
    );
    println!("  {}", "-".repeat(100).dimmed());

    for entry in entries {
        let report = engine.analyze(&entry.record);
        println!(
            "  {:<16}  {:<24} {:<10} {:>5}  {:<12}  {:<7}  {}",
            entry.id,
            truncate_chars(&entry.record.username, 21),
            entry.record.platform.display_name(),
            report.score,
            colorize_tier(report.tier),
            entry.source,
            entry.saved_at,
        );
    }
    println!();
}

/// Display a ranked summary of a batch run, highest risk first.
pub fn display_batch_summary(results: &[BatchResult]) {
    if results.is_empty() {
        println!("No valid profiles in the batch.");
        return;
    }

    let mut ranked: Vec<&BatchResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.report.score.cmp(&a.report.score));

    println!(
        "\n{}",
        format!("=== Batch results ({} profiles) ===", results.len()).bold()
    );
    println!();
    for (i, result) in ranked.iter().enumerate() {
        let strongest = result
            .report
            .strongest_factor()
            .map(|f| f.name.as_str())
            .unwrap_or("-");
        println!(
            "  {:>4}. @{:<28} {:>5}  {:<12}  {}",
            i + 1,
            truncate_chars(&result.record.username, 25),
            result.report.score,
            colorize_tier(result.report.tier),
            strongest.dimmed(),
        );
    }
    println!();

    let count = |tier: RiskTier| results.iter().filter(|r| r.report.tier == tier).count();
    let high = count(RiskTier::HighRisk);
    let suspicious = count(RiskTier::Suspicious);
    if high > 0 {
        println!("  {} {} high-risk profiles", "!!".red().bold(), high);
    }
    if suspicious > 0 {
        println!("  {} {} suspicious profiles", "~".yellow(), suspicious);
    }
}

/// List places to report fake accounts.
pub fn display_resources() {
    println!("\n{}", "Where to report:".bold());
    for resource in &RESOURCES {
        println!("  {}: {}", resource.title.bold(), resource.description);
        println!("    {}", resource.url.dimmed());
    }
}

fn colorize_score(score: u32, tier: RiskTier) -> colored::ColoredString {
    let text = format!("{score}/100");
    match tier {
        RiskTier::HighRisk => text.red().bold(),
        RiskTier::Suspicious => text.yellow().bold(),
        RiskTier::Authentic => text.green().bold(),
    }
}

/// Colorize a risk tier label.
fn colorize_tier(tier: RiskTier) -> colored::ColoredString {
    match tier {
        RiskTier::HighRisk => tier.label().red().bold(),
        RiskTier::Suspicious => tier.label().yellow(),
        RiskTier::Authentic => tier.label().green(),
    }
}
