// System status display — shows history DB stats and active scoring settings.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::history::HistoryStore;

/// Display system status to the terminal.
pub async fn show(config: &Config, history: Option<&Arc<dyn HistoryStore>>) -> Result<()> {
    let weights = config.scoring_config().weights;
    println!("Weight profile: {}", config.weight_profile);
    println!(
        "  username {:.2}, completeness {:.2}, follower ratio {:.2}, activity {:.2}, age {:.2}, platform {:.2}",
        weights.username,
        weights.completeness,
        weights.follower_ratio,
        weights.activity,
        weights.account_age,
        weights.platform,
    );
    println!(
        "Platform weight for unspecified platform: {}",
        if config.renormalize_unspecified { "dropped, others renormalized" } else { "kept" }
    );
    println!(
        "Instagram promotional-bio rule: {}",
        if config.instagram_promo { "on" } else { "off" }
    );

    let history = match history {
        Some(h) if Path::new(&config.db_path).exists() => h,
        _ => {
            println!("History database: not initialized");
            println!("\nRun `veracity init` to set it up.");
            return Ok(());
        }
    };

    let file_size = std::fs::metadata(&config.db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("History database: {} ({})", config.db_path, file_size);

    let count = history.count().await?;
    println!("Saved analyses: {} of {} kept", count, history.capacity());

    if let Some(latest) = history.list().await?.first() {
        println!(
            "Most recent: @{} on {} ({})",
            latest.record.username,
            latest.record.platform.display_name(),
            latest.saved_at
        );
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
