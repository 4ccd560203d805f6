use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use veracity::config::Config;
use veracity::history::{self, EntrySource, HistoryStore};
use veracity::lookup::{links, MockLookup, ProfileLookup};
use veracity::profile::{Platform, ProfileInput, ProfileRecord};
use veracity::scoring::ScoringEngine;
use veracity::{assistant, output, pipeline, recommendations};

/// Veracity: authenticity risk scoring for social media profiles.
///
/// Scores how likely a profile is to be fake from its public metadata,
/// explains which signals drove the score, and suggests what to do.
#[derive(Parser)]
#[command(name = "veracity", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the history database
    Init,

    /// Score a profile from flags or a JSON file
    Analyze {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Read the profile from a JSON file instead of flags
        #[arg(long, conflicts_with = "username")]
        file: Option<PathBuf>,

        /// Don't save this analysis to history
        #[arg(long)]
        no_save: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch profiles by username (offline mock source) and score them
    Lookup {
        /// Usernames to look up (leading @ is fine)
        #[arg(required = true)]
        usernames: Vec<String>,

        /// instagram, facebook, twitter or unspecified
        #[arg(long, default_value = "unspecified")]
        platform: Platform,

        /// Also print a reverse image search link for this picture URL
        #[arg(long)]
        image_url: Option<String>,

        /// Don't save this analysis to history
        #[arg(long)]
        no_save: bool,
    },

    /// Score every profile in a JSON array file
    Batch {
        /// Path to a JSON array of profiles
        file: PathBuf,

        /// Number of profiles to score in parallel (default: 8)
        #[arg(long, default_value = "8")]
        concurrency: usize,

        /// Write a Markdown report to this path
        #[arg(long)]
        report: Option<String>,

        /// Don't save results to history
        #[arg(long)]
        no_save: bool,
    },

    /// List saved analyses, most recent first
    History {
        /// Only show entries for this username
        #[arg(long)]
        user: Option<String>,
    },

    /// Re-score and display one saved analysis
    Show {
        /// History entry id
        id: String,
    },

    /// Delete one saved analysis
    Forget {
        /// History entry id
        id: String,
    },

    /// Delete all saved analyses
    ClearHistory,

    /// Ask the help assistant a question (no question prints a greeting)
    Ask {
        /// Your question, e.g. "how do I report a fake account"
        message: Vec<String>,
    },

    /// Show configuration and history status
    Status,
}

/// Profile fields accepted on the command line.
#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    display_name: Option<String>,

    #[arg(long)]
    bio: Option<String>,

    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    followers: i64,

    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    following: i64,

    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    posts: i64,

    /// Account age in whole months
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    age_months: i64,

    /// custom, default or none
    #[arg(long)]
    picture: Option<String>,

    /// instagram, facebook, twitter or unspecified
    #[arg(long)]
    platform: Option<String>,
}

impl From<ProfileArgs> for ProfileInput {
    fn from(args: ProfileArgs) -> Self {
        ProfileInput {
            username: args.username,
            display_name: args.display_name,
            bio: args.bio,
            follower_count: args.followers,
            following_count: args.following,
            post_count: args.posts,
            account_age_months: args.age_months,
            profile_picture: args.picture,
            platform: args.platform,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("veracity=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Veracity history database...");
            let config = Config::load()?;
            let store = history::open_store(&config.db_path, config.history_limit)?;
            let table_count = store.table_count().await?;
            println!("History database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("Keeping the {} most recent analyses.", store.capacity());
            println!("\nNext: veracity analyze --username someone --followers 120 ...");
        }

        Commands::Analyze {
            profile,
            file,
            no_save,
            json,
        } => {
            let config = Config::load()?;
            let engine = ScoringEngine::new(config.scoring_config())?;

            let input = match file {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    serde_json::from_str::<ProfileInput>(&raw)
                        .with_context(|| format!("{} is not a profile JSON object", path.display()))?
                }
                None => ProfileInput::from(profile),
            };
            let record = input.validate()?;

            analyze_and_show(&engine, &record, json)?;

            if !no_save {
                save_to_history(&config, &record, EntrySource::Manual).await;
            }
        }

        Commands::Lookup {
            usernames,
            platform,
            image_url,
            no_save,
        } => {
            let config = Config::load()?;
            let engine = ScoringEngine::new(config.scoring_config())?;

            let source = MockLookup::default();
            let results = source.lookup_many(&usernames, platform).await;

            for (username, result) in usernames.iter().zip(results) {
                let record = match result {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(username = %username, error = %e, "Lookup failed");
                        eprintln!("{} {e}", "✗".red());
                        continue;
                    }
                };
                info!(username = %record.username, platform = %platform, "Profile fetched");

                analyze_and_show(&engine, &record, false)?;

                if let Some(url) = links::profile_url(&record.username, record.platform) {
                    println!("  Profile: {}", url.dimmed());
                }

                if !no_save {
                    save_to_history(&config, &record, EntrySource::Lookup).await;
                }
            }

            if let Some(image) = image_url {
                println!(
                    "  Reverse image search: {}",
                    links::reverse_image_search_url(&image).dimmed()
                );
            }
        }

        Commands::Batch {
            file,
            concurrency,
            report,
            no_save,
        } => {
            let config = Config::load()?;
            let engine = ScoringEngine::new(config.scoring_config())?;

            let inputs = pipeline::batch::load_inputs(&file)?;
            let total = inputs.len();
            let (records, skipped) = pipeline::batch::validate_inputs(inputs);
            println!(
                "Loaded {} profiles from {} ({} invalid, skipped)",
                total,
                file.display(),
                skipped
            );

            let store = if no_save {
                None
            } else {
                Some(history::open_store(&config.db_path, config.history_limit)?)
            };

            let results = pipeline::batch::run(
                &engine,
                records,
                store.as_deref(),
                concurrency,
                true,
            )
            .await?;

            output::terminal::display_batch_summary(&results);

            if let Some(path) = report {
                output::markdown::generate_report(&results, &path)?;
                println!("\nReport written to {}", path.bold());
            }
        }

        Commands::History { user } => {
            let config = Config::load()?;
            let engine = ScoringEngine::new(config.scoring_config())?;
            let store = history::open_store(&config.db_path, config.history_limit)?;

            let entries = match user {
                Some(username) => store.find_by_username(&username).await?,
                None => store.list().await?,
            };
            output::terminal::display_history(&entries, &engine);
        }

        Commands::Show { id } => {
            let config = Config::load()?;
            let engine = ScoringEngine::new(config.scoring_config())?;
            let store = history::open_store(&config.db_path, config.history_limit)?;

            match store.get(&id).await? {
                Some(entry) => {
                    println!(
                        "{}",
                        format!("Saved {} ({})", entry.saved_at, entry.source).dimmed()
                    );
                    analyze_and_show(&engine, &entry.record, false)?;
                }
                None => anyhow::bail!("No history entry with id '{id}'"),
            }
        }

        Commands::Forget { id } => {
            let config = Config::load()?;
            let store = history::open_store(&config.db_path, config.history_limit)?;
            if store.delete(&id).await? {
                println!("Deleted history entry {id}");
            } else {
                anyhow::bail!("No history entry with id '{id}'");
            }
        }

        Commands::ClearHistory => {
            let config = Config::load()?;
            let store = history::open_store(&config.db_path, config.history_limit)?;
            let removed = store.clear().await?;
            println!("Cleared {removed} history entries");
        }

        Commands::Ask { message } => {
            let message = message.join(" ");
            println!("{}", assistant::respond(&message));
            if !message.trim().is_empty()
                && assistant::Topic::classify(&message) == assistant::Topic::Report
            {
                output::terminal::display_resources();
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            // Don't create the database just to report that it's missing.
            let store: Option<Arc<dyn HistoryStore>> =
                if std::path::Path::new(&config.db_path).exists() {
                    Some(history::open_store(&config.db_path, config.history_limit)?)
                } else {
                    None
                };
            veracity::status::show(&config, store.as_ref()).await?;
        }
    }

    Ok(())
}

/// Score a record and print it, either as a terminal report or as JSON.
fn analyze_and_show(engine: &ScoringEngine, record: &ProfileRecord, json: bool) -> Result<()> {
    let report = engine.analyze_checked(record)?;
    let recommendation =
        recommendations::recommend(record, &report, engine.config().thresholds.suspicious);

    if json {
        let out = serde_json::json!({
            "profile": record,
            "report": report,
            "recommendation": recommendation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        output::terminal::display_report(record, &report, &recommendation);
    }
    Ok(())
}

/// Save to history. A storage problem shouldn't hide a finished analysis,
/// so failures are logged rather than returned.
async fn save_to_history(config: &Config, record: &ProfileRecord, source: EntrySource) {
    let store = match history::open_store(&config.db_path, config.history_limit) {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "History unavailable, analysis not saved");
            return;
        }
    };
    match store.save(record, source).await {
        Ok(entry) => println!("{}", format!("Saved to history as {}", entry.id).dimmed()),
        Err(e) => warn!(error = %e, "Failed to save analysis to history"),
    }
}
