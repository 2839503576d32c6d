//! mjtutor CLI - mahjong tutor progress tracker.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use mjtutor_core::{ProgressStats, Recommendation, Section};
use mjtutor_progress::{ProgressObserver, ProgressStore, StoreConfig};
use mjtutor_storage::{JsonStorage, StorageError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mjtutor")]
#[command(about = "Track progress through the mahjong tutorial", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding saved progress
    #[arg(short, long, default_value = ".mjtutor")]
    data_dir: std::path::PathBuf,

    /// Storage key for the progress record
    #[arg(long, default_value = "mahjongProgress")]
    key: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate opening a page: count the visit and show the dashboard
    Open {
        /// URL path, e.g. /tiles.html
        path: String,
    },
    /// Mark a section as studied
    Complete {
        /// Section identifier (basics, tiles, yaku, scoring, glossary)
        section: String,
    },
    /// Mark the section hosted at a URL path as studied
    CompletePage {
        /// URL path, e.g. /scoring.html
        path: String,
    },
    /// Mark a test as passed
    Test {
        /// Test number (1-5)
        number: u32,
    },
    /// Record a learned yaku
    Yaku {
        /// Yaku name
        name: String,
    },
    /// Show progress statistics
    Stats,
    /// Show what to study next
    Next,
    /// Print the raw progress record
    Show,
    /// Export progress to a dated JSON file
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: std::path::PathBuf,
    },
    /// Erase all progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Logs a one-line summary whenever progress is saved.
struct RefreshLog;

impl ProgressObserver for RefreshLog {
    fn on_progress_changed(&self, stats: &ProgressStats) {
        tracing::debug!(
            "Progress now {}% ({} sections, {} tests)",
            stats.total_progress,
            stats.sections_complete,
            stats.tests_complete
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = JsonStorage::new(&cli.data_dir).await?;
    let config = StoreConfig {
        storage_key: cli.key,
        ..Default::default()
    };
    let mut store = ProgressStore::open(storage, config)
        .await
        .with_observer(Box::new(RefreshLog));

    for warning in store.take_warnings() {
        println!("! {}", warning);
    }

    match cli.command {
        Commands::Open { path } => {
            report(store.record_page_load(&path).await, None);
            print_stats(&store.stats());
            print_recommendation(store.next_recommendation().as_ref());
        }
        Commands::Complete { section } => {
            report(
                store.mark_section_complete_by_id(&section).await,
                Some("✓ Section marked as studied"),
            );
        }
        Commands::CompletePage { path } => {
            report(
                store.mark_current_section_complete(&path).await,
                Some("✓ Section marked as studied"),
            );
        }
        Commands::Test { number } => {
            report(
                store.mark_test_complete_by_number(number).await,
                Some("✓ Test marked as passed"),
            );
        }
        Commands::Yaku { name } => {
            report(store.add_learned_yaku(&name).await, Some("✓ Yaku added"));
        }
        Commands::Stats => {
            print_stats(&store.stats());
            print_sections(&store);
        }
        Commands::Next => {
            print_recommendation(store.next_recommendation().as_ref());
        }
        Commands::Show => {
            println!("{}", serde_json::to_string_pretty(store.record())?);
        }
        Commands::Export { out } => {
            let artifact = store.export_progress()?;
            let path = artifact.write_to(&out).await?;
            println!("Exported progress to {}", path.display());
        }
        Commands::Reset { yes } => {
            if !yes && !confirm("Are you sure you want to reset all progress?")? {
                println!("Reset cancelled");
                return Ok(());
            }
            match store.reset_progress().await {
                Ok(()) => println!("Progress reset"),
                Err(e) => warn_unsaved(&e),
            }
        }
    }

    Ok(())
}

fn report(outcome: Result<bool, StorageError>, notice: Option<&str>) {
    match outcome {
        Ok(true) => {
            if let Some(notice) = notice {
                println!("{}", notice);
            }
        }
        Ok(false) => {}
        Err(e) => warn_unsaved(&e),
    }
}

fn warn_unsaved(e: &StorageError) {
    println!("! Progress could not be saved: {}", e);
}

fn print_stats(stats: &ProgressStats) {
    println!("Progress: {}%", stats.total_progress);
    println!("  Sections: {}/{}", stats.sections_complete, stats.total_sections);
    println!("  Tests: {}/{}", stats.tests_complete, stats.total_tests);
    println!("  Yaku learned: {}", stats.yaku_learned);
    println!("  Page visits: {}", stats.total_visits);
}

fn print_sections(store: &ProgressStore<JsonStorage>) {
    for section in Section::ALL {
        let mark = if store.record().is_section_complete(section) { "x" } else { " " };
        println!("  [{}] {}", mark, section.title());
    }
}

fn print_recommendation(recommendation: Option<&Recommendation>) {
    match recommendation {
        Some(rec) => println!("Recommended next: {} → {}", rec.title, rec.url),
        None => println!("Congratulations! You have finished every section and test."),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
