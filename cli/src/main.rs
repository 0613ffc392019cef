//! notascope CLI - Voorjaarsnota scraping and analysis tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use notascope::{analyze, render, Refresher, SnapshotStore};

#[derive(Parser)]
#[command(name = "notascope")]
#[command(version)]
#[command(about = "Scrape the Voorjaarsnota 2024 report and show its analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a text report of the document and its analysis
    Report {
        /// Snapshot file path
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        /// Source URL
        #[arg(long, value_name = "URL", env = "NOTASCOPE_URL")]
        url: Option<String>,
    },

    /// Fetch the page now, bypassing any cached snapshot
    Scrape {
        /// Snapshot file path
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        /// Source URL
        #[arg(long, value_name = "URL", env = "NOTASCOPE_URL")]
        url: Option<String>,
    },

    /// Output document and analysis as JSON
    Json {
        /// Snapshot file path
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        /// Source URL
        #[arg(long, value_name = "URL", env = "NOTASCOPE_URL")]
        url: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Re-run the pipeline on an interval and print each report
    Watch {
        /// Snapshot file path
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        /// Source URL
        #[arg(long, value_name = "URL", env = "NOTASCOPE_URL")]
        url: Option<String>,

        /// Seconds between refresh cycles
        #[arg(long, default_value = "300")]
        interval: u64,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Report { snapshot, url }) => cmd_report(make_store(snapshot, url)),
        Some(Commands::Scrape { snapshot, url }) => cmd_scrape(make_store(snapshot, url)),
        Some(Commands::Json {
            snapshot,
            url,
            output,
            compact,
        }) => cmd_json(make_store(snapshot, url), output.as_deref(), compact),
        Some(Commands::Watch {
            snapshot,
            url,
            interval,
        }) => cmd_watch(make_store(snapshot, url), interval),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        // Default behavior: snapshot-first report
        None => cmd_report(SnapshotStore::new()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn make_store(snapshot: Option<PathBuf>, url: Option<String>) -> SnapshotStore {
    let mut store = SnapshotStore::new();
    if let Some(path) = snapshot {
        store = store.with_path(path);
    }
    if let Some(url) = url {
        store = store.with_url(url);
    }
    store
}

fn cmd_report(store: SnapshotStore) -> Result<(), Box<dyn std::error::Error>> {
    let doc = store.fetch_or_load();
    let analysis = analyze(&doc);
    println!("{}", render::text_report(&doc, &analysis));
    Ok(())
}

fn cmd_scrape(store: SnapshotStore) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("scraping {}", store.url());
    let doc = store.fetch()?;
    let analysis = analyze(&doc);

    println!("{}", "Scrape complete".green().bold());
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Snapshot".bold(), store.path().display());
    println!("{}: {}", "Headings".bold(), analysis.stats.sections);
    println!("{}: {}", "Paragraphs".bold(), analysis.stats.paragraphs);
    println!("{}: {}", "Tables".bold(), analysis.stats.tables);
    println!(
        "{}: {}",
        "Financial entries".bold(),
        analysis.financial.len()
    );

    Ok(())
}

fn cmd_json(
    store: SnapshotStore,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = store.fetch_or_load();
    let analysis = analyze(&doc);

    let format = if compact {
        render::JsonFormat::Compact
    } else {
        render::JsonFormat::Pretty
    };
    let json = render::to_json(&doc, &analysis, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_watch(store: SnapshotStore, interval: u64) -> Result<(), Box<dyn std::error::Error>> {
    let refresher = Refresher::new(store).with_interval(Duration::from_secs(interval));

    println!(
        "{} every {} seconds (Ctrl-C to stop)",
        "Refreshing".cyan().bold(),
        interval
    );

    refresher.run(|doc, analysis| {
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", render::text_report(doc, analysis));
        true
    });

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "notascope".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Voorjaarsnota 2024 scraping and analysis tool");
}
