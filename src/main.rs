mod error;
mod html;
mod markdown;
mod pages;
mod pipeline;
mod report;
mod settings;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pipeline::{ContentSyncPipeline, WriteMode};
use settings::{Settings, SyncPaths};

#[derive(Parser)]
#[command(
    name = "sync-content",
    about = "Sync site text from content/site-text.md into index.html and galerii.html"
)]
struct Cli {
    /// Site root holding the markdown and both pages
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Rebuild the pages in memory without writing them
    #[arg(long)]
    dry_run: bool,
    /// Print the per-field report as JSON instead of the confirmation line
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load path settings")?;
    let pipeline = ContentSyncPipeline::new(SyncPaths::resolve(&cli.root, &settings));

    let mode = if cli.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };
    let report = pipeline.run(mode)?;
    let paths = pipeline.paths();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if cli.dry_run {
        println!(
            "Dry run: {} fields would change in {} and {}, nothing written.",
            report.updated(),
            paths.index.display(),
            paths.gallery.display()
        );
    } else {
        let markdown = paths.markdown.strip_prefix(".").unwrap_or(paths.markdown.as_path());
        println!("✅ Content synced from {}", markdown.display());
    }
    Ok(())
}
