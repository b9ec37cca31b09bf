mod fetch;
mod game;
mod parser;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use scraper::Html;
use tracing::warn;

use game::download_file_name;
use parser::{parse_game, ParsedGame};

#[derive(Parser)]
#[command(name = "jarchive_scraper", about = "J! Archive game page scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse saved game pages into game JSON
    Parse {
        /// Saved j-archive game pages (HTML)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Write one <title>.jep.json per game here instead of printing
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Fetch a game page by URL and parse it
    Fetch {
        url: String,
        /// Write <title>.jep.json here instead of printing
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { files, out_dir } => {
            if files.len() == 1 && out_dir.is_none() {
                let parsed = parse_file(&files[0])?;
                emit(&parsed, None)?;
            } else {
                let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
                let counts = parse_batch(&files, &out_dir)?;
                counts.print();
            }
        }
        Commands::Fetch { url, out_dir } => {
            let html = fetch::fetch_page(&url).await?;
            let parsed = parse_html(&html).with_context(|| format!("failed to parse {url}"))?;
            emit(&parsed, out_dir.as_deref())?;
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}

struct ParseCounts {
    games: usize,
    with_diagnostics: usize,
    failed: usize,
}

impl ParseCounts {
    fn print(&self) {
        println!(
            "Wrote {} games ({} with diagnostics, {} failed).",
            self.games, self.with_diagnostics, self.failed
        );
    }
}

fn parse_html(html: &str) -> Result<ParsedGame> {
    let doc = Html::parse_document(html);
    Ok(parse_game(&doc)?)
}

fn parse_file(path: &Path) -> Result<ParsedGame> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_html(&html).with_context(|| format!("failed to parse {}", path.display()))
}

/// Print the game (or write it under `out_dir`), surfacing diagnostics first.
/// Diagnostics never suppress output; the game is a usable partial result.
fn emit(parsed: &ParsedGame, out_dir: Option<&Path>) -> Result<()> {
    if let Some(error) = &parsed.error {
        for line in error.lines() {
            warn!("{line}");
        }
    }

    let json = serde_json::to_string_pretty(&parsed.game)?;
    match out_dir {
        Some(dir) => {
            let path = dir.join(download_file_name(&parsed.game.title));
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Parse many saved pages in parallel, then write results sequentially.
fn parse_batch(files: &[PathBuf], out_dir: &Path) -> Result<ParseCounts> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );

    let results: Vec<(PathBuf, Result<ParsedGame>)> = files
        .par_iter()
        .map(|path| {
            let result = parse_file(path);
            pb.inc(1);
            (path.clone(), result)
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = ParseCounts {
        games: 0,
        with_diagnostics: 0,
        failed: 0,
    };
    for (path, result) in results {
        match result {
            Ok(parsed) => {
                if parsed.error.is_some() {
                    counts.with_diagnostics += 1;
                }
                emit(&parsed, Some(out_dir))?;
                counts.games += 1;
            }
            Err(e) => {
                warn!("{}: {:#}", path.display(), e);
                counts.failed += 1;
            }
        }
    }
    Ok(counts)
}
