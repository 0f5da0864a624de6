//! Import a Markdown file into the articles table.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tutorial_site::app::{import_markdown_file, ImportResult};
use tutorial_site::config::{init_logging, AppConfig};
use tutorial_site::infra::init_db;

/// Import a Markdown file as a new article.
#[derive(Parser, Debug)]
#[command(name = "import-article")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Markdown file to import
    file: PathBuf,

    /// Delete all existing articles before importing
    #[arg(long)]
    clear: bool,

    /// SQLite database file (defaults to TUTORIAL_DATABASE_PATH or ./tutorial.db)
    #[arg(long)]
    database: Option<PathBuf>,
}

/// Lines printed to stdout after a successful import.
fn report_lines(result: &ImportResult, cleared: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if cleared {
        lines.push(format!("Cleared {} existing articles", result.cleared));
    }
    lines.push(format!(
        "Imported article #{}: {}",
        result.article.id, result.article.title
    ));
    lines
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let pool = init_db(&config.database_path)?;
    let result = import_markdown_file(&pool, &cli.file, cli.clear)
        .with_context(|| format!("failed to import {}", cli.file.display()))?;

    for line in report_lines(&result, cli.clear) {
        println!("{}", line);
    }
    Ok(())
}
