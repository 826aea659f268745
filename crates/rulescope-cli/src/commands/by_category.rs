//! By-category command
//!
//! Usage: rulescope by-category [--engine <ENGINE>] [--category <NAME=VALUE>]... [--format ..] [--output ..]
//!
//! Repeating `--category` with the same name selects several values of that
//! category.

use clap::Args;
use rulescope_client::ClientConfig;
use std::path::PathBuf;

use super::{choose_engine, connect, emit, render, CommandResult, OutputFormat};

#[derive(Debug, Args)]
pub struct ByCategoryArgs {
    /// Engine id (default: first engine of the catalog)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Category filter as NAME=VALUE; may be repeated
    #[arg(short, long = "category", value_parser = parse_category)]
    pub categories: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse one `NAME=VALUE` filter
pub fn parse_category(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => {
            Ok((name.to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

/// Gather repeated filters per category, keeping first-seen order
pub fn group_filters(filters: &[(String, String)]) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in filters {
        match grouped.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, values)) => values.push(value.clone()),
            None => grouped.push((name.clone(), vec![value.clone()])),
        }
    }
    grouped
}

/// Execute by-category command
pub async fn execute(args: ByCategoryArgs, config: &ClientConfig) -> CommandResult {
    let mut session = connect(config).await?;
    choose_engine(&mut session, args.engine.as_deref())?;

    for (category, values) in group_filters(&args.categories) {
        session.select_category_values(&category, values)?;
    }
    session.apply_categories().await?;

    let content = render(session.controller().outline(), args.format)?;
    emit(&content, args.output.as_deref())
}
