//! Rules command
//!
//! Usage: rulescope rules --group <GROUP> [--engine <ENGINE>] [--format text|html|json] [--output <FILE>]

use clap::Args;
use rulescope_client::ClientConfig;
use std::path::PathBuf;

use super::{choose_engine, connect, emit, render, CommandResult, OutputFormat};

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Engine id (default: first engine of the catalog)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Rule group to show
    #[arg(short, long)]
    pub group: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute rules command
pub async fn execute(args: RulesArgs, config: &ClientConfig) -> CommandResult {
    let mut session = connect(config).await?;
    choose_engine(&mut session, args.engine.as_deref())?;
    session.select_group(&args.group).await?;

    tracing::debug!(
        group = args.group.as_str(),
        items = session.controller().outline().items().len(),
        "group outline ready"
    );
    let content = render(session.controller().outline(), args.format)?;
    emit(&content, args.output.as_deref())
}
