//! Ncube command
//!
//! Usage: rulescope ncube --name <NAME> --app-id <APP_ID> [--output <FILE>]

use clap::Args;
use rulescope_client::ClientConfig;
use rulescope_core::ArtifactRef;
use std::path::PathBuf;

use super::{emit, session, CommandResult};

#[derive(Debug, Args)]
pub struct NcubeArgs {
    /// N-cube name
    #[arg(short, long)]
    pub name: String,

    /// Application id string, as shown in the rule outline
    #[arg(short, long)]
    pub app_id: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute ncube command
pub async fn execute(args: NcubeArgs, config: &ClientConfig) -> CommandResult {
    let mut session = session(config)?;
    let artifact = ArtifactRef::new(args.name, args.app_id);
    let view = session.open_artifact(&artifact).await?;
    emit(&view.html, args.output.as_deref())
}
