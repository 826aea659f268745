pub mod by_category;
pub mod explore;
pub mod info;
pub mod ncube;
pub mod rules;

use std::path::Path;

use clap::ValueEnum;
use rulescope_client::{ClientConfig, ExplorerSession, HttpTransport};
use rulescope_core::render::{render_outline_html, render_outline_json, render_outline_text};
use rulescope_core::{ExError, Outline};

/// Result type of every command handler
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// How an outline is written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented bullet list
    #[default]
    Text,
    /// Nested `<ul>` markup with artifact links
    Html,
    /// Outline tree as JSON
    Json,
}

/// Render an outline in the requested format
pub fn render(outline: &Outline, format: OutputFormat) -> Result<String, ExError> {
    Ok(match format {
        OutputFormat::Text => render_outline_text(outline),
        OutputFormat::Html => render_outline_html(outline),
        OutputFormat::Json => render_outline_json(outline)?,
    })
}

/// Write to a file when one is given, stdout otherwise
pub fn emit(content: &str, output: Option<&Path>) -> CommandResult {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✓ Written to {}", path.display());
        }
        None => {
            print!("{}", content);
            if !content.is_empty() && !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// A session that has not loaded anything yet
pub fn session(config: &ClientConfig) -> Result<ExplorerSession<HttpTransport>, ExError> {
    Ok(ExplorerSession::new(HttpTransport::new(config)?))
}

/// A session with the catalog loaded and the default engine selected
pub async fn connect(config: &ClientConfig) -> Result<ExplorerSession<HttpTransport>, ExError> {
    let mut session = session(config)?;
    session.start().await?;
    Ok(session)
}

/// Select `engine` when given; otherwise keep the catalog's default
pub fn choose_engine(
    session: &mut ExplorerSession<HttpTransport>,
    engine: Option<&str>,
) -> Result<(), ExError> {
    match engine {
        Some(engine) => session.select_engine(engine),
        None => Ok(()),
    }
}
