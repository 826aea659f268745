//! Explore command
//!
//! Usage: rulescope explore
//!
//! Reads one command per line from stdin and applies it to a live session,
//! the same way the explorer page reacts to dropdown changes and clicks.
//! A failing command is reported and the session continues.

use std::io::Write;

use clap::{Args, ValueEnum};
use rulescope_client::{ClientConfig, ExplorerSession, Transport};
use rulescope_core::{ArtifactRef, ExError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::{connect, render, CommandResult, OutputFormat};

const HELP: &str = r#"commands:
  engines                     list engines (* marks the current one)
  engine <ENGINE>             switch engine; clears group, categories and outline
  groups                      list groups of the current engine
  group [<GROUP>]             select a group and show its rules; no argument selects none
  categories                  list categories and the current selection
  select <CATEGORY> [VALUE..] set the selected values of one category
  apply                       show the rules matching the selected categories
  show [text|html|json]       print the current outline
  refs                        list n-cube references in the outline
  open <N>                    open reference number N from `refs`
  open <NAME> <APP_ID>        open an n-cube detail view
  views                       list opened detail views
  help                        this text
  quit                        leave

Quote names that contain spaces: select "Business Unit" "Retail EU""#;

#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Do not print a prompt before each command
    #[arg(long)]
    pub no_prompt: bool,
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Engines,
    Engine(String),
    Groups,
    Group(String),
    Categories,
    Select(String, Vec<String>),
    Apply,
    Show(OutputFormat),
    Refs,
    OpenIndex(usize),
    Open(String, String),
    Views,
    Help,
    Quit,
}

/// Parse a line; `Ok(None)` for blank lines
///
/// Words are split shell-style, so names containing spaces are written in
/// quotes: `select "Business Unit" "Retail EU"`.
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let words = shell_words::split(line).map_err(|e| format!("{}: {}", e, line.trim()))?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (head.as_str(), rest) {
        ("engines", []) => ReplCommand::Engines,
        ("engine", [engine]) => ReplCommand::Engine(engine.clone()),
        ("groups", []) => ReplCommand::Groups,
        ("group", []) => ReplCommand::Group(String::new()),
        ("group", [group]) => ReplCommand::Group(group.clone()),
        ("categories", []) => ReplCommand::Categories,
        ("select", [category, values @ ..]) => {
            ReplCommand::Select(category.clone(), values.to_vec())
        }
        ("apply", []) => ReplCommand::Apply,
        ("show", []) => ReplCommand::Show(OutputFormat::Text),
        ("show", [format]) => ReplCommand::Show(OutputFormat::from_str(format, true)?),
        ("refs", []) => ReplCommand::Refs,
        ("open", [index]) => match index.parse::<usize>() {
            Ok(n) if n > 0 => ReplCommand::OpenIndex(n),
            _ => return Err(format!("not a reference number: {}", index)),
        },
        ("open", [name, app_id]) => ReplCommand::Open(name.clone(), app_id.clone()),
        ("views", []) => ReplCommand::Views,
        ("help", []) => ReplCommand::Help,
        ("quit", []) | ("exit", []) => ReplCommand::Quit,
        _ => return Err(format!("unrecognised command: {} (try `help`)", line.trim())),
    };
    Ok(Some(command))
}

/// Execute explore command
pub async fn execute(args: ExploreArgs, config: &ClientConfig) -> CommandResult {
    let mut session = connect(config).await?;
    let input = BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    run(&mut session, input, stdout.lock(), !args.no_prompt).await?;
    Ok(())
}

/// Drive `session` from `input` until `quit` or end of input
pub async fn run<T, R, W>(
    session: &mut ExplorerSession<T>,
    input: R,
    mut out: W,
    prompt: bool,
) -> std::io::Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "rulescope> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "error: {}", message)?;
                continue;
            }
        };
        if command == ReplCommand::Quit {
            break;
        }
        if let Err(err) = apply(session, command, &mut out).await {
            writeln!(out, "error: {}", err)?;
            if err
                .downcast_ref::<ExError>()
                .is_some_and(|e| e.kind().is_exchange())
            {
                writeln!(out, "(outline cleared)")?;
            }
        }
    }
    Ok(())
}

async fn apply<T: Transport, W: Write>(
    session: &mut ExplorerSession<T>,
    command: ReplCommand,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ReplCommand::Engines => {
            let current = session.controller().selection().engine().map(str::to_string);
            for option in &session.controller().selectors().engine_options {
                let marker = if current.as_deref() == Some(option.value.as_str()) {
                    "*"
                } else {
                    " "
                };
                writeln!(out, "{} {}", marker, option.text)?;
            }
        }
        ReplCommand::Engine(engine) => {
            session.select_engine(&engine)?;
            writeln!(out, "engine: {}", engine)?;
        }
        ReplCommand::Groups => {
            let selected = session.controller().selection().group().to_string();
            for option in &session.controller().selectors().group_options {
                if option.value.is_empty() {
                    continue;
                }
                let marker = if option.value == selected { "*" } else { " " };
                writeln!(out, "{} {}", marker, option.text)?;
            }
        }
        ReplCommand::Group(group) => {
            session.select_group(&group).await?;
            write_outline(session, OutputFormat::Text, out)?;
        }
        ReplCommand::Categories => {
            let controller = session.controller();
            if !controller.selectors().category_form_visible {
                writeln!(out, "(no categories for this engine)")?;
            }
            for row in &controller.selectors().category_rows {
                let selected = row.selected_in_order(controller.selection());
                let values: Vec<String> = row
                    .options
                    .iter()
                    .map(|o| {
                        if selected.contains(&o.value) {
                            format!("[{}]", o.text)
                        } else {
                            o.text.clone()
                        }
                    })
                    .collect();
                writeln!(out, "{}: {}", row.label, values.join(" "))?;
            }
        }
        ReplCommand::Select(category, values) => {
            session.select_category_values(&category, values)?;
        }
        ReplCommand::Apply => {
            session.apply_categories().await?;
            write_outline(session, OutputFormat::Text, out)?;
        }
        ReplCommand::Show(format) => write_outline(session, format, out)?,
        ReplCommand::Refs => {
            let refs = session.controller().outline().artifact_refs();
            if refs.is_empty() {
                writeln!(out, "(no references)")?;
            }
            for (i, artifact) in refs.iter().enumerate() {
                writeln!(out, "{}. {} ({})", i + 1, artifact.name, artifact.app_id)?;
            }
        }
        ReplCommand::OpenIndex(n) => {
            let artifact: ArtifactRef = session
                .controller()
                .outline()
                .artifact_refs()
                .get(n - 1)
                .map(|r| (*r).clone())
                .ok_or_else(|| format!("no reference number {}", n))?;
            open(session, &artifact, out).await?;
        }
        ReplCommand::Open(name, app_id) => {
            open(session, &ArtifactRef::new(name, app_id), out).await?;
        }
        ReplCommand::Views => {
            let views = session.controller().detail_views();
            if views.is_empty() {
                writeln!(out, "(no views)")?;
            }
            for (name, view) in views.iter() {
                writeln!(out, "{} (opened {}x)", name, view.opens)?;
            }
        }
        ReplCommand::Help => writeln!(out, "{}", HELP)?,
        ReplCommand::Quit => {}
    }
    Ok(())
}

async fn open<T: Transport, W: Write>(
    session: &mut ExplorerSession<T>,
    artifact: &ArtifactRef,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = session.open_artifact(artifact).await?;
    writeln!(out, "--- {} ---", artifact.view_name())?;
    writeln!(out, "{}", view.html)?;
    Ok(())
}

fn write_outline<T: Transport, W: Write>(
    session: &ExplorerSession<T>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = session.controller().outline();
    if outline.is_empty() {
        writeln!(out, "(empty outline)")?;
        return Ok(());
    }
    write!(out, "{}", render(outline, format)?)?;
    if format != OutputFormat::Text {
        writeln!(out)?;
    }
    Ok(())
}
