//! rulescope CLI
//!
//! Command-line explorer for an n-cube rules backend

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rulescope_client::ClientConfig;
use rulescope_core::logging_facility::{self, Profile};
use rulescope_core::ExError;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "rulescope")]
#[command(about = "rulescope - browse rule catalogs by engine, group and category", long_about = None)]
struct Cli {
    /// Backend root URL (default: http://localhost:8080/)
    #[arg(long, global = true, env = "RULESCOPE_BASE_URL")]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds (default: 600000)
    #[arg(long, global = true, env = "RULESCOPE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// TOML settings file; flags override its values
    #[arg(long, global = true, env = "RULESCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Logging profile: development, production or test
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Settings file, then flags, then validation
    fn client_config(&self) -> Result<ClientConfig, ExError> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_toml_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(profile) = self.log_profile {
            config.log_profile = profile;
        }
        config.normalized()
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List engines with their groups and categories
    Info(commands::info::InfoArgs),
    /// Show the rules of one group
    Rules(commands::rules::RulesArgs),
    /// Show the rules matching category filters
    ByCategory(commands::by_category::ByCategoryArgs),
    /// Fetch the detail page of one n-cube
    Ncube(commands::ncube::NcubeArgs),
    /// Interactive session over stdin
    Explore(commands::explore::ExploreArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging_facility::init(config.log_profile);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Info(args) => commands::info::execute(args, &config).await,
            Commands::Rules(args) => commands::rules::execute(args, &config).await,
            Commands::ByCategory(args) => commands::by_category::execute(args, &config).await,
            Commands::Ncube(args) => commands::ncube::execute(args, &config).await,
            Commands::Explore(args) => commands::explore::execute(args, &config).await,
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
