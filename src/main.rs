//! Clear Check - Entry Point

use clap::Parser;
use clearcheck::client::{ClientSettings, HttpSearchClient};
use clearcheck::config::{CliOverrides, ResolvedConfig};
use clearcheck::model::{AppError, SearchMode};
use clearcheck::templates;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Clear Check - terminal client for exclusion screening searches
#[derive(Parser, Debug)]
#[command(name = "clearcheck")]
#[command(version)]
#[command(about = "TUI for running clear-check searches against a search-template service")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search service base URL
    #[arg(long)]
    pub host: Option<String>,

    /// Index the search templates run against
    #[arg(long)]
    pub index: Option<String>,

    /// Search type selected at startup (template id, e.g. exclusion_search)
    #[arg(long)]
    pub mode: Option<SearchMode>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Directory exported spreadsheets are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Print cluster health and document count, then exit
    #[arg(long, conflicts_with = "load_templates")]
    pub health: bool,

    /// Register the stored search templates from a JSON file, then exit
    #[arg(long, value_name = "FILE")]
    pub load_templates: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            index: self.index.clone(),
            mode: self.mode,
            timeout_secs: self.timeout,
            export_dir: self.export_dir.clone(),
            no_color: self.no_color,
        }
    }
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = clearcheck::config::load_config_with_precedence(args.config.clone())?;
    let merged = clearcheck::config::merge_config(config_file);
    let with_env = clearcheck::config::apply_env_overrides(merged);
    Ok(clearcheck::config::apply_cli_overrides(
        with_env,
        args.overrides(),
    ))
}

/// Print cluster status and document count.
fn print_health(config: &ResolvedConfig) -> Result<(), AppError> {
    let client = HttpSearchClient::new(ClientSettings::from(config))?;
    let health = client.cluster_health()?;
    let count = client.document_count()?;

    info!(status = %health.status, count, "Health probe succeeded");
    println!("Cluster: {}", health.cluster_name);
    println!("Status: {}", health.status);
    if let Some(nodes) = health.number_of_nodes {
        println!("Nodes: {nodes}");
    }
    println!("Documents in {}: {count}", config.index);
    Ok(())
}

/// Delete and re-create every template in `path`.
fn load_templates(config: &ResolvedConfig, path: &Path) -> Result<(), AppError> {
    let file = templates::load_template_file(path)?;
    for id in templates::missing_templates(&file) {
        warn!(template = id, "Template file does not define a template the client uses");
        println!("Warning: {id} is not defined in {}", path.display());
    }

    let client = HttpSearchClient::new(ClientSettings::from(config))?;
    for registered in templates::register_templates(&client, &file)? {
        let verb = if registered.replaced { "Replaced" } else { "Created" };
        println!("{verb} template: {}", registered.id);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    // Initialize tracing with configured log file path
    clearcheck::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    if args.health {
        print_health(&config)?;
        return Ok(());
    }

    if let Some(path) = &args.load_templates {
        load_templates(&config, path)?;
        return Ok(());
    }

    clearcheck::view::run(&config)?;

    Ok(())
}
