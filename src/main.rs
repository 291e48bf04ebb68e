use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::config::ensure_database_directory;
use catalog::{CatalogService, Config, Database};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

/// catalog - learning-resource catalog service
#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Serves a catalog of learning resources, comments, votes, tags and study lists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve(ServeCommand),
    /// Print catalog rows as JSON
    List(ListCommand),
}

/// Run the HTTP service
#[derive(Parser)]
struct ServeCommand {
    /// Port to listen on (overrides PORT)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// SQLite database file (overrides CATALOG_DB_PATH)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

/// Print catalog rows as JSON
#[derive(Parser)]
struct ListCommand {
    /// Which rows to print
    #[arg(value_enum)]
    target: ListTarget,

    /// SQLite database file (overrides CATALOG_DB_PATH)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ListTarget {
    Resources,
    Tags,
    Users,
}

fn main() {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = Config::from_env().and_then(|config| {
        catalog::logging::init(&config.log_filter);
        match cli.command {
            Commands::Serve(cmd) => handle_serve(cmd, config),
            Commands::List(cmd) => handle_list(&cmd, config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Opens the configured database, creating its directory if needed.
fn open_database(path: &Path) -> Result<Database> {
    ensure_database_directory(path)?;
    Database::open(path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn handle_serve(cmd: ServeCommand, config: Config) -> Result<()> {
    let port = cmd
        .port
        .or(config.port)
        .context("Missing PORT environment variable. Set it in .env file or pass --port.")?;
    let db_path = cmd.db.unwrap_or(config.db_path);

    let db = open_database(&db_path)?;
    info!(path = %db_path.display(), "opened catalog database");
    let service = Arc::new(CatalogService::new(db));

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(catalog::http::serve(service, port))
}

fn handle_list(cmd: &ListCommand, config: Config) -> Result<()> {
    let db_path = cmd.db.clone().unwrap_or(config.db_path);
    let service = CatalogService::new(open_database(&db_path)?);

    let output = render_list(&service, cmd.target)?;
    println!("{output}");
    Ok(())
}

/// Renders the requested rows as pretty-printed JSON.
fn render_list(service: &CatalogService, target: ListTarget) -> Result<String> {
    let json = match target {
        ListTarget::Resources => serde_json::to_string_pretty(&service.list_resources()?)?,
        ListTarget::Tags => serde_json::to_string_pretty(&service.list_tags()?)?,
        ListTarget::Users => serde_json::to_string_pretty(&service.list_users()?)?,
    };
    Ok(json)
}
