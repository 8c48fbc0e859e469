use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, miette};
use pokedex::{AppState, router};
use pokedex_config::Config;
use pokedex_library::{catalog, ingest};
use pokedex_remote::SourceHandle;
use pokedex_remote::source::HttpSource;
use pokedex_store::{Database, Repository};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pokedex", version, about = "Local creature catalogue mirrored from a public creature-data API")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file, overriding `database.path`.
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// Address to listen on, overriding `server.bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Run one ingestion over the configured range and print the summary.
    Load,
    /// Print aggregate counts.
    Stats,
}

/// Render an error tree for the terminal.
fn report<E>(err: exn::Exn<E>) -> miette::Report
where
    E: std::error::Error + Send + Sync + 'static,
{
    miette!("{err:?}")
}

fn init_tracing(level: &str) -> miette::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).into_diagnostic()?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn source(config: &Config) -> miette::Result<SourceHandle> {
    let source = HttpSource::new(&config.remote.base_url, config.remote.timeout()).map_err(report)?;
    Ok(Arc::new(source))
}

async fn open_database(config: &Config) -> miette::Result<Database> {
    if let Some(parent) = config.database.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.into_diagnostic()?;
    }
    Database::connect(&config.database.path).await.map_err(report)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn serve(config: &Config, db: &Database, bind: Option<SocketAddr>) -> miette::Result<()> {
    let state = AppState {
        repo: Repository::from(db),
        source: source(config)?,
        ingest: config.ingest.range(),
    };
    let addr = bind.unwrap_or(config.server.bind);
    let listener = TcpListener::bind(addr).await.into_diagnostic()?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()
}

async fn load(config: &Config, db: &Database) -> miette::Result<()> {
    let repo = Repository::from(db);
    let source = source(config)?;
    let summary = ingest::load(source.as_ref(), &repo, config.ingest.range()).await.map_err(report)?;
    println!("{}", summary.message());
    for error in &summary.errors {
        println!("  {error}");
    }
    if summary.failed as usize > summary.errors.len() {
        println!("  ... and {} more", summary.failed as usize - summary.errors.len());
    }
    let total = repo.count_creatures().await.map_err(report)?;
    println!("The catalogue now holds {total} creatures.");
    Ok(())
}

async fn stats(db: &Database) -> miette::Result<()> {
    let stats = catalog::stats(&Repository::from(db)).await.map_err(report)?;
    println!("Total creatures:        {}", stats.total);
    println!("Weight 30-80:           {}", stats.weight);
    println!("Grass type:             {}", stats.grass);
    println!("Flying and tall:        {}", stats.flying_tall);
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).map_err(report)?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    // The log level comes from the configuration.
    init_tracing(&config.log.level)?;
    tracing::debug!(
        file = ?cli.config,
        database = %config.database.path.display(),
        "Configuration loaded",
    );

    let db = open_database(&config).await?;
    let result = match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => serve(&config, &db, bind).await,
        Command::Load => load(&config, &db).await,
        Command::Stats => stats(&db).await,
    };
    db.close().await;
    result
}
