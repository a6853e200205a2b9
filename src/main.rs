use clap::Parser;
use eyre::{Context, Result};
use ledger_explorer_db::config::ApiConfigBuilder;
use ledger_explorer_db::db::DbConnection;
use ledger_explorer_db::repositories::QueryService;
use ledger_explorer_db::router;
use ledger_explorer_db::store::postgres::PgDocumentStore;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to serve the API on (overrides ROUTER_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Postgres connection string (overrides DB_CONNECTION_STRING)
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    if env::var("IS_DEV").is_ok_and(|v| v.parse().unwrap_or(false)) {
        dotenvy::dotenv().context("Failed to load .env")?;
    }

    // Initialize tracing subscriber
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let mut builder = ApiConfigBuilder::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        builder = builder.router_endpoint(endpoint);
    }
    if let Some(database) = cli.database {
        builder = builder.db_conn_string(database);
    }
    let config = builder.build()?;

    info!("Starting explorer API");

    let db = DbConnection::with_options(
        config.db_conn_string,
        config.db_max_connections,
        config.slow_query,
    )
    .await
    .context("Failed to connect to the document store")?;
    let store = PgDocumentStore::new(Arc::new(db));
    let service = Arc::new(QueryService::new(Arc::new(store)));

    let should_terminate = Arc::new(AtomicBool::new(false));
    setup_ctrlc_handler(Arc::clone(&should_terminate))?;

    router::initialize_router(service, &config.router_endpoint, should_terminate).await?;

    info!("Explorer API stopped");
    Ok(())
}

fn setup_ctrlc_handler(should_terminate: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        info!("Received Ctrl+C");
        info!("Waiting for in-flight requests to finish...");
        should_terminate.store(true, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")
}
