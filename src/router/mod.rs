//! # HTTP Router
//!
//! JSON endpoints over the [`QueryService`], plus a health check at `/` that
//! pings the store.
//!
//! ## Endpoints
//!
//! | Route | Response |
//! |---|---|
//! | `GET /` | `Healthy` or 500 when the store is unreachable |
//! | `GET /block/:number`, `/blockbyhash/:hash`, `/latest` | a block |
//! | `GET /latestblocks/:limit`, `/latestforkedblocks/:limit` | blocks, newest first |
//! | `GET /latesttransactions/:limit`, `/latesttokentransfers/:limit` | newest first |
//! | `GET /latestuncles/:limit` | uncles, newest first |
//! | `GET /transaction/:hash`, `/transactionbycontract/:address` | a single record |
//! | `GET /uncle/:hash` | a single uncle |
//! | `GET /transactionsbyblock/:number` | transactions of one block |
//! | `GET /accounttxns/:address`, `/accounttokentransfers/:address` | `{"total", "items"}` |
//! | `GET /tokentransfers/:contract/:account`, `/tokentransfers/:contract` | `{"total", "items"}` |
//! | `GET /status`, `/totals` | network statistics and collection totals |
//!
//! Limits above [`crate::types::MAX_LIMIT`] are clamped; malformed limits and
//! block numbers are rejected with 400. Unknown records are 404, store
//! failures 500, both with an `{"error": "..."}` body.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_explorer_db::repositories::QueryService;
//! use ledger_explorer_db::router::initialize_router;
//! use ledger_explorer_db::store::memory::InMemoryStore;
//! use std::sync::{Arc, atomic::AtomicBool};
//!
//! # async fn example() -> eyre::Result<()> {
//! let should_terminate = Arc::new(AtomicBool::new(false));
//! let service = Arc::new(QueryService::new(Arc::new(InMemoryStore::new())));
//! initialize_router(service, "127.0.0.1:8080", should_terminate).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::{sync::Arc, time::Duration};

use axum::{routing::get, Router};
use eyre::Result;
use tokio::{net::TcpListener, time::sleep};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::repositories::QueryService;
use crate::store::DocumentStore;

pub mod handlers;

/// Builds the explorer API over `service`
pub fn api_router<S: DocumentStore + 'static>(service: Arc<QueryService<S>>) -> Router {
    Router::new()
        .route("/", get(handlers::health::<S>))
        .route("/block/:number", get(handlers::block::<S>))
        .route("/blockbyhash/:hash", get(handlers::block_by_hash::<S>))
        .route("/latest", get(handlers::latest_block::<S>))
        .route("/status", get(handlers::status::<S>))
        .route("/latestblocks/:limit", get(handlers::latest_blocks::<S>))
        .route(
            "/latestforkedblocks/:limit",
            get(handlers::latest_forked_blocks::<S>),
        )
        .route(
            "/latesttransactions/:limit",
            get(handlers::latest_transactions::<S>),
        )
        .route(
            "/latesttokentransfers/:limit",
            get(handlers::latest_token_transfers::<S>),
        )
        .route("/latestuncles/:limit", get(handlers::latest_uncles::<S>))
        .route("/transaction/:hash", get(handlers::transaction::<S>))
        .route(
            "/transactionbycontract/:address",
            get(handlers::transaction_by_contract::<S>),
        )
        .route(
            "/transactionsbyblock/:number",
            get(handlers::transactions_by_block::<S>),
        )
        .route("/uncle/:hash", get(handlers::uncle::<S>))
        .route(
            "/accounttxns/:address",
            get(handlers::account_transactions::<S>),
        )
        .route(
            "/accounttokentransfers/:address",
            get(handlers::account_token_transfers::<S>),
        )
        .route(
            "/tokentransfers/:contract/:account",
            get(handlers::token_account_transfers::<S>),
        )
        .route(
            "/tokentransfers/:contract",
            get(handlers::contract_transfers::<S>),
        )
        .route("/totals", get(handlers::totals::<S>))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

pub async fn initialize_router<S: DocumentStore + 'static>(
    service: Arc<QueryService<S>>,
    endpoint: &str,
    should_terminate: Arc<AtomicBool>,
) -> Result<()> {
    let app = api_router(service);

    let listener: TcpListener = TcpListener::bind(endpoint)
        .await
        .map_err(|e| eyre::eyre!("Failed to bind {}: {}", endpoint, e))?;

    info!(
        "->> LISTENING on {}\n",
        listener
            .local_addr()
            .map_err(|e| eyre::eyre!("Failed to get local address: {}", e))?
    );
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(should_terminate))
        .await?;

    Ok(())
}

async fn shutdown_signal(should_terminate: Arc<AtomicBool>) {
    while !should_terminate.load(Ordering::SeqCst) {
        sleep(Duration::from_millis(500)).await;
    }
    info!("Shutdown signal received, shutting down router");
}
