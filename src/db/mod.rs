use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Pool, Postgres};
use std::time::Duration;
use tracing::info;

use crate::errors::{QueryError, Result};


pub const DB_MAX_CONNECTIONS: u32 = 50;

/// Slow statements are logged at debug level once they exceed this duration
pub const DEFAULT_SLOW_QUERY: Duration = Duration::from_secs(10);

/// Connection pool shared by every query for the lifetime of the process
#[derive(Debug)]
pub struct DbConnection {
    pub pool: Pool<Postgres>,
}

impl DbConnection {
    pub async fn new(db_conn_string: String) -> Result<Self> {
        Self::with_options(db_conn_string, DB_MAX_CONNECTIONS, DEFAULT_SLOW_QUERY).await
    }

    pub async fn with_options(
        db_conn_string: String,
        max_connections: u32,
        slow_query: Duration,
    ) -> Result<Self> {
        let conn_options: PgConnectOptions = db_conn_string.parse().map_err(|e| {
            QueryError::store_unavailable(format!("Invalid connection string: {e}"))
        })?;
        let conn_options =
            conn_options.log_slow_statements(tracing::log::LevelFilter::Debug, slow_query);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(conn_options)
            .await?;

        info!(max_connections, "Connected to document store database");

        Ok(Self { pool })
    }

    pub async fn check_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
