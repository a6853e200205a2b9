use thiserror::Error;

/// The two outcomes a query can fail with.
///
/// `NotFound` is an expected result for unknown hashes and numbers, while
/// `StoreFailure` covers everything that went wrong talking to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StoreFailure,
}

/// Errors surfaced by the explorer query layer
#[derive(Error, Debug)]
pub enum QueryError {
    /// A point lookup matched zero documents
    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    /// The store could not be reached
    #[error("Store connection failed: {message}")]
    StoreUnavailable { message: String },

    /// The store rejected or failed to execute a query
    #[error("Store query failed on {collection}: {message}")]
    QueryFailed {
        collection: String,
        message: String,
    },

    /// A stored document could not be decoded into its entity type
    #[error("Malformed document in {collection}: {message}")]
    MalformedDocument {
        collection: String,
        message: String,
    },
}

impl QueryError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.to_string(),
        }
    }

    /// Create a store connection error
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Create a query execution error
    pub fn query_failed(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a malformed document error
    pub fn malformed(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            collection: collection.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::StoreUnavailable { .. }
            | Self::QueryFailed { .. }
            | Self::MalformedDocument { .. } => ErrorKind::StoreFailure,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }

    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::StoreFailure)
    }
}

/// Result type alias for explorer queries
pub type Result<T> = std::result::Result<T, QueryError>;

/// Convert from database driver errors
impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => Self::query_failed("database", db_err.to_string()),
            sqlx::Error::PoolClosed => Self::store_unavailable("Connection pool closed"),
            sqlx::Error::PoolTimedOut => Self::store_unavailable("Connection pool timed out"),
            sqlx::Error::Io(io_err) => Self::store_unavailable(format!("I/O error: {io_err}")),
            sqlx::Error::ColumnDecode { index, source } => {
                Self::malformed("database", format!("column {index}: {source}"))
            }
            _ => Self::store_unavailable(format!("SQLx error: {err}")),
        }
    }
}

/// Stored documents that fail to decode are malformed data, not a missing record
impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed("document", err.to_string())
    }
}
