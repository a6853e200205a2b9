//! # Document Store Abstraction
//!
//! The query layer talks to storage only through the [`DocumentStore`] trait,
//! which offers three read primitives per logical collection:
//!
//! - `find` with a filter, an optional sort and an optional limit
//! - `find_one` returning the first match in natural order
//! - `count` of the documents matching a filter
//!
//! ## Backends
//!
//! - [`memory::InMemoryStore`] - documents held in process, used by tests and demos
//! - [`postgres::PgDocumentStore`] - JSONB tables in PostgreSQL
//!
//! "Natural order" is the order the ingester wrote documents in. Point lookups
//! on fields that turn out not to be unique return whichever match comes
//! first in that order.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::errors::Result;

pub mod filter;
pub mod memory;
pub mod postgres;

pub use filter::{Field, FieldValue, Filter, FindQuery, Sort};

/// Logical collections addressed by the explorer.
///
/// The names are a contract with the ingester that populates the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Blocks,
    Transactions,
    Uncles,
    TokenTransfers,
    ForkedBlocks,
    Status,
}

impl Collection {
    pub const ALL: [Self; 6] = [
        Self::Blocks,
        Self::Transactions,
        Self::Uncles,
        Self::TokenTransfers,
        Self::ForkedBlocks,
        Self::Status,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Transactions => "transactions",
            Self::Uncles => "uncles",
            Self::TokenTransfers => "tokentransfers",
            Self::ForkedBlocks => "forkedblocks",
            Self::Status => "sysstores",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read access to a document store.
///
/// Implementations must be safe to share across tasks; the query layer holds
/// one instance for the lifetime of the process.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the documents matching `query.filter`, ordered by `query.sort`
    /// (natural order when absent) and truncated to `query.limit`
    async fn find(&self, collection: Collection, query: &FindQuery) -> Result<Vec<Value>>;

    /// Returns the first document matching `filter` in natural order
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Value>>;

    /// Counts the documents matching `filter` without materializing them
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<()>;
}
