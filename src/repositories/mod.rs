//! # Explorer Query Layer
//!
//! This module maps explorer questions ("latest N blocks", "transfers of token
//! X involving account Y", "total transaction count") onto the read primitives
//! of a [`DocumentStore`]. Every operation is a pure translation of typed
//! parameters into a filter, a sort and a limit, followed by decoding of the
//! returned documents.
//!
//! ## Query Families
//!
//! - [`blocks`] - point lookups, latest blocks, forked blocks and block totals
//! - [`transactions`] - point lookups, block and account scoped lists, counts
//! - [`uncles`] - point lookups, latest uncles and uncle totals
//! - [`token_transfers`] - account, token and contract scoped lists with paired counts
//! - [`status`] - the singleton network statistics document
//!
//! ## Semantics
//!
//! - "Latest" always means descending by `number` for blocks and by
//!   `blockNumber` for everything else.
//! - A limit of zero returns no records without touching the store.
//! - Point lookups that match nothing fail with [`QueryError::NotFound`];
//!   store failures are returned as is, with no retry.
//! - Paired list and count queries share one predicate builder from
//!   [`predicates`], so for a stable dataset `count >= list.len()` and they are
//!   equal whenever the list is shorter than its cap. The two reads are
//!   independent and may observe different snapshots of a changing store.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_explorer_db::repositories::QueryService;
//! use ledger_explorer_db::store::memory::InMemoryStore;
//! use ledger_explorer_db::types::Limit;
//! use std::sync::Arc;
//!
//! # async fn example() -> ledger_explorer_db::Result<()> {
//! let service = QueryService::new(Arc::new(InMemoryStore::new()));
//! let blocks = service.latest_blocks(Limit::new(10)).await?;
//! println!("{} blocks", blocks.len());
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{QueryError, Result};
use crate::store::{Collection, DocumentStore, Field, Filter, FindQuery, Sort};
use crate::types::Limit;

pub mod blocks;
pub mod predicates;
pub mod status;
pub mod token_transfers;
pub mod transactions;
pub mod uncles;

/// Cap on account-scoped transaction and transfer lists
pub const ACCOUNT_PAGE_SIZE: u64 = 100;

/// Cap on contract-scoped transfer lists
pub const CONTRACT_PAGE_SIZE: u64 = 1000;

/// Typed read API over the explorer collections.
///
/// The service holds nothing but the injected store handle, so it can be
/// shared freely between concurrent requests.
pub struct QueryService<S> {
    store: Arc<S>,
}

impl<S> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> QueryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Verifies the underlying store is reachable
    pub async fn health_check(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn find_many<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> Result<Vec<T>> {
        debug!(
            %collection,
            filter = %query.filter,
            sort = ?query.sort,
            limit = ?query.limit,
            "find"
        );
        self.store
            .find(collection, &query)
            .await?
            .into_iter()
            .map(|doc| decode(collection, doc))
            .collect()
    }

    /// Latest-N list: no filter, descending by `field`, at most `limit` records
    async fn latest<T: DeserializeOwned>(
        &self,
        collection: Collection,
        field: Field,
        limit: Limit,
    ) -> Result<Vec<T>> {
        if limit.value() == 0 {
            return Ok(Vec::new());
        }
        self.find_many(
            collection,
            FindQuery::all()
                .sort(Sort::Descending(field))
                .limit(limit.value()),
        )
        .await
    }

    async fn find_first<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filter: Filter,
        entity: &'static str,
        identifier: impl Display,
    ) -> Result<T> {
        debug!(%collection, %filter, "find_one");
        match self.store.find_one(collection, &filter).await? {
            Some(doc) => decode(collection, doc),
            None => Err(QueryError::not_found(entity, identifier)),
        }
    }

    async fn count(&self, collection: Collection, filter: Filter) -> Result<u64> {
        debug!(%collection, %filter, "count");
        self.store.count(collection, &filter).await
    }
}

fn decode<T: DeserializeOwned>(collection: Collection, doc: Value) -> Result<T> {
    serde_json::from_value(doc).map_err(|e| QueryError::malformed(collection.name(), e.to_string()))
}
