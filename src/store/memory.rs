use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::{Collection, DocumentStore, Filter, FindQuery};
use crate::errors::Result;

/// Document store held entirely in process memory.
///
/// Documents keep their insertion order, which is the natural order seen by
/// `find` without a sort and by `find_one`. Sorting is stable, so documents
/// with equal keys also keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document to a collection, standing in for the ingester
    pub fn insert<T: Serialize>(&self, collection: Collection, document: &T) -> Result<()> {
        let value = serde_json::to_value(document)?;
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(value);
        Ok(())
    }

    pub fn insert_all<'a, T, I>(&self, collection: Collection, documents: I) -> Result<()>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for document in documents {
            self.insert(collection, document)?;
        }
        Ok(())
    }

    fn matching(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(&self, collection: Collection, query: &FindQuery) -> Result<Vec<Value>> {
        debug!(
            %collection,
            filter = %query.filter,
            sort = ?query.sort,
            limit = ?query.limit,
            "memory find"
        );
        let mut docs = self.matching(collection, &query.filter)?;
        if let Some(sort) = query.sort {
            docs.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = query.limit {
            docs.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(docs)
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Value>> {
        debug!(%collection, %filter, "memory find_one");
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        debug!(%collection, %filter, "memory count");
        let collections = self.collections.read();
        let count = collections
            .get(&collection)
            .map_or(0, |docs| docs.iter().filter(|d| filter.matches(d)).count());
        Ok(count as u64)
    }

    async fn ping(&self) -> Result<()> {
        let _guard = self.collections.read();
        Ok(())
    }
}
