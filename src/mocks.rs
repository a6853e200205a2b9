//! # Mock Implementations for Testing
//!
//! This module provides a mock of the [`crate::store::DocumentStore`] trait so the query layer
//! can be tested for exact store interactions and failure propagation without a
//! database.
//!

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]
//! ## Usage
//!
//! These mocks are only available when building with the `cfg(test)` attribute.

#[cfg(test)]
use mockall::mock;

#[cfg(test)]
use crate::errors::Result;
#[cfg(test)]
use crate::store::{Collection, DocumentStore, Filter, FindQuery};
#[cfg(test)]
use serde_json::Value;

#[cfg(test)]
mock! {
    /// Mock implementation of the document store trait.
    ///
    /// Configure expected calls and canned documents with the mockall framework.
    pub DocumentStore {}

    #[async_trait::async_trait]
    impl DocumentStore for DocumentStore {
        async fn find(&self, collection: Collection, query: &FindQuery) -> Result<Vec<Value>>;
        async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Value>>;
        async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64>;
        async fn ping(&self) -> Result<()>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, QueryError};
    use crate::repositories::predicates::{account_filter, token_account_filter};
    use crate::repositories::{QueryService, ACCOUNT_PAGE_SIZE, CONTRACT_PAGE_SIZE};
    use crate::store::{Field, Sort};
    use crate::types::{Address, BlockNumber, Hash, Limit};
    use mockall::predicate::eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn service(store: MockDocumentStore) -> QueryService<MockDocumentStore> {
        QueryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_store_failure_propagates_verbatim() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find()
            .times(1)
            .returning(|_, _| Err(QueryError::store_unavailable("connection refused")));

        let err = service(store)
            .latest_blocks(Limit::new(10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_point_lookup_failure_is_not_reported_as_not_found() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .times(1)
            .returning(|_, _| Err(QueryError::query_failed("blocks", "timeout")));

        let err = service(store)
            .block_by_number(BlockNumber::new(1))
            .await
            .unwrap_err();
        assert!(err.is_store_failure());
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_zero_limit_skips_the_store() {
        let mut store = MockDocumentStore::new();
        store.expect_find().times(0);

        let svc = service(store);
        assert!(svc.latest_blocks(Limit::new(0)).await.unwrap().is_empty());
        assert!(svc.latest_uncles(Limit::new(0)).await.unwrap().is_empty());
        assert!(svc
            .latest_token_transfers(Limit::new(0))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_latest_blocks_query_shape() {
        let mut store = MockDocumentStore::new();
        let expected = FindQuery::all()
            .sort(Sort::Descending(Field::Number))
            .limit(25);
        store
            .expect_find()
            .with(eq(Collection::Blocks), eq(expected))
            .times(1)
            .returning(|_, _| Ok(vec![json!({ "number": 3 })]));

        let blocks = service(store).latest_blocks(Limit::new(25)).await.unwrap();
        assert_eq!(blocks[0].number, 3);
    }

    #[tokio::test]
    async fn test_forked_blocks_read_their_own_collection() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find()
            .withf(|collection, query| {
                *collection == Collection::ForkedBlocks
                    && query.sort == Some(Sort::Descending(Field::Number))
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        service(store)
            .latest_forked_blocks(Limit::new(5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_account_list_and_count_share_predicate() {
        let seen: Arc<Mutex<Vec<Filter>>> = Arc::new(Mutex::new(Vec::new()));
        let mut store = MockDocumentStore::new();

        let find_seen = Arc::clone(&seen);
        store
            .expect_find()
            .withf(|collection, query| {
                *collection == Collection::Transactions
                    && query.limit == Some(ACCOUNT_PAGE_SIZE)
                    && query.sort == Some(Sort::Descending(Field::BlockNumber))
            })
            .times(1)
            .returning(move |_, query| {
                find_seen.lock().unwrap().push(query.filter.clone());
                Ok(vec![])
            });
        let count_seen = Arc::clone(&seen);
        store
            .expect_count()
            .with(eq(Collection::Transactions), mockall::predicate::always())
            .times(1)
            .returning(move |_, filter| {
                count_seen.lock().unwrap().push(filter.clone());
                Ok(0)
            });

        let svc = service(store);
        let account = Address::from("0xa");
        svc.latest_transactions_by_account(&account).await.unwrap();
        svc.txn_count(&account).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0], account_filter(&account));
    }

    #[tokio::test]
    async fn test_token_account_queries_share_predicate() {
        let token = Address::from("0xt");
        let account = Address::from("0xa");
        let expected = token_account_filter(&token, &account);

        let mut store = MockDocumentStore::new();
        let find_filter = expected.clone();
        store
            .expect_find()
            .withf(move |collection, query| {
                *collection == Collection::TokenTransfers
                    && query.filter == find_filter
                    && query.limit.is_none()
                    && query.sort == Some(Sort::Descending(Field::BlockNumber))
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));
        store
            .expect_count()
            .with(eq(Collection::TokenTransfers), eq(expected))
            .times(1)
            .returning(|_, _| Ok(7));

        let svc = service(store);
        svc.token_transfers_by_account(&token, &account)
            .await
            .unwrap();
        assert_eq!(
            svc.token_transfer_by_account_count(&token, &account)
                .await
                .unwrap(),
            7
        );
    }

    #[tokio::test]
    async fn test_contract_list_is_capped() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find()
            .withf(|_, query| {
                query.limit == Some(CONTRACT_PAGE_SIZE)
                    && query.filter == Filter::eq(Field::Contract, "0xt")
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        service(store)
            .latest_transfers_by_token(&Address::from("0xt"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_block_scoped_query_has_no_sort_or_limit() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find()
            .with(
                eq(Collection::Transactions),
                eq(FindQuery::new(Filter::eq(Field::BlockNumber, 9u64))),
            )
            .times(1)
            .returning(|_, _| Ok(vec![]));

        service(store)
            .transactions_by_block_number(BlockNumber::new(9))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_malformed_document_is_store_failure() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .with(eq(Collection::Uncles), eq(Filter::eq(Field::Hash, "0x1")))
            .times(1)
            .returning(|_, _| Ok(Some(json!({ "blockNumber": "not a number" }))));

        let err = service(store)
            .uncle_by_hash(&Hash::from("0x1"))
            .await
            .unwrap_err();
        assert!(err.is_store_failure());
        assert!(err.to_string().contains("uncles"));
    }

    #[tokio::test]
    async fn test_health_check_uses_ping() {
        let mut store = MockDocumentStore::new();
        store
            .expect_ping()
            .times(1)
            .returning(|| Err(QueryError::store_unavailable("down")));

        assert!(service(store).health_check().await.is_err());
    }
}
