//! PostgreSQL backend for [`DocumentStore`].
//!
//! Each collection is a table `<collection>(id BIGSERIAL PRIMARY KEY, doc JSONB NOT NULL)`
//! written by the ingester. `id` records insertion order and serves as the
//! natural order. Equality predicates lower to JSONB containment
//! (`doc @> '{"field": value}'`), which compares JSON types exactly and can
//! use a GIN index on `doc`.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

use super::{Collection, DocumentStore, Filter, FindQuery, Sort};
use crate::db::DbConnection;
use crate::errors::{QueryError, Result};

pub struct PgDocumentStore {
    db: Arc<DbConnection>,
}

impl PgDocumentStore {
    #[must_use]
    pub const fn new(db: Arc<DbConnection>) -> Self {
        Self { db }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push("TRUE");
        }
        Filter::Eq { field, value } => {
            let mut fragment = Map::new();
            fragment.insert(field.name().to_string(), value.to_json());
            builder.push("doc @> ");
            builder.push_bind(Value::Object(fragment));
        }
        Filter::Or(branches) if branches.is_empty() => {
            builder.push("FALSE");
        }
        Filter::And(branches) if branches.is_empty() => {
            builder.push("TRUE");
        }
        Filter::Or(branches) => push_branches(builder, branches, " OR "),
        Filter::And(branches) => push_branches(builder, branches, " AND "),
    }
}

fn push_branches(builder: &mut QueryBuilder<'_, Postgres>, branches: &[Filter], op: &str) {
    builder.push("(");
    for (i, branch) in branches.iter().enumerate() {
        if i > 0 {
            builder.push(op);
        }
        push_filter(builder, branch);
    }
    builder.push(")");
}

fn push_sort(builder: &mut QueryBuilder<'_, Postgres>, sort: Option<Sort>) {
    match sort {
        // Missing keys sort as NULL and go last, ties fall back to insertion order
        Some(Sort::Descending(field)) => {
            builder.push(format!(
                " ORDER BY (doc->>'{}')::NUMERIC DESC NULLS LAST, id ASC",
                field.name()
            ));
        }
        Some(Sort::Ascending(field)) => {
            builder.push(format!(
                " ORDER BY (doc->>'{}')::NUMERIC ASC NULLS FIRST, id ASC",
                field.name()
            ));
        }
        None => {
            builder.push(" ORDER BY id ASC");
        }
    }
}

pub(crate) fn build_find_query(
    collection: Collection,
    query: &FindQuery,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT doc FROM {} WHERE ", collection.name()));
    push_filter(&mut builder, &query.filter);
    push_sort(&mut builder, query.sort);
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ");
        builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    }
    builder
}

pub(crate) fn build_find_one_query(
    collection: Collection,
    filter: &Filter,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT doc FROM {} WHERE ", collection.name()));
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY id ASC LIMIT 1");
    builder
}

pub(crate) fn build_count_query(
    collection: Collection,
    filter: &Filter,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT COUNT(*) FROM {} WHERE ",
        collection.name()
    ));
    push_filter(&mut builder, filter);
    builder
}

fn store_error(collection: Collection, err: sqlx::Error) -> QueryError {
    match err {
        sqlx::Error::Database(db_err) => {
            QueryError::query_failed(collection.name(), db_err.to_string())
        }
        other => other.into(),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(&self, collection: Collection, query: &FindQuery) -> Result<Vec<Value>> {
        let mut builder = build_find_query(collection, query);
        debug!(%collection, sql = builder.sql(), "pg find");
        let rows: Vec<(Value,)> = builder
            .build_query_as()
            .fetch_all(&self.db.pool)
            .await
            .map_err(|e| store_error(collection, e))?;
        Ok(rows.into_iter().map(|(doc,)| doc).collect())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Value>> {
        let mut builder = build_find_one_query(collection, filter);
        debug!(%collection, sql = builder.sql(), "pg find_one");
        let row: Option<(Value,)> = builder
            .build_query_as()
            .fetch_optional(&self.db.pool)
            .await
            .map_err(|e| store_error(collection, e))?;
        Ok(row.map(|(doc,)| doc))
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut builder = build_count_query(collection, filter);
        debug!(%collection, sql = builder.sql(), "pg count");
        let (count,): (i64,) = builder
            .build_query_as()
            .fetch_one(&self.db.pool)
            .await
            .map_err(|e| store_error(collection, e))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        self.db.check_connection().await
    }
}
