use super::QueryService;
use crate::errors::Result;
use crate::models::Uncle;
use crate::store::{Collection, DocumentStore, Field, Filter};
use crate::types::{Hash, Limit};

impl<S: DocumentStore> QueryService<S> {
    pub async fn uncle_by_hash(&self, hash: &Hash) -> Result<Uncle> {
        self.find_first(
            Collection::Uncles,
            Filter::eq(Field::Hash, hash.value()),
            "Uncle",
            hash,
        )
        .await
    }

    /// Most recently included uncles, ordered by the including block
    pub async fn latest_uncles(&self, limit: Limit) -> Result<Vec<Uncle>> {
        self.latest(Collection::Uncles, Field::BlockNumber, limit)
            .await
    }

    pub async fn total_uncle_count(&self) -> Result<u64> {
        self.count(Collection::Uncles, Filter::All).await
    }
}
