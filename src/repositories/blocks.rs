use super::QueryService;
use crate::errors::{QueryError, Result};
use crate::models::{Block, ForkedBlock};
use crate::store::{Collection, DocumentStore, Field, Filter, FindQuery, Sort};
use crate::types::{BlockNumber, Hash, Limit};

impl<S: DocumentStore> QueryService<S> {
    pub async fn block_by_number(&self, number: BlockNumber) -> Result<Block> {
        self.find_first(
            Collection::Blocks,
            Filter::eq(Field::Number, number.value()),
            "Block",
            number,
        )
        .await
    }

    pub async fn block_by_hash(&self, hash: &Hash) -> Result<Block> {
        self.find_first(
            Collection::Blocks,
            Filter::eq(Field::Hash, hash.value()),
            "Block",
            hash,
        )
        .await
    }

    /// Highest-numbered block, or `NotFound` while the collection is empty
    pub async fn latest_block(&self) -> Result<Block> {
        let blocks: Vec<Block> = self
            .find_many(
                Collection::Blocks,
                FindQuery::all().sort(Sort::Descending(Field::Number)).limit(1),
            )
            .await?;
        blocks
            .into_iter()
            .next()
            .ok_or_else(|| QueryError::not_found("Block", "latest"))
    }

    pub async fn latest_blocks(&self, limit: Limit) -> Result<Vec<Block>> {
        self.latest(Collection::Blocks, Field::Number, limit).await
    }

    pub async fn latest_forked_blocks(&self, limit: Limit) -> Result<Vec<ForkedBlock>> {
        self.latest(Collection::ForkedBlocks, Field::Number, limit)
            .await
    }

    pub async fn total_block_count(&self) -> Result<u64> {
        self.count(Collection::Blocks, Filter::All).await
    }
}
