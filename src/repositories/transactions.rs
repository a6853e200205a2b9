use super::predicates::account_filter;
use super::{QueryService, ACCOUNT_PAGE_SIZE};
use crate::errors::Result;
use crate::models::Transaction;
use crate::store::{Collection, DocumentStore, Field, Filter, FindQuery, Sort};
use crate::types::{Address, BlockNumber, Hash, Limit};

impl<S: DocumentStore> QueryService<S> {
    pub async fn transaction_by_hash(&self, hash: &Hash) -> Result<Transaction> {
        self.find_first(
            Collection::Transactions,
            Filter::eq(Field::Hash, hash.value()),
            "Transaction",
            hash,
        )
        .await
    }

    /// The transaction that created the contract at `address`
    pub async fn transaction_by_contract_address(&self, address: &Address) -> Result<Transaction> {
        self.find_first(
            Collection::Transactions,
            Filter::eq(Field::ContractAddress, address.value()),
            "Transaction",
            address,
        )
        .await
    }

    /// All transactions of a block, in the order they were stored
    pub async fn transactions_by_block_number(
        &self,
        number: BlockNumber,
    ) -> Result<Vec<Transaction>> {
        self.find_many(
            Collection::Transactions,
            FindQuery::new(Filter::eq(Field::BlockNumber, number.value())),
        )
        .await
    }

    pub async fn latest_transactions(&self, limit: Limit) -> Result<Vec<Transaction>> {
        self.latest(Collection::Transactions, Field::BlockNumber, limit)
            .await
    }

    /// Up to [`ACCOUNT_PAGE_SIZE`] transactions sent or received by `address`, newest first
    pub async fn latest_transactions_by_account(
        &self,
        address: &Address,
    ) -> Result<Vec<Transaction>> {
        self.find_many(
            Collection::Transactions,
            FindQuery::new(account_filter(address))
                .sort(Sort::Descending(Field::BlockNumber))
                .limit(ACCOUNT_PAGE_SIZE),
        )
        .await
    }

    /// Total behind [`Self::latest_transactions_by_account`]
    pub async fn txn_count(&self, address: &Address) -> Result<u64> {
        self.count(Collection::Transactions, account_filter(address))
            .await
    }

    pub async fn total_txn_count(&self) -> Result<u64> {
        self.count(Collection::Transactions, Filter::All).await
    }
}
