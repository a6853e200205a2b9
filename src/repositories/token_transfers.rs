use super::predicates::{account_filter, contract_filter, token_account_filter};
use super::{QueryService, ACCOUNT_PAGE_SIZE, CONTRACT_PAGE_SIZE};
use crate::errors::Result;
use crate::models::TokenTransfer;
use crate::store::{Collection, DocumentStore, Field, Filter, FindQuery, Sort};
use crate::types::{Address, Limit};

impl<S: DocumentStore> QueryService<S> {
    pub async fn latest_token_transfers(&self, limit: Limit) -> Result<Vec<TokenTransfer>> {
        self.latest(Collection::TokenTransfers, Field::BlockNumber, limit)
            .await
    }

    /// Up to [`ACCOUNT_PAGE_SIZE`] transfers of any token sent or received by `address`
    pub async fn latest_token_transfers_by_account(
        &self,
        address: &Address,
    ) -> Result<Vec<TokenTransfer>> {
        self.find_many(
            Collection::TokenTransfers,
            FindQuery::new(account_filter(address))
                .sort(Sort::Descending(Field::BlockNumber))
                .limit(ACCOUNT_PAGE_SIZE),
        )
        .await
    }

    /// Total behind [`Self::latest_token_transfers_by_account`]
    pub async fn token_transfer_count(&self, address: &Address) -> Result<u64> {
        self.count(Collection::TokenTransfers, account_filter(address))
            .await
    }

    /// Every transfer of `token` that `account` sent or received, newest first.
    ///
    /// Unbounded: the result grows with the account's history.
    pub async fn token_transfers_by_account(
        &self,
        token: &Address,
        account: &Address,
    ) -> Result<Vec<TokenTransfer>> {
        self.find_many(
            Collection::TokenTransfers,
            FindQuery::new(token_account_filter(token, account))
                .sort(Sort::Descending(Field::BlockNumber)),
        )
        .await
    }

    /// Total behind [`Self::token_transfers_by_account`]
    pub async fn token_transfer_by_account_count(
        &self,
        token: &Address,
        account: &Address,
    ) -> Result<u64> {
        self.count(
            Collection::TokenTransfers,
            token_account_filter(token, account),
        )
        .await
    }

    /// Up to [`CONTRACT_PAGE_SIZE`] transfers emitted by `contract`
    pub async fn latest_transfers_by_token(
        &self,
        contract: &Address,
    ) -> Result<Vec<TokenTransfer>> {
        self.find_many(
            Collection::TokenTransfers,
            FindQuery::new(contract_filter(contract))
                .sort(Sort::Descending(Field::BlockNumber))
                .limit(CONTRACT_PAGE_SIZE),
        )
        .await
    }

    /// Total behind [`Self::latest_transfers_by_token`]
    pub async fn token_transfer_count_by_contract(&self, contract: &Address) -> Result<u64> {
        self.count(Collection::TokenTransfers, contract_filter(contract))
            .await
    }

    pub async fn total_token_transfer_count(&self) -> Result<u64> {
        self.count(Collection::TokenTransfers, Filter::All).await
    }
}
