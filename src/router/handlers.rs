use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::future::try_join4;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::{ErrorKind, QueryError};
use crate::models::{Block, ForkedBlock, Status, TokenTransfer, Transaction, Uncle};
use crate::repositories::QueryService;
use crate::store::DocumentStore;
use crate::types::{Address, BlockNumber, Hash, Limit, ParamError};

pub type SharedService<S> = Arc<QueryService<S>>;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Handler error, rendered as `{"error": "<message>"}`
#[derive(Debug)]
pub enum ApiError {
    Query(QueryError),
    Param(ParamError),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> Self {
        Self::Param(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Param(_) => StatusCode::BAD_REQUEST,
            Self::Query(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Query(err) => err.to_string(),
            Self::Param(err) => err.to_string(),
        };
        if status.is_server_error() {
            warn!(%message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// A capped list together with the total count for the same predicate
#[derive(Debug, Serialize)]
pub struct Paged<T> {
    pub total: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub blocks: u64,
    pub transactions: u64,
    pub uncles: u64,
    pub token_transfers: u64,
}

pub async fn health<S: DocumentStore>(
    State(service): State<SharedService<S>>,
) -> impl IntoResponse {
    match service.health_check().await {
        Ok(()) => (StatusCode::OK, "Healthy"),
        Err(e) => {
            warn!("Health check failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Db connection failed")
        }
    }
}

pub async fn block<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(number): Path<String>,
) -> ApiResult<Block> {
    let number: BlockNumber = number.parse()?;
    Ok(Json(service.block_by_number(number).await?))
}

pub async fn block_by_hash<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(hash): Path<String>,
) -> ApiResult<Block> {
    Ok(Json(service.block_by_hash(&Hash::new(hash)).await?))
}

pub async fn latest_block<S: DocumentStore>(
    State(service): State<SharedService<S>>,
) -> ApiResult<Block> {
    Ok(Json(service.latest_block().await?))
}

pub async fn status<S: DocumentStore>(
    State(service): State<SharedService<S>>,
) -> ApiResult<Status> {
    Ok(Json(service.status().await?))
}

pub async fn latest_blocks<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(limit): Path<String>,
) -> ApiResult<Vec<Block>> {
    let limit: Limit = limit.parse()?;
    Ok(Json(service.latest_blocks(limit).await?))
}

pub async fn latest_forked_blocks<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(limit): Path<String>,
) -> ApiResult<Vec<ForkedBlock>> {
    let limit: Limit = limit.parse()?;
    Ok(Json(service.latest_forked_blocks(limit).await?))
}

pub async fn latest_transactions<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(limit): Path<String>,
) -> ApiResult<Vec<Transaction>> {
    let limit: Limit = limit.parse()?;
    Ok(Json(service.latest_transactions(limit).await?))
}

pub async fn latest_token_transfers<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(limit): Path<String>,
) -> ApiResult<Vec<TokenTransfer>> {
    let limit: Limit = limit.parse()?;
    Ok(Json(service.latest_token_transfers(limit).await?))
}

pub async fn latest_uncles<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(limit): Path<String>,
) -> ApiResult<Vec<Uncle>> {
    let limit: Limit = limit.parse()?;
    Ok(Json(service.latest_uncles(limit).await?))
}

pub async fn transaction<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(hash): Path<String>,
) -> ApiResult<Transaction> {
    Ok(Json(service.transaction_by_hash(&Hash::new(hash)).await?))
}

pub async fn transaction_by_contract<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(address): Path<String>,
) -> ApiResult<Transaction> {
    Ok(Json(
        service
            .transaction_by_contract_address(&Address::new(address))
            .await?,
    ))
}

pub async fn transactions_by_block<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(number): Path<String>,
) -> ApiResult<Vec<Transaction>> {
    let number: BlockNumber = number.parse()?;
    Ok(Json(service.transactions_by_block_number(number).await?))
}

pub async fn uncle<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(hash): Path<String>,
) -> ApiResult<Uncle> {
    Ok(Json(service.uncle_by_hash(&Hash::new(hash)).await?))
}

pub async fn account_transactions<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(address): Path<String>,
) -> ApiResult<Paged<Transaction>> {
    let address = Address::new(address);
    let (items, total) = tokio::try_join!(
        service.latest_transactions_by_account(&address),
        service.txn_count(&address),
    )?;
    Ok(Json(Paged { total, items }))
}

pub async fn account_token_transfers<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(address): Path<String>,
) -> ApiResult<Paged<TokenTransfer>> {
    let address = Address::new(address);
    let (items, total) = tokio::try_join!(
        service.latest_token_transfers_by_account(&address),
        service.token_transfer_count(&address),
    )?;
    Ok(Json(Paged { total, items }))
}

pub async fn token_account_transfers<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path((contract, account)): Path<(String, String)>,
) -> ApiResult<Paged<TokenTransfer>> {
    let token = Address::new(contract);
    let account = Address::new(account);
    let (items, total) = tokio::try_join!(
        service.token_transfers_by_account(&token, &account),
        service.token_transfer_by_account_count(&token, &account),
    )?;
    Ok(Json(Paged { total, items }))
}

pub async fn contract_transfers<S: DocumentStore>(
    State(service): State<SharedService<S>>,
    Path(contract): Path<String>,
) -> ApiResult<Paged<TokenTransfer>> {
    let contract = Address::new(contract);
    let (items, total) = tokio::try_join!(
        service.latest_transfers_by_token(&contract),
        service.token_transfer_count_by_contract(&contract),
    )?;
    Ok(Json(Paged { total, items }))
}

pub async fn totals<S: DocumentStore>(
    State(service): State<SharedService<S>>,
) -> ApiResult<Totals> {
    let (blocks, transactions, uncles, token_transfers) = try_join4(
        service.total_block_count(),
        service.total_txn_count(),
        service.total_uncle_count(),
        service.total_token_transfer_count(),
    )
    .await?;
    Ok(Json(Totals {
        blocks,
        transactions,
        uncles,
        token_transfers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(QueryError::not_found("Block", 1u64));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let failure = ApiError::from(QueryError::store_unavailable("down"));
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let param = ApiError::from("x".parse::<Limit>().unwrap_err());
        assert_eq!(param.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_paged_envelope_shape() {
        let paged = Paged {
            total: 3,
            items: vec![1, 2],
        };
        assert_eq!(
            serde_json::to_value(paged).unwrap(),
            json!({ "total": 3, "items": [1, 2] })
        );
    }

    #[test]
    fn test_totals_are_camel_case() {
        let totals = Totals {
            blocks: 1,
            transactions: 2,
            uncles: 3,
            token_transfers: 4,
        };
        let value = serde_json::to_value(totals).unwrap();
        assert_eq!(value["tokenTransfers"], 4);
    }
}
