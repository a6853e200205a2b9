//! # Explorer Entities
//!
//! Typed views of the documents written by the chain ingester. Field names
//! follow the stored camelCase layout so the same structs decode store
//! documents and encode API responses.
//!
//! Every struct carries `#[serde(default)]`: documents written by older
//! ingester versions omit fields, and a missing field reads as its zero value.
//! A field holding the wrong JSON type still fails to decode and is reported
//! as malformed stored data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub number: u64,
    pub timestamp: u64,
    /// Number of transactions in the block
    pub transactions: u64,
    pub hash: String,
    pub parent_hash: String,
    pub sha3_uncles: String,
    pub miner: String,
    pub difficulty: String,
    pub total_difficulty: String,
    pub size: u64,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub nonce: String,
    /// Number of uncles referenced by the block
    pub uncles: u64,
    pub block_reward: String,
    pub uncles_reward: String,
    pub avg_gas_price: String,
    pub tx_fees: String,
    pub extra_data: String,
}

/// A block orphaned by a reorganization, kept in its own collection
pub type ForkedBlock = Block;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: u64,
    pub transaction_index: u64,
    pub transaction_hash: String,
    pub block_hash: String,
    pub log_index: u64,
    pub removed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub block_hash: String,
    pub block_number: u64,
    pub hash: String,
    pub timestamp: u64,
    pub input: String,
    pub value: String,
    pub gas: u64,
    pub gas_used: u64,
    pub gas_price: String,
    pub nonce: u64,
    pub transaction_index: u64,
    pub from: String,
    pub to: String,
    /// Empty unless the transaction created a contract
    pub contract_address: String,
    pub logs: Vec<TxLog>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Uncle {
    pub number: u64,
    pub position: u64,
    /// Height of the canonical block that included this uncle
    pub block_number: u64,
    pub hash: String,
    pub parent_hash: String,
    pub sha3_uncles: String,
    pub miner: String,
    pub difficulty: String,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub timestamp: u64,
    pub reward: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    pub block_number: u64,
    pub hash: String,
    pub timestamp: u64,
    pub from: String,
    pub to: String,
    pub value: String,
    /// Address of the token contract that emitted the transfer
    pub contract: String,
    pub method: String,
}

/// Rolling network statistics, overwritten in place by the ingester
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    pub timestamp: u64,
    pub symbol: String,
    pub supply: String,
    pub latest_block: Block,
    pub price: String,
}
