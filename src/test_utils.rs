//! # Test Utilities
//!
//! This module provides common fixtures and assertions for testing the query layer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(dead_code)]

#[cfg(test)]
pub mod test_data {
    use std::sync::Arc;

    use crate::models::{Block, Status, TokenTransfer, Transaction, Uncle};
    use crate::repositories::QueryService;
    use crate::store::memory::InMemoryStore;
    use crate::store::Collection;

    pub const ALICE: &str = "0x742d35cc6969c0532b5f52aa3d3f4d7b4a4f8c7e";
    pub const BOB: &str = "0x8ba1f109551bd432803012645aac136c1235a67d";
    pub const CAROL: &str = "0x1111111111111111111111111111111111111111";
    pub const TOKEN: &str = "0x2222222222222222222222222222222222222222";
    pub const OTHER_TOKEN: &str = "0x3333333333333333333333333333333333333333";

    /// Deterministic 32-byte hex hash derived from a tag and a sequence number
    pub fn hash(tag: u8, seq: u64) -> String {
        format!("0x{tag:02x}{seq:062x}")
    }

    pub fn block(number: u64) -> Block {
        Block {
            number,
            timestamp: 1_500_000_000 + number * 88,
            hash: hash(0xb0, number),
            parent_hash: hash(0xb0, number.saturating_sub(1)),
            miner: ALICE.to_string(),
            difficulty: "1000".to_string(),
            total_difficulty: (1000 * (number + 1)).to_string(),
            gas_limit: 8_000_000,
            ..Block::default()
        }
    }

    pub fn transaction(seq: u64, block_number: u64, from: &str, to: &str) -> Transaction {
        Transaction {
            hash: hash(0x70, seq),
            block_number,
            block_hash: hash(0xb0, block_number),
            from: from.to_string(),
            to: to.to_string(),
            value: "1000000000000000000".to_string(),
            gas: 21_000,
            gas_used: 21_000,
            gas_price: "20000000000".to_string(),
            transaction_index: seq,
            ..Transaction::default()
        }
    }

    pub fn contract_creation(
        seq: u64,
        block_number: u64,
        from: &str,
        contract: &str,
    ) -> Transaction {
        Transaction {
            contract_address: contract.to_string(),
            to: String::new(),
            ..transaction(seq, block_number, from, "")
        }
    }

    pub fn uncle(seq: u64, block_number: u64) -> Uncle {
        Uncle {
            number: block_number.saturating_sub(1),
            block_number,
            hash: hash(0x0c, seq),
            reward: "3500000000000000000".to_string(),
            ..Uncle::default()
        }
    }

    pub fn transfer(
        seq: u64,
        block_number: u64,
        from: &str,
        to: &str,
        contract: &str,
    ) -> TokenTransfer {
        TokenTransfer {
            block_number,
            hash: hash(0x7f, seq),
            from: from.to_string(),
            to: to.to_string(),
            value: "42".to_string(),
            contract: contract.to_string(),
            method: "transfer".to_string(),
            ..TokenTransfer::default()
        }
    }

    pub fn status() -> Status {
        Status {
            timestamp: 1_600_000_000,
            symbol: "UBQ".to_string(),
            supply: "42000000".to_string(),
            latest_block: block(12),
            price: "0.25".to_string(),
        }
    }

    /// A small chain: blocks 10-12, one orphaned block, uncles, transactions
    /// and token transfers spread over ALICE, BOB and CAROL.
    ///
    /// ALICE sends two transactions and receives one; she takes part in three
    /// TOKEN transfers and one OTHER_TOKEN transfer.
    pub fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();

        store
            .insert_all(Collection::Blocks, &[block(10), block(11), block(12)])
            .unwrap();
        let mut orphan = block(11);
        orphan.hash = hash(0xf0, 11);
        store.insert(Collection::ForkedBlocks, &orphan).unwrap();

        store
            .insert_all(Collection::Uncles, &[uncle(1, 10), uncle(2, 12)])
            .unwrap();

        store
            .insert_all(
                Collection::Transactions,
                &[
                    transaction(1, 10, ALICE, BOB),
                    transaction(2, 11, BOB, ALICE),
                    transaction(3, 11, BOB, CAROL),
                    transaction(4, 12, ALICE, CAROL),
                    contract_creation(5, 12, CAROL, TOKEN),
                ],
            )
            .unwrap();

        store
            .insert_all(
                Collection::TokenTransfers,
                &[
                    transfer(1, 10, ALICE, BOB, TOKEN),
                    transfer(2, 11, BOB, ALICE, TOKEN),
                    transfer(3, 11, ALICE, CAROL, OTHER_TOKEN),
                    transfer(4, 12, CAROL, ALICE, TOKEN),
                    transfer(5, 12, BOB, CAROL, TOKEN),
                ],
            )
            .unwrap();

        store.insert(Collection::Status, &status()).unwrap();
        store
    }

    pub fn seeded_service() -> QueryService<InMemoryStore> {
        QueryService::new(Arc::new(seeded_store()))
    }

    pub fn empty_service() -> QueryService<InMemoryStore> {
        QueryService::new(Arc::new(InMemoryStore::new()))
    }
}

#[cfg(test)]
pub mod assertions {
    /// Asserts that keys are strictly descending, which also rules out duplicates
    pub fn assert_strictly_descending(keys: &[u64]) {
        for window in keys.windows(2) {
            assert!(
                window[0] > window[1],
                "Keys not strictly descending: {} <= {}",
                window[0],
                window[1]
            );
        }
    }

    /// Asserts that keys never increase
    pub fn assert_non_increasing(keys: &[u64]) {
        for window in keys.windows(2) {
            assert!(
                window[0] >= window[1],
                "Keys not in descending order: {} < {}",
                window[0],
                window[1]
            );
        }
    }
}
