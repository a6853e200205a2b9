//! Predicates shared by paired list and count queries.
//!
//! A list query and the count displayed next to it must filter on exactly the
//! same predicate, otherwise the total shown to a client drifts from the set
//! it can page through. Both sides of every pair call the same builder here.

use crate::store::{Field, Filter};
use crate::types::Address;

/// `from == account OR to == account`
pub fn account_filter(account: &Address) -> Filter {
    Filter::or([
        Filter::eq(Field::From, account.value()),
        Filter::eq(Field::To, account.value()),
    ])
}

/// `(from == account AND contract == token) OR (to == account AND contract == token)`
pub fn token_account_filter(token: &Address, account: &Address) -> Filter {
    Filter::or([
        Filter::and([
            Filter::eq(Field::From, account.value()),
            Filter::eq(Field::Contract, token.value()),
        ]),
        Filter::and([
            Filter::eq(Field::To, account.value()),
            Filter::eq(Field::Contract, token.value()),
        ]),
    ])
}

/// `contract == token`
pub fn contract_filter(token: &Address) -> Filter {
    Filter::eq(Field::Contract, token.value())
}
