//! Store-independent query predicates.
//!
//! Filters are built from a closed set of [`Field`]s so every predicate the
//! query layer issues is known at compile time. Each backend lowers a
//! [`Filter`] into its own query language; [`Filter::matches`] is the
//! reference evaluation used by the in-memory store.

use serde_json::{json, Value};
use std::cmp::Ordering;
use std::fmt;

/// Document fields the explorer filters or sorts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Number,
    Hash,
    BlockNumber,
    From,
    To,
    Contract,
    ContractAddress,
}

impl Field {
    /// Stored field name, shared with the ingester
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Hash => "hash",
            Self::BlockNumber => "blockNumber",
            Self::From => "from",
            Self::To => "to",
            Self::Contract => "contract",
            Self::ContractAddress => "contractAddress",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Right-hand side of an equality predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    UInt(u64),
}

impl FieldValue {
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => json!(s),
            Self::UInt(n) => json!(n),
        }
    }

    fn matches(&self, stored: &Value) -> bool {
        match self {
            Self::Text(s) => stored.as_str() == Some(s.as_str()),
            Self::UInt(n) => match stored.as_u64() {
                Some(stored) => stored == *n,
                // Integral values stored as floats, e.g. `9.0`
                None => stored.as_f64().is_some_and(|f| f == *n as f64),
            },
        }
    }
}

/// Numeric sort key; integers and floats compare by value
fn numeric_key(doc: &Value, field: Field) -> Option<f64> {
    doc.get(field.name()).and_then(Value::as_f64)
}

fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::UInt(n) => write!(f, "{n}"),
        }
    }
}

/// Boolean predicate over a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document
    All,
    Eq { field: Field, value: FieldValue },
    /// Matches when any branch matches; an empty `Or` matches nothing
    Or(Vec<Filter>),
    /// Matches when every branch matches; an empty `And` matches everything
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: Field, value: impl Into<FieldValue>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn or(branches: impl IntoIterator<Item = Filter>) -> Self {
        Self::Or(branches.into_iter().collect())
    }

    #[must_use]
    pub fn and(branches: impl IntoIterator<Item = Filter>) -> Self {
        Self::And(branches.into_iter().collect())
    }

    /// Evaluates the predicate against a stored document
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => document
                .get(field.name())
                .is_some_and(|stored| value.matches(stored)),
            Self::Or(branches) => branches.iter().any(|b| b.matches(document)),
            Self::And(branches) => branches.iter().all(|b| b.matches(document)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, branches: &[Filter], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                write!(f, "{branch}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::All => f.write_str("*"),
            Self::Eq { field, value } => write!(f, "{field} == {value}"),
            Self::Or(branches) => join(f, branches, "OR"),
            Self::And(branches) => join(f, branches, "AND"),
        }
    }
}

/// Ordering applied to a find.
///
/// Sort keys are numeric. Documents missing the key order below every
/// present value, so they come last in a descending sort. Ties keep the
/// store's natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Ascending(Field),
    Descending(Field),
}

impl Sort {
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::Ascending(field) | Self::Descending(field) => field,
        }
    }

    /// Compares two documents under this ordering
    #[must_use]
    pub fn compare(self, a: &Value, b: &Value) -> Ordering {
        let (a, b) = (numeric_key(a, self.field()), numeric_key(b, self.field()));
        match self {
            Self::Ascending(_) => compare_keys(a, b),
            Self::Descending(_) => compare_keys(b, a),
        }
    }
}

/// A filtered, optionally sorted and limited find
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub limit: Option<u64>,
}

impl FindQuery {
    #[must_use]
    pub const fn new(filter: Filter) -> Self {
        Self {
            filter,
            sort: None,
            limit: None,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self::new(Filter::All)
    }

    #[must_use]
    pub const fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
