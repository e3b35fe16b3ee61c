//! Identifiers used throughout tickgate.
//!
//! Order ids are per-contract sequential integers handed out by the intake
//! allocator. Contract addresses and pair keys are string newtypes so they
//! can key the deterministic (`BTreeMap`) block state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, Result};

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Per-contract order identifier. Strictly increasing, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// The id after this one, or `None` if the counter is exhausted.
    #[must_use]
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ContractAddress
// ---------------------------------------------------------------------------

/// Bech32 address of an exchange contract, kept in its submitted string form.
///
/// Used as the key for per-contract counters, deposit ledgers and staging
/// sets. Use [`ContractAddress::parse`] when the address must be well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(String);

impl ContractAddress {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the address, requiring the chain's human-readable prefix.
    pub fn parse(&self, prefix: &str) -> Result<Address> {
        Address::parse(&self.0, prefix)
    }
}

impl From<&str> for ContractAddress {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContractAddress {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// PairKey
// ---------------------------------------------------------------------------

/// Key of a staging set within a contract.
///
/// Built from a [`TickedPair`](crate::TickedPair) so that orders are grouped
/// exactly the way the matching stage consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(String);

impl PairKey {
    pub(crate) fn from_string(key: String) -> Self {
        Self(key)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
