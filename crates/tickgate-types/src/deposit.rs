//! Fund deposits attached to an order batch.
//!
//! A [`Coin`] is what the submitter attaches; a [`DepositInfoEntry`] is the
//! escrow record appended to the contract's block-scoped deposit ledger.
//! Neither moves tokens: the settlement stage performs the transfer later.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type alias for denominations (e.g., "uatom", "USDC").
pub type Denom = String;

/// A denomination and amount attached to a batch. `amount` is `None` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Option<Decimal>,
}

impl Coin {
    #[must_use]
    pub fn new(denom: impl Into<Denom>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount: Some(amount),
        }
    }

    /// Whether the amount is set and below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_some_and(|amount| amount < Decimal::ZERO)
    }
}

/// One escrowed deposit: `creator` committed `amount` of `denom` to a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositInfoEntry {
    pub creator: String,
    pub denom: Denom,
    pub amount: Decimal,
}
