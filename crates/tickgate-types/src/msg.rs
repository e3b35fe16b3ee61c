//! The batch submission message and its response.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, Coin, ContractAddress, OrderId, OrderRequest, Result, TickgateError};

/// Orders and funds submitted atomically by `creator` to `contract_addr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrdersMsg {
    pub creator: String,
    pub contract_addr: ContractAddress,
    pub orders: Vec<OrderRequest>,
    #[serde(default)]
    pub funds: Vec<Coin>,
}

impl PlaceOrdersMsg {
    /// Stateless sanity check run by the transaction handler before any state
    /// is read.
    ///
    /// # Errors
    /// - `AddressFormatError` if creator or contract is not a valid address
    /// - `EmptyBatch` if no orders are attached
    /// - `InvalidDeposit` if a fund amount is negative
    pub fn validate_basic(&self, prefix: &str) -> Result<()> {
        Address::parse(&self.creator, prefix)?;
        self.contract_addr.parse(prefix)?;
        if self.orders.is_empty() {
            return Err(TickgateError::EmptyBatch);
        }
        if let Some(fund) = self.funds.iter().find(|fund| fund.is_negative()) {
            return Err(TickgateError::InvalidDeposit {
                denom: fund.denom.clone(),
                reason: format!(
                    "fund amount cannot be negative: {}",
                    fund.amount.unwrap_or(Decimal::ZERO)
                ),
            });
        }
        Ok(())
    }
}

/// Ids assigned to the batch's orders, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaceOrdersResponse {
    pub order_ids: Vec<OrderId>,
}
