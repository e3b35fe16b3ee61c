//! Settlement entries handed to exchange contracts after matching.
//!
//! The intake pipeline does not settle anything; this is the record shape
//! the downstream settlement stage builds from staged orders and fills.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BlockContext, OrderId, OrderType, PositionDirection};

/// Contract-facing settlement record for one filled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub account: String,
    pub price_denom: String,
    pub asset_denom: String,
    pub quantity: Decimal,
    pub execution_cost_or_proceed: Decimal,
    pub expected_cost_or_proceed: Decimal,
    /// Title-case direction name, e.g. `"Long"`.
    pub position_direction: String,
    /// Title-case order type name, e.g. `"Market"`.
    pub order_type: String,
    pub order_id: OrderId,
    /// Block time in unix seconds.
    pub timestamp: u64,
    pub height: u64,
}

impl SettlementEntry {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        block: &BlockContext,
        order_id: OrderId,
        account: impl Into<String>,
        direction: PositionDirection,
        price_denom: impl Into<String>,
        asset_denom: impl Into<String>,
        quantity: Decimal,
        execution_cost_or_proceed: Decimal,
        expected_cost_or_proceed: Decimal,
        order_type: OrderType,
    ) -> Self {
        Self {
            account: account.into(),
            price_denom: price_denom.into(),
            asset_denom: asset_denom.into(),
            quantity,
            execution_cost_or_proceed,
            expected_cost_or_proceed,
            position_direction: direction.contract_name().to_string(),
            order_type: order_type.contract_name().to_string(),
            order_id,
            timestamp: block.unix_timestamp(),
            height: block.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    #[test]
    fn new_settlement_entry() {
        let block = BlockContext::new(100, DateTime::from_timestamp(1_650_000_000, 0).unwrap());
        let entry = SettlementEntry::new(
            &block,
            OrderId(1),
            "TEST_ACCOUNT",
            PositionDirection::Long,
            "USDC",
            "ATOM",
            Decimal::new(1, 0),
            Decimal::new(2, 0),
            Decimal::new(3, 0),
            OrderType::Market,
        );

        assert_eq!(entry.position_direction, "Long");
        assert_eq!(entry.order_type, "Market");
        assert_eq!(entry.height, 100);
        assert_eq!(entry.timestamp, 1_650_000_000);
        assert_eq!(entry.order_id, OrderId(1));
        assert_eq!(entry.execution_cost_or_proceed, Decimal::TWO);
    }
}
