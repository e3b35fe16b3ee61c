//! Order types for the tickgate intake pipeline.
//!
//! An [`OrderRequest`] is what a submitter sends. Once the whole batch has
//! been validated, escrowed and resolved, each request is placed as an
//! [`Order`] carrying its allocated id, account and contract. Staged orders
//! are never mutated by the intake pipeline again.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ContractAddress, OrderField, OrderId, OrderViolation, Pair};

/// Long or short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PositionDirection {
    Long,
    Short,
}

impl PositionDirection {
    /// Name used in contract-facing messages.
    #[must_use]
    pub fn contract_name(self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Short => "Short",
        }
    }
}

impl std::fmt::Display for PositionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

/// An order field that only some order types require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalField {
    Nominal,
    TriggerPrice,
}

impl ConditionalField {
    #[must_use]
    pub fn field(self) -> OrderField {
        match self {
            Self::Nominal => OrderField::Nominal,
            Self::TriggerPrice => OrderField::TriggerPrice,
        }
    }
}

/// The type of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
    Liquidation,
    FokMarket,
    /// Market order sized by notional value (`nominal`) instead of quantity.
    FokMarketByValue,
    StopLoss,
    StopLimit,
}

impl OrderType {
    /// The conditional field this order type requires, if any.
    ///
    /// Every variant is listed explicitly so that a new order type cannot be
    /// added without deciding its validation rule.
    #[must_use]
    pub fn required_field(self) -> Option<ConditionalField> {
        match self {
            Self::FokMarketByValue => Some(ConditionalField::Nominal),
            Self::StopLoss | Self::StopLimit => Some(ConditionalField::TriggerPrice),
            Self::Limit | Self::Market | Self::Liquidation | Self::FokMarket => None,
        }
    }

    /// Name used in contract-facing messages.
    #[must_use]
    pub fn contract_name(self) -> &'static str {
        match self {
            Self::Limit => "Limit",
            Self::Market => "Market",
            Self::Liquidation => "Liquidation",
            Self::FokMarket => "Fokmarket",
            Self::FokMarketByValue => "Fokmarketbyvalue",
            Self::StopLoss => "Stoploss",
            Self::StopLimit => "Stoplimit",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::Market => write!(f, "MARKET"),
            Self::Liquidation => write!(f, "LIQUIDATION"),
            Self::FokMarket => write!(f, "FOKMARKET"),
            Self::FokMarketByValue => write!(f, "FOKMARKETBYVALUE"),
            Self::StopLoss => write!(f, "STOPLOSS"),
            Self::StopLimit => write!(f, "STOPLIMIT"),
        }
    }
}

/// A single order as submitted. Decimals are `None` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub position_direction: PositionDirection,
    pub order_type: OrderType,
    pub price_denom: String,
    pub asset_denom: String,
    pub price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub nominal: Option<Decimal>,
    #[serde(default)]
    pub trigger_price: Option<Decimal>,
    /// Opaque payload forwarded to the contract.
    #[serde(default)]
    pub data: String,
}

impl OrderRequest {
    #[must_use]
    pub fn pair(&self) -> Pair {
        Pair::new(self.price_denom.clone(), self.asset_denom.clone())
    }

    /// Decorate this request with its allocated id, account and contract.
    ///
    /// # Errors
    /// Returns the violation if price or quantity is unset. Callers are
    /// expected to have validated the request first.
    pub fn place(
        self,
        id: OrderId,
        account: impl Into<String>,
        contract_addr: ContractAddress,
    ) -> std::result::Result<Order, OrderViolation> {
        let price = self
            .price
            .ok_or_else(|| OrderViolation::new(OrderField::Price, "price is not set"))?;
        let quantity = self
            .quantity
            .ok_or_else(|| OrderViolation::new(OrderField::Quantity, "quantity is not set"))?;
        Ok(Order {
            id,
            account: account.into(),
            contract_addr,
            position_direction: self.position_direction,
            order_type: self.order_type,
            price_denom: self.price_denom,
            asset_denom: self.asset_denom,
            price,
            quantity,
            nominal: self.nominal,
            trigger_price: self.trigger_price,
            data: self.data,
        })
    }
}

/// A validated order staged for the matching stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub account: String,
    pub contract_addr: ContractAddress,
    pub position_direction: PositionDirection,
    pub order_type: OrderType,
    pub price_denom: String,
    pub asset_denom: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub nominal: Option<Decimal>,
    pub trigger_price: Option<Decimal>,
    pub data: String,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl OrderRequest {
    /// A valid limit order on USDC/ATOM.
    pub fn dummy_limit(direction: PositionDirection, price: Decimal, qty: Decimal) -> Self {
        Self {
            position_direction: direction,
            order_type: OrderType::Limit,
            price_denom: "USDC".to_string(),
            asset_denom: "ATOM".to_string(),
            price: Some(price),
            quantity: Some(qty),
            nominal: None,
            trigger_price: None,
            data: String::new(),
        }
    }

    /// A valid order of `order_type` on USDC/ATOM with every conditional field set.
    pub fn dummy_of_type(order_type: OrderType) -> Self {
        Self {
            order_type,
            nominal: Some(Decimal::new(100, 0)),
            trigger_price: Some(Decimal::new(9, 0)),
            ..Self::dummy_limit(PositionDirection::Long, Decimal::new(10, 0), Decimal::ONE)
        }
    }

    /// Same order, on another pair.
    #[must_use]
    pub fn on_pair(mut self, price_denom: &str, asset_denom: &str) -> Self {
        self.price_denom = price_denom.to_string();
        self.asset_denom = asset_denom.to_string();
        self
    }
}
