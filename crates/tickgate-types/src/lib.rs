//! # tickgate-types
//!
//! Shared types, errors, and configuration for the **tickgate** order-intake
//! pipeline.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`ContractAddress`], [`PairKey`]
//! - **Addresses**: [`Address`] (bech32, prefix-checked)
//! - **Pairs**: [`Pair`], [`TickSizes`], [`TickedPair`]
//! - **Order model**: [`OrderRequest`], [`Order`], [`OrderType`], [`PositionDirection`]
//! - **Deposit model**: [`Coin`], [`DepositInfoEntry`]
//! - **Messages**: [`PlaceOrdersMsg`], [`PlaceOrdersResponse`]
//! - **Intake lifecycle**: [`IntakeStage`], [`BlockContext`]
//! - **Settlement records**: [`SettlementEntry`]
//! - **Configuration**: [`IntakeConfig`], [`ExchangeGenesis`], [`BankConfig`]
//! - **Errors**: [`TickgateError`] with `TG_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod address;
pub mod config;
pub mod constants;
pub mod deposit;
pub mod error;
pub mod ids;
pub mod msg;
pub mod order;
pub mod pair;
pub mod settlement;
pub mod stage;

// Re-export all primary types at crate root for ergonomic imports:
//   use tickgate_types::{Order, OrderRequest, PlaceOrdersMsg, ...};

pub use address::*;
pub use config::*;
pub use deposit::*;
pub use error::*;
pub use ids::*;
pub use msg::*;
pub use order::*;
pub use pair::*;
pub use settlement::*;
pub use stage::*;

// Constants are accessed via `tickgate_types::constants::FOO`
// (not re-exported to avoid name collisions).
