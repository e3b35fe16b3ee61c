//! In-memory exchange state: per-contract tick sizes and order id counters.
//!
//! Backs [`TickSizeRegistry`] and [`OrderIdStore`] for tests and for
//! embedding the pipeline without a chain store. Ordered maps keep iteration
//! deterministic.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tickgate_types::{
    ContractAddress, ExchangeGenesis, IntakeConfig, OrderId, Pair, Result, TickSizes,
};

use crate::{order_id::OrderIdStore, tick_size::TickSizeRegistry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ContractState {
    next_order_id: OrderId,
    price_ticks: BTreeMap<Pair, Decimal>,
    quantity_ticks: BTreeMap<Pair, Decimal>,
}

/// Exchange keeper state held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeStore {
    contracts: BTreeMap<ContractAddress, ContractState>,
}

impl ExchangeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a genesis document, validating it first.
    ///
    /// # Errors
    /// Returns `Configuration` if the genesis fails validation.
    pub fn from_genesis(genesis: &ExchangeGenesis, intake: &IntakeConfig) -> Result<Self> {
        genesis.validate(intake)?;
        let mut store = Self::new();
        for contract in &genesis.contracts {
            store.set_next_order_id(&contract.contract_addr, OrderId(contract.next_order_id));
            for pair in &contract.pairs {
                store.register_pair(&contract.contract_addr, pair.pair(), pair.tick_sizes());
            }
        }
        Ok(store)
    }

    /// Configure both tick sizes of `pair` on `contract`.
    pub fn register_pair(&mut self, contract: &ContractAddress, pair: Pair, ticks: TickSizes) {
        let state = self.contract_mut(contract);
        state.price_ticks.insert(pair.clone(), ticks.price);
        state.quantity_ticks.insert(pair, ticks.quantity);
    }

    pub fn set_price_tick_size(&mut self, contract: &ContractAddress, pair: Pair, tick: Decimal) {
        self.contract_mut(contract).price_ticks.insert(pair, tick);
    }

    pub fn set_quantity_tick_size(
        &mut self,
        contract: &ContractAddress,
        pair: Pair,
        tick: Decimal,
    ) {
        self.contract_mut(contract).quantity_ticks.insert(pair, tick);
    }

    fn contract_mut(&mut self, contract: &ContractAddress) -> &mut ContractState {
        self.contracts.entry(contract.clone()).or_default()
    }
}

impl TickSizeRegistry for ExchangeStore {
    fn price_tick_size(&self, contract: &ContractAddress, pair: &Pair) -> Option<Decimal> {
        self.contracts
            .get(contract)
            .and_then(|state| state.price_ticks.get(pair))
            .copied()
    }

    fn quantity_tick_size(&self, contract: &ContractAddress, pair: &Pair) -> Option<Decimal> {
        self.contracts
            .get(contract)
            .and_then(|state| state.quantity_ticks.get(pair))
            .copied()
    }
}

impl OrderIdStore for ExchangeStore {
    fn next_order_id(&self, contract: &ContractAddress) -> OrderId {
        self.contracts
            .get(contract)
            .map_or(OrderId(tickgate_types::constants::INITIAL_ORDER_ID), |state| {
                state.next_order_id
            })
    }

    fn set_next_order_id(&mut self, contract: &ContractAddress, next: OrderId) {
        self.contract_mut(contract).next_order_id = next;
    }
}
