//! Block-scoped working state shared by the intake, matching and settlement
//! stages of one block.
//!
//! The enclosing state-transition step owns a single [`BlockMemState`]. It
//! calls [`BlockMemState::reset`] at block start, lends it to the intake
//! pipeline for each batch, and drains it with the `take_*` methods at block
//! end. Intake only ever appends, and only when a batch commits.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tickgate_types::{
    BlockContext, ContractAddress, DepositInfoEntry, Order, OrderType, PairKey,
    PositionDirection, constants,
};

/// Deposits and staged orders accumulated during one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMemState {
    block: BlockContext,
    deposits: BTreeMap<ContractAddress, Vec<DepositInfoEntry>>,
    block_orders: BTreeMap<ContractAddress, BTreeMap<PairKey, Vec<Order>>>,
}

impl BlockMemState {
    #[must_use]
    pub fn new(block: BlockContext) -> Self {
        Self {
            block,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn block(&self) -> BlockContext {
        self.block
    }

    /// Clear all state and move to `block`.
    pub fn reset(&mut self, block: BlockContext) {
        tracing::debug!(height = block.height, "Block memory state reset");
        self.block = block;
        self.deposits.clear();
        self.block_orders.clear();
    }

    /// Append a deposit to the contract's ledger.
    pub fn add_deposit(&mut self, contract: &ContractAddress, entry: DepositInfoEntry) {
        self.deposits
            .entry(contract.clone())
            .or_default()
            .push(entry);
    }

    /// Append an order to the contract's staging set for `key`.
    pub fn add_order(&mut self, contract: &ContractAddress, key: PairKey, order: Order) {
        self.block_orders
            .entry(contract.clone())
            .or_default()
            .entry(key)
            .or_default()
            .push(order);
    }

    /// Deposits recorded for `contract` this block, in arrival order.
    #[must_use]
    pub fn deposit_info(&self, contract: &ContractAddress) -> &[DepositInfoEntry] {
        self.deposits.get(contract).map_or(&[], Vec::as_slice)
    }

    /// Orders staged for `contract` under `key`, in arrival order.
    #[must_use]
    pub fn block_orders(&self, contract: &ContractAddress, key: &PairKey) -> &[Order] {
        self.block_orders
            .get(contract)
            .and_then(|sets| sets.get(key))
            .map_or(&[], Vec::as_slice)
    }

    /// Total orders staged for `contract` across all pairs.
    #[must_use]
    pub fn staged_order_count(&self, contract: &ContractAddress) -> usize {
        self.block_orders
            .get(contract)
            .map_or(0, |sets| sets.values().map(Vec::len).sum())
    }

    /// Drain the contract's deposit ledger for settlement.
    pub fn take_deposits(&mut self, contract: &ContractAddress) -> Vec<DepositInfoEntry> {
        let deposits = self.deposits.remove(contract).unwrap_or_default();
        tracing::info!(
            contract = %contract,
            height = self.block.height,
            deposits = deposits.len(),
            "Deposits drained for settlement"
        );
        deposits
    }

    /// Drain the contract's staging sets for matching.
    pub fn take_block_orders(
        &mut self,
        contract: &ContractAddress,
    ) -> BTreeMap<PairKey, Vec<Order>> {
        let digest = self.block_orders_digest(contract);
        let orders = self.block_orders.remove(contract).unwrap_or_default();
        tracing::info!(
            contract = %contract,
            height = self.block.height,
            pairs = orders.len(),
            orders = orders.values().map(Vec::len).sum::<usize>(),
            digest = %hex::encode(digest),
            "Staged orders drained for matching"
        );
        orders
    }

    /// SHA-256 commitment over the contract's staged orders.
    ///
    /// Covers the block height, then every staging set in key order and every
    /// order in arrival order. Two nodes that staged the same inputs produce
    /// the same digest.
    #[must_use]
    pub fn block_orders_digest(&self, contract: &ContractAddress) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(constants::BLOCK_ORDERS_DIGEST_TAG);
        hasher.update(self.block.height.to_le_bytes());
        update_str(&mut hasher, contract.as_str());

        let empty = BTreeMap::new();
        let sets = self.block_orders.get(contract).unwrap_or(&empty);
        hasher.update((sets.len() as u64).to_le_bytes());
        for (key, orders) in sets {
            update_str(&mut hasher, key.as_str());
            hasher.update((orders.len() as u64).to_le_bytes());
            for order in orders {
                hash_order(&mut hasher, order);
            }
        }

        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }
}

fn hash_order(hasher: &mut Sha256, order: &Order) {
    hasher.update(order.id.value().to_le_bytes());
    update_str(hasher, &order.account);
    hasher.update(match order.position_direction {
        PositionDirection::Long => [0u8],
        PositionDirection::Short => [1u8],
    });
    hasher.update(match order.order_type {
        OrderType::Limit => [0u8],
        OrderType::Market => [1u8],
        OrderType::Liquidation => [2u8],
        OrderType::FokMarket => [3u8],
        OrderType::FokMarketByValue => [4u8],
        OrderType::StopLoss => [5u8],
        OrderType::StopLimit => [6u8],
    });
    update_str(hasher, &order.price_denom);
    update_str(hasher, &order.asset_denom);
    update_str(hasher, &order.price.normalize().to_string());
    update_str(hasher, &order.quantity.normalize().to_string());
    for optional in [order.nominal, order.trigger_price] {
        match optional {
            Some(value) => {
                hasher.update([1u8]);
                update_str(hasher, &value.normalize().to_string());
            }
            None => hasher.update([0u8]),
        }
    }
    update_str(hasher, &order.data);
}

/// Length-prefixed so adjacent fields cannot run into each other.
fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tickgate_types::*;

    use super::*;

    fn contract() -> ContractAddress {
        ContractAddress::new("dex1contract")
    }

    fn key(price_tick: Decimal) -> PairKey {
        Pair::new("USDC", "ATOM")
            .with_tick_sizes(TickSizes {
                price: price_tick,
                quantity: Decimal::ONE,
            })
            .key()
    }

    fn order(id: u64) -> Order {
        OrderRequest::dummy_limit(PositionDirection::Long, Decimal::new(100, 0), Decimal::ONE)
            .place(OrderId(id), "dex1creator", contract())
            .unwrap()
    }

    fn deposit(amount: i64) -> DepositInfoEntry {
        DepositInfoEntry {
            creator: "dex1creator".into(),
            denom: "USDC".into(),
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn orders_grouped_by_pair_key() {
        let mut state = BlockMemState::default();
        state.add_order(&contract(), key(Decimal::ONE), order(0));
        state.add_order(&contract(), key(Decimal::TWO), order(1));
        state.add_order(&contract(), key(Decimal::ONE), order(2));

        let ids: Vec<_> = state
            .block_orders(&contract(), &key(Decimal::ONE))
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![OrderId(0), OrderId(2)]);
        assert_eq!(state.staged_order_count(&contract()), 3);
        assert!(state
            .block_orders(&ContractAddress::new("dex1other"), &key(Decimal::ONE))
            .is_empty());
    }

    #[test]
    fn take_drains_once() {
        let mut state = BlockMemState::default();
        state.add_deposit(&contract(), deposit(10));
        state.add_order(&contract(), key(Decimal::ONE), order(0));

        assert_eq!(state.take_deposits(&contract()), vec![deposit(10)]);
        assert!(state.take_deposits(&contract()).is_empty());

        let orders = state.take_block_orders(&contract());
        assert_eq!(orders.len(), 1);
        assert!(state.take_block_orders(&contract()).is_empty());
        assert_eq!(state.staged_order_count(&contract()), 0);
    }

    #[test]
    fn reset_clears_and_moves_block() {
        let mut state = BlockMemState::new(BlockContext::default());
        state.add_deposit(&contract(), deposit(1));
        state.add_order(&contract(), key(Decimal::ONE), order(0));

        let next = BlockContext::new(8, chrono::DateTime::from_timestamp(1_000, 0).unwrap());
        state.reset(next);
        assert_eq!(state.block(), next);
        assert!(state.deposit_info(&contract()).is_empty());
        assert_eq!(state.staged_order_count(&contract()), 0);
    }

    #[test]
    fn digest_is_deterministic() {
        let build = || {
            let mut state = BlockMemState::default();
            state.add_order(&contract(), key(Decimal::ONE), order(0));
            state.add_order(&contract(), key(Decimal::TWO), order(1));
            state
        };
        assert_eq!(
            build().block_orders_digest(&contract()),
            build().block_orders_digest(&contract())
        );
    }

    #[test]
    fn digest_commits_to_arrival_order() {
        let mut a = BlockMemState::default();
        a.add_order(&contract(), key(Decimal::ONE), order(0));
        a.add_order(&contract(), key(Decimal::ONE), order(1));

        let mut b = BlockMemState::default();
        b.add_order(&contract(), key(Decimal::ONE), order(1));
        b.add_order(&contract(), key(Decimal::ONE), order(0));

        assert_ne!(a.block_orders_digest(&contract()), b.block_orders_digest(&contract()));
    }

    #[test]
    fn digest_commits_to_height() {
        let mut a = BlockMemState::default();
        a.add_order(&contract(), key(Decimal::ONE), order(0));
        let mut b = a.clone();
        b.block.height = 1;
        assert_ne!(a.block_orders_digest(&contract()), b.block_orders_digest(&contract()));
    }

    #[test]
    fn empty_digest_is_not_zero() {
        let state = BlockMemState::default();
        assert_ne!(state.block_orders_digest(&contract()), [0u8; 32]);
    }
}
