//! Transient write buffer for one batch.
//!
//! Everything a batch would write (deposit entries, staged orders and the
//! new order id counter) is collected here while the batch moves through
//! its stages. Nothing reaches block state or the counter store until
//! [`PendingWrites::commit`]. Dropping the buffer discards the batch.

use tickgate_types::{
    ContractAddress, DepositInfoEntry, IntakeStage, Order, OrderId, PairKey, Result,
    TickgateError,
};

use crate::{mem_state::BlockMemState, order_id::OrderIdStore};

/// Buffered writes of a batch plus the stage it has reached.
#[derive(Debug, Clone)]
pub struct PendingWrites {
    contract: ContractAddress,
    stage: IntakeStage,
    deposits: Vec<DepositInfoEntry>,
    orders: Vec<(PairKey, Order)>,
}

impl PendingWrites {
    /// Start buffering a batch for `contract` in RECEIVED.
    #[must_use]
    pub fn new(contract: ContractAddress) -> Self {
        Self {
            contract,
            stage: IntakeStage::Received,
            deposits: Vec::new(),
            orders: Vec::new(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    #[must_use]
    pub fn contract(&self) -> &ContractAddress {
        &self.contract
    }

    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn deposits(&self) -> &[DepositInfoEntry] {
        &self.deposits
    }

    /// Buffered orders with their staging keys, in submission order.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn orders(&self) -> &[(PairKey, Order)] {
        &self.orders
    }

    /// Move to the stage directly after the current one.
    ///
    /// # Errors
    /// Returns `WrongStage` if `to` does not directly follow the current stage.
    /// COMMITTED is only reachable through [`PendingWrites::commit`].
    pub fn advance(&mut self, to: IntakeStage) -> Result<()> {
        let expected = self.stage.next();
        if expected != Some(to) || to == IntakeStage::Committed {
            return Err(TickgateError::WrongStage {
                expected: expected.unwrap_or(self.stage),
                actual: to,
            });
        }
        tracing::debug!(
            contract = %self.contract,
            from = %self.stage,
            to = %to,
            "Batch stage advanced"
        );
        self.stage = to;
        Ok(())
    }

    /// Buffer the escrow entries. Allowed once validation has passed.
    ///
    /// # Errors
    /// Returns `WrongStage` unless the batch is in VALIDATED.
    pub fn record_deposits(&mut self, deposits: Vec<DepositInfoEntry>) -> Result<()> {
        self.expect(IntakeStage::Validated)?;
        self.deposits.extend(deposits);
        Ok(())
    }

    /// Buffer a placed order under its staging key.
    ///
    /// # Errors
    /// Returns `WrongStage` unless the batch is in ESCROWED.
    pub fn stage_order(&mut self, key: PairKey, order: Order) -> Result<()> {
        self.expect(IntakeStage::Escrowed)?;
        tracing::debug!(
            contract = %self.contract,
            order_id = %order.id,
            pair_key = %key,
            direction = %order.position_direction,
            order_type = %order.order_type,
            "Order buffered for staging"
        );
        self.orders.push((key, order));
        Ok(())
    }

    /// Apply the buffered writes and persist the counter.
    ///
    /// Deposits are appended to the contract's ledger and orders to their
    /// staging sets, both in submission order. `next_order_id` becomes the
    /// contract's counter. Returns the committed ids in submission order.
    ///
    /// # Errors
    /// Returns `WrongStage` unless the batch is in STAGED. Nothing is written
    /// in that case.
    pub fn commit<S: OrderIdStore + ?Sized>(
        self,
        mem_state: &mut BlockMemState,
        store: &mut S,
        next_order_id: OrderId,
    ) -> Result<Vec<OrderId>> {
        self.expect(IntakeStage::Staged)?;

        let deposit_count = self.deposits.len();
        for entry in self.deposits {
            mem_state.add_deposit(&self.contract, entry);
        }

        let mut order_ids = Vec::with_capacity(self.orders.len());
        for (key, order) in self.orders {
            order_ids.push(order.id);
            mem_state.add_order(&self.contract, key, order);
        }

        store.set_next_order_id(&self.contract, next_order_id);

        tracing::info!(
            contract = %self.contract,
            stage = %IntakeStage::Committed,
            orders = order_ids.len(),
            first_id = ?order_ids.first().map(|id| id.value()),
            last_id = ?order_ids.last().map(|id| id.value()),
            deposits = deposit_count,
            next_order_id = %next_order_id,
            "Order batch committed"
        );

        Ok(order_ids)
    }

    fn expect(&self, stage: IntakeStage) -> Result<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(TickgateError::WrongStage {
                expected: stage,
                actual: self.stage,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;
    use tickgate_types::*;

    use super::*;

    #[derive(Default)]
    struct Counters(HashMap<ContractAddress, OrderId>);

    impl OrderIdStore for Counters {
        fn next_order_id(&self, contract: &ContractAddress) -> OrderId {
            self.0.get(contract).copied().unwrap_or_default()
        }

        fn set_next_order_id(&mut self, contract: &ContractAddress, next: OrderId) {
            self.0.insert(contract.clone(), next);
        }
    }

    fn contract() -> ContractAddress {
        ContractAddress::new("dex1contract")
    }

    fn key() -> PairKey {
        Pair::new("USDC", "ATOM")
            .with_tick_sizes(TickSizes {
                price: Decimal::new(1, 2),
                quantity: Decimal::new(1, 1),
            })
            .key()
    }

    fn order(id: u64) -> Order {
        OrderRequest::dummy_limit(PositionDirection::Long, Decimal::new(100, 0), Decimal::ONE)
            .place(OrderId(id), "dex1creator", contract())
            .unwrap()
    }

    fn deposit() -> DepositInfoEntry {
        DepositInfoEntry {
            creator: "dex1creator".into(),
            denom: "USDC".into(),
            amount: Decimal::new(50, 0),
        }
    }

    fn staged_batch() -> PendingWrites {
        let mut pending = PendingWrites::new(contract());
        pending.advance(IntakeStage::Validated).unwrap();
        pending.record_deposits(vec![deposit()]).unwrap();
        pending.advance(IntakeStage::Escrowed).unwrap();
        pending.stage_order(key(), order(5)).unwrap();
        pending.stage_order(key(), order(6)).unwrap();
        pending.advance(IntakeStage::Staged).unwrap();
        pending
    }

    #[test]
    fn stages_must_advance_one_at_a_time() {
        let mut pending = PendingWrites::new(contract());
        let err = pending.advance(IntakeStage::Escrowed).unwrap_err();
        assert!(
            matches!(
                err,
                TickgateError::WrongStage {
                    expected: IntakeStage::Validated,
                    actual: IntakeStage::Escrowed,
                }
            ),
            "Got: {err:?}"
        );
        assert_eq!(pending.stage(), IntakeStage::Received);
    }

    #[test]
    fn committed_only_through_commit() {
        let mut pending = staged_batch();
        assert!(pending.advance(IntakeStage::Committed).is_err());
        assert_eq!(pending.stage(), IntakeStage::Staged);
    }

    #[test]
    fn staging_before_escrow_rejected() {
        let mut pending = PendingWrites::new(contract());
        pending.advance(IntakeStage::Validated).unwrap();
        let err = pending.stage_order(key(), order(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongStage);
        assert!(pending.orders().is_empty());
    }

    #[test]
    fn commit_applies_everything() {
        let mut mem = BlockMemState::default();
        let mut store = Counters::default();
        let pending = staged_batch();
        assert_eq!(pending.deposits().len(), 1);

        let ids = pending.commit(&mut mem, &mut store, OrderId(7)).unwrap();
        assert_eq!(ids, vec![OrderId(5), OrderId(6)]);
        assert_eq!(store.next_order_id(&contract()), OrderId(7));
        assert_eq!(mem.deposit_info(&contract()), &[deposit()]);
        let staged: Vec<_> = mem.block_orders(&contract(), &key()).iter().map(|o| o.id).collect();
        assert_eq!(staged, vec![OrderId(5), OrderId(6)]);
    }

    #[test]
    fn commit_before_staged_writes_nothing() {
        let mut mem = BlockMemState::default();
        let mut store = Counters::default();
        let mut pending = PendingWrites::new(contract());
        pending.advance(IntakeStage::Validated).unwrap();
        pending.record_deposits(vec![deposit()]).unwrap();

        let err = pending.commit(&mut mem, &mut store, OrderId(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongStage);
        assert!(mem.deposit_info(&contract()).is_empty());
        assert_eq!(store.next_order_id(&contract()), OrderId(0));
    }
}
