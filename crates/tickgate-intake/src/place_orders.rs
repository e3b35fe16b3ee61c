//! Batch orchestration: RECEIVED → VALIDATED → ESCROWED → STAGED → COMMITTED.
//!
//! [`OrderIntake::place_orders`] runs one submission through every check,
//! buffering its writes in [`PendingWrites`]. The buffer is committed only
//! after the last order is staged; any error discards it, so a rejected batch
//! leaves no deposits, no staged orders and an unchanged id counter.

use tickgate_types::{
    IntakeConfig, IntakeStage, OrderId, PlaceOrdersMsg, PlaceOrdersResponse, Result,
};

use crate::{
    escrow::{FundEscrow, TransferPolicy},
    mem_state::BlockMemState,
    order_id::{OrderIdAllocator, OrderIdStore},
    order_validator::validate_orders,
    pending_writes::PendingWrites,
    tick_size::{TickSizeRegistry, resolve_tick_sizes},
};

/// The intake pipeline, bound to the state of the current block.
///
/// `keeper` provides tick sizes and order id counters, `transfers` the
/// protocol transfer rules. Batches run one at a time: the pipeline holds
/// exclusive borrows of the keeper and the block state.
pub struct OrderIntake<'a, K: ?Sized, T: ?Sized> {
    config: &'a IntakeConfig,
    keeper: &'a mut K,
    transfers: &'a T,
    mem_state: &'a mut BlockMemState,
}

impl<'a, K, T> OrderIntake<'a, K, T>
where
    K: TickSizeRegistry + OrderIdStore + ?Sized,
    T: TransferPolicy + ?Sized,
{
    #[must_use]
    pub fn new(
        config: &'a IntakeConfig,
        keeper: &'a mut K,
        transfers: &'a T,
        mem_state: &'a mut BlockMemState,
    ) -> Self {
        Self {
            config,
            keeper,
            transfers,
            mem_state,
        }
    }

    /// Place a batch of orders atomically.
    ///
    /// On success every order is staged under its pair key with an id from
    /// the contract's counter, the attached funds are recorded in the
    /// contract's deposit ledger, and the counter is advanced past the last
    /// id. The response lists the ids in submission order.
    ///
    /// # Errors
    /// The first failure of any stage: `EmptyBatch`, `InvalidOrder`,
    /// `AddressFormatError`, `InvalidDeposit`, `TransferDisabled`,
    /// `RecipientBlocked`, `PairNotConfigured`, `KeyNotFound` or
    /// `OrderIdExhausted`. Nothing is written on error.
    pub fn place_orders(&mut self, msg: PlaceOrdersMsg) -> Result<PlaceOrdersResponse> {
        let mut pending = PendingWrites::new(msg.contract_addr.clone());
        tracing::debug!(
            contract = %msg.contract_addr,
            creator = %msg.creator,
            orders = msg.orders.len(),
            funds = msg.funds.len(),
            stage = %pending.stage(),
            "Order batch received"
        );

        let creator = msg.creator.clone();
        match self.prepare(msg, &mut pending) {
            Ok(next_order_id) => {
                let order_ids =
                    pending.commit(&mut *self.mem_state, &mut *self.keeper, next_order_id)?;
                Ok(PlaceOrdersResponse { order_ids })
            }
            Err(err) => {
                tracing::warn!(
                    contract = %pending.contract(),
                    creator = %creator,
                    code = err.code(),
                    stage = %pending.stage(),
                    error = %err,
                    "Order batch rejected"
                );
                Err(err)
            }
        }
    }

    /// Run every check and buffer the batch's writes, returning the counter
    /// value to persist.
    fn prepare(&self, msg: PlaceOrdersMsg, pending: &mut PendingWrites) -> Result<OrderId> {
        let PlaceOrdersMsg {
            creator,
            contract_addr,
            orders,
            funds,
        } = msg;

        validate_orders(&orders)?;
        pending.advance(IntakeStage::Validated)?;

        let escrow = FundEscrow::new(self.transfers, &self.config.address_prefix);
        let deposits = escrow.escrow(&funds, &creator, &contract_addr)?;
        pending.record_deposits(deposits)?;
        pending.advance(IntakeStage::Escrowed)?;

        let keeper: &K = &*self.keeper;
        let mut allocator = OrderIdAllocator::begin(keeper, &contract_addr);
        for (index, request) in orders.into_iter().enumerate() {
            let pair = request.pair();
            let tick_sizes = resolve_tick_sizes(keeper, &contract_addr, &pair)?;
            let key = pair.with_tick_sizes(tick_sizes).key();
            let id = allocator.allocate()?;
            let order = request
                .place(id, creator.as_str(), contract_addr.clone())
                .map_err(|violation| violation.at_index(index))?;
            pending.stage_order(key, order)?;
        }
        tracing::debug!(
            contract = %contract_addr,
            first_id = %allocator.start(),
            allocated = allocator.allocated(),
            "Order ids allocated"
        );
        pending.advance(IntakeStage::Staged)?;

        Ok(allocator.next())
    }
}
