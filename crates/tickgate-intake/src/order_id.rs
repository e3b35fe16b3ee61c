//! Per-contract order id allocation.
//!
//! The allocator reads the contract's counter once, hands out ids in
//! submission order, and never writes back on its own. The caller persists
//! [`OrderIdAllocator::next`] only when the batch commits, so a rejected
//! batch leaves the counter untouched.

use tickgate_types::{ContractAddress, OrderId, Result, TickgateError};

/// Persistent per-contract order id counter.
pub trait OrderIdStore {
    /// The id the next placed order on `contract` will receive.
    fn next_order_id(&self, contract: &ContractAddress) -> OrderId;

    fn set_next_order_id(&mut self, contract: &ContractAddress, next: OrderId);
}

/// Hands out sequential ids for one batch.
#[derive(Debug, Clone)]
pub struct OrderIdAllocator {
    contract: ContractAddress,
    start: OrderId,
    next: OrderId,
}

impl OrderIdAllocator {
    /// Start allocating from the contract's current counter.
    pub fn begin<S: OrderIdStore + ?Sized>(store: &S, contract: &ContractAddress) -> Self {
        let start = store.next_order_id(contract);
        Self {
            contract: contract.clone(),
            start,
            next: start,
        }
    }

    /// Take the next id.
    ///
    /// # Errors
    /// Returns `OrderIdExhausted` if the counter cannot advance past the id.
    pub fn allocate(&mut self) -> Result<OrderId> {
        let id = self.next;
        self.next = id
            .checked_next()
            .ok_or_else(|| TickgateError::OrderIdExhausted {
                contract: self.contract.clone(),
            })?;
        Ok(id)
    }

    /// The counter value to persist on commit.
    #[must_use]
    pub fn next(&self) -> OrderId {
        self.next
    }

    #[must_use]
    pub fn start(&self) -> OrderId {
        self.start
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next.value() - self.start.value()
    }
}
