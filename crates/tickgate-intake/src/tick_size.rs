//! Tick-size resolution against the exchange's pair registry.
//!
//! There is no default tick size: an order on a pair without both a price
//! and a quantity tick size configured rejects its whole batch.

use rust_decimal::Decimal;
use tickgate_types::{ContractAddress, Pair, Result, TickSizeKey, TickSizes, TickgateError};

/// Read-only view of per-(contract, pair) tick-size configuration.
pub trait TickSizeRegistry {
    /// The price tick size of `pair` on `contract`, if configured.
    fn price_tick_size(&self, contract: &ContractAddress, pair: &Pair) -> Option<Decimal>;

    /// The quantity tick size of `pair` on `contract`, if configured.
    fn quantity_tick_size(&self, contract: &ContractAddress, pair: &Pair) -> Option<Decimal>;
}

/// Look up both tick sizes for `pair` on `contract`.
///
/// # Errors
/// - `PairNotConfigured` if neither tick size exists
/// - `KeyNotFound` naming the missing key if only one of them exists
pub fn resolve_tick_sizes<R>(
    registry: &R,
    contract: &ContractAddress,
    pair: &Pair,
) -> Result<TickSizes>
where
    R: TickSizeRegistry + ?Sized,
{
    let price = registry.price_tick_size(contract, pair);
    let quantity = registry.quantity_tick_size(contract, pair);
    match (price, quantity) {
        (Some(price), Some(quantity)) => Ok(TickSizes { price, quantity }),
        (None, None) => Err(TickgateError::PairNotConfigured {
            contract: contract.clone(),
            pair: pair.clone(),
        }),
        (None, Some(_)) => Err(TickgateError::KeyNotFound {
            contract: contract.clone(),
            pair: pair.clone(),
            key: TickSizeKey::Price,
        }),
        (Some(_), None) => Err(TickgateError::KeyNotFound {
            contract: contract.clone(),
            pair: pair.clone(),
            key: TickSizeKey::Quantity,
        }),
    }
}
