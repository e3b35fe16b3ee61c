//! Trading pairs and their tick-size configuration.

use std::{borrow::Cow, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PairKey;

/// A trading pair as submitted on an order: price denom and asset denom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Pair {
    pub price_denom: String,
    pub asset_denom: String,
}

impl Pair {
    #[must_use]
    pub fn new(price_denom: impl Into<String>, asset_denom: impl Into<String>) -> Self {
        Self {
            price_denom: price_denom.into(),
            asset_denom: asset_denom.into(),
        }
    }

    /// Attach resolved tick sizes to this pair.
    #[must_use]
    pub fn with_tick_sizes(self, tick_sizes: TickSizes) -> TickedPair {
        TickedPair {
            pair: self,
            tick_sizes,
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{price:{},asset:{}}}",
            self.price_denom, self.asset_denom
        )
    }
}

/// Price and quantity granularity of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickSizes {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// A pair decorated with its resolved tick sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickedPair {
    pub pair: Pair,
    pub tick_sizes: TickSizes,
}

impl TickedPair {
    /// Staging-set key: `price|asset|price_tick|quantity_tick`.
    ///
    /// Tick sizes are normalized, so `0.10` and `0.1` produce the same key.
    /// `|` and `\` inside a denomination are backslash-escaped, so distinct
    /// pairs never share a key.
    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey::from_string(format!(
            "{}|{}|{}|{}",
            escape_key_part(&self.pair.price_denom),
            escape_key_part(&self.pair.asset_denom),
            self.tick_sizes.price.normalize(),
            self.tick_sizes.quantity.normalize(),
        ))
    }
}

fn escape_key_part(part: &str) -> Cow<'_, str> {
    if part.contains(['|', '\\']) {
        Cow::Owned(part.replace('\\', "\\\\").replace('|', "\\|"))
    } else {
        Cow::Borrowed(part)
    }
}
