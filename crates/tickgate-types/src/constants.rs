//! System-wide constants for the tickgate intake pipeline.

/// Default bech32 human-readable prefix for accounts and contracts.
pub const DEFAULT_ADDRESS_PREFIX: &str = "dex";

/// Maximum decoded address length in bytes.
pub const MAX_ADDRESS_LENGTH: usize = 255;

/// Next order id of a contract that has never placed an order.
pub const INITIAL_ORDER_ID: u64 = 0;

/// Whether a denomination without an explicit send-enabled entry may move.
pub const DEFAULT_SEND_ENABLED: bool = true;

/// Domain tag for the staged-orders digest.
pub const BLOCK_ORDERS_DIGEST_TAG: &[u8] = b"tickgate:block_orders:v1:";
