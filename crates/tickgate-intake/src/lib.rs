//! # tickgate-intake
//!
//! The order-intake pipeline of the exchange module: everything that happens
//! to a batch of orders between submission and the matching stage.
//!
//! ## Architecture
//!
//! 1. **Order validator**: stateless field checks on every order
//! 2. **Fund escrow**: transfer eligibility of attached funds, deposit entries
//! 3. **Tick-size resolver**: per-(contract, pair) tick sizes, no defaults
//! 4. **Order id allocator**: sequential per-contract ids
//! 5. **Pending writes**: the batch's buffered deposits, orders and counter
//! 6. **Block memory state**: block-scoped deposit ledgers and staging sets
//!
//! ## Batch Flow
//!
//! ```text
//! PlaceOrdersMsg → validate_orders() → FundEscrow::escrow() → for each order:
//!     resolve_tick_sizes() → OrderIdAllocator::allocate() → PendingWrites::stage_order()
//!   → PendingWrites::commit() → BlockMemState + OrderIdStore
//! ```
//!
//! A batch is all-or-nothing. Until commit, its writes live only in
//! [`PendingWrites`].

pub mod bank;
pub mod escrow;
pub mod exchange_store;
pub mod mem_state;
pub mod order_id;
pub mod order_validator;
pub mod pending_writes;
pub mod place_orders;
pub mod tick_size;

pub use bank::BankPolicy;
pub use escrow::{FundEscrow, TransferPolicy};
pub use exchange_store::ExchangeStore;
pub use mem_state::BlockMemState;
pub use order_id::{OrderIdAllocator, OrderIdStore};
pub use order_validator::{validate_order, validate_orders};
pub use pending_writes::PendingWrites;
pub use place_orders::OrderIntake;
pub use tick_size::{TickSizeRegistry, resolve_tick_sizes};
