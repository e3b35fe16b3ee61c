//! Error types for the tickgate order-intake pipeline.
//!
//! All errors use the `TG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Pair / tick size errors
//! - 3xx: Deposit / escrow errors
//! - 4xx: Address errors
//! - 5xx: Staging / intake stage errors
//! - 9xx: General errors (serialization, configuration)
//!
//! Every error is terminal for the batch that produced it. The enclosing
//! state-transition step surfaces it to the submitter and discards every
//! write the pipeline would have made.

use std::fmt;

use thiserror::Error;

use crate::{ContractAddress, IntakeStage, Pair};

/// Central error enum for all tickgate operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickgateError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The batch carried no orders.
    #[error("TG_ERR_100: At least one order needs to be placed")]
    EmptyBatch,

    /// An order violated a field-level invariant.
    #[error("TG_ERR_101: Invalid order at index {index}: {field}: {reason}")]
    InvalidOrder {
        index: usize,
        field: OrderField,
        reason: String,
    },

    // =================================================================
    // Pair / Tick Size Errors (2xx)
    // =================================================================
    /// Neither tick size is configured for the pair on this contract.
    #[error("TG_ERR_200: Pair {pair} has no tick size configured on contract {contract}")]
    PairNotConfigured {
        contract: ContractAddress,
        pair: Pair,
    },

    /// Exactly one of the pair's tick sizes is configured; the other lookup missed.
    #[error("TG_ERR_201: Key not found: pair {pair} has no {key} configured on contract {contract}")]
    KeyNotFound {
        contract: ContractAddress,
        pair: Pair,
        key: TickSizeKey,
    },

    // =================================================================
    // Deposit / Escrow Errors (3xx)
    // =================================================================
    /// A fund amount was unset or negative.
    #[error("TG_ERR_300: Invalid deposit of {denom}: {reason}")]
    InvalidDeposit { denom: String, reason: String },

    /// The denomination is not transfer-enabled at the protocol level.
    #[error("TG_ERR_301: Transfers of {denom} are currently disabled")]
    TransferDisabled { denom: String },

    /// The receiving contract is on the protocol block-list.
    #[error("TG_ERR_302: {address} is not allowed to receive funds")]
    RecipientBlocked { address: String },

    // =================================================================
    // Address Errors (4xx)
    // =================================================================
    /// The address is not a well-formed bech32 string for this chain.
    #[error("TG_ERR_400: Invalid address `{address}`: {reason}")]
    AddressFormatError { address: String, reason: String },

    // =================================================================
    // Staging / Intake Stage Errors (5xx)
    // =================================================================
    /// The per-contract order id counter cannot advance further.
    #[error("TG_ERR_500: Order ids exhausted for contract {contract}")]
    OrderIdExhausted { contract: ContractAddress },

    /// A batch attempted an out-of-order stage transition.
    #[error("TG_ERR_501: Wrong intake stage: expected {expected}, got {actual}")]
    WrongStage {
        expected: IntakeStage,
        actual: IntakeStage,
    },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("TG_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid genesis, bad tick size, etc.).
    #[error("TG_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl TickgateError {
    /// The fieldless kind of this error, for consumers that branch on it.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyBatch => ErrorKind::EmptyBatch,
            Self::InvalidOrder { .. } => ErrorKind::InvalidOrder,
            Self::PairNotConfigured { .. } => ErrorKind::PairNotConfigured,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::InvalidDeposit { .. } => ErrorKind::InvalidDeposit,
            Self::TransferDisabled { .. } => ErrorKind::TransferDisabled,
            Self::RecipientBlocked { .. } => ErrorKind::RecipientBlocked,
            Self::AddressFormatError { .. } => ErrorKind::AddressFormatError,
            Self::OrderIdExhausted { .. } => ErrorKind::OrderIdExhausted,
            Self::WrongStage { .. } => ErrorKind::WrongStage,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// The `TG_ERR_nnn` code of this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::EmptyBatch => "TG_ERR_100",
            ErrorKind::InvalidOrder => "TG_ERR_101",
            ErrorKind::PairNotConfigured => "TG_ERR_200",
            ErrorKind::KeyNotFound => "TG_ERR_201",
            ErrorKind::InvalidDeposit => "TG_ERR_300",
            ErrorKind::TransferDisabled => "TG_ERR_301",
            ErrorKind::RecipientBlocked => "TG_ERR_302",
            ErrorKind::AddressFormatError => "TG_ERR_400",
            ErrorKind::OrderIdExhausted => "TG_ERR_500",
            ErrorKind::WrongStage => "TG_ERR_501",
            ErrorKind::Serialization => "TG_ERR_901",
            ErrorKind::Configuration => "TG_ERR_902",
        }
    }

    pub(crate) fn address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AddressFormatError {
            address: address.into(),
            reason: reason.into(),
        }
    }
}

/// Fieldless discriminant of [`TickgateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyBatch,
    InvalidOrder,
    PairNotConfigured,
    KeyNotFound,
    InvalidDeposit,
    TransferDisabled,
    RecipientBlocked,
    AddressFormatError,
    OrderIdExhausted,
    WrongStage,
    Serialization,
    Configuration,
}

/// The order field an [`OrderViolation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Quantity,
    Price,
    AssetDenom,
    PriceDenom,
    Nominal,
    TriggerPrice,
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity => write!(f, "quantity"),
            Self::Price => write!(f, "price"),
            Self::AssetDenom => write!(f, "asset_denom"),
            Self::PriceDenom => write!(f, "price_denom"),
            Self::Nominal => write!(f, "nominal"),
            Self::TriggerPrice => write!(f, "trigger_price"),
        }
    }
}

/// Which half of a pair's tick-size configuration a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSizeKey {
    Price,
    Quantity,
}

impl fmt::Display for TickSizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => write!(f, "price tick size"),
            Self::Quantity => write!(f, "quantity tick size"),
        }
    }
}

/// A single order's field-level violation, before it is tied to a batch index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct OrderViolation {
    pub field: OrderField,
    pub reason: String,
}

impl OrderViolation {
    #[must_use]
    pub fn new(field: OrderField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Attach the violating order's position in its batch.
    #[must_use]
    pub fn at_index(self, index: usize) -> TickgateError {
        TickgateError::InvalidOrder {
            index,
            field: self.field,
            reason: self.reason,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TickgateError>;

impl From<serde_json::Error> for TickgateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
