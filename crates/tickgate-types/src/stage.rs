//! Intake stages and block context.
//!
//! Each batch moves through five stages in order:
//! **RECEIVED → VALIDATED → ESCROWED → STAGED → COMMITTED**
//!
//! A failure at any stage before COMMITTED discards the batch's pending
//! writes. Only the COMMITTED transition touches shared block state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The stages of one batch's trip through the intake pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum IntakeStage {
    /// Submission accepted for processing; nothing checked yet.
    Received,
    /// Every order passed field-level validation.
    Validated,
    /// Attached funds passed eligibility checks; deposits buffered.
    Escrowed,
    /// Every order resolved, numbered and buffered for staging.
    Staged,
    /// Buffered writes applied to block state and the id counter persisted.
    Committed,
}

impl IntakeStage {
    /// The stage that follows this one, or `None` after COMMITTED.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Validated),
            Self::Validated => Some(Self::Escrowed),
            Self::Escrowed => Some(Self::Staged),
            Self::Staged => Some(Self::Committed),
            Self::Committed => None,
        }
    }
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => write!(f, "RECEIVED"),
            Self::Validated => write!(f, "VALIDATED"),
            Self::Escrowed => write!(f, "ESCROWED"),
            Self::Staged => write!(f, "STAGED"),
            Self::Committed => write!(f, "COMMITTED"),
        }
    }
}

/// Height and time of the block whose state transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub height: u64,
    pub time: DateTime<Utc>,
}

impl BlockContext {
    #[must_use]
    pub fn new(height: u64, time: DateTime<Utc>) -> Self {
        Self { height, time }
    }

    /// Block time as unix seconds, clamped at zero.
    #[must_use]
    pub fn unix_timestamp(&self) -> u64 {
        u64::try_from(self.time.timestamp()).unwrap_or(0)
    }
}

impl Default for BlockContext {
    fn default() -> Self {
        Self {
            height: 0,
            time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}
