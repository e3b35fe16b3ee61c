//! In-memory transfer rules.
//!
//! Mirrors the protocol bank module's send-enabled table and block-list
//! closely enough for escrow to consult. Denominations without an explicit
//! entry fall back to the default.

use std::collections::{BTreeMap, BTreeSet};

use tickgate_types::{Address, BankConfig, Result, TickgateError};

use crate::escrow::TransferPolicy;

/// Send-enabled flags and blocked recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankPolicy {
    default_send_enabled: bool,
    send_enabled: BTreeMap<String, bool>,
    /// Blocked addresses by decoded bytes, so prefix case does not matter.
    blocked: BTreeSet<Vec<u8>>,
}

impl BankPolicy {
    /// Everything sendable, nothing blocked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_send_enabled: tickgate_types::constants::DEFAULT_SEND_ENABLED,
            send_enabled: BTreeMap::new(),
            blocked: BTreeSet::new(),
        }
    }

    /// Build the policy from bank configuration.
    ///
    /// # Errors
    /// Returns `Configuration` if a blocked address does not decode.
    pub fn from_config(config: &BankConfig, prefix: &str) -> Result<Self> {
        let mut policy = Self {
            default_send_enabled: config.default_send_enabled,
            ..Self::new()
        };
        for entry in &config.send_enabled {
            policy.set_send_enabled(&entry.denom, entry.enabled);
        }
        for blocked in &config.blocked_addresses {
            let address = Address::parse(blocked, prefix)
                .map_err(|err| TickgateError::Configuration(err.to_string()))?;
            policy.block(&address);
        }
        Ok(policy)
    }

    pub fn set_send_enabled(&mut self, denom: &str, enabled: bool) {
        self.send_enabled.insert(denom.to_string(), enabled);
    }

    pub fn block(&mut self, address: &Address) {
        self.blocked.insert(address.as_bytes().to_vec());
    }
}

impl Default for BankPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferPolicy for BankPolicy {
    fn is_send_enabled(&self, denom: &str) -> bool {
        self.send_enabled
            .get(denom)
            .copied()
            .unwrap_or(self.default_send_enabled)
    }

    fn is_blocked(&self, address: &Address) -> bool {
        self.blocked.contains(address.as_bytes())
    }
}
