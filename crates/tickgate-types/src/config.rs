//! Configuration types for the intake pipeline and the exchange state it reads.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, ContractAddress, Pair, Result, TickSizes, TickgateError, constants};

/// Pipeline-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Bech32 prefix every account and contract address must carry.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
}

fn default_address_prefix() -> String {
    constants::DEFAULT_ADDRESS_PREFIX.to_string()
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            address_prefix: default_address_prefix(),
        }
    }
}

/// Initial exchange state: registered contracts and bank transfer rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeGenesis {
    #[serde(default)]
    pub contracts: Vec<ContractConfig>,
    #[serde(default)]
    pub bank: BankConfig,
}

/// One exchange contract and its pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub contract_addr: ContractAddress,
    #[serde(default)]
    pub next_order_id: u64,
    #[serde(default)]
    pub pairs: Vec<PairConfig>,
}

/// Tick sizes for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    pub price_denom: String,
    pub asset_denom: String,
    pub price_tick_size: Decimal,
    pub quantity_tick_size: Decimal,
}

impl PairConfig {
    #[must_use]
    pub fn pair(&self) -> Pair {
        Pair::new(self.price_denom.clone(), self.asset_denom.clone())
    }

    #[must_use]
    pub fn tick_sizes(&self) -> TickSizes {
        TickSizes {
            price: self.price_tick_size,
            quantity: self.quantity_tick_size,
        }
    }
}

/// Protocol-level transfer rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    #[serde(default = "default_send_enabled")]
    pub default_send_enabled: bool,
    #[serde(default)]
    pub send_enabled: Vec<SendEnabled>,
    #[serde(default)]
    pub blocked_addresses: Vec<String>,
}

fn default_send_enabled() -> bool {
    constants::DEFAULT_SEND_ENABLED
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            default_send_enabled: default_send_enabled(),
            send_enabled: Vec::new(),
            blocked_addresses: Vec::new(),
        }
    }
}

/// Per-denomination override of [`BankConfig::default_send_enabled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEnabled {
    pub denom: String,
    pub enabled: bool,
}

impl ExchangeGenesis {
    /// Parse and validate a JSON genesis document.
    pub fn from_json(json: &str, intake: &IntakeConfig) -> Result<Self> {
        let genesis: Self = serde_json::from_str(json)?;
        genesis.validate(intake)?;
        Ok(genesis)
    }

    /// Reject configurations the pipeline could not serve deterministically.
    ///
    /// # Errors
    /// Returns `Configuration` for non-positive tick sizes, empty
    /// denominations, duplicate contracts or pairs, and malformed addresses.
    pub fn validate(&self, intake: &IntakeConfig) -> Result<()> {
        let prefix = intake.address_prefix.as_str();
        let mut contracts = BTreeSet::new();
        for contract in &self.contracts {
            contract
                .contract_addr
                .parse(prefix)
                .map_err(|err| TickgateError::Configuration(err.to_string()))?;
            if !contracts.insert(&contract.contract_addr) {
                return Err(TickgateError::Configuration(format!(
                    "contract {} is configured twice",
                    contract.contract_addr
                )));
            }
            let mut pairs = BTreeSet::new();
            for pair in &contract.pairs {
                if pair.price_denom.is_empty() || pair.asset_denom.is_empty() {
                    return Err(TickgateError::Configuration(format!(
                        "contract {}: pair denominations cannot be empty",
                        contract.contract_addr
                    )));
                }
                if pair.price_tick_size <= Decimal::ZERO || pair.quantity_tick_size <= Decimal::ZERO
                {
                    return Err(TickgateError::Configuration(format!(
                        "contract {}: tick sizes of {} must be positive",
                        contract.contract_addr,
                        pair.pair()
                    )));
                }
                if !pairs.insert(pair.pair()) {
                    return Err(TickgateError::Configuration(format!(
                        "contract {}: pair {} is configured twice",
                        contract.contract_addr,
                        pair.pair()
                    )));
                }
            }
        }
        for blocked in &self.bank.blocked_addresses {
            Address::parse(blocked, prefix)
                .map_err(|err| TickgateError::Configuration(err.to_string()))?;
        }
        Ok(())
    }
}
