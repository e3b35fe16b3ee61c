//! Fund escrow: eligibility checks and deposit bookkeeping for a batch.
//!
//! Escrow never moves tokens. It checks that the attached funds could be
//! transferred to the contract and produces one [`DepositInfoEntry`] per
//! fund, attributed to the submitter. The entries are buffered with the rest
//! of the batch and land in the contract's deposit ledger only on commit;
//! the settlement stage performs the actual transfer later.

use rust_decimal::Decimal;
use tickgate_types::{Address, Coin, ContractAddress, DepositInfoEntry, Result, TickgateError};

/// Protocol-level transfer rules consulted by escrow.
pub trait TransferPolicy {
    /// Whether `denom` may currently be sent.
    fn is_send_enabled(&self, denom: &str) -> bool;

    /// Whether `address` is barred from receiving funds.
    fn is_blocked(&self, address: &Address) -> bool;
}

/// Checks and records the funds attached to one batch.
pub struct FundEscrow<'a, T: TransferPolicy + ?Sized> {
    policy: &'a T,
    address_prefix: &'a str,
}

impl<'a, T: TransferPolicy + ?Sized> FundEscrow<'a, T> {
    /// Create an escrow gate over `policy` for addresses carrying `address_prefix`.
    #[must_use]
    pub fn new(policy: &'a T, address_prefix: &'a str) -> Self {
        Self {
            policy,
            address_prefix,
        }
    }

    /// Check `funds` and produce their deposit entries.
    ///
    /// An empty `funds` slice succeeds without any check. Otherwise:
    /// 1. the contract address must decode
    /// 2. every amount must be set and non-negative
    /// 3. every denomination must be send-enabled
    /// 4. the contract must not be blocked
    ///
    /// # Errors
    /// `AddressFormatError`, `InvalidDeposit`, `TransferDisabled` or
    /// `RecipientBlocked`, for the first check that fails.
    pub fn escrow(
        &self,
        funds: &[Coin],
        submitter: &str,
        contract: &ContractAddress,
    ) -> Result<Vec<DepositInfoEntry>> {
        if funds.is_empty() {
            return Ok(Vec::new());
        }

        let contract_addr = contract.parse(self.address_prefix)?;

        let mut amounts = Vec::with_capacity(funds.len());
        for fund in funds {
            let amount = match fund.amount {
                None => {
                    return Err(TickgateError::InvalidDeposit {
                        denom: fund.denom.clone(),
                        reason: "deposit amount cannot be nil".to_string(),
                    });
                }
                Some(amount) if amount < Decimal::ZERO => {
                    return Err(TickgateError::InvalidDeposit {
                        denom: fund.denom.clone(),
                        reason: format!("fund deposits cannot be negative: {amount}"),
                    });
                }
                Some(amount) => amount,
            };
            amounts.push(amount);
        }

        if let Some(fund) = funds
            .iter()
            .find(|fund| !self.policy.is_send_enabled(&fund.denom))
        {
            return Err(TickgateError::TransferDisabled {
                denom: fund.denom.clone(),
            });
        }

        if self.policy.is_blocked(&contract_addr) {
            return Err(TickgateError::RecipientBlocked {
                address: contract.to_string(),
            });
        }

        let entries: Vec<DepositInfoEntry> = funds
            .iter()
            .zip(amounts)
            .map(|(fund, amount)| DepositInfoEntry {
                creator: submitter.to_string(),
                denom: fund.denom.clone(),
                amount,
            })
            .collect();

        tracing::debug!(
            contract = %contract,
            submitter,
            deposits = entries.len(),
            "Funds escrowed"
        );

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tickgate_types::{ErrorKind, constants::DEFAULT_ADDRESS_PREFIX};

    use super::*;

    #[derive(Default)]
    struct Policy {
        disabled: HashSet<String>,
        blocked: HashSet<Vec<u8>>,
    }

    impl TransferPolicy for Policy {
        fn is_send_enabled(&self, denom: &str) -> bool {
            !self.disabled.contains(denom)
        }

        fn is_blocked(&self, address: &Address) -> bool {
            self.blocked.contains(address.as_bytes())
        }
    }

    fn contract() -> ContractAddress {
        ContractAddress::new(
            Address::from_bytes(DEFAULT_ADDRESS_PREFIX, [2u8; 32])
                .unwrap()
                .to_string(),
        )
    }

    #[test]
    fn no_funds_is_a_no_op() {
        let policy = Policy {
            blocked: HashSet::from([vec![2u8; 32]]),
            ..Policy::default()
        };
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        // Neither the malformed contract nor a block-list entry matter.
        let entries = escrow
            .escrow(&[], "dex1creator", &ContractAddress::new("garbage"))
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn records_one_entry_per_fund() {
        let policy = Policy::default();
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let funds = vec![
            Coin::new("USDC", Decimal::new(100, 0)),
            Coin::new("uatom", Decimal::new(25, 1)),
        ];
        let entries = escrow.escrow(&funds, "dex1creator", &contract()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].creator, "dex1creator");
        assert_eq!(entries[0].denom, "USDC");
        assert_eq!(entries[0].amount, Decimal::new(100, 0));
        assert_eq!(entries[1].denom, "uatom");
        assert_eq!(entries[1].amount, Decimal::new(25, 1));
    }

    #[test]
    fn zero_amount_is_accepted() {
        let policy = Policy::default();
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let entries = escrow
            .escrow(&[Coin::new("USDC", Decimal::ZERO)], "dex1creator", &contract())
            .unwrap();
        assert_eq!(entries[0].amount, Decimal::ZERO);
    }

    #[test]
    fn unset_amount_rejected() {
        let policy = Policy::default();
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let funds = vec![Coin {
            denom: "USDC".into(),
            amount: None,
        }];
        let err = escrow.escrow(&funds, "dex1creator", &contract()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDeposit);
        assert!(err.to_string().contains("nil"));
    }

    #[test]
    fn negative_amount_rejected() {
        let policy = Policy::default();
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let funds = vec![
            Coin::new("USDC", Decimal::ONE),
            Coin::new("uatom", Decimal::NEGATIVE_ONE),
        ];
        let err = escrow.escrow(&funds, "dex1creator", &contract()).unwrap_err();
        assert!(
            matches!(err, TickgateError::InvalidDeposit { ref denom, .. } if denom == "uatom"),
            "Got: {err:?}"
        );
    }

    #[test]
    fn disabled_denom_rejected() {
        let policy = Policy {
            disabled: HashSet::from(["ufrozen".to_string()]),
            ..Policy::default()
        };
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let funds = vec![
            Coin::new("USDC", Decimal::ONE),
            Coin::new("ufrozen", Decimal::ONE),
        ];
        let err = escrow.escrow(&funds, "dex1creator", &contract()).unwrap_err();
        assert!(
            matches!(err, TickgateError::TransferDisabled { ref denom } if denom == "ufrozen"),
            "Got: {err:?}"
        );
    }

    #[test]
    fn blocked_contract_rejected() {
        let policy = Policy {
            blocked: HashSet::from([vec![2u8; 32]]),
            ..Policy::default()
        };
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let contract = contract();
        let err = escrow
            .escrow(&[Coin::new("USDC", Decimal::ONE)], "dex1creator", &contract)
            .unwrap_err();
        assert!(
            matches!(err, TickgateError::RecipientBlocked { ref address } if address == contract.as_str()),
            "Got: {err:?}"
        );
    }

    #[test]
    fn malformed_contract_rejected_when_funds_attached() {
        let policy = Policy::default();
        let escrow = FundEscrow::new(&policy, DEFAULT_ADDRESS_PREFIX);
        let err = escrow
            .escrow(
                &[Coin::new("USDC", Decimal::ONE)],
                "dex1creator",
                &ContractAddress::new("garbage"),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressFormatError);
    }
}
