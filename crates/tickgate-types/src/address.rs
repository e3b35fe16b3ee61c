//! Bech32 account and contract addresses.

use std::fmt;

use bech32::{Bech32, Hrp, primitives::decode::CheckedHrpstring};

use crate::{Result, TickgateError, constants};

/// A decoded bech32 address: human-readable prefix plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Address {
    prefix: String,
    bytes: Vec<u8>,
}

impl Address {
    /// Decode `address`, requiring the human-readable part to equal `prefix`.
    ///
    /// # Errors
    /// Returns `AddressFormatError` if the string is empty, fails bech32
    /// decoding, carries a different prefix, or decodes to an empty or
    /// oversized byte payload.
    pub fn parse(address: &str, prefix: &str) -> Result<Self> {
        if address.trim().is_empty() {
            return Err(TickgateError::address(
                address,
                "empty address string is not allowed",
            ));
        }
        let checked = CheckedHrpstring::new::<Bech32>(address)
            .map_err(|err| TickgateError::address(address, err.to_string()))?;
        let hrp = checked.hrp();
        let bytes: Vec<u8> = checked.byte_iter().collect();
        if !hrp.as_str().eq_ignore_ascii_case(prefix) {
            return Err(TickgateError::address(
                address,
                format!("invalid prefix: expected {prefix}, got {}", hrp.as_str()),
            ));
        }
        Self::check_length(address, &bytes)?;
        Ok(Self {
            prefix: prefix.to_string(),
            bytes,
        })
    }

    /// Build an address from raw bytes under `prefix`.
    pub fn from_bytes(prefix: &str, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        Hrp::parse(prefix).map_err(|err| TickgateError::address(prefix, err.to_string()))?;
        Self::check_length(prefix, &bytes)?;
        Ok(Self {
            prefix: prefix.to_string(),
            bytes,
        })
    }

    fn check_length(address: &str, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(TickgateError::address(address, "addresses cannot be empty"));
        }
        if bytes.len() > constants::MAX_ADDRESS_LENGTH {
            return Err(TickgateError::address(
                address,
                format!(
                    "address max length is {}, got {}",
                    constants::MAX_ADDRESS_LENGTH,
                    bytes.len()
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Prefix and length are validated on construction.
        let hrp = Hrp::parse(&self.prefix).map_err(|_| fmt::Error)?;
        let encoded = bech32::encode::<Bech32>(hrp, &self.bytes).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}
