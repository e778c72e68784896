//! Wallet address validation and canonical formatting.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hex body length of an EVM address (20 bytes).
const ADDRESS_HEX_LEN: usize = 40;

/// A validated EVM-style wallet address in canonical lowercase form.
///
/// Construction goes through [`WalletAddress::parse`], which rejects anything
/// that is not `0x` followed by 40 hex characters. Mixed-case (checksummed)
/// input is accepted and normalized, so dataset lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Validate and normalize a raw address string.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| Error::InvalidAddress {
                input: input.to_string(),
            })?;

        if body.len() != ADDRESS_HEX_LEN || hex::decode(body).is_err() {
            return Err(Error::InvalidAddress {
                input: input.to_string(),
            });
        }

        Ok(Self(format!("0x{}", body.to_lowercase())))
    }

    /// Canonical lowercase `0x`-prefixed form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated display form: first six and last four characters.
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}
