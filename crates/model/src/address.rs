use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A 20-byte EVM address, always normalized to lowercase hex with a `0x`
/// prefix once it crosses the ingress boundary.
///
/// Per spec §3: "Addresses are stored lowercase-hex; all equality
/// comparisons are case-insensitive at ingress, case-sensitive after
/// normalization." Parsing accepts mixed-case (EIP-55) input; everything
/// downstream compares the normalized bytes directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

#[derive(Debug, thiserror::Error)]
pub enum AddressParseError {
    #[error("address must be 0x-prefixed")]
    MissingPrefix,
    #[error("address must be exactly 20 bytes: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl Address {
    pub fn from_alloy(address: alloy_primitives::Address) -> Self {
        Self(address.into_array())
    }

    pub fn to_alloy(self) -> alloy_primitives::Address {
        alloy_primitives::Address::from(self.0)
    }

    /// Lowercase hex string with `0x` prefix, e.g. `0xabc...`.
    pub fn to_lowercase_hex(self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").ok_or(AddressParseError::MissingPrefix)?;
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(stripped, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lowercase_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lowercase_hex())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_lowercase_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_mixed_case_to_lowercase() {
        let mixed = "0xAbC1230000000000000000000000000000000000";
        let lower = "0xabc1230000000000000000000000000000000000";
        assert_eq!(
            Address::from_str(mixed).unwrap(),
            Address::from_str(lower).unwrap()
        );
        assert_eq!(Address::from_str(mixed).unwrap().to_lowercase_hex(), lower);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(Address::from_str("abc").is_err());
    }
}
