use alloy_primitives::U256;
use serde::{de, Deserialize, Deserializer, Serializer};

/// (De)serializes a `U256` as a canonical base-10 string, matching the wire
/// format of §4.3 (`tokenId`/`price`/`nonce` are decimal strings).
pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<U256>().map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Wrapper(#[serde(with = "super")] U256);

    #[test]
    fn round_trips_decimal_string() {
        let value = Wrapper(U256::from(1_000_000_000_000_000_000u128));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"1000000000000000000\"");
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn rejects_non_numeric() {
        let err = serde_json::from_str::<Wrapper>("\"not-a-number\"");
        assert!(err.is_err());
    }
}
