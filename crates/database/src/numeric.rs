//! `U256` <-> Postgres `NUMERIC` bridge. `U256` itself has no `sqlx::Type`
//! impl, so every numeric column round-trips through `BigDecimal`, which
//! does.

use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use std::str::FromStr;

pub fn u256_to_bigdecimal(value: U256) -> BigDecimal {
    // U256::to_string() always yields a base-10 integer literal, which
    // BigDecimal parses exactly (no precision loss, unlike an f64 round-trip).
    BigDecimal::from_str(&value.to_string()).expect("U256 decimal string is always valid")
}

#[derive(Debug, thiserror::Error)]
#[error("numeric value does not fit in U256: {0}")]
pub struct NumericOutOfRange(BigDecimal);

pub fn bigdecimal_to_u256(value: BigDecimal) -> Result<U256, NumericOutOfRange> {
    let as_string = value.to_string();
    U256::from_str(&as_string).map_err(|_| NumericOutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_large_values() {
        let value = U256::from(1_000_000_000_000_000_000u128);
        let decimal = u256_to_bigdecimal(value);
        assert_eq!(bigdecimal_to_u256(decimal).unwrap(), value);
    }
}
