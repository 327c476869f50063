//! sqlx `Encode`/`Decode` bridges between `model`'s I/O-free types and
//! Postgres column types, following the teacher's `ByteArray<N>` pattern
//! (one small wrapper per awkward type, kept in its own file).

use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueFormat, PgValueRef},
    Decode, Encode, Postgres, Type,
};

/// Fixed-size byte array compatible with Postgres `bytea`.
#[derive(Clone, Copy, Debug)]
pub struct ByteArray<const N: usize>(pub [u8; N]);

impl<const N: usize> Type<Postgres> for ByteArray<N> {
    fn type_info() -> PgTypeInfo {
        <[u8] as Type<Postgres>>::type_info()
    }
}

impl<const N: usize> PgHasArrayType for ByteArray<N> {
    fn array_type_info() -> PgTypeInfo {
        <[&[u8]] as Type<Postgres>>::array_type_info()
    }
}

impl<const N: usize> Decode<'_, Postgres> for ByteArray<N> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        let mut bytes = [0u8; N];
        match value.format() {
            PgValueFormat::Binary => {
                bytes = value.as_bytes()?.try_into()?;
            }
            PgValueFormat::Text => {
                let text = value
                    .as_bytes()?
                    .strip_prefix(b"\\x")
                    .ok_or("text does not start with \\x")?;
                hex::decode_to_slice(text, &mut bytes)?;
            }
        }
        Ok(Self(bytes))
    }
}

impl<const N: usize> Encode<'_, Postgres> for ByteArray<N> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&[u8] as Encode<Postgres>>::encode(&self.0, buf)
    }
}

pub fn address_to_bytes(address: model::Address) -> ByteArray<20> {
    ByteArray(address.0)
}

pub fn address_from_bytes(bytes: ByteArray<20>) -> model::Address {
    model::Address(bytes.0)
}

pub fn hash_to_bytes(hash: [u8; 32]) -> ByteArray<32> {
    ByteArray(hash)
}

pub fn hash_from_bytes(bytes: ByteArray<32>) -> [u8; 32] {
    bytes.0
}
