//! EIP-712 typed-data construction and signature recovery for the two
//! primary types defined in §4.3: `Order` and `Cancel`.
//!
//! Per §9 "Shared typed-data singleton": each verification call here
//! constructs a fresh `sol!`-generated struct value and a fresh
//! `Eip712Domain`. There is no shared mutable typed-data state to race on —
//! the concurrency hazard the original exhibited (mutating one shared value's
//! `PrimaryType` field between requests) cannot occur because the type
//! system gives `Order` and `Cancel` distinct Rust types.

use alloy_primitives::{Address, Signature, U256};
use alloy_sol_types::{eip712_domain, Eip712Domain, SolStruct};
use model::order::Side;
use thiserror::Error;

alloy_sol_types::sol! {
    /// Mirrors §4.3's `Order(maker, nft, tokenId, paymentToken, price,
    /// expiry, nonce, side)` EIP-712 primary type. `side` is `0=ASK,
    /// 1=BID`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Order {
        address maker;
        address nft;
        uint256 tokenId;
        address paymentToken;
        uint256 price;
        uint256 expiry;
        uint256 nonce;
        uint8 side;
    }

    /// Mirrors §4.3's `Cancel(maker, nonce)` EIP-712 primary type.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Cancel {
        address maker;
        uint256 nonce;
    }
}

/// Builds the domain separator from §4.3: `name="Oeasy Marketplace"`,
/// `version="1"`, the configured chain id, and the marketplace contract
/// address.
pub fn domain(chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    eip712_domain! {
        name: "Oeasy Marketplace",
        version: "1",
        chain_id: chain_id,
        verifying_contract: verifying_contract,
    }
}

#[derive(Debug, Error)]
pub enum RecoverError {
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

fn to_alloy_signature(sig: &model::Signature) -> Result<Signature, RecoverError> {
    let recovery_id = sig
        .normalized_recovery_id()
        .map_err(|e| RecoverError::InvalidSignature(e.to_string()))?;
    Ok(Signature::from_scalars_and_parity(
        sig.r().into(),
        sig.s().into(),
        recovery_id != 0,
    ))
}

/// Computes the `Order` typed-data digest and recovers the signer, per §4.3
/// step 6.
pub fn order_digest_and_recover(
    domain: &Eip712Domain,
    maker: Address,
    nft: Address,
    token_id: U256,
    payment_token: Address,
    price: U256,
    expiry: U256,
    nonce: U256,
    side: Side,
    signature: &model::Signature,
) -> Result<([u8; 32], Address), RecoverError> {
    let order = Order {
        maker,
        nft,
        tokenId: token_id,
        paymentToken: payment_token,
        price,
        expiry,
        nonce,
        side: side.as_typed_data_u8(),
    };
    let digest = order.eip712_signing_hash(domain);
    let alloy_sig = to_alloy_signature(signature)?;
    let recovered = alloy_sig
        .recover_address_from_prehash(&digest)
        .map_err(|e| RecoverError::InvalidSignature(e.to_string()))?;
    Ok((digest.0, recovered))
}

/// Computes the `Cancel` typed-data digest and recovers the signer, per
/// §4.3's cancel-order operation step 3. This MUST build a fresh `Cancel`
/// value distinct from the `Order` value above — enforced here by the two
/// being different Rust types generated by distinct `sol!` invocations.
pub fn cancel_digest_and_recover(
    domain: &Eip712Domain,
    maker: Address,
    nonce: U256,
    signature: &model::Signature,
) -> Result<([u8; 32], Address), RecoverError> {
    let cancel = Cancel { maker, nonce };
    let digest = cancel.eip712_signing_hash(domain);
    let alloy_sig = to_alloy_signature(signature)?;
    let recovered = alloy_sig
        .recover_address_from_prehash(&digest)
        .map_err(|e| RecoverError::InvalidSignature(e.to_string()))?;
    Ok((digest.0, recovered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn order_and_cancel_digests_differ_for_same_maker_nonce() {
        let domain = domain(1, address!("1111111111111111111111111111111111111111"));
        let maker = address!("2222222222222222222222222222222222222222");
        let nonce = U256::from(7u64);

        let order = Order {
            maker,
            nft: address!("3333333333333333333333333333333333333333"),
            tokenId: U256::from(1u64),
            paymentToken: address!("4444444444444444444444444444444444444444"),
            price: U256::from(100u64),
            expiry: U256::from(9_999_999_999u64),
            nonce,
            side: 0,
        };
        let cancel = Cancel { maker, nonce };

        assert_ne!(
            order.eip712_signing_hash(&domain),
            cancel.eip712_signing_hash(&domain)
        );
    }
}
