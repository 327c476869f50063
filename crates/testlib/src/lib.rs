//! Shared fixtures for signing valid typed-data orders/cancellations in
//! tests across `order-service`, `matching-engine`, and `execution-service`.
//! Mirrors `chain::domain`'s `sol!` type definitions; a second `sol!`
//! invocation produces a structurally distinct Rust type but the identical
//! EIP-712 digest, so signatures made here verify against `chain::domain`'s
//! recovery functions exactly as a real client's would.

use alloy_primitives::{Address, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct};
use chrono::{Duration, Utc};
use model::{Order, OrderStatus, Side, Signature};

alloy_sol_types::sol! {
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

    struct Cancel {
        address maker;
        uint256 nonce;
    }
}

/// A deterministic throwaway signer, distinct per `seed` byte, for tests
/// that need a stable maker address across assertions.
pub fn signer(seed: u8) -> PrivateKeySigner {
    let mut key = [0u8; 32];
    key[31] = seed.max(1);
    PrivateKeySigner::from_bytes(&key.into()).expect("valid scalar")
}

fn to_model_signature(alloy_sig: &alloy_primitives::Signature) -> Signature {
    Signature(alloy_sig.as_bytes())
}

/// Signs the `Order` typed-data value matching §4.3 and returns the
/// `model::Signature` a real client would submit.
#[allow(clippy::too_many_arguments)]
pub fn sign_order(
    signer: &PrivateKeySigner,
    domain: &Eip712Domain,
    maker: Address,
    nft: Address,
    token_id: U256,
    payment_token: Address,
    price: U256,
    expiry: U256,
    nonce: U256,
    side: Side,
) -> Signature {
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
    let sig = signer.sign_hash_sync(&digest).expect("sign order digest");
    to_model_signature(&sig)
}

/// Signs the `Cancel` typed-data value matching §4.3's cancel-order step 3.
pub fn sign_cancel(
    signer: &PrivateKeySigner,
    domain: &Eip712Domain,
    maker: Address,
    nonce: U256,
) -> Signature {
    let cancel = Cancel { maker, nonce };
    let digest = cancel.eip712_signing_hash(domain);
    let sig = signer.sign_hash_sync(&digest).expect("sign cancel digest");
    to_model_signature(&sig)
}

/// A fully self-consistent `Order` (valid signature, unexpired, ACTIVE),
/// built from `signer`'s key so callers can flip one field and expect a
/// well-defined rejection.
#[allow(clippy::too_many_arguments)]
pub fn signed_order(
    signer: &PrivateKeySigner,
    chain_id: u64,
    marketplace: Address,
    nft: Address,
    token_id: U256,
    payment_token: Address,
    price: U256,
    nonce: U256,
    side: Side,
) -> Order {
    let domain = chain::domain(chain_id, marketplace);
    let expiry = Utc::now() + Duration::hours(1);
    let expiry_u256 = U256::from(expiry.timestamp().max(0) as u64);
    let maker = signer.address();
    let signature = sign_order(
        signer,
        &domain,
        maker,
        nft,
        token_id,
        payment_token,
        price,
        expiry_u256,
        nonce,
        side,
    );
    let (digest, _) = chain::order_digest_and_recover(
        &domain,
        maker,
        nft,
        token_id,
        payment_token,
        price,
        expiry_u256,
        nonce,
        side,
        &signature,
    )
    .expect("freshly produced signature recovers");

    Order {
        id: 0,
        maker: model::Address::from_alloy(maker),
        nft_address: model::Address::from_alloy(nft),
        token_id,
        payment_token: model::Address::from_alloy(payment_token),
        price,
        expiry,
        nonce,
        side,
        status: OrderStatus::Active,
        signature,
        hash: digest,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn signed_order_recovers_to_its_own_maker() {
        let signer = signer(1);
        let order = signed_order(
            &signer,
            1,
            address!("1111111111111111111111111111111111111111"),
            address!("2222222222222222222222222222222222222222"),
            U256::from(1u64),
            address!("3333333333333333333333333333333333333333"),
            U256::from(1_000u64),
            U256::from(0u64),
            Side::Ask,
        );
        assert_eq!(order.maker, model::Address::from_alloy(signer.address()));
    }
}
