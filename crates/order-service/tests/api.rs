//! End-to-end HTTP tests against a live Postgres + Redis. Ignored by
//! default, matching the other store-backed integration tests in this
//! workspace.

use alloy_primitives::{U256, address};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use model::Side;
use order_service::{AppState, router};
use tower::ServiceExt;

async fn state() -> AppState {
    let db = database::connect("postgresql://", 2)
        .await
        .expect("local postgres available");
    let cache = cache::OrderBookCache::connect("127.0.0.1:6379", None)
        .await
        .expect("local redis available");
    let marketplace = model::Address::from_alloy(address!(
        "1111111111111111111111111111111111111111"
    ));
    AppState {
        db,
        cache,
        domain: chain::domain(1, marketplace.to_alloy()),
        marketplace,
    }
}

#[tokio::test]
#[ignore]
async fn create_order_with_tampered_signature_is_rejected() {
    let state = state().await;
    let app = router(state);

    let maker = testlib::signer(1);
    let impostor = testlib::signer(2);
    let domain = chain::domain(1, address!("1111111111111111111111111111111111111111"));
    let nft = address!("2222222222222222222222222222222222222222");
    let payment_token = address!("3333333333333333333333333333333333333333");
    let price = U256::from(1_000_000_000_000_000_000u128);
    let expiry = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();

    // Signed by `impostor` but the body claims `maker`'s address — step 6 of
    // the create-order operation (§4.3) must reject this with 401.
    let signature = testlib::sign_order(
        &impostor,
        &domain,
        maker.address(),
        nft,
        U256::from(1u64),
        payment_token,
        price,
        U256::from(expiry as u64),
        U256::from(0u64),
        Side::Ask,
    );

    let body = serde_json::json!({
        "maker": format!("{:?}", maker.address()),
        "nftAddress": format!("{:?}", nft),
        "tokenId": "1",
        "paymentToken": format!("{:?}", payment_token),
        "price": price.to_string(),
        "expiry": expiry,
        "nonce": "0",
        "side": "ask",
        "signature": format!("0x{}", hex::encode(signature.0)),
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/orders")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
