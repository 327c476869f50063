use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use execution_service::router;
use tower::ServiceExt;

#[tokio::test]
async fn read_only_mode_does_not_register_execute_route() {
    let app = router(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/internal/execute")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_only_mode_still_serves_health() {
    let app = router(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/internal/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
