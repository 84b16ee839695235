use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{build_router, ApiRoutes};
use server::AppState;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let app = build_router(AppState::new(db), &ApiRoutes::with_prefix("/api/v1"), CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url: format!("http://{}", addr) })
}

#[tokio::test]
async fn e2e_customer_coupon_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let api = |p: &str| format!("{}/api/v1/{}", app.base_url, p);

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.post(api("customer/")).json(&json!({"username": "jack", "name": "Jack"})).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let jack: Value = res.json().await?;
    assert_eq!(jack["id"], 1);

    let res = client
        .post(api("coupon"))
        .json(&json!({
            "code": "WELCOME5",
            "description": "Five off",
            "discount": 5.0,
            "discount_type": "fix",
            "valid_from": "2020-01-01 00:00:00",
            "valid_until": "2999-01-01 00:00:00+00:00"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let coupon: Value = res.json().await?;
    let coupon_id = coupon["id"].as_i64().unwrap_or_default();

    let res = client
        .post(api("customer-coupon/"))
        .json(&json!({"customer_id": 1, "coupon_id": coupon_id}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let status: Value = client.get(api(&format!("coupon/{coupon_id}/status"))).send().await?.json().await?;
    assert_eq!(status, json!({"status": "valid"}));

    let held: Value = client.get(api("customer/1/coupons")).send().await?.json().await?;
    assert_eq!(held.as_array().map(Vec::len), Some(1));

    let res = client.delete(api(&format!("customer-coupon/1/{coupon_id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = client.delete(api(&format!("customer-coupon/1/{coupon_id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
