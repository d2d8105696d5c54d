//! End-to-end API flow through the assembled router.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bakery_server::core::build_router;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.expect("request failed");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read failed")
        .to_vec();
    (status, body)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response is not JSON")
}

/// Register an admin and log in, returning the bearer token.
async fn admin_token(app: &Router) -> String {
    let (status, _) = send(
        app,
        post_json(
            "/api/auth/register",
            json!({
                "first_name": "Ana",
                "last_name": "Torres",
                "email": "ana@bakery.test",
                "password": "Abcdef1!",
                "age": 34,
                "role": "Admin"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        post_json(
            "/api/auth/login",
            json!({ "email": "ana@bakery.test", "password": "Abcdef1!" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    parse(&body)["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (state, _dir) = common::test_state().await;
    let app = build_router(state);

    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "healthy");
}

#[tokio::test]
async fn catalog_requires_admin_for_mutations_only() {
    let (state, _dir) = common::test_state().await;
    let app = build_router(state);

    // Anonymous listing works
    let (status, body) = send(&app, get("/api/products", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 0);

    // Anonymous creation is rejected before reaching the handler
    let (status, _) = send(
        &app,
        post_json("/api/products", json!({"name": "X", "cost": 1.0, "stock": 1}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admin creation succeeds and the listing reflects it
    let token = admin_token(&app).await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/products",
            json!({"name": "Sourdough", "cost": 2.0, "stock": 4, "margin_percent": 50.0}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let product = parse(&body);
    assert_eq!(product["sale_price"], 3.0);

    let (_, body) = send(&app, get("/api/products", None)).await;
    assert_eq!(parse(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn weak_password_registration_is_rejected() {
    let (state, _dir) = common::test_state().await;
    let app = build_router(state);

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/register",
            json!({
                "first_name": "Eve",
                "last_name": "Weak",
                "email": "eve@bakery.test",
                "password": "abc",
                "age": 20
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"], "validation_error");
}

#[tokio::test]
async fn staff_sale_flows_through_the_api() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.5, 5).await;
    let muffin_id = common::product_id(&muffin);
    let app = build_router(state.clone());

    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/sales",
            json!({
                "items": [{"product_id": &muffin_id, "name": "Muffin", "quantity": 3}],
                "payment_method": "Card",
                "customer": {"name": "Carlos"}
            }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let sale = parse(&body);
    assert_eq!(sale["total"], 7.5);
    assert_eq!(sale["payment_method"], "Card");
    assert_eq!(sale["sold_by_name"], "Ana Torres");

    assert_eq!(common::current_stock(&state, &muffin_id).await, 2);

    // The sale shows up in today's view and the admin listing
    let (status, body) = send(&app, get("/api/sales/today", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 1);

    let (status, body) = send(&app, get("/api/sales", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 1);

    // Receipt is downloadable without auth
    let sale_id = sale["id"].as_str().unwrap().to_string();
    let uri = format!("/api/sales/{sale_id}/receipt");
    let (status, body) = send(&app, get(&uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"), "receipt should be a PDF");
}

#[tokio::test]
async fn anonymous_checkout_records_the_online_marker() {
    let (state, _dir) = common::test_state().await;
    let bread = common::seed_product(&state, "Bread", 1.0, 3).await;
    let bread_id = common::product_id(&bread);
    let app = build_router(state.clone());

    let (status, body) = send(
        &app,
        post_json(
            "/api/sales/customer",
            json!({
                "items": [{"product_id": &bread_id, "name": "Bread", "quantity": 2}],
                "customer": {"name": "Luisa", "phone": "555-0101"}
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let sale = parse(&body);
    assert_eq!(sale["sold_by_name"], "Online customer");
    assert_eq!(sale["payment_method"], "Cash");

    assert_eq!(common::current_stock(&state, &bread_id).await, 1);
}

#[tokio::test]
async fn oversell_through_the_api_maps_to_bad_request() {
    let (state, _dir) = common::test_state().await;
    let cake = common::seed_product(&state, "Cake", 8.0, 2).await;
    let cake_id = common::product_id(&cake);
    let app = build_router(state.clone());

    let (status, body) = send(
        &app,
        post_json(
            "/api/sales/customer",
            json!({
                "items": [{"product_id": &cake_id, "name": "Cake", "quantity": 3}],
                "customer": {"name": "Luisa"}
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err = parse(&body);
    assert_eq!(err["error"], "insufficient_stock");
    assert!(err["message"].as_str().unwrap().contains("Cake"));

    assert_eq!(common::current_stock(&state, &cake_id).await, 2);
}

#[tokio::test]
async fn captcha_challenges_are_issued_and_enforced() {
    let (state, _dir) = common::test_state().await;
    let app = build_router(state);

    let (status, body) = send(&app, get("/api/auth/captcha", None)).await;
    assert_eq!(status, StatusCode::OK);
    let challenge = parse(&body);
    assert!(challenge["data"].as_str().unwrap().starts_with("<svg"));

    // A wrong captcha answer blocks login before credentials are checked
    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({
                "email": "nobody@bakery.test",
                "password": "Abcdef1!",
                "captcha_id": challenge["id"],
                "captcha_value": "definitely-wrong"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(parse(&body)["message"].as_str().unwrap().contains("Captcha"));
}

#[tokio::test]
async fn customer_accounts_round_trip() {
    let (state, _dir) = common::test_state().await;
    let app = build_router(state);

    let (status, body) = send(
        &app,
        post_json(
            "/api/customers/register",
            json!({
                "first_name": "Luisa",
                "last_name": "Mendez",
                "email": "luisa@mail.test",
                "phone": "555-0101",
                "address": "Calle 5 #12",
                "password": "Abcdef1!",
                "birth_date": "1995-06-01",
                "gender": "Female"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session = parse(&body);
    let token = session["token"].as_str().unwrap().to_string();

    // Duplicate registration conflicts
    let (status, _) = send(
        &app,
        post_json(
            "/api/customers/register",
            json!({
                "first_name": "Luisa",
                "last_name": "Mendez",
                "email": "luisa@mail.test",
                "phone": "555-0101",
                "address": "Calle 5 #12",
                "password": "Abcdef1!",
                "birth_date": "1995-06-01",
                "gender": "Female"
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Profile is readable with the customer token and hides the hash
    let (status, body) = send(&app, get("/api/customers/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let profile = parse(&body);
    assert_eq!(profile["email"], "luisa@mail.test");
    assert!(profile.get("hash_pass").is_none());

    // Customer tokens cannot reach staff surfaces
    let (status, _) = send(&app, get("/api/sales/today", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stats_and_reports_cover_committed_sales() {
    let (state, _dir) = common::test_state().await;
    let muffin = common::seed_product(&state, "Muffin", 2.0, 10).await;
    let muffin_id = common::product_id(&muffin);
    let app = build_router(state);

    let token = admin_token(&app).await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            post_json(
                "/api/sales",
                json!({
                    "items": [{"product_id": &muffin_id, "name": "Muffin", "quantity": 2}],
                    "customer": {"name": "Carlos"}
                }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/api/sales/stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let stats = parse(&body);
    assert_eq!(stats["total_sales"], 2);
    assert_eq!(stats["total_revenue"], 8.0);

    let (status, body) = send(&app, get("/api/stats/sales-by-product", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let per_product = parse(&body);
    assert_eq!(per_product[0]["name"], "Muffin");
    assert_eq!(per_product[0]["total_quantity"], 4);
    assert_eq!(per_product[0]["revenue"], 8.0);

    let (status, body) = send(&app, get("/api/reports/sales?view_mode=all", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"));
}
