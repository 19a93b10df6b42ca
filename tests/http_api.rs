mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use focus_studio_api::store::{CARTS, CLASSES, PAYMENTS, USERS};
use serde_json::json;

use common::{
    FakeProcessor, MemoryStore, request, send, test_app, token_for, token_signed_with,
};

#[tokio::test]
async fn root_answers_with_liveness_text() {
    let app = test_app(MemoryStore::new(), FakeProcessor::new());
    let (status, body) = send(app, request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Focus Studio server!!!"));
}

#[tokio::test]
async fn issued_token_opens_protected_routes() {
    let store = MemoryStore::new();
    store.seed(USERS, json!({ "email": "boss@example.com", "role": "admin" }));
    let app = test_app(store, FakeProcessor::new());

    let (status, body) = send(
        app.clone(),
        request("POST", "/jwt", Some(json!({ "email": "boss@example.com" })), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token").to_string();

    let (status, body) = send(
        app,
        request("GET", "/users/admin/boss@example.com", None, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "admin": true }));
}

#[tokio::test]
async fn protected_routes_reject_missing_or_foreign_tokens() {
    let app = test_app(MemoryStore::new(), FakeProcessor::new());
    let foreign = token_signed_with("some-other-secret", "a@example.com");

    for uri in [
        "/users/admin/a@example.com",
        "/users/instructor/a@example.com",
        "/carts?email=a@example.com",
    ] {
        let (status, body) = send(app.clone(), request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} without token");
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["kind"], json!("unauthenticated"));

        let (status, _) = send(app.clone(), request("GET", uri, None, Some(&foreign))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} with foreign token");

        let (status, _) =
            send(app.clone(), request("GET", uri, None, Some(&token_for("a@example.com")))).await;
        assert_eq!(status, StatusCode::OK, "{uri} with valid token");
    }
}

#[tokio::test]
async fn cart_listing_for_another_email_is_forbidden() {
    let store = MemoryStore::new();
    store.seed(CARTS, json!({ "id": "class-1", "email": "a@example.com" }));
    let app = test_app(store, FakeProcessor::new());

    let (status, body) = send(
        app,
        request("GET", "/carts?email=a@example.com", None, Some(&token_for("b@example.com"))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], json!("forbidden"));
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn duplicate_registration_returns_empty_array() {
    let store = MemoryStore::new();
    let app = test_app(store.clone(), FakeProcessor::new());
    let user = json!({ "name": "Ada", "email": "ada@example.com" });

    let (status, body) = send(app.clone(), request("POST", "/users", Some(user.clone()), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], json!(true));
    assert!(body["insertedId"].is_string());

    let (status, body) = send(app, request("POST", "/users", Some(user), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(store.count(USERS), 1);
}

#[tokio::test]
async fn class_routes_share_a_path_segment() {
    let store = MemoryStore::new();
    let id = store.seed(
        CLASSES,
        json!({ "name": "Salsa", "email": "maya@example.com", "available_seat": 5, "status": "pending" }),
    );
    let app = test_app(store.clone(), FakeProcessor::new());

    let (status, body) =
        send(app.clone(), request("GET", "/classes/maya@example.com", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        app.clone(),
        request("PATCH", &format!("/classes/approve/{}", id.to_hex()), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifiedCount"], json!(1));

    let (status, _) = send(
        app.clone(),
        request("PUT", &format!("/payment_update/{}", id.to_hex()), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.get(CLASSES, &id).unwrap()["available_seat"], json!(4));

    let (status, body) = send(
        app,
        request("DELETE", &format!("/classes/{}", id.to_hex()), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));
}

#[tokio::test]
async fn malformed_identifiers_are_validation_failures() {
    let app = test_app(MemoryStore::new(), FakeProcessor::new());
    for (method, uri) in [
        ("DELETE", "/users/not-an-id"),
        ("PATCH", "/users/admin/not-an-id"),
        ("PATCH", "/classes/approve/42"),
        ("DELETE", "/carts/xyz"),
        ("PATCH", "/history/xyz"),
        ("PUT", "/payment_update/xyz"),
    ] {
        let (status, body) = send(app.clone(), request(method, uri, None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body["kind"], json!("validation_failure"));
    }
}

#[tokio::test]
async fn payment_endpoints_round_trip() {
    let store = MemoryStore::new();
    let processor = FakeProcessor::new();
    let cart_id = store.seed(CARTS, json!({ "id": "class-1", "email": "ada@example.com" }));
    let app = test_app(store.clone(), processor.clone());

    let (status, body) = send(
        app.clone(),
        request("POST", "/create-payment-intent", Some(json!({ "price": 25 })), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "clientSecret": "pi_2500_secret" }));
    assert_eq!(processor.requests(), vec![(2500, "usd".to_string())]);

    let (status, body) = send(
        app,
        request(
            "POST",
            "/payments",
            Some(json!({ "transactionId": "pi_2500", "classID": cart_id.to_hex(), "price": 25 })),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleteResult"]["deletedCount"], json!(1));
    assert_eq!(body["insertResult"]["acknowledged"], json!(true));
    assert_eq!(body["historyResult"]["acknowledged"], json!(true));
    assert_eq!(store.count(PAYMENTS), 1);
}

#[tokio::test]
async fn upstream_failures_hide_driver_details() {
    let store = MemoryStore::new();
    store.fail("list_classes");
    let app = test_app(store, FakeProcessor::new());

    let (status, body) = send(app, request("GET", "/classes", None, None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], json!("upstream_failure"));
    assert_eq!(body["message"], json!("upstream service failure"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app(MemoryStore::new(), FakeProcessor::new());
    let (status, body) = send(app, request("GET", "/nowhere", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!(true));
}

fn raw_post(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn rejected_bodies_use_the_error_body() {
    let store = MemoryStore::new();
    let app = test_app(store.clone(), FakeProcessor::new());

    let cases = [
        raw_post("/users", Some("application/json"), "{not json"),
        raw_post("/payments", None, r#"{"classID":"x"}"#),
        raw_post("/create-payment-intent", Some("application/json"), r#"{"price":"12"}"#),
        raw_post("/jwt", Some("application/json"), "[1, 2]"),
    ];
    for req in cases {
        let uri = req.uri().to_string();
        let (status, body) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], json!(true), "{uri}");
        assert_eq!(body["kind"], json!("validation_failure"), "{uri}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()), "{uri}");
    }
    assert_eq!(store.count(USERS), 0);
    assert_eq!(store.count(PAYMENTS), 0);
}

#[tokio::test]
async fn token_with_non_string_email_identifies_nobody() {
    let store = MemoryStore::new();
    store.seed(CARTS, json!({ "id": "class-1", "email": "42" }));
    let app = test_app(store, FakeProcessor::new());

    let (status, body) = send(
        app.clone(),
        request("POST", "/jwt", Some(json!({ "email": 42, "name": "Ada" })), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token").to_string();

    let (status, body) = send(
        app,
        request("GET", "/carts?email=42", None, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], json!("forbidden"));
}
