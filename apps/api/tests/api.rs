use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tienda_api::{build_router, ApiConfig, AppState};
use tienda_store::{seed::seed_demo_catalog, MemoryBlobStore, Store};
use tower::ServiceExt;

// ─── Test helpers ───────────────────────────────────────────────────────

struct TestApp {
    router: Router,
    state: AppState,
    token: String,
}

impl TestApp {
    fn new() -> Self {
        let store = Store::new();
        seed_demo_catalog(&store).unwrap();

        let state = AppState::new(
            ApiConfig::default(),
            store,
            Arc::new(MemoryBlobStore::new()),
        );
        let token = state.tokens.issue("tester").unwrap().access_token;

        TestApp {
            router: build_router(state.clone()),
            state,
            token,
        }
    }

    async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    fn authed(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    fn get(&self, uri: &str) -> Request<Body> {
        self.authed("GET", uri).body(Body::empty()).unwrap()
    }

    fn delete(&self, uri: &str) -> Request<Body> {
        self.authed("DELETE", uri).body(Body::empty()).unwrap()
    }

    fn put(&self, uri: &str) -> Request<Body> {
        self.authed("PUT", uri).body(Body::empty()).unwrap()
    }

    fn json(&self, method: &str, uri: &str, body: Value) -> Request<Body> {
        self.authed(method, uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn multipart(&self, uri: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        let boundary = "tienda-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                b = boundary,
                f = filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        self.authed("POST", uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

fn user_payload(id: i64, password: &str) -> Value {
    json!({
        "id": id,
        "lastname": "Perez",
        "name": "Ana",
        "email": "ana@example.com",
        "password": password,
        "country": "AR",
        "city": "Rosario",
        "address": "Calle 1",
        "phone": 5551234,
        "rol": "Cliente"
    })
}

// ─── Public routes ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_welcome_and_health_are_public() {
    let app = TestApp::new();

    let response = app
        .send(Request::get("/").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Bienvenidos A Mi Primera API");

    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["products"], 5);
    assert_eq!(body["categories"], 2);
}

#[tokio::test]
async fn test_login_issues_usable_token() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::post("/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ana&password=whatever"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = app.state.tokens.verify(token).unwrap();
    assert_eq!(claims.sub, "ana");

    let response = app
        .send(
            Request::get("/products")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_requires_username() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::post("/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=&password=x"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ─── Auth guard ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .send(Request::get("/products").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_malformed_and_expired_tokens_are_unauthorized() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::get("/sales")
                .header(header::AUTHORIZATION, "Token abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let expired = app
        .state
        .tokens
        .issue_at("tester", Duration::minutes(15), Utc::now() - Duration::minutes(16))
        .unwrap();
    let response = app
        .send(
            Request::get("/sales")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", expired.access_token),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ─── Products & categories ──────────────────────────────────────────────

#[tokio::test]
async fn test_product_lifecycle() {
    let app = TestApp::new();
    let lamp = json!({
        "id": 10,
        "name": "lamp",
        "price": 25.5,
        "category": "home appliances"
    });

    let response = app.send(app.json("POST", "/products", lamp.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["name"], "lamp");
    assert_eq!(created["image_url"], Value::Null);

    let response = app.send(app.get("/products/10")).await;
    assert_eq!(body_json(response).await, created);

    let response = app.send(app.json("POST", "/products", lamp)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_ID");

    let response = app
        .send(app.json(
            "PUT",
            "/products/10",
            json!({"name": "desk lamp", "price": 30.0, "category": "home appliances"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "desk lamp");

    let response = app.send(app.delete("/products/10")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(app.get("/products/10")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_product_with_unknown_category_is_rejected() {
    let app = TestApp::new();

    let response = app
        .send(app.json(
            "POST",
            "/products",
            json!({"id": 11, "name": "sofa", "price": 300.0, "category": "furniture"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_CATEGORY");
    assert_eq!(body["field"], "category");

    // A missing product is reported before its category is looked at
    let response = app
        .send(app.json(
            "PUT",
            "/products/999",
            json!({"name": "sofa", "price": 300.0, "category": "furniture"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_by_category() {
    let app = TestApp::new();

    let response = app.send(app.get("/products?category=tools")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["hammer", "electric drill"]);

    let response = app.send(app.get("/products?category=furniture")).await;
    assert_eq!(body_json(response).await, json!([]));

    let response = app.send(app.get("/products")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_request() {
    let app = TestApp::new();

    let response = app
        .send(
            app.authed("POST", "/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = app.send(app.get("/products/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_rename_and_delete_rules() {
    let app = TestApp::new();

    // "tools" is used by the seeded hammer and drill
    let response = app.send(app.delete("/categories/2")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CATEGORY_IN_USE");

    let response = app
        .send(app.json("POST", "/categories", json!({"id": 3, "description": "garden"})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(app.put("/categories/3?description=outdoor")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["description"], "outdoor");

    let response = app.send(app.delete("/categories/3")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Renaming a category in use carries its products along
    let response = app.send(app.put("/categories/2?description=hardware")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["description"], "hardware");

    let response = app.send(app.get("/products?category=hardware")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

// ─── Users ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_user_password_rules_and_redaction() {
    let app = TestApp::new();

    let response = app
        .send(app.json("POST", "/users", user_payload(1, "abc12345")))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "WEAK_PASSWORD");
    assert_eq!(body["field"], "password");

    let response = app
        .send(app.json("POST", "/users", user_payload(1, "Abc12345")))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["role"], "Cliente");
    assert!(created.get("password").is_none());

    let response = app.send(app.get("/users")).await;
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert!(listed[0].get("password").is_none());
}

// ─── Sales ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sale_linkage_and_dispatch() {
    let app = TestApp::new();

    let response = app
        .send(app.json(
            "POST",
            "/sales",
            json!({"id": 1, "id_user": 999, "id_product": 1, "quantity": 1, "date": "2024-05-01"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_USER");

    app.send(app.json("POST", "/users", user_payload(1, "Abc12345")))
        .await;

    let response = app
        .send(app.json(
            "POST",
            "/sales",
            json!({"id": 1, "id_user": 1, "id_product": 1, "quantity": 1, "date": "2024-05-01"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["dispatched"], "No despachado");

    let response = app.send(app.put("/sales/1?dispatched=Enviado")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_DISPATCH_STATUS");
    assert_eq!(body["field"], "dispatched");

    let response = app.send(app.put("/sales/1?dispatched=Despachado")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let sales = body_json(response).await;
    assert_eq!(sales[0]["dispatched"], "Despachado");

    let response = app.send(app.get("/sales")).await;
    assert_eq!(body_json(response).await[0]["dispatched"], "Despachado");
}

// ─── Images ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_product_image_upload_and_download() {
    let app = TestApp::new();

    let response = app
        .send(app.multipart("/upload-product-image/1", "tv.jpg", b"jpeg-bytes"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["file_url"], "products/1_tv.jpg");

    let response = app.send(app.get("/products/1")).await;
    assert_eq!(body_json(response).await["image_url"], "products/1_tv.jpg");

    let response = app.send(app.get("/download-product-image/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert_eq!(body_bytes(response).await, b"jpeg-bytes");
}

#[tokio::test]
async fn test_image_routes_for_missing_entities() {
    let app = TestApp::new();

    let response = app
        .send(app.multipart("/upload-user-profile-picture/42", "me.png", b"png"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Product 2 exists but has no image
    let response = app.send(app.get("/download-product-image/2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_picture_upload_and_download() {
    let app = TestApp::new();
    app.send(app.json("POST", "/users", user_payload(7, "Abc12345")))
        .await;

    let response = app
        .send(app.multipart("/upload-user-profile-picture/7", "me.png", b"png-bytes"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["file_url"], "users/7_me.png");

    let response = app.send(app.get("/download-user-profile-picture/7")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"png-bytes");
}
