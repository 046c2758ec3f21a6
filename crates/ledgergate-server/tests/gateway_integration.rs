//! End-to-end gateway tests.
//!
//! Each test drives the full router with `tower::ServiceExt::oneshot` against
//! a wiremock stand-in for the provider, covering the session lifecycle:
//! code exchange, cookie-gated reads, transparent refresh, origin rejection,
//! and error-envelope normalization.

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as req_header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ledgergate_server::{ErrorEnvelope, GatewayConfig, Server};

const ORIGIN: &str = "https://app.example";

async fn gateway(provider: &MockServer) -> Router {
    let config = GatewayConfig::new("client-id", "client-secret")
        .with_valid_origins(vec![ORIGIN.to_string()])
        .with_token_url(format!("{}/oauth/token", provider.uri()))
        .with_api_url(format!("{}/v1/", provider.uri()));
    Server::new(config).unwrap().router()
}

fn token_body() -> serde_json::Value {
    serde_json::json!({
        "access_token": "AT1",
        "refresh_token": "RT1",
        "expires_in": 7200,
        "created_at": 1_700_000_000,
        "token_type": "Bearer",
        "scope": "read-only"
    })
}

async fn read_body(response: Response<Body>) -> Result<axum::body::Bytes> {
    Ok(axum::body::to_bytes(response.into_body(), usize::MAX).await?)
}

async fn read_envelope(response: Response<Body>) -> Result<ErrorEnvelope> {
    let bytes = read_body(response).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Session start
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_oauth_exchange_mints_session_cookies() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("code", "abc123"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("client_id", "client-id"))
        .and(query_param("client_secret", "client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::post("/oauth")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::from("code=abc123&redirect_uri=https%3A%2F%2Fapp.example"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        ORIGIN
    );

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("accessToken=AT1;"));
    assert!(cookies[0].contains("Expires=Wed, 15 Nov 2023 00:13:20 GMT"));
    assert!(cookies[0].contains("HttpOnly; SameSite=Strict; Domain=localhost; Path=/"));
    assert!(cookies[1].starts_with("refreshToken=RT1;"));
    assert!(!cookies[1].contains("Expires="));
    Ok(())
}

#[tokio::test]
async fn test_repeated_exchange_mints_independent_sessions() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(2)
        .mount(&provider)
        .await;

    let gateway = gateway(&provider).await;
    for _ in 0..2 {
        let response = gateway
            .clone()
            .oneshot(
                Request::post("/oauth")
                    .header(header::ORIGIN, ORIGIN)
                    .body(Body::from("code=abc123&redirect_uri=https%3A%2F%2Fapp.example"))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(set_cookies(&response).len(), 2);
    }
    Ok(())
}

#[tokio::test]
async fn test_oauth_exchange_names_missing_fields() -> Result<()> {
    let provider = MockServer::start().await;
    let gateway = gateway(&provider).await;

    let response = gateway
        .clone()
        .oneshot(
            Request::post("/oauth")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "invalid_request");
    assert_eq!(envelope.error_description, "Missing: code, redirect_uri");

    let response = gateway
        .oneshot(
            Request::post("/oauth")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::from("code=abc123"))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error_description, "Missing: redirect_uri");
    Ok(())
}

#[tokio::test]
async fn test_provider_rejection_relayed_verbatim() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Code already redeemed"
        })))
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::post("/oauth")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::from("code=stale&redirect_uri=https%3A%2F%2Fapp.example"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "invalid_grant");
    assert_eq!(envelope.error_description, "Code already redeemed");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Origin enforcement
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_post_from_unlisted_origin_is_rejected() -> Result<()> {
    let provider = MockServer::start().await;
    let gateway = gateway(&provider).await;

    for origin in [Some("https://evil.example"), None] {
        let mut request = Request::post("/oauth");
        if let Some(origin) = origin {
            request = request.header(header::ORIGIN, origin);
        }
        let response = gateway
            .clone()
            .oneshot(request.body(Body::from("code=abc123&redirect_uri=x"))?)
            .await?;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let envelope = read_envelope(response).await?;
        assert_eq!(envelope.error, "error");
        assert_eq!(envelope.error_description, "Unauthorized client");
    }
    Ok(())
}

#[tokio::test]
async fn test_preflight_answers_with_cors() -> Result<()> {
    let provider = MockServer::start().await;
    let gateway = gateway(&provider).await;

    let response = gateway
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/budgets")
                .header(header::ORIGIN, ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        ORIGIN
    );
    assert_eq!(
        response.headers().get("access-control-allow-methods").unwrap(),
        "GET, POST, OPTIONS"
    );

    // Not a preflight: missing the Access-Control-Request-* pair.
    let response = gateway
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/budgets")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error_description, "Invalid OPTIONS request");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Session gating
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_reads_without_session_are_unauthorized() -> Result<()> {
    let provider = MockServer::start().await;
    let gateway = gateway(&provider).await;

    let response = gateway
        .clone()
        .oneshot(Request::get("/budgets").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "unauthorized");
    assert_eq!(envelope.error_description, "Unauthorized");

    // An access cookie alone is not a session; the refresh cookie anchors it.
    let response = gateway
        .oneshot(
            Request::get("/budgets")
                .header(header::COOKIE, "accessToken=AT1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_post_without_session_is_unauthorized() -> Result<()> {
    let provider = MockServer::start().await;
    let response = gateway(&provider)
        .await
        .oneshot(
            Request::post("/transaction")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::from("{}"))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Routing failures
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_path_is_not_found() -> Result<()> {
    let provider = MockServer::start().await;
    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/nope")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "not_found");
    assert_eq!(envelope.error_description, "/nope not found");
    Ok(())
}

#[tokio::test]
async fn test_known_path_wrong_method_is_405() -> Result<()> {
    let provider = MockServer::start().await;
    let gateway = gateway(&provider).await;

    let response = gateway
        .clone()
        .oneshot(
            Request::get("/transaction")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "method_not_allowed");
    assert_eq!(envelope.error_description, "GET not allowed on /transaction");

    // Unsupported methods are rejected before any session handling.
    let response = gateway
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/budgets")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error_description, "DELETE not allowed");
    Ok(())
}

#[tokio::test]
async fn test_budget_without_id_is_bad_request() -> Result<()> {
    let provider = MockServer::start().await;
    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/budget")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "invalid_request");
    assert_eq!(envelope.error_description, "Bad request");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Authenticated reads
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_budgets_list_relays_id_name_pairs() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets"))
        .and(req_header("authorization", "Bearer AT1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "budgets": [
                { "id": "b1", "name": "Household" },
                { "id": "b2", "name": "Sole Trader" }
            ]}
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/budgets")
                .header(header::ORIGIN, ORIGIN)
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        ORIGIN
    );
    let body: serde_json::Value = serde_json::from_slice(&read_body(response).await?)?;
    assert_eq!(
        body,
        serde_json::json!([
            { "id": "b1", "name": "Household" },
            { "id": "b2", "name": "Sole Trader" }
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_access_cookie_refreshes_transparently() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(query_param("refresh_token", "RT0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets"))
        .and(req_header("authorization", "Bearer AT1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "budgets": [] }
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/budgets")
                .header(header::COOKIE, "refreshToken=RT0")
                .body(Body::empty())?,
        )
        .await?;

    // The renewed pair rides on the data response.
    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("accessToken=AT1;"));
    assert!(cookies[1].starts_with("refreshToken=RT1;"));
    Ok(())
}

#[tokio::test]
async fn test_rejected_refresh_relays_provider_status() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Refresh token revoked"
        })))
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/budgets")
                .header(header::COOKIE, "refreshToken=revoked")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "invalid_grant");
    assert_eq!(envelope.error_description, "Refresh token revoked");
    Ok(())
}

#[tokio::test]
async fn test_budget_detail_composes_all_reads() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "settings": {
                "date_format": { "format": "DD/MM/YYYY" },
                "currency_format": {
                    "iso_code": "USD",
                    "decimal_digits": 2,
                    "currency_symbol": "$",
                    "display_symbol": true,
                    "symbol_first": true
                }
            }}
        })))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "accounts": [
                { "id": "a1", "name": "Checking", "balance": 1_234_560,
                  "on_budget": true, "closed": false, "deleted": false },
                { "id": "a2", "name": "Brokerage", "balance": 50_000_000,
                  "on_budget": false, "closed": false, "deleted": false },
                { "id": "a3", "name": "Old Card", "balance": 0,
                  "on_budget": true, "closed": true, "deleted": false }
            ]}
        })))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/payees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "payees": [
                { "id": "p1", "name": "Grocer", "deleted": false },
                { "id": "p2", "name": "Transfer : Brokerage",
                  "transfer_account_id": "a2", "deleted": false }
            ]}
        })))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "category_groups": [
                { "id": "g1", "name": "Bills", "hidden": false, "deleted": false,
                  "categories": [
                      { "id": "c1", "name": "Rent", "balance": 900_000,
                        "hidden": false, "deleted": false }
                  ]},
                { "id": "g0", "name": "Internal Master Category",
                  "hidden": false, "deleted": false,
                  "categories": [
                      { "id": "c0", "name": "Inflow: Ready to Assign",
                        "balance": 100_000, "hidden": false, "deleted": false }
                  ]}
            ]}
        })))
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/budget?id=b1")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&read_body(response).await?)?;

    let accounts = body["accounts"].as_array().unwrap();
    assert_eq!(accounts[0]["name"], "Budget Accounts");
    assert_eq!(accounts[0]["items"][0]["balance"], "$1,234.56");
    assert_eq!(accounts[1]["name"], "Tracking Accounts");
    assert_eq!(accounts[1]["items"][0]["name"], "Brokerage");
    // Closed accounts are dropped.
    assert_eq!(accounts[0]["items"].as_array().unwrap().len(), 1);

    let payees = body["payees"].as_array().unwrap();
    assert_eq!(payees[0]["name"], "Saved Payees");
    assert_eq!(payees[1]["items"][0]["name"], "Brokerage");

    let groups = body["categoryGroups"].as_array().unwrap();
    assert_eq!(groups[0]["name"], "Inflow");
    assert_eq!(groups[0]["items"][0]["name"], "Ready to Assign");
    assert!(groups[0]["items"][0].get("balance").is_none());
    assert_eq!(groups[1]["name"], "Bills");
    assert_eq!(groups[1]["items"][0]["balance"], "$900.00");

    assert_eq!(body["settings"]["date_format"]["format"], "DD/MM/YYYY");
    Ok(())
}

#[tokio::test]
async fn test_budget_detail_fails_whole_on_one_read() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "settings": {} }
        })))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "accounts": [] }
        })))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "category_groups": [] }
        })))
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets/b1/payees"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "id": "404", "name": "not_found", "detail": "Payees not found" }
        })))
        .mount(&provider)
        .await;

    let response = gateway(&provider)
        .await
        .oneshot(
            Request::get("/budget?id=b1")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;

    // One failed read fails the whole view; no partial body leaks out.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "not_found");
    assert_eq!(envelope.error_description, "Payees not found");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction submission
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_transaction_is_scaled_and_created() -> Result<()> {
    let provider = MockServer::start().await;
    let expected = serde_json::json!({
        "transaction": {
            "account_id": "a1",
            "date": "2024-06-01",
            "amount": -12_340,
            "payee_name": "Cafe",
            "cleared": "cleared",
            "approved": true,
            "subtransactions": []
        }
    });
    Mock::given(method("POST"))
        .and(path("/v1/budgets/b1/transactions"))
        .and(req_header("authorization", "Bearer AT1"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": { "transaction_ids": ["t1"] }
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let body = serde_json::json!({
        "id": "b1",
        "transaction": {
            "account_id": "a1",
            "date": "2024-06-01",
            "amount": -12.34,
            "payee_name": "Cafe",
            "cleared": true
        }
    });
    let response = gateway(&provider)
        .await
        .oneshot(
            Request::post("/transaction")
                .header(header::ORIGIN, ORIGIN)
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::from(serde_json::to_vec(&body)?))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn test_malformed_transaction_body_is_bad_request() -> Result<()> {
    let provider = MockServer::start().await;
    let response = gateway(&provider)
        .await
        .oneshot(
            Request::post("/transaction")
                .header(header::ORIGIN, ORIGIN)
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::from("not json"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = read_envelope(response).await?;
    assert_eq!(envelope.error, "invalid_request");
    assert!(envelope.error_description.starts_with("Invalid transaction body:"));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Hosted-mode path normalization
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_hosted_mode_strips_path_prefix() -> Result<()> {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/budgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "budgets": [] }
        })))
        .mount(&provider)
        .await;

    let config = GatewayConfig::new("client-id", "client-secret")
        .with_mode(ledgergate_server::DeploymentMode::Hosted)
        .with_valid_origins(vec![ORIGIN.to_string()])
        .with_token_url(format!("{}/oauth/token", provider.uri()))
        .with_api_url(format!("{}/v1/", provider.uri()));
    let gateway = Server::new(config).unwrap().router();

    let response = gateway
        .clone()
        .oneshot(
            Request::get("/api/v2/budgets")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // An unprefixed path normalizes to nothing routable.
    let response = gateway
        .oneshot(
            Request::get("/budgets")
                .header(header::COOKIE, "accessToken=AT1; refreshToken=RT1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
