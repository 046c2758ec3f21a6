//! Request routing.
//!
//! Dispatch is a hand-rolled state machine keyed by HTTP method rather than
//! an axum route table: route matching is an exact string comparison on the
//! normalized path, and the failure policy (404 for unknown paths, 405 naming
//! the rejected method and path) needs the raw path either way. Every failure
//! leaves through [`GatewayError`], so a response is always emitted.

pub mod budgets;
pub mod transaction;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use ledgergate_oauth::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, cookie_value};

use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Logical route paths, matched after prefix normalization.
pub const ROUTE_OAUTH: &str = "/oauth";
pub const ROUTE_BUDGETS: &str = "/budgets";
pub const ROUTE_BUDGET: &str = "/budget";
pub const ROUTE_TRANSACTION: &str = "/transaction";

const ROUTES: [&str; 4] = [ROUTE_OAUTH, ROUTE_BUDGETS, ROUTE_BUDGET, ROUTE_TRANSACTION];

/// Cap on client request bodies (form pairs or one transaction).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Top-level request entry point: one logical task per request, keyed by
/// method per the session state machine.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let method = req.method().clone();
    if method == Method::OPTIONS {
        preflight(&state, req.headers())
    } else if method == Method::GET {
        handle_get(&state, req).await.into_response()
    } else if method == Method::POST {
        handle_post(&state, req).await.into_response()
    } else {
        GatewayError::MethodNotAllowed(format!("{} not allowed", method)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OPTIONS
// ─────────────────────────────────────────────────────────────────────────────

/// Answer a browser preflight: 204 with the CORS header set, but only when
/// all three standard preflight headers are present.
fn preflight(state: &AppState, headers: &HeaderMap) -> Response {
    let is_preflight = headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_HEADERS);
    if !is_preflight {
        return GatewayError::BadRequest("Invalid OPTIONS request".to_string()).into_response();
    }
    let cors = state.guard.cors_headers(origin_of(headers));
    (StatusCode::NO_CONTENT, cors).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// GET
// ─────────────────────────────────────────────────────────────────────────────

async fn handle_get(state: &AppState, req: Request) -> Result<Response> {
    let (parts, _body) = req.into_parts();
    let cookie_header = header_str(&parts.headers, header::COOKIE);
    let mut response_headers = state.guard.cors_headers(origin_of(&parts.headers));

    let access_token =
        resolve_access_token(state, cookie_header, &mut response_headers).await?;

    let path = normalize_path(state, parts.uri.path());
    match path {
        ROUTE_BUDGETS => budgets::get_budgets(state, response_headers, &access_token).await,
        ROUTE_BUDGET => match query_param(&parts.uri, "id") {
            Some(id) => budgets::get_budget(state, response_headers, &access_token, &id).await,
            None => Err(GatewayError::BadRequest("Bad request".to_string())),
        },
        _ => Err(unknown_route(&parts.method, path)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// POST
// ─────────────────────────────────────────────────────────────────────────────

async fn handle_post(state: &AppState, req: Request) -> Result<Response> {
    let (parts, body) = req.into_parts();

    // Mutating requests validate the caller before anything touches the
    // provider.
    if !state.guard.is_valid_client(origin_of(&parts.headers)) {
        return Err(GatewayError::for_status(403, "Unauthorized client"));
    }

    let path = normalize_path(state, parts.uri.path()).to_string();

    // The one unauthenticated route: this is how a session begins.
    if path == ROUTE_OAUTH {
        return oauth_exchange(state, &parts.headers, body).await;
    }

    let cookie_header = header_str(&parts.headers, header::COOKIE);
    let mut response_headers = state.guard.cors_headers(origin_of(&parts.headers));

    let access_token =
        resolve_access_token(state, cookie_header, &mut response_headers).await?;

    match path.as_str() {
        ROUTE_TRANSACTION => {
            transaction::send_transaction(state, response_headers, &access_token, body).await
        }
        _ => Err(unknown_route(&parts.method, &path)),
    }
}

/// Authorization-code exchange: parse the client's form body, exchange it,
/// and answer 204 with the fresh cookie pair.
async fn oauth_exchange(state: &AppState, headers: &HeaderMap, body: Body) -> Result<Response> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|e| GatewayError::BadRequest(format!("Unreadable request body: {}", e)))?;
    let params: Vec<(String, String)> = url::form_urlencoded::parse(&bytes)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let session = state.exchanger.exchange_code(params).await?;

    let mut response_headers = state.guard.cors_headers(origin_of(headers));
    append_session_cookies(&mut response_headers, &session.cookies)?;
    Ok((StatusCode::NO_CONTENT, response_headers).into_response())
}

// ─────────────────────────────────────────────────────────────────────────────
// Session resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve the access credential for an authenticated route.
///
/// The refresh cookie is the session anchor: absent means unauthenticated,
/// full stop. A missing access cookie triggers a refresh exchange before
/// dispatch; the renewed cookie pair is appended to the outgoing headers so
/// the browser picks it up alongside the actual response.
async fn resolve_access_token(
    state: &AppState,
    cookie_header: Option<&str>,
    response_headers: &mut HeaderMap,
) -> Result<String> {
    let refresh_token = cookie_value(REFRESH_TOKEN_COOKIE, cookie_header);
    if refresh_token.is_empty() {
        return Err(GatewayError::Unauthorized("Unauthorized".to_string()));
    }

    let access_token = cookie_value(ACCESS_TOKEN_COOKIE, cookie_header);
    if !access_token.is_empty() {
        return Ok(access_token);
    }

    tracing::debug!("Access cookie absent, refreshing session");
    let session = state.exchanger.refresh(cookie_header).await?;
    append_session_cookies(response_headers, &session.cookies)?;
    Ok(session.access_token)
}

fn append_session_cookies(headers: &mut HeaderMap, cookies: &[String; 2]) -> Result<()> {
    for cookie in cookies {
        let value = HeaderValue::from_str(cookie)
            .map_err(|_| GatewayError::Internal("Unrepresentable cookie value".to_string()))?;
        headers.append(header::SET_COOKIE, value);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn origin_of(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, header::ORIGIN)
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Strip the deployment prefix in hosted mode; raw path otherwise. A hosted
/// path without the prefix normalizes to an unknown route.
fn normalize_path<'a>(state: &AppState, path: &'a str) -> &'a str {
    match state.config.mode {
        crate::config::DeploymentMode::Local => path,
        crate::config::DeploymentMode::Hosted => path
            .split_once(state.config.path_prefix.as_str())
            .map(|(_, rest)| rest)
            .unwrap_or(""),
    }
}

fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// 405 for a known path under the wrong method, 404 otherwise.
fn unknown_route(method: &Method, path: &str) -> GatewayError {
    if ROUTES.contains(&path) {
        GatewayError::MethodNotAllowed(format!("{} not allowed on {}", method, path))
    } else {
        GatewayError::NotFound(format!("{} not found", path))
    }
}
