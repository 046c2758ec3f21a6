//! Transaction submission endpoint.

use axum::{
    body::Body,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use ledgergate_upstream::{TransactionRequest, to_save_transaction};

use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Cap on a single transaction body.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// POST /transaction — scale the client's transaction into provider units
/// and create it. 204 on success.
pub async fn send_transaction(
    state: &AppState,
    response_headers: HeaderMap,
    access_token: &str,
    body: Body,
) -> Result<Response> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|e| GatewayError::BadRequest(format!("Unreadable request body: {}", e)))?;
    let request: TransactionRequest = serde_json::from_slice(&bytes)
        .map_err(|e| GatewayError::BadRequest(format!("Invalid transaction body: {}", e)))?;

    let transaction = to_save_transaction(request.transaction);
    let client = state.budget_client(access_token);
    client.create_transaction(&request.id, &transaction).await?;

    Ok((StatusCode::NO_CONTENT, response_headers).into_response())
}
