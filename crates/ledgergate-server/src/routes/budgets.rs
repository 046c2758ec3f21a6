//! Read-only budget endpoints.

use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use ledgergate_upstream::transform::{
    BudgetDetail, group_accounts, group_categories, group_payees,
};

use crate::error::Result;
use crate::state::AppState;

/// One row of the budget list.
#[derive(Debug, Serialize)]
pub struct BudgetListEntry {
    pub id: String,
    pub name: String,
}

/// GET /budgets — the user's budgets as `{id, name}` pairs.
pub async fn get_budgets(
    state: &AppState,
    response_headers: HeaderMap,
    access_token: &str,
) -> Result<Response> {
    let client = state.budget_client(access_token);
    let budgets = client.budgets().await?;

    let body: Vec<BudgetListEntry> = budgets
        .into_iter()
        .map(|budget| BudgetListEntry {
            id: budget.id,
            name: budget.name,
        })
        .collect();

    Ok((StatusCode::OK, response_headers, Json(body)).into_response())
}

/// GET /budget?id= — one budget's accounts, payees, category groups, and
/// settings, composed from concurrent provider reads.
pub async fn get_budget(
    state: &AppState,
    response_headers: HeaderMap,
    access_token: &str,
    budget_id: &str,
) -> Result<Response> {
    let client = state.budget_client(access_token);

    // Settings come first: the currency format drives every balance string.
    let settings = client.settings(budget_id).await?;
    let currency = settings.currency_format.clone().unwrap_or_default();

    // Independent reads fan out and fail fast together: one provider failure
    // fails the whole view, never a partial body.
    let (accounts, payees, category_groups) = tokio::try_join!(
        client.accounts(budget_id),
        client.payees(budget_id),
        client.categories(budget_id),
    )?;

    let body = BudgetDetail {
        accounts: group_accounts(accounts, &currency),
        payees: group_payees(payees),
        category_groups: group_categories(category_groups, &currency),
        settings,
    };

    Ok((StatusCode::OK, response_headers, Json(body)).into_response())
}
