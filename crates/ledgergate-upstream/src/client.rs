//! Typed client for the budgeting provider's REST API.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, UpstreamError};
use crate::types::{
    Account, BudgetSettings, BudgetSummary, CategoryGroupWithCategories, Payee, SaveTransaction,
};

/// Per-request provider API client.
///
/// Constructed from the resolved access credential for a single request and
/// dropped with it, so a credential can never leak across concurrent
/// sessions. The underlying `reqwest::Client` is cloned in for connection
/// pooling.
#[derive(Clone)]
pub struct BudgetClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

// Everything the provider returns is wrapped in a `data` envelope; errors in
// an `error` envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    id: String,
    name: String,
    detail: String,
}

#[derive(Debug, Deserialize)]
struct BudgetsData {
    budgets: Vec<BudgetSummary>,
}

#[derive(Debug, Deserialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct PayeesData {
    payees: Vec<Payee>,
}

#[derive(Debug, Deserialize)]
struct CategoriesData {
    category_groups: Vec<CategoryGroupWithCategories>,
}

#[derive(Debug, Deserialize)]
struct SettingsData {
    settings: BudgetSettings,
}

impl BudgetClient {
    /// Create a client bound to one access credential.
    pub fn new(http: reqwest::Client, base_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            access_token: access_token.into(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// List the user's budgets.
    pub async fn budgets(&self) -> Result<Vec<BudgetSummary>> {
        let data: BudgetsData = self.get("budgets").await?;
        Ok(data.budgets)
    }

    /// All accounts in a budget.
    pub async fn accounts(&self, budget_id: &str) -> Result<Vec<Account>> {
        let data: AccountsData = self.get(&format!("budgets/{}/accounts", budget_id)).await?;
        Ok(data.accounts)
    }

    /// All payees in a budget.
    pub async fn payees(&self, budget_id: &str) -> Result<Vec<Payee>> {
        let data: PayeesData = self.get(&format!("budgets/{}/payees", budget_id)).await?;
        Ok(data.payees)
    }

    /// All category groups in a budget.
    pub async fn categories(&self, budget_id: &str) -> Result<Vec<CategoryGroupWithCategories>> {
        let data: CategoriesData = self
            .get(&format!("budgets/{}/categories", budget_id))
            .await?;
        Ok(data.category_groups)
    }

    /// A budget's settings (currency format among them).
    pub async fn settings(&self, budget_id: &str) -> Result<BudgetSettings> {
        let data: SettingsData = self.get(&format!("budgets/{}/settings", budget_id)).await?;
        Ok(data.settings)
    }

    /// Create a transaction in a budget.
    pub async fn create_transaction(
        &self,
        budget_id: &str,
        transaction: &SaveTransaction,
    ) -> Result<()> {
        let url = self.url(&format!("budgets/{}/transactions", budget_id))?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "transaction": transaction }))
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::Malformed(format!("Invalid API path {}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }
        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Extract the provider's error object from a failed response, falling
    /// back to the bare status when the body is unreadable.
    async fn extract_error(&self, response: reqwest::Response) -> UpstreamError {
        let status = response.status().as_u16();
        match response.json::<ApiErrorEnvelope>().await {
            Ok(envelope) => {
                tracing::warn!(
                    id = %envelope.error.id,
                    name = %envelope.error.name,
                    "Provider API error"
                );
                UpstreamError::Api {
                    id: envelope.error.id,
                    name: envelope.error.name,
                    detail: envelope.error.detail,
                }
            }
            Err(_) => UpstreamError::Api {
                id: status.to_string(),
                name: "error".to_string(),
                detail: format!("HTTP {}", status),
            },
        }
    }
}
