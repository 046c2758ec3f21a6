//! Provider wire types.
//!
//! Deserialization is tolerant: the provider adds fields over time and the
//! gateway only picks out what it relays. Monetary amounts arrive in
//! milliunits (thousandths of the currency unit).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Provider entities
// ─────────────────────────────────────────────────────────────────────────────

/// One budget in the user's account list.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetSummary {
    pub id: String,
    pub name: String,
}

/// A budget account.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Balance in milliunits.
    pub balance: i64,
    pub on_budget: bool,
    pub closed: bool,
    pub deleted: bool,
}

/// A payee.
#[derive(Debug, Clone, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub transfer_account_id: Option<String>,
    pub deleted: bool,
}

/// A category inside a group.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Balance in milliunits.
    pub balance: i64,
    pub hidden: bool,
    pub deleted: bool,
}

/// A category group with its categories.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryGroupWithCategories {
    pub id: String,
    pub name: String,
    pub hidden: bool,
    pub deleted: bool,
    pub categories: Vec<Category>,
}

/// How the budget's currency is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyFormat {
    #[serde(default)]
    pub decimal_digits: u32,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default)]
    pub display_symbol: bool,
    #[serde(default)]
    pub symbol_first: bool,
    /// Fields the gateway relays without interpreting.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            decimal_digits: 0,
            currency_symbol: String::new(),
            display_symbol: false,
            symbol_first: false,
            rest: serde_json::Map::new(),
        }
    }
}

/// Budget settings, relayed verbatim apart from the currency format the
/// transforms consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_format: Option<CurrencyFormat>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction submission
// ─────────────────────────────────────────────────────────────────────────────

/// Client-supplied transaction body: the budget id plus the transaction,
/// with amounts in currency units (not milliunits).
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub id: String,
    pub transaction: NewTransaction,
}

/// A transaction as the front-end submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub account_id: String,
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub payee_id: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    pub cleared: bool,
    #[serde(default)]
    pub flag_color: Option<String>,
    #[serde(default)]
    pub subtransactions: Option<Vec<NewSubtransaction>>,
}

/// A split line as the front-end submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubtransaction {
    pub amount: f64,
    #[serde(default)]
    pub payee_id: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// A transaction in the provider's save shape: milliunit amounts,
/// pre-approved, cleared state as a string.
#[derive(Debug, Clone, Serialize)]
pub struct SaveTransaction {
    pub account_id: String,
    pub date: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub cleared: &'static str,
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_color: Option<String>,
    pub subtransactions: Vec<SaveSubtransaction>,
}

/// A split line in the provider's save shape.
#[derive(Debug, Clone, Serialize)]
pub struct SaveSubtransaction {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}
