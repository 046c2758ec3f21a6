//! Pure transforms from provider entities to the shapes the front-end
//! renders. No I/O, no state; every function here is a plain mapping.

use serde::Serialize;

use crate::types::{
    Account, BudgetSettings, Category, CategoryGroupWithCategories, CurrencyFormat,
    NewSubtransaction, NewTransaction, Payee, SaveSubtransaction, SaveTransaction,
};

/// Group name the internal master category is presented under.
const INFLOW_GROUP_NAME: &str = "Inflow";

/// Provider-internal group that holds the inflow category.
const INTERNAL_MASTER_CATEGORY: &str = "Internal Master Category";

// ─────────────────────────────────────────────────────────────────────────────
// Output shapes
// ─────────────────────────────────────────────────────────────────────────────

/// A named section of list items.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    pub name: String,
    pub items: Vec<T>,
}

/// An account ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredAccount {
    pub id: String,
    pub name: String,
    pub balance: String,
}

/// A payee ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredPayee {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
}

/// A category ready for display. The inflow category has no balance.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredCategory {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

/// A category group ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredCategoryGroup {
    pub id: String,
    pub name: String,
    pub items: Vec<FilteredCategory>,
}

/// The composed budget-detail response body.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetDetail {
    pub accounts: Vec<Section<FilteredAccount>>,
    pub payees: Vec<Section<FilteredPayee>>,
    #[serde(rename = "categoryGroups")]
    pub category_groups: Vec<FilteredCategoryGroup>,
    pub settings: BudgetSettings,
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

/// Split open accounts into budget and tracking sections with formatted
/// balances. Closed and deleted accounts are dropped.
pub fn group_accounts(
    accounts: Vec<Account>,
    currency: &CurrencyFormat,
) -> Vec<Section<FilteredAccount>> {
    let mut budget = Vec::new();
    let mut tracking = Vec::new();
    for account in accounts {
        if account.deleted || account.closed {
            continue;
        }
        let filtered = FilteredAccount {
            id: account.id,
            name: account.name,
            balance: format_amount(account.balance as f64 / 1000.0, currency),
        };
        if account.on_budget {
            budget.push(filtered);
        } else {
            tracking.push(filtered);
        }
    }
    vec![
        Section {
            name: "Budget Accounts".to_string(),
            items: budget,
        },
        Section {
            name: "Tracking Accounts".to_string(),
            items: tracking,
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Payees
// ─────────────────────────────────────────────────────────────────────────────

/// Split payees into saved payees and transfers, each sorted
/// case-insensitively by name. Transfer payees lose the provider's
/// `Transfer : ` name prefix.
pub fn group_payees(payees: Vec<Payee>) -> Vec<Section<FilteredPayee>> {
    let mut saved = Vec::new();
    let mut transfer = Vec::new();
    for payee in payees {
        if payee.deleted {
            continue;
        }
        match payee.transfer_account_id {
            Some(account_id) => {
                let name = payee
                    .name
                    .splitn(2, "Transfer : ")
                    .nth(1)
                    .unwrap_or(&payee.name)
                    .to_string();
                transfer.push(FilteredPayee {
                    id: payee.id,
                    name,
                    transfer_account_id: Some(account_id),
                });
            }
            None => saved.push(FilteredPayee {
                id: payee.id,
                name: payee.name,
                transfer_account_id: None,
            }),
        }
    }
    saved.sort_by_key(|payee| payee.name.to_uppercase());
    transfer.sort_by_key(|payee| payee.name.to_uppercase());
    vec![
        Section {
            name: "Saved Payees".to_string(),
            items: saved,
        },
        Section {
            name: "Payments and Transfers".to_string(),
            items: transfer,
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

/// Filter category groups for display. Hidden and deleted groups are
/// dropped; the internal master category collapses to a single
/// "Ready to Assign" entry, sorts first, and is renamed to the inflow group.
pub fn group_categories(
    groups: Vec<CategoryGroupWithCategories>,
    currency: &CurrencyFormat,
) -> Vec<FilteredCategoryGroup> {
    let mut filtered: Vec<FilteredCategoryGroup> = groups
        .into_iter()
        .filter_map(|group| {
            let items = filter_categories(&group, currency)?;
            Some(FilteredCategoryGroup {
                id: group.id,
                name: group.name,
                items,
            })
        })
        .collect();

    // Stable sort: internal master category first, everything else in
    // provider order.
    filtered.sort_by_key(|group| !group.name.eq_ignore_ascii_case(INTERNAL_MASTER_CATEGORY));
    if let Some(first) = filtered.first_mut() {
        first.name = INFLOW_GROUP_NAME.to_string();
    }
    filtered
}

fn filter_categories(
    group: &CategoryGroupWithCategories,
    currency: &CurrencyFormat,
) -> Option<Vec<FilteredCategory>> {
    if group.deleted || group.hidden || group.name == "Hidden Categories" {
        return None;
    }
    let mut items = Vec::new();
    for category in &group.categories {
        if group.name == INTERNAL_MASTER_CATEGORY {
            if category.name == "Inflow: Ready to Assign" {
                items.push(FilteredCategory {
                    id: category.id.clone(),
                    name: "Ready to Assign".to_string(),
                    balance: None,
                });
            }
        } else if !category.deleted && !category.hidden {
            items.push(FilteredCategory {
                id: category.id.clone(),
                name: category.name.clone(),
                balance: Some(format_amount(category.balance as f64 / 1000.0, currency)),
            });
        }
    }
    Some(items)
}

// ─────────────────────────────────────────────────────────────────────────────
// Currency formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Render an amount per the budget's currency format: en-US style grouping,
/// fixed decimals, optional symbol, sign ahead of the symbol.
pub fn format_amount(amount: f64, currency: &CurrencyFormat) -> String {
    let with_decimals = format_decimals(amount, currency.decimal_digits);
    let symbol = if currency.display_symbol {
        currency.currency_symbol.as_str()
    } else {
        ""
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    if currency.symbol_first {
        format!("{}{}{}", sign, symbol, with_decimals)
    } else {
        format!("{}{}{}", sign, with_decimals, symbol)
    }
}

/// Absolute value, fixed decimal digits, comma thousands separators.
fn format_decimals(amount: f64, digits: u32) -> String {
    let fixed = format!("{:.*}", digits as usize, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (fixed, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a client-submitted transaction into the provider's save shape:
/// milliunit amounts, pre-approved, cleared flag to the provider's string.
pub fn to_save_transaction(transaction: NewTransaction) -> SaveTransaction {
    SaveTransaction {
        account_id: transaction.account_id,
        date: transaction.date,
        amount: to_milliunits(transaction.amount),
        payee_id: transaction.payee_id,
        payee_name: transaction.payee_name,
        category_id: transaction.category_id,
        memo: transaction.memo,
        cleared: if transaction.cleared {
            "cleared"
        } else {
            "uncleared"
        },
        approved: true,
        flag_color: transaction.flag_color,
        subtransactions: transaction
            .subtransactions
            .unwrap_or_default()
            .into_iter()
            .map(scale_subtransaction)
            .collect(),
    }
}

fn scale_subtransaction(sub: NewSubtransaction) -> SaveSubtransaction {
    SaveSubtransaction {
        amount: to_milliunits(sub.amount),
        payee_id: sub.payee_id,
        payee_name: sub.payee_name,
        category_id: sub.category_id,
        category_name: sub.category_name,
        memo: sub.memo,
    }
}

fn to_milliunits(amount: f64) -> i64 {
    (amount * 1000.0).round() as i64
}
