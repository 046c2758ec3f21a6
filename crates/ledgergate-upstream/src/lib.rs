//! Budgeting provider API client and response shaping.
//!
//! [`client`] is a thin typed wrapper over the provider's REST API,
//! constructed per request from a resolved access credential. [`transform`]
//! holds the pure functions that filter and format provider entities into the
//! shapes the front-end renders; they have no I/O and no lifecycle.

pub mod client;
pub mod error;
pub mod transform;
pub mod types;

pub use client::BudgetClient;
pub use error::{Result, UpstreamError};
pub use transform::{BudgetDetail, to_save_transaction};
pub use types::{BudgetSummary, NewTransaction, TransactionRequest};
