//! OAuth2 token lifecycle for the budgeting provider.
//!
//! The gateway keeps no server-side session state: the access and refresh
//! credentials travel exclusively as `HttpOnly` cookies minted here. A missing
//! access cookie is the refresh trigger; the gateway never tracks expiry
//! itself and trusts the browser's cookie jar plus the provider's rejection
//! of stale tokens.
//!
//! # Components
//!
//! - [`cookie`] — parsing and rendering of the two session cookies
//! - [`tokens`] — authorization-code and refresh-token exchanges against the
//!   provider's token endpoint

pub mod cookie;
pub mod error;
pub mod tokens;

pub use cookie::{ACCESS_TOKEN_COOKIE, CookieAttributes, REFRESH_TOKEN_COOKIE, cookie_value};
pub use error::{OAuthError, Result};
pub use tokens::{Session, TokenExchanger, TokenResponse};
