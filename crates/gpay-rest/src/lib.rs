//! GPay online wallet REST API client.
//!
//! This crate provides a typed client for the wallet API with:
//!
//! - **Request signing**: Every call carries a fresh salt and an HMAC-SHA256
//!   signature over its parameters
//! - **Response verification**: Every response is checked against the
//!   signature headers before any field is trusted
//! - **Typed records**: Balances, payment requests, transfers, statements
//! - **Error handling**: Verification failures are distinct from transport
//!   errors and are never retried
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use gpay_rest::{ClientConfig, GPayRestClient};
//! use rust_decimal_macros::dec;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = GPayRestClient::with_config(credentials, ClientConfig::from_env()?)?;
//!
//! let balance = client.get_wallet_balance().await?;
//! let request = client
//!     .create_payment_request(dec!(10.50), Some("INV-42"), None)
//!     .await?;
//! let status = client.check_payment_status(&request.request_id).await?;
//! ```

mod client;
mod config;
mod error;
mod responses;

pub use client::GPayRestClient;
pub use config::{ClientConfig, DEFAULT_LANGUAGE};
pub use error::GPayRestError;
pub use responses::{
    field_text, SignedFields, BALANCE_FIELDS, OUTSTANDING_FIELDS, PAYMENT_REQUEST_FIELDS,
    PAYMENT_STATUS_FIELDS, SEND_MONEY_FIELDS, STATEMENT_FIELDS, WALLET_CHECK_FIELDS,
};
