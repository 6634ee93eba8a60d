//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - JSON request bodies with header injection for authentication
//! - Raw responses (status, headers, body) so callers can verify signatures
//!   before trusting any payload
//! - Rate limit detection
//!
//! No retries happen here; a failed call is reported to the caller as is.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//!
//! let client = RestClient::with_default_timeout("https://gpay.ly/banking/api/onlinewallet/v1")?;
//! let response = client.post_json("/info/balance", &body, &headers).await?;
//! let json = response.json()?;
//! ```

mod client;
mod error;

pub use client::{RawResponse, RestClient};
pub use error::RestError;
