//! Value objects returned by the wallet API.
//!
//! Amounts are exact decimals; timestamps are milliseconds since the Unix
//! epoch, as sent by the server.

mod codes;

pub use codes::{Coded, OperationType, TransactionStatus, UnknownDiscriminant};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current available wallet balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: Decimal,
    pub response_timestamp_ms: i64,
}

/// A newly created payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub requester_username: String,
    pub request_id: String,
    pub request_time_ms: i64,
    pub amount: Decimal,
    pub reference_no: Option<String>,
    pub response_timestamp_ms: i64,
}

/// State of an existing payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub request_id: String,
    /// Set once the request has been paid.
    pub transaction_id: Option<String>,
    pub amount: Decimal,
    pub payment_timestamp_ms: Option<i64>,
    pub reference_no: Option<String>,
    pub description: Option<String>,
    pub is_paid: bool,
    pub response_timestamp_ms: i64,
}

/// Outcome of a transfer to another wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMoneyResult {
    pub amount: Decimal,
    pub sender_fee: Decimal,
    pub transaction_id: String,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
    pub timestamp_ms: i64,
    pub reference_no: Option<String>,
    pub response_timestamp_ms: i64,
}

/// One line of a statement or of the outstanding list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub transaction_id: String,
    /// Server-formatted date and time, kept verbatim.
    pub datetime: String,
    pub timestamp_ms: Option<i64>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub balance: Option<Decimal>,
    pub reference_no: Option<String>,
    pub op_type: Option<Coded<OperationType>>,
    pub status: Option<Coded<TransactionStatus>>,
    pub created_at_ms: Option<i64>,
}

/// Balances and transactions for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub available_balance: Decimal,
    pub outstanding_credit: Decimal,
    pub outstanding_debit: Decimal,
    pub day_balance: Decimal,
    pub day_total_in: Decimal,
    pub day_total_out: Decimal,
    pub response_timestamp_ms: i64,
    pub day_statement: Vec<WalletTransaction>,
}

/// Whether a wallet exists and can be paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletCheck {
    pub exists: bool,
    pub wallet_gateway_id: String,
    pub wallet_name: Option<String>,
    pub user_account_name: Option<String>,
    pub can_receive_money: bool,
    pub response_timestamp_ms: i64,
}

/// Transactions not yet settled, with their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutstandingTransactions {
    pub outstanding_credit: Decimal,
    pub outstanding_debit: Decimal,
    pub response_timestamp_ms: i64,
    pub outstanding_transactions: Vec<WalletTransaction>,
}
