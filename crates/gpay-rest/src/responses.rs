//! Wallet API response payloads: signed field sets and typed records.
//!
//! Every response arrives as `{"data": {...}}`. The server signs a fixed
//! subset of `data` per endpoint; that subset is described by a
//! [`SignedFields`] table and must match the server's field-for-field.

use crate::error::GPayRestError;
use auth::{AuthError, SignableFields};
use model::{
    Balance, Coded, OutstandingTransactions, PaymentRequest, PaymentStatus, SendMoneyResult,
    Statement, WalletCheck, WalletTransaction,
};
use rust_decimal::Decimal;
use serde_json::Value;

/// Names of the response fields covered by an endpoint's signature.
#[derive(Debug, Clone, Copy)]
pub struct SignedFields {
    /// Must be present and non-null.
    pub required: &'static [&'static str],
    /// May be null or absent; signed as `""` then.
    pub nullable: &'static [&'static str],
}

impl SignedFields {
    /// Collect the signed subset of `data`.
    ///
    /// # Errors
    /// Returns `AuthError::MissingField` when a required field is absent or null.
    pub fn extract(&self, data: &Value) -> Result<SignableFields, AuthError> {
        let mut fields = SignableFields::new();
        for name in self.required {
            let value = field_text(data, name).ok_or_else(|| AuthError::MissingField((*name).into()))?;
            fields.insert(*name, value);
        }
        for name in self.nullable {
            fields.insert_opt(*name, field_text(data, name));
        }
        Ok(fields)
    }
}

pub const BALANCE_FIELDS: SignedFields = SignedFields {
    required: &["balance", "response_timestamp"],
    nullable: &[],
};

pub const PAYMENT_REQUEST_FIELDS: SignedFields = SignedFields {
    required: &[
        "requester_username",
        "request_id",
        "request_time",
        "amount",
        "response_timestamp",
    ],
    nullable: &["reference_no"],
};

pub const PAYMENT_STATUS_FIELDS: SignedFields = SignedFields {
    required: &["request_id", "amount", "response_timestamp"],
    nullable: &[
        "transaction_id",
        "payment_timestamp",
        "reference_no",
        "description",
        "is_paid",
    ],
};

pub const SEND_MONEY_FIELDS: SignedFields = SignedFields {
    required: &[
        "amount",
        "sender_fee",
        "transaction_id",
        "old_balance",
        "new_balance",
        "timestamp",
        "response_timestamp",
    ],
    nullable: &["reference_no"],
};

pub const STATEMENT_FIELDS: SignedFields = SignedFields {
    required: &[
        "available_balance",
        "outstanding_credit",
        "outstanding_debit",
        "day_balance",
        "day_total_in",
        "day_total_out",
        "response_timestamp",
    ],
    nullable: &[],
};

pub const WALLET_CHECK_FIELDS: SignedFields = SignedFields {
    required: &[
        "exists",
        "wallet_gateway_id",
        "can_receive_money",
        "response_timestamp",
    ],
    nullable: &["wallet_name", "user_account_name"],
};

pub const OUTSTANDING_FIELDS: SignedFields = SignedFields {
    required: &["outstanding_credit", "outstanding_debit", "response_timestamp"],
    nullable: &[],
};

/// Text form of a scalar JSON field, `None` when absent, null or composite.
///
/// Numbers keep the exact text the server sent (`10.50` stays `10.50`).
pub fn field_text(data: &Value, name: &str) -> Option<String> {
    match data.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Take the `data` object out of the response envelope.
pub(crate) fn take_data(mut body: Value) -> Result<Value, GPayRestError> {
    match body.get_mut("data").map(Value::take) {
        Some(data @ Value::Object(_)) => Ok(data),
        _ => Err(GPayRestError::Parse("response has no data object".into())),
    }
}

fn required(data: &Value, name: &str) -> Result<String, GPayRestError> {
    field_text(data, name).ok_or_else(|| GPayRestError::Parse(format!("missing field {name}")))
}

fn decimal(data: &Value, name: &str) -> Result<Decimal, GPayRestError> {
    parse_decimal(name, &required(data, name)?)
}

fn opt_decimal(data: &Value, name: &str) -> Result<Option<Decimal>, GPayRestError> {
    field_text(data, name)
        .map(|text| parse_decimal(name, &text))
        .transpose()
}

fn parse_decimal(name: &str, text: &str) -> Result<Decimal, GPayRestError> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|e| GPayRestError::Parse(format!("{name}: {e}")))
}

fn millis(data: &Value, name: &str) -> Result<i64, GPayRestError> {
    parse_int(name, &required(data, name)?)
}

fn opt_millis(data: &Value, name: &str) -> Result<Option<i64>, GPayRestError> {
    field_text(data, name)
        .map(|text| parse_int(name, &text))
        .transpose()
}

fn parse_int(name: &str, text: &str) -> Result<i64, GPayRestError> {
    text.trim()
        .parse::<i64>()
        .map_err(|e| GPayRestError::Parse(format!("{name}: {e}")))
}

fn boolean(data: &Value, name: &str) -> Result<bool, GPayRestError> {
    match required(data, name)?.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(GPayRestError::Parse(format!("{name}: not a boolean: {other}"))),
    }
}

fn opt_code<T>(data: &Value, name: &str) -> Result<Option<Coded<T>>, GPayRestError>
where
    T: TryFrom<i64, Error = model::UnknownDiscriminant>,
{
    Ok(opt_millis(data, name)?.map(Coded::from_value))
}

pub(crate) fn balance(data: &Value) -> Result<Balance, GPayRestError> {
    Ok(Balance {
        balance: decimal(data, "balance")?,
        response_timestamp_ms: millis(data, "response_timestamp")?,
    })
}

pub(crate) fn payment_request(data: &Value) -> Result<PaymentRequest, GPayRestError> {
    Ok(PaymentRequest {
        requester_username: required(data, "requester_username")?,
        request_id: required(data, "request_id")?,
        request_time_ms: millis(data, "request_time")?,
        amount: decimal(data, "amount")?,
        reference_no: field_text(data, "reference_no"),
        response_timestamp_ms: millis(data, "response_timestamp")?,
    })
}

pub(crate) fn payment_status(data: &Value) -> Result<PaymentStatus, GPayRestError> {
    Ok(PaymentStatus {
        request_id: required(data, "request_id")?,
        transaction_id: field_text(data, "transaction_id"),
        amount: decimal(data, "amount")?,
        payment_timestamp_ms: opt_millis(data, "payment_timestamp")?,
        reference_no: field_text(data, "reference_no"),
        description: field_text(data, "description"),
        is_paid: boolean(data, "is_paid")?,
        response_timestamp_ms: millis(data, "response_timestamp")?,
    })
}

pub(crate) fn send_money(data: &Value) -> Result<SendMoneyResult, GPayRestError> {
    Ok(SendMoneyResult {
        amount: decimal(data, "amount")?,
        sender_fee: decimal(data, "sender_fee")?,
        transaction_id: required(data, "transaction_id")?,
        old_balance: decimal(data, "old_balance")?,
        new_balance: decimal(data, "new_balance")?,
        timestamp_ms: millis(data, "timestamp")?,
        reference_no: field_text(data, "reference_no"),
        response_timestamp_ms: millis(data, "response_timestamp")?,
    })
}

pub(crate) fn statement(data: &Value) -> Result<Statement, GPayRestError> {
    Ok(Statement {
        available_balance: decimal(data, "available_balance")?,
        outstanding_credit: decimal(data, "outstanding_credit")?,
        outstanding_debit: decimal(data, "outstanding_debit")?,
        day_balance: decimal(data, "day_balance")?,
        day_total_in: decimal(data, "day_total_in")?,
        day_total_out: decimal(data, "day_total_out")?,
        response_timestamp_ms: millis(data, "response_timestamp")?,
        day_statement: transactions(data, "day_statement")?,
    })
}

pub(crate) fn wallet_check(data: &Value) -> Result<WalletCheck, GPayRestError> {
    Ok(WalletCheck {
        exists: boolean(data, "exists")?,
        wallet_gateway_id: required(data, "wallet_gateway_id")?,
        wallet_name: field_text(data, "wallet_name"),
        user_account_name: field_text(data, "user_account_name"),
        can_receive_money: boolean(data, "can_receive_money")?,
        response_timestamp_ms: millis(data, "response_timestamp")?,
    })
}

pub(crate) fn outstanding(data: &Value) -> Result<OutstandingTransactions, GPayRestError> {
    Ok(OutstandingTransactions {
        outstanding_credit: decimal(data, "outstanding_credit")?,
        outstanding_debit: decimal(data, "outstanding_debit")?,
        response_timestamp_ms: millis(data, "response_timestamp")?,
        outstanding_transactions: transactions(data, "outstanding_transactions")?,
    })
}

/// Parse a transaction list; a missing or non-array field is an empty list.
fn transactions(data: &Value, name: &str) -> Result<Vec<WalletTransaction>, GPayRestError> {
    let Some(entries) = data.get(name).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    entries.iter().map(transaction).collect()
}

fn transaction(tx: &Value) -> Result<WalletTransaction, GPayRestError> {
    Ok(WalletTransaction {
        transaction_id: required(tx, "transaction_id")?,
        datetime: required(tx, "datetime")?,
        timestamp_ms: opt_millis(tx, "timestamp")?,
        description: field_text(tx, "description"),
        amount: opt_decimal(tx, "amount")?,
        balance: opt_decimal(tx, "balance")?,
        reference_no: field_text(tx, "reference_no"),
        op_type: opt_code(tx, "op_type_id")?,
        status: opt_code(tx, "status")?,
        created_at_ms: opt_millis(tx, "created_at")?,
    })
}
