//! Numeric status and operation codes sent by the wallet API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A numeric code with no matching variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown {kind} value: {value}")]
pub struct UnknownDiscriminant {
    pub kind: &'static str,
    pub value: i64,
}

/// Kind of wallet operation behind a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    DirectTransfer,
    PaymentRequest,
    BankDeposit,
    BankWithdraw,
    TransactionFee,
    LocalTransfer,
}

impl OperationType {
    /// Wire value (`op_type_id`).
    pub fn value(&self) -> i64 {
        match self {
            Self::DirectTransfer => 1,
            Self::PaymentRequest => 2,
            Self::BankDeposit => 3,
            Self::BankWithdraw => 4,
            Self::TransactionFee => 5,
            Self::LocalTransfer => 6,
        }
    }
}

impl TryFrom<i64> for OperationType {
    type Error = UnknownDiscriminant;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::DirectTransfer),
            2 => Ok(Self::PaymentRequest),
            3 => Ok(Self::BankDeposit),
            4 => Ok(Self::BankWithdraw),
            5 => Ok(Self::TransactionFee),
            6 => Ok(Self::LocalTransfer),
            _ => Err(UnknownDiscriminant {
                kind: "OperationType",
                value,
            }),
        }
    }
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Applied,
}

impl TransactionStatus {
    /// Wire value (`status`).
    pub fn value(&self) -> i64 {
        match self {
            Self::Pending => 0,
            Self::Completed => 1,
            Self::Applied => 2,
        }
    }
}

impl TryFrom<i64> for TransactionStatus {
    type Error = UnknownDiscriminant;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Completed),
            2 => Ok(Self::Applied),
            _ => Err(UnknownDiscriminant {
                kind: "TransactionStatus",
                value,
            }),
        }
    }
}

/// A decoded code, or the raw value when this client does not know it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coded<T> {
    Known(T),
    Unknown(i64),
}

impl<T> Coded<T>
where
    T: TryFrom<i64, Error = UnknownDiscriminant>,
{
    pub fn from_value(value: i64) -> Self {
        match T::try_from(value) {
            Ok(known) => Self::Known(known),
            Err(_) => Self::Unknown(value),
        }
    }
}

impl<T: Copy> Coded<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Unknown(_) => None,
        }
    }
}
