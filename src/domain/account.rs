use crate::error::SmartCareError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored monetary balance in whole rupiah.
///
/// This is a wrapper around `u64` so a balance can never go negative by
/// construction; callers compute debits through [`Balance::debit`], which
/// rejects anything that would overdraw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Balance(pub u64);

/// A positive monetary amount in whole rupiah.
///
/// Ensures bill, order, and top-up amounts are always strictly positive,
/// including when deserialized from a remote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64")]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: u64) -> Result<Self, SmartCareError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(SmartCareError::Validation(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = SmartCareError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Balance {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn can_cover(&self, amount: Amount) -> bool {
        self.0 >= amount.0
    }

    /// Adds `amount`, saturating at the type bound.
    pub fn credit(self, amount: Amount) -> Self {
        Self(self.0.saturating_add(amount.0))
    }

    /// Subtracts `amount`, failing with `InsufficientFunds` if it would
    /// overdraw. No state is touched; this only computes the new value.
    pub fn debit(self, amount: Amount) -> Result<Self, SmartCareError> {
        self.0
            .checked_sub(amount.0)
            .map(Self)
            .ok_or(SmartCareError::InsufficientFunds {
                available: self.0,
                required: amount.0,
            })
    }
}

/// A registered end user as stored in the remote `users` collection.
///
/// The balance field is mutated only through the ledger port; everything else
/// changes via profile updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub balance: Balance,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            balance: Balance::ZERO,
            created_at: Utc::now(),
        }
    }
}
