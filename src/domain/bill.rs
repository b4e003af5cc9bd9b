use crate::domain::account::Amount;
use crate::error::SmartCareError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// How a bill was settled. Only balance payments exist today; the wire value
/// is the hosted schema's "saldo".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "saldo")]
    Balance,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balance => write!(f, "saldo"),
        }
    }
}

/// A payable obligation created when a service is ordered.
///
/// The amount is fixed at creation; the only status transition is
/// pending → completed, applied once by [`Bill::settle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub account_id: Uuid,
    pub service_id: Uuid,
    pub amount: Amount,
    pub status: BillStatus,
    pub ordered_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
}

impl Bill {
    pub fn new(account_id: Uuid, service_id: Uuid, amount: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            service_id,
            amount,
            status: BillStatus::Pending,
            ordered_at: Utc::now(),
            completed_at: None,
            payment_method: None,
        }
    }

    /// Marks the bill completed. Rejects bills that are not pending so a
    /// settled or cancelled bill can never be paid again.
    pub fn settle(
        &mut self,
        method: PaymentMethod,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SmartCareError> {
        if self.status != BillStatus::Pending {
            return Err(SmartCareError::Validation(format!(
                "bill is {} and cannot be paid",
                self.status
            )));
        }
        self.status = BillStatus::Completed;
        self.payment_method = Some(method);
        self.completed_at = Some(completed_at);
        Ok(())
    }
}
