use crate::domain::account::Amount;
use crate::error::SmartCareError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed set of payment channels a top-up can arrive through. Wire
/// values match the hosted schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopUpMethod {
    TransferBank,
    EWallet,
    VirtualAccount,
    Qris,
}

impl fmt::Display for TopUpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferBank => write!(f, "transfer_bank"),
            Self::EWallet => write!(f, "e_wallet"),
            Self::VirtualAccount => write!(f, "virtual_account"),
            Self::Qris => write!(f, "qris"),
        }
    }
}

impl FromStr for TopUpMethod {
    type Err = SmartCareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer_bank" => Ok(Self::TransferBank),
            "e_wallet" => Ok(Self::EWallet),
            "virtual_account" => Ok(Self::VirtualAccount),
            "qris" => Ok(Self::Qris),
            other => Err(SmartCareError::Validation(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopUpStatus {
    Pending,
    Completed,
    Rejected,
}

impl fmt::Display for TopUpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A pending request to increase an account's balance.
///
/// The client only ever creates these in `pending`; approval, rejection, and
/// the balance credit itself happen out-of-band by an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUpRequest {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: Amount,
    pub method: TopUpMethod,
    pub status: TopUpStatus,
    pub created_at: DateTime<Utc>,
}

impl TopUpRequest {
    pub fn new(account_id: Uuid, amount: Amount, method: TopUpMethod) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            method,
            status: TopUpStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_round_trip() {
        for raw in ["transfer_bank", "e_wallet", "virtual_account", "qris"] {
            let method: TopUpMethod = raw.parse().unwrap();
            assert_eq!(method.to_string(), raw);
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = "cash".parse::<TopUpMethod>();
        assert!(matches!(result, Err(SmartCareError::Validation(_))));
    }

    #[test]
    fn test_new_request_is_pending() {
        let request = TopUpRequest::new(
            Uuid::new_v4(),
            Amount::new(50_000).unwrap(),
            TopUpMethod::Qris,
        );
        assert_eq!(request.status, TopUpStatus::Pending);
    }
}
