use super::ledger::BalanceLedger;
use crate::domain::bill::{Bill, BillStatus, PaymentMethod};
use crate::domain::ports::BillStoreBox;
use crate::domain::session::Session;
use crate::error::{Result, SmartCareError};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// Orchestrates paying a bill from the stored balance.
///
/// The flow is read balance, check, conditional debit, mark the bill
/// completed. The debit and the bill update span two remote collections and
/// are not atomic: if the bill update fails after the debit succeeded, the
/// balance stays debited and the bill stays pending. The error is surfaced
/// so the caller can reconcile; no rollback is attempted.
pub struct SettlementCoordinator {
    ledger: BalanceLedger,
    bills: BillStoreBox,
}

impl SettlementCoordinator {
    pub fn new(ledger: BalanceLedger, bills: BillStoreBox) -> Self {
        Self { ledger, bills }
    }

    /// Pays one of the session account's pending bills with balance funds.
    pub async fn pay_bill(&self, session: &Session, bill_id: Uuid) -> Result<Bill> {
        let mut bill = self
            .bills
            .get(bill_id)
            .await?
            .filter(|bill| bill.account_id == session.account_id)
            .ok_or(SmartCareError::NotFound("bill"))?;

        if bill.status != BillStatus::Pending {
            return Err(SmartCareError::Validation(format!(
                "bill is {} and cannot be paid",
                bill.status
            )));
        }

        let observed = self.ledger.balance(session.account_id).await?;
        self.ledger
            .debit_if_unchanged(session.account_id, observed, bill.amount)
            .await?;

        // Funds are gone from here on; a failure below leaves the bill
        // pending with the balance already debited.
        bill.settle(PaymentMethod::Balance, Utc::now())?;
        if let Err(err) = self.bills.update(bill.clone()).await {
            warn!(%bill_id, %err, "balance debited but bill not marked completed");
            return Err(err);
        }

        info!(%bill_id, amount = bill.amount.value(), "bill settled from balance");
        Ok(bill)
    }
}
