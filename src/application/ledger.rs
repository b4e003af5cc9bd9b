use crate::domain::account::{Amount, Balance};
use crate::domain::ports::LedgerStoreBox;
use crate::error::{Result, SmartCareError};
use tracing::debug;
use uuid::Uuid;

/// The only component that reads or writes a stored balance.
///
/// Reads go straight through to the store. Debits use a conditional write
/// keyed on the balance the caller observed, so two sessions racing on the
/// same account cannot both spend the same funds; the loser gets
/// `BalanceConflict` and no retry is attempted.
pub struct BalanceLedger {
    store: LedgerStoreBox,
}

impl BalanceLedger {
    pub fn new(store: LedgerStoreBox) -> Self {
        Self { store }
    }

    /// Current stored balance for the account. `NotFound` if the account
    /// does not exist, `Transport` on network failure.
    pub async fn balance(&self, account_id: Uuid) -> Result<Balance> {
        self.store.balance(account_id).await
    }

    /// Unconditional balance overwrite. The caller computes the new value;
    /// `Balance` being unsigned enforces the non-negativity rule by type.
    pub async fn overwrite(&self, account_id: Uuid, new_balance: Balance) -> Result<()> {
        self.store.set_balance(account_id, new_balance).await
    }

    /// Debits `amount` from the balance the caller last observed.
    ///
    /// Fails with `InsufficientFunds` before any write if `observed` cannot
    /// cover the amount, and with `BalanceConflict` if the stored balance no
    /// longer equals `observed` when the write lands. Returns the new
    /// balance on success.
    pub async fn debit_if_unchanged(
        &self,
        account_id: Uuid,
        observed: Balance,
        amount: Amount,
    ) -> Result<Balance> {
        let new_balance = observed.debit(amount)?;
        let applied = self
            .store
            .set_balance_if(account_id, observed, new_balance)
            .await?;
        if !applied {
            return Err(SmartCareError::BalanceConflict);
        }
        debug!(%account_id, debited = amount.value(), remaining = new_balance.value(), "balance debited");
        Ok(new_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Account;
    use crate::domain::ports::AccountStore;
    use crate::infrastructure::in_memory::InMemoryAccountStore;

    async fn seeded_ledger(balance: u64) -> (BalanceLedger, Uuid) {
        let store = InMemoryAccountStore::new();
        let mut account = Account::new("Budi", "budi@contoh.com", "rahasia");
        account.balance = Balance::new(balance);
        let id = account.id;
        store.insert(account).await.unwrap();
        (BalanceLedger::new(Box::new(store)), id)
    }

    #[tokio::test]
    async fn test_balance_read() {
        let (ledger, id) = seeded_ledger(75_000).await;
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::new(75_000));
    }

    #[tokio::test]
    async fn test_balance_missing_account() {
        let (ledger, _) = seeded_ledger(0).await;
        let result = ledger.balance(Uuid::new_v4()).await;
        assert!(matches!(result, Err(SmartCareError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_debit_happy_path() {
        let (ledger, id) = seeded_ledger(100_000).await;
        let observed = ledger.balance(id).await.unwrap();
        let remaining = ledger
            .debit_if_unchanged(id, observed, Amount::new(40_000).unwrap())
            .await
            .unwrap();
        assert_eq!(remaining, Balance::new(60_000));
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::new(60_000));
    }

    #[tokio::test]
    async fn test_debit_stale_observation_conflicts() {
        let (ledger, id) = seeded_ledger(100_000).await;
        // Another session spends first.
        ledger.overwrite(id, Balance::new(10_000)).await.unwrap();

        let result = ledger
            .debit_if_unchanged(id, Balance::new(100_000), Amount::new(40_000).unwrap())
            .await;
        assert!(matches!(result, Err(SmartCareError::BalanceConflict)));
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::new(10_000));
    }

    #[tokio::test]
    async fn test_debit_insufficient_writes_nothing() {
        let (ledger, id) = seeded_ledger(30_000).await;
        let observed = ledger.balance(id).await.unwrap();
        let result = ledger
            .debit_if_unchanged(id, observed, Amount::new(40_000).unwrap())
            .await;
        assert!(matches!(
            result,
            Err(SmartCareError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::new(30_000));
    }
}
