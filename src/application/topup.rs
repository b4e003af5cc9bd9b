use crate::domain::account::Amount;
use crate::domain::ports::TopUpStoreBox;
use crate::domain::session::Session;
use crate::domain::topup::{TopUpMethod, TopUpRequest};
use crate::error::Result;
use tracing::info;

/// Files top-up requests for manual operator approval.
///
/// Submission never touches the balance: the credit is applied out-of-band
/// once an operator completes the request.
pub struct TopUpSubmitter {
    store: TopUpStoreBox,
}

impl TopUpSubmitter {
    pub fn new(store: TopUpStoreBox) -> Self {
        Self { store }
    }

    /// Creates one pending request. A zero amount fails validation before
    /// any record is written.
    pub async fn submit(
        &self,
        session: &Session,
        amount: u64,
        method: TopUpMethod,
    ) -> Result<TopUpRequest> {
        let amount = Amount::new(amount)?;
        let request = TopUpRequest::new(session.account_id, amount, method);
        self.store.insert(request.clone()).await?;
        info!(
            account = %session.account_id,
            amount = amount.value(),
            %method,
            "top-up request submitted"
        );
        Ok(request)
    }

    /// The session account's request history, newest first.
    pub async fn history(&self, session: &Session) -> Result<Vec<TopUpRequest>> {
        self.store.list_for_account(session.account_id).await
    }
}
