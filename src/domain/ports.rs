use super::account::{Account, Balance};
use super::bill::Bill;
use super::chat::ChatMessage;
use super::service::Service;
use super::topup::TopUpRequest;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type LedgerStoreBox = Box<dyn LedgerStore>;
pub type BillStoreBox = Box<dyn BillStore>;
pub type TopUpStoreBox = Box<dyn TopUpStore>;
pub type ChatStoreBox = Box<dyn ChatStore>;
pub type ServiceStoreBox = Box<dyn ServiceStore>;

/// Identity operations on the remote `users` collection.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: Account) -> Result<()>;
    async fn get(&self, account_id: Uuid) -> Result<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
    async fn update_profile(&self, account_id: Uuid, name: &str, password: &str) -> Result<()>;
}

/// Balance operations on the remote `users` collection. This is the only
/// port allowed to mutate a stored balance.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Current stored balance. `NotFound` if the account row is missing.
    async fn balance(&self, account_id: Uuid) -> Result<Balance>;
    /// Unconditional overwrite of the stored balance.
    async fn set_balance(&self, account_id: Uuid, new_balance: Balance) -> Result<()>;
    /// Conditional overwrite: applied only if the stored balance still
    /// equals `expected`. Returns whether the write took effect.
    async fn set_balance_if(
        &self,
        account_id: Uuid,
        expected: Balance,
        new_balance: Balance,
    ) -> Result<bool>;
}

/// The remote `tagihan` collection.
#[async_trait]
pub trait BillStore: Send + Sync {
    async fn insert(&self, bill: Bill) -> Result<()>;
    async fn get(&self, bill_id: Uuid) -> Result<Option<Bill>>;
    /// All bills owned by the account, newest order first.
    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<Bill>>;
    async fn update(&self, bill: Bill) -> Result<()>;
}

/// The remote `topup` collection. Insert-only from the client.
#[async_trait]
pub trait TopUpStore: Send + Sync {
    async fn insert(&self, request: TopUpRequest) -> Result<()>;
    /// This account's requests, newest first.
    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<TopUpRequest>>;
}

/// The remote `chat` collection.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn insert(&self, message: ChatMessage) -> Result<()>;
    /// Every message the account sent or received, oldest first.
    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<ChatMessage>>;
}

/// The remote `layanan` catalog.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Service>>;
    async fn get(&self, service_id: Uuid) -> Result<Option<Service>>;
}
