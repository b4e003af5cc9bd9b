use crate::domain::account::{Account, Balance};
use crate::domain::bill::Bill;
use crate::domain::chat::ChatMessage;
use crate::domain::ports::{
    AccountStore, BillStore, ChatStore, LedgerStore, ServiceStore, TopUpStore,
};
use crate::domain::service::Service;
use crate::domain::topup::TopUpRequest;
use crate::error::{Result, SmartCareError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory stand-in for the remote `users` collection.
///
/// Cloning yields another handle to the same data, so one store can back
/// both the account and ledger ports of several components.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account);
        Ok(())
    }

    async fn get(&self, account_id: Uuid) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&account_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn update_profile(&self, account_id: Uuid, name: &str, password: &str) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&account_id)
            .ok_or(SmartCareError::NotFound("account"))?;
        account.name = name.to_string();
        account.password = password.to_string();
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryAccountStore {
    async fn balance(&self, account_id: Uuid) -> Result<Balance> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&account_id)
            .map(|a| a.balance)
            .ok_or(SmartCareError::NotFound("account"))
    }

    async fn set_balance(&self, account_id: Uuid, new_balance: Balance) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&account_id)
            .ok_or(SmartCareError::NotFound("account"))?;
        account.balance = new_balance;
        Ok(())
    }

    async fn set_balance_if(
        &self,
        account_id: Uuid,
        expected: Balance,
        new_balance: Balance,
    ) -> Result<bool> {
        // Compare and swap under the write lock, mirroring the conditional
        // update the REST adapter issues server-side.
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&account_id)
            .ok_or(SmartCareError::NotFound("account"))?;
        if account.balance != expected {
            return Ok(false);
        }
        account.balance = new_balance;
        Ok(true)
    }
}

/// In-memory `tagihan` collection.
#[derive(Default, Clone)]
pub struct InMemoryBillStore {
    bills: Arc<RwLock<HashMap<Uuid, Bill>>>,
}

impl InMemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillStore for InMemoryBillStore {
    async fn insert(&self, bill: Bill) -> Result<()> {
        let mut bills = self.bills.write().await;
        bills.insert(bill.id, bill);
        Ok(())
    }

    async fn get(&self, bill_id: Uuid) -> Result<Option<Bill>> {
        let bills = self.bills.read().await;
        Ok(bills.get(&bill_id).cloned())
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<Bill>> {
        let bills = self.bills.read().await;
        let mut owned: Vec<Bill> = bills
            .values()
            .filter(|bill| bill.account_id == account_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at));
        Ok(owned)
    }

    async fn update(&self, bill: Bill) -> Result<()> {
        let mut bills = self.bills.write().await;
        if !bills.contains_key(&bill.id) {
            return Err(SmartCareError::NotFound("bill"));
        }
        bills.insert(bill.id, bill);
        Ok(())
    }
}

/// In-memory `topup` collection.
#[derive(Default, Clone)]
pub struct InMemoryTopUpStore {
    requests: Arc<RwLock<Vec<TopUpRequest>>>,
}

impl InMemoryTopUpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopUpStore for InMemoryTopUpStore {
    async fn insert(&self, request: TopUpRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        requests.push(request);
        Ok(())
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<TopUpRequest>> {
        let requests = self.requests.read().await;
        let mut owned: Vec<TopUpRequest> = requests
            .iter()
            .filter(|request| request.account_id == account_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}

/// In-memory `chat` collection.
#[derive(Default, Clone)]
pub struct InMemoryChatStore {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn insert(&self, message: ChatMessage) -> Result<()> {
        let mut messages = self.messages.write().await;
        messages.push(message);
        Ok(())
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.read().await;
        let mut owned: Vec<ChatMessage> = messages
            .iter()
            .filter(|msg| msg.sender_id == account_id || msg.receiver_id == account_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(owned)
    }
}

/// In-memory `layanan` catalog, seeded up-front.
#[derive(Default, Clone)]
pub struct InMemoryServiceStore {
    services: Arc<RwLock<HashMap<Uuid, Service>>>,
}

impl InMemoryServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(services: Vec<Service>) -> Self {
        let map = services.into_iter().map(|s| (s.id, s)).collect();
        Self {
            services: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ServiceStore for InMemoryServiceStore {
    async fn list(&self) -> Result<Vec<Service>> {
        let services = self.services.read().await;
        let mut all: Vec<Service> = services.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn get(&self, service_id: Uuid) -> Result<Option<Service>> {
        let services = self.services.read().await;
        Ok(services.get(&service_id).cloned())
    }
}
