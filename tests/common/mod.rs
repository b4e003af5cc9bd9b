#![allow(dead_code)]

use smartcare::application::auth::Authenticator;
use smartcare::application::catalog::ServiceCatalog;
use smartcare::application::ledger::BalanceLedger;
use smartcare::application::settlement::SettlementCoordinator;
use smartcare::domain::account::{Account, Amount, Balance};
use smartcare::domain::ports::AccountStore;
use smartcare::domain::service::Service;
use smartcare::domain::session::Session;
use smartcare::infrastructure::in_memory::{
    InMemoryAccountStore, InMemoryBillStore, InMemoryServiceStore,
};
use uuid::Uuid;

/// In-memory stand-in for the whole remote backend, pre-seeded with one
/// logged-in account and a one-entry service catalog.
pub struct TestBackend {
    pub accounts: InMemoryAccountStore,
    pub bills: InMemoryBillStore,
    pub services: InMemoryServiceStore,
    pub session: Session,
    pub service: Service,
}

impl TestBackend {
    pub async fn seeded(balance: u64) -> Self {
        let accounts = InMemoryAccountStore::new();
        let bills = InMemoryBillStore::new();

        let mut account = Account::new("Budi", "budi@contoh.com", "rahasia");
        account.balance = Balance::new(balance);
        let session = Session {
            account_id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
        };
        accounts.insert(account).await.unwrap();

        let service = Service {
            id: Uuid::new_v4(),
            name: "Bersih Rumah".to_string(),
            description: "Pembersihan rumah menyeluruh".to_string(),
            base_price: Amount::new(150_000).unwrap(),
        };
        let services = InMemoryServiceStore::seeded(vec![service.clone()]);

        Self {
            accounts,
            bills,
            services,
            session,
            service,
        }
    }

    pub fn ledger(&self) -> BalanceLedger {
        BalanceLedger::new(Box::new(self.accounts.clone()))
    }

    pub fn coordinator(&self) -> SettlementCoordinator {
        SettlementCoordinator::new(self.ledger(), Box::new(self.bills.clone()))
    }

    pub fn catalog(&self) -> ServiceCatalog {
        ServiceCatalog::new(Box::new(self.services.clone()), Box::new(self.bills.clone()))
    }

    pub fn auth(&self) -> Authenticator {
        Authenticator::new(Box::new(self.accounts.clone()))
    }

    pub async fn balance(&self) -> Balance {
        self.accounts
            .get(self.session.account_id)
            .await
            .unwrap()
            .unwrap()
            .balance
    }
}
