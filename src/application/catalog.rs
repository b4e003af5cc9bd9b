use crate::domain::bill::Bill;
use crate::domain::ports::{BillStoreBox, ServiceStoreBox};
use crate::domain::service::Service;
use crate::domain::session::Session;
use crate::error::{Result, SmartCareError};
use tracing::info;
use uuid::Uuid;

/// A bill joined to the name of the service it was ordered for. The name is
/// absent when the catalog entry has since disappeared; display code falls
/// back to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub bill: Bill,
    pub service_name: Option<String>,
}

/// Catalog browsing and service ordering.
pub struct ServiceCatalog {
    services: ServiceStoreBox,
    bills: BillStoreBox,
}

impl ServiceCatalog {
    pub fn new(services: ServiceStoreBox, bills: BillStoreBox) -> Self {
        Self { services, bills }
    }

    /// The full catalog, unfiltered.
    pub async fn list(&self) -> Result<Vec<Service>> {
        self.services.list().await
    }

    /// Orders a service: creates one pending bill priced at the service's
    /// base price. Payment happens later through settlement.
    pub async fn order(&self, session: &Session, service_id: Uuid) -> Result<Bill> {
        let service = self
            .services
            .get(service_id)
            .await?
            .ok_or(SmartCareError::NotFound("service"))?;

        let bill = Bill::new(session.account_id, service.id, service.base_price);
        self.bills.insert(bill.clone()).await?;
        info!(service = %service.name, amount = bill.amount.value(), "service ordered");
        Ok(bill)
    }

    /// The account's bills newest first, each joined to its service name.
    pub async fn order_history(&self, session: &Session) -> Result<Vec<OrderSummary>> {
        let bills = self.bills.list_for_account(session.account_id).await?;
        let mut summaries = Vec::with_capacity(bills.len());
        for bill in bills {
            let service_name = self
                .services
                .get(bill.service_id)
                .await?
                .map(|service| service.name);
            summaries.push(OrderSummary { bill, service_name });
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Amount;
    use crate::domain::bill::BillStatus;
    use crate::domain::ports::BillStore;
    use crate::infrastructure::in_memory::{InMemoryBillStore, InMemoryServiceStore};

    fn session() -> Session {
        Session {
            account_id: Uuid::new_v4(),
            email: "budi@contoh.com".to_string(),
            name: "Budi".to_string(),
        }
    }

    fn cleaning_service() -> Service {
        Service {
            id: Uuid::new_v4(),
            name: "Bersih Rumah".to_string(),
            description: "Pembersihan rumah menyeluruh".to_string(),
            base_price: Amount::new(150_000).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_order_creates_pending_bill_at_base_price() {
        let service = cleaning_service();
        let services = InMemoryServiceStore::seeded(vec![service.clone()]);
        let bills = InMemoryBillStore::new();
        let catalog = ServiceCatalog::new(Box::new(services), Box::new(bills.clone()));
        let session = session();

        let bill = catalog.order(&session, service.id).await.unwrap();
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.amount, service.base_price);
        assert_eq!(bill.account_id, session.account_id);
    }

    #[tokio::test]
    async fn test_order_unknown_service() {
        let catalog = ServiceCatalog::new(
            Box::new(InMemoryServiceStore::seeded(vec![])),
            Box::new(InMemoryBillStore::new()),
        );
        let result = catalog.order(&session(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(SmartCareError::NotFound("service"))));
    }

    #[tokio::test]
    async fn test_order_history_joins_service_names() {
        let service = cleaning_service();
        let services = InMemoryServiceStore::seeded(vec![service.clone()]);
        let bills = InMemoryBillStore::new();
        let catalog = ServiceCatalog::new(Box::new(services), Box::new(bills.clone()));
        let session = session();

        catalog.order(&session, service.id).await.unwrap();
        // A bill whose service vanished from the catalog.
        let orphan = Bill::new(session.account_id, Uuid::new_v4(), Amount::new(5_000).unwrap());
        bills.insert(orphan).await.unwrap();

        let history = catalog.order_history(&session).await.unwrap();
        assert_eq!(history.len(), 2);
        let named: Vec<_> = history
            .iter()
            .filter_map(|summary| summary.service_name.as_deref())
            .collect();
        assert_eq!(named, vec!["Bersih Rumah"]);
    }
}
