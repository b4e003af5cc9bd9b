use crate::config::Config;
use crate::domain::account::{Account, Amount, Balance};
use crate::domain::bill::{Bill, BillStatus, PaymentMethod};
use crate::domain::chat::{ChatMessage, PartyKind};
use crate::domain::ports::{
    AccountStore, BillStore, ChatStore, LedgerStore, ServiceStore, TopUpStore,
};
use crate::domain::service::Service;
use crate::domain::topup::{TopUpMethod, TopUpRequest, TopUpStatus};
use crate::error::{Result, SmartCareError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

const USERS: &str = "users";
const BILLS: &str = "tagihan";
const SERVICES: &str = "layanan";
const TOPUPS: &str = "topup";
const CHAT: &str = "chat";

/// PostgREST adapter over the hosted backend.
///
/// One store implements every port; cloning shares the underlying HTTP
/// client. Each call is a single request with no retry: transport failures
/// surface directly to the caller.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// `config.api_url` points at the REST root (the segment the collection
    /// name is appended to).
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: Method, collection: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, collection))
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let rows = self
            .request(Method::GET, collection)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows)
    }

    async fn insert_row<T: Serialize>(&self, collection: &str, row: &T) -> Result<()> {
        self.request(Method::POST, collection)
            .json(row)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn patch(
        &self,
        collection: &str,
        query: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<()> {
        self.request(Method::PATCH, collection)
            .query(query)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn id_filter(id: Uuid) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

#[derive(Serialize, Deserialize)]
struct UserRow {
    id: Uuid,
    nama: String,
    email: String,
    password: String,
    saldo: Balance,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for Account {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.nama,
            email: row.email,
            password: row.password,
            balance: row.saldo,
            created_at: row.created_at,
        }
    }
}

impl From<&Account> for UserRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            nama: account.name.clone(),
            email: account.email.clone(),
            password: account.password.clone(),
            saldo: account.balance,
            created_at: account.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BillRow {
    id: Uuid,
    user_id: Uuid,
    layanan_id: Uuid,
    nominal: Amount,
    status: BillStatus,
    order_date: DateTime<Utc>,
    completion_date: Option<DateTime<Utc>>,
    payment_method: Option<PaymentMethod>,
}

impl From<BillRow> for Bill {
    fn from(row: BillRow) -> Self {
        Self {
            id: row.id,
            account_id: row.user_id,
            service_id: row.layanan_id,
            amount: row.nominal,
            status: row.status,
            ordered_at: row.order_date,
            completed_at: row.completion_date,
            payment_method: row.payment_method,
        }
    }
}

impl From<&Bill> for BillRow {
    fn from(bill: &Bill) -> Self {
        Self {
            id: bill.id,
            user_id: bill.account_id,
            layanan_id: bill.service_id,
            nominal: bill.amount,
            status: bill.status,
            order_date: bill.ordered_at,
            completion_date: bill.completed_at,
            payment_method: bill.payment_method,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TopUpRow {
    id: Uuid,
    user_id: Uuid,
    nominal: Amount,
    payment_method: TopUpMethod,
    status: TopUpStatus,
    created_at: DateTime<Utc>,
}

impl From<TopUpRow> for TopUpRequest {
    fn from(row: TopUpRow) -> Self {
        Self {
            id: row.id,
            account_id: row.user_id,
            amount: row.nominal,
            method: row.payment_method,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl From<&TopUpRequest> for TopUpRow {
    fn from(request: &TopUpRequest) -> Self {
        Self {
            id: request.id,
            user_id: request.account_id,
            nominal: request.amount,
            payment_method: request.method,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ChatRow {
    id: Uuid,
    sender_id: Uuid,
    sender_type: PartyKind,
    receiver_id: Uuid,
    receiver_type: PartyKind,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ChatRow> for ChatMessage {
    fn from(row: ChatRow) -> Self {
        Self {
            id: row.id,
            sender_id: row.sender_id,
            sender_kind: row.sender_type,
            receiver_id: row.receiver_id,
            receiver_kind: row.receiver_type,
            body: row.message,
            created_at: row.created_at,
        }
    }
}

impl From<&ChatMessage> for ChatRow {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            sender_type: message.sender_kind,
            receiver_id: message.receiver_id,
            receiver_type: message.receiver_kind,
            message: message.body.clone(),
            created_at: message.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ServiceRow {
    id: Uuid,
    nama_layanan: String,
    description: String,
    base_price: Amount,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            name: row.nama_layanan,
            description: row.description,
            base_price: row.base_price,
        }
    }
}

#[async_trait]
impl AccountStore for RestStore {
    async fn insert(&self, account: Account) -> Result<()> {
        self.insert_row(USERS, &UserRow::from(&account)).await
    }

    async fn get(&self, account_id: Uuid) -> Result<Option<Account>> {
        let rows: Vec<UserRow> = self.fetch(USERS, &[id_filter(account_id)]).await?;
        Ok(rows.into_iter().next().map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let rows: Vec<UserRow> = self
            .fetch(USERS, &[("email", format!("eq.{email}"))])
            .await?;
        Ok(rows.into_iter().next().map(Account::from))
    }

    async fn update_profile(&self, account_id: Uuid, name: &str, password: &str) -> Result<()> {
        self.patch(
            USERS,
            &[id_filter(account_id)],
            &json!({ "nama": name, "password": password }),
        )
        .await
    }
}

#[async_trait]
impl LedgerStore for RestStore {
    async fn balance(&self, account_id: Uuid) -> Result<Balance> {
        #[derive(Deserialize)]
        struct SaldoRow {
            saldo: Balance,
        }
        let rows: Vec<SaldoRow> = self
            .fetch(USERS, &[id_filter(account_id), ("select", "saldo".to_string())])
            .await?;
        rows.into_iter()
            .next()
            .map(|row| row.saldo)
            .ok_or(SmartCareError::NotFound("account"))
    }

    async fn set_balance(&self, account_id: Uuid, new_balance: Balance) -> Result<()> {
        self.patch(
            USERS,
            &[id_filter(account_id)],
            &json!({ "saldo": new_balance.value() }),
        )
        .await
    }

    async fn set_balance_if(
        &self,
        account_id: Uuid,
        expected: Balance,
        new_balance: Balance,
    ) -> Result<bool> {
        // The filter makes the update conditional on the stored balance;
        // with return=representation an empty result means the precondition
        // no longer held and nothing was written.
        let rows: Vec<serde_json::Value> = self
            .request(Method::PATCH, USERS)
            .query(&[
                id_filter(account_id),
                ("saldo", format!("eq.{}", expected.value())),
            ])
            .header("Prefer", "return=representation")
            .json(&json!({ "saldo": new_balance.value() }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl BillStore for RestStore {
    async fn insert(&self, bill: Bill) -> Result<()> {
        self.insert_row(BILLS, &BillRow::from(&bill)).await
    }

    async fn get(&self, bill_id: Uuid) -> Result<Option<Bill>> {
        let rows: Vec<BillRow> = self.fetch(BILLS, &[id_filter(bill_id)]).await?;
        Ok(rows.into_iter().next().map(Bill::from))
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<Bill>> {
        let rows: Vec<BillRow> = self
            .fetch(
                BILLS,
                &[
                    ("user_id", format!("eq.{account_id}")),
                    ("order", "order_date.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Bill::from).collect())
    }

    async fn update(&self, bill: Bill) -> Result<()> {
        // With return=representation an empty result means no row matched
        // the id, which the in-memory store reports the same way.
        let rows: Vec<serde_json::Value> = self
            .request(Method::PATCH, BILLS)
            .query(&[id_filter(bill.id)])
            .header("Prefer", "return=representation")
            .json(&BillRow::from(&bill))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if rows.is_empty() {
            return Err(SmartCareError::NotFound("bill"));
        }
        Ok(())
    }
}

#[async_trait]
impl TopUpStore for RestStore {
    async fn insert(&self, request: TopUpRequest) -> Result<()> {
        self.insert_row(TOPUPS, &TopUpRow::from(&request)).await
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<TopUpRequest>> {
        let rows: Vec<TopUpRow> = self
            .fetch(
                TOPUPS,
                &[
                    ("user_id", format!("eq.{account_id}")),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(TopUpRequest::from).collect())
    }
}

#[async_trait]
impl ChatStore for RestStore {
    async fn insert(&self, message: ChatMessage) -> Result<()> {
        self.insert_row(CHAT, &ChatRow::from(&message)).await
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<ChatMessage>> {
        let rows: Vec<ChatRow> = self
            .fetch(
                CHAT,
                &[
                    (
                        "or",
                        format!("(sender_id.eq.{account_id},receiver_id.eq.{account_id})"),
                    ),
                    ("order", "created_at.asc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }
}

#[async_trait]
impl ServiceStore for RestStore {
    async fn list(&self) -> Result<Vec<Service>> {
        let rows: Vec<ServiceRow> = self.fetch(SERVICES, &[]).await?;
        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn get(&self, service_id: Uuid) -> Result<Option<Service>> {
        let rows: Vec<ServiceRow> = self.fetch(SERVICES, &[id_filter(service_id)]).await?;
        Ok(rows.into_iter().next().map(Service::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_row_wire_names() {
        let bill = Bill::new(Uuid::new_v4(), Uuid::new_v4(), Amount::new(150_000).unwrap());
        let value = serde_json::to_value(BillRow::from(&bill)).unwrap();
        assert_eq!(value["nominal"], 150_000);
        assert_eq!(value["status"], "pending");
        assert!(value["completion_date"].is_null());
        assert!(value.get("user_id").is_some());
        assert!(value.get("layanan_id").is_some());
    }

    #[test]
    fn test_topup_row_wire_names() {
        let request = TopUpRequest::new(
            Uuid::new_v4(),
            Amount::new(50_000).unwrap(),
            TopUpMethod::Qris,
        );
        let value = serde_json::to_value(TopUpRow::from(&request)).unwrap();
        assert_eq!(value["payment_method"], "qris");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["nominal"], 50_000);
    }

    #[test]
    fn test_chat_row_round_trip() {
        let message = ChatMessage::from_user(Uuid::new_v4(), Uuid::new_v4(), "Halo");
        let value = serde_json::to_value(ChatRow::from(&message)).unwrap();
        assert_eq!(value["message"], "Halo");
        assert_eq!(value["sender_type"], "user");
        assert_eq!(value["receiver_type"], "admin");

        let row: ChatRow = serde_json::from_value(value).unwrap();
        assert_eq!(ChatMessage::from(row), message);
    }

    #[test]
    fn test_user_row_maps_saldo() {
        let mut account = Account::new("Budi", "budi@contoh.com", "rahasia");
        account.balance = Balance::new(75_000);
        let value = serde_json::to_value(UserRow::from(&account)).unwrap();
        assert_eq!(value["saldo"], 75_000);
        assert_eq!(value["nama"], "Budi");
    }
}
