use crate::domain::account::Account;
use crate::domain::ports::AccountStoreBox;
use crate::domain::session::Session;
use crate::error::{Result, SmartCareError};
use tracing::info;

/// Registration, login, and profile updates against the `users` collection.
///
/// Credentials are checked client-side against the stored row, exactly like
/// the hosted application does; there is no token exchange. A successful
/// login yields a [`Session`] that callers pass into every other operation.
pub struct Authenticator {
    accounts: AccountStoreBox,
}

impl Authenticator {
    pub fn new(accounts: AccountStoreBox) -> Self {
        Self { accounts }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Account> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(SmartCareError::Validation(
                "name, email, and password are required".to_string(),
            ));
        }
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(SmartCareError::Validation(
                "email is already registered".to_string(),
            ));
        }

        let account = Account::new(name.trim(), email.trim(), password);
        self.accounts.insert(account.clone()).await?;
        info!(email = %account.email, "account registered");
        Ok(account)
    }

    /// A wrong email and a wrong password report the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .filter(|account| account.password == password)
            .ok_or_else(|| {
                SmartCareError::Validation("invalid email or password".to_string())
            })?;

        info!(email = %account.email, "logged in");
        Ok(Session {
            account_id: account.id,
            email: account.email,
            name: account.name,
        })
    }

    /// Updates the display name and, when given, the password. Email is
    /// immutable. Returns the refreshed session.
    pub async fn update_profile(
        &self,
        session: &Session,
        name: &str,
        new_password: Option<&str>,
    ) -> Result<Session> {
        if name.trim().is_empty() {
            return Err(SmartCareError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        let account = self
            .accounts
            .get(session.account_id)
            .await?
            .ok_or(SmartCareError::NotFound("account"))?;

        let password = new_password.unwrap_or(&account.password);
        self.accounts
            .update_profile(session.account_id, name.trim(), password)
            .await?;

        Ok(Session {
            account_id: session.account_id,
            email: session.email.clone(),
            name: name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AccountStore;
    use crate::infrastructure::in_memory::InMemoryAccountStore;

    fn authenticator() -> (Authenticator, InMemoryAccountStore) {
        let store = InMemoryAccountStore::new();
        (Authenticator::new(Box::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (auth, _) = authenticator();
        auth.register("Budi", "budi@contoh.com", "rahasia")
            .await
            .unwrap();

        let session = auth.login("budi@contoh.com", "rahasia").await.unwrap();
        assert_eq!(session.name, "Budi");
        assert_eq!(session.email, "budi@contoh.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (auth, _) = authenticator();
        auth.register("Budi", "budi@contoh.com", "rahasia")
            .await
            .unwrap();
        let result = auth.register("Lain", "budi@contoh.com", "lainnya").await;
        assert!(matches!(result, Err(SmartCareError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (auth, _) = authenticator();
        auth.register("Budi", "budi@contoh.com", "rahasia")
            .await
            .unwrap();

        let result = auth.login("budi@contoh.com", "salah").await;
        assert!(matches!(result, Err(SmartCareError::Validation(_))));
        let result = auth.login("tidak@ada.com", "rahasia").await;
        assert!(matches!(result, Err(SmartCareError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_profile_keeps_password_when_absent() {
        let (auth, store) = authenticator();
        let account = auth
            .register("Budi", "budi@contoh.com", "rahasia")
            .await
            .unwrap();
        let session = auth.login("budi@contoh.com", "rahasia").await.unwrap();

        let updated = auth.update_profile(&session, "Budi Santoso", None).await.unwrap();
        assert_eq!(updated.name, "Budi Santoso");

        let stored = store.get(account.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Budi Santoso");
        assert_eq!(stored.password, "rahasia");
    }
}
