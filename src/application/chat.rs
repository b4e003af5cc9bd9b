use crate::domain::chat::ChatMessage;
use crate::domain::ports::ChatStoreBox;
use crate::domain::session::Session;
use crate::error::{Result, SmartCareError};
use uuid::Uuid;

/// Sends and reloads the user ↔ admin conversation.
///
/// Delivery is polling only: `history` is a full reload on every call.
pub struct ChatService {
    store: ChatStoreBox,
}

impl ChatService {
    pub fn new(store: ChatStoreBox) -> Self {
        Self { store }
    }

    /// Appends one message to the conversation. The body is trimmed first;
    /// an empty result fails validation and nothing is stored.
    pub async fn send(
        &self,
        session: &Session,
        counterparty_id: Uuid,
        body: &str,
    ) -> Result<ChatMessage> {
        let body = body.trim();
        if body.is_empty() {
            return Err(SmartCareError::Validation(
                "message must not be empty".to_string(),
            ));
        }
        let message = ChatMessage::from_user(session.account_id, counterparty_id, body);
        self.store.insert(message.clone()).await?;
        Ok(message)
    }

    /// Every message the account sent or received, oldest first.
    pub async fn history(&self, session: &Session) -> Result<Vec<ChatMessage>> {
        self.store.list_for_account(session.account_id).await
    }
}
