use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the conversation a party sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    User,
    Admin,
}

/// One append-only chat message. Messages are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_kind: PartyKind,
    pub receiver_id: Uuid,
    pub receiver_kind: PartyKind,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Builds a user → admin message. The body is assumed to be validated
    /// (trimmed, non-empty) by the caller.
    pub fn from_user(sender_id: Uuid, receiver_id: Uuid, body: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            sender_kind: PartyKind::User,
            receiver_id,
            receiver_kind: PartyKind::Admin,
            body: body.to_string(),
            created_at: Utc::now(),
        }
    }
}
