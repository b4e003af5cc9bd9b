use crate::domain::account::Amount;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry from the remote `layanan` collection. Read-only from the
/// client's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub base_price: Amount,
}
