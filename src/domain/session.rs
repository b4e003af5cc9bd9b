use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session, created by login and passed explicitly into
/// every operation that acts on behalf of a user. Logout simply drops the
/// locally cached copy; there is no server-side session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
}
