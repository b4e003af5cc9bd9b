//! Application layer: the use-case coordinators behind each screen action.
//!
//! Every coordinator owns its store ports as boxed trait objects and performs
//! exactly one pass over the remote store per user action, with no retries
//! and no background work.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod ledger;
pub mod settlement;
pub mod topup;
