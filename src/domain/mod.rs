//! Domain layer: value objects, entities, and the store ports they are
//! persisted through. The remote store owns every entity; the types here are
//! the client's typed view of it.

pub mod account;
pub mod bill;
pub mod chat;
pub mod ports;
pub mod service;
pub mod session;
pub mod topup;
