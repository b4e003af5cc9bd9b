//! Infrastructure layer: concrete store adapters.
//!
//! `RestStore` talks to the hosted backend; the in-memory stores back tests
//! and local experiments; `LocalCache` is the client-side fallback cache.

pub mod in_memory;
pub mod local_cache;
pub mod rest;
