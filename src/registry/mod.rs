//! Authorized-credential registry.
//!
//! This module provides the storage abstraction behind every access
//! decision:
//!
//! - `store`: the `RegistryStore` trait, credential records and
//!   structured administrative outcomes.
//! - `memory`: DashMap-backed registry for tests and ephemeral runs.
//! - `sqlite`: durable registry over a single SQLite table.
//! - `engine`: `RegistryEngine` dispatch over the configured backend.

pub mod engine;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use engine::*;
pub use memory::*;
pub use sqlite::*;
pub use store::*;
