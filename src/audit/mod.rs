//! Append-only record of access decisions.
//!
//! - `event`: the `AccessEvent` entry and its outcome.
//! - `log`: `EventLog`, an in-memory mirror for display plus an optional
//!   durable JSONL journal, which is the authority when configured.

pub mod event;
pub mod log;

pub use event::*;
pub use log::*;
