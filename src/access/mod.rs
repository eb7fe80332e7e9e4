//! The access-decision and actuation engine.
//!
//! - `policy`: grant window and denial cooldown durations.
//! - `controller`: `AccessController`, one scan cycle per invocation,
//!   serialized, fail-closed, and guaranteed to relock on every exit
//!   path.

pub mod controller;
pub mod policy;

pub use controller::*;
pub use policy::*;
