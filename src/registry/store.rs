use serde::{Deserialize, Serialize};

use crate::error::RegistryResult;

/// One authorized credential. `credential_id` is unique across the
/// registry; `label` is free text and may be empty or shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub credential_id: String,
    pub label: String,
}

/// Result of an `add`. A duplicate id is a reported no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

/// Result of a removal. `Removed(n)` carries how many records went away
/// (labels are not unique, so remove-by-label may delete several).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(usize),
    NotFound,
}

/// The single source of truth for authorization decisions.
///
/// Every operation is synchronous and atomic against the backing store;
/// nothing holds registry state across a decision boundary: callers
/// re-query per decision.
pub trait RegistryStore: Send + Sync {
    /// Idempotently ensures the backing store and its unique-credential
    /// constraint exist. Never erases existing records.
    fn initialize(&self) -> RegistryResult<()>;

    /// True iff exactly one record exists with that id. A credential
    /// that has never been seen is a normal `false`, not an error.
    fn is_authorized(&self, credential_id: &str) -> RegistryResult<bool>;

    fn add(&self, credential_id: &str, label: &str) -> RegistryResult<AddOutcome>;

    fn remove_by_id(&self, credential_id: &str) -> RegistryResult<RemoveOutcome>;

    /// Deletes every record whose label matches exactly.
    fn remove_by_label(&self, label: &str) -> RegistryResult<RemoveOutcome>;

    /// Order is unspecified beyond being deterministic per call.
    fn list_all(&self) -> RegistryResult<Vec<CredentialRecord>>;
}
