use super::{
    store::{AddOutcome, CredentialRecord, RegistryStore, RemoveOutcome},
    MemoryRegistry, SqliteRegistry,
};
use crate::{
    config::{RegistryBackend, Settings},
    error::RegistryResult,
};

/// Dispatch over the configured registry backend.
pub enum RegistryEngine {
    Sqlite(SqliteRegistry),
    Memory(MemoryRegistry),
}

impl RegistryEngine {
    /// Initialize the registry engine based on the passed configuration.
    pub fn initialize(settings: &Settings) -> RegistryResult<Self> {
        match settings.registry_backend {
            RegistryBackend::Sqlite => Ok(Self::Sqlite(SqliteRegistry::open(&settings.db_path)?)),
            RegistryBackend::Memory => Ok(Self::Memory(MemoryRegistry::new())),
        }
    }

    /// Gets a reference to the active backend via the common trait.
    pub fn get_store(&self) -> &dyn RegistryStore {
        match self {
            Self::Sqlite(store) => store,
            Self::Memory(store) => store,
        }
    }
}

impl RegistryStore for RegistryEngine {
    fn initialize(&self) -> RegistryResult<()> {
        match self {
            Self::Sqlite(store) => store.initialize(),
            Self::Memory(store) => store.initialize(),
        }
    }

    fn is_authorized(&self, credential_id: &str) -> RegistryResult<bool> {
        match self {
            Self::Sqlite(store) => store.is_authorized(credential_id),
            Self::Memory(store) => store.is_authorized(credential_id),
        }
    }

    fn add(&self, credential_id: &str, label: &str) -> RegistryResult<AddOutcome> {
        match self {
            Self::Sqlite(store) => store.add(credential_id, label),
            Self::Memory(store) => store.add(credential_id, label),
        }
    }

    fn remove_by_id(&self, credential_id: &str) -> RegistryResult<RemoveOutcome> {
        match self {
            Self::Sqlite(store) => store.remove_by_id(credential_id),
            Self::Memory(store) => store.remove_by_id(credential_id),
        }
    }

    fn remove_by_label(&self, label: &str) -> RegistryResult<RemoveOutcome> {
        match self {
            Self::Sqlite(store) => store.remove_by_label(label),
            Self::Memory(store) => store.remove_by_label(label),
        }
    }

    fn list_all(&self) -> RegistryResult<Vec<CredentialRecord>> {
        match self {
            Self::Sqlite(store) => store.list_all(),
            Self::Memory(store) => store.list_all(),
        }
    }
}
