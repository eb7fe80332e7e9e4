use dashmap::DashMap;

use super::store::{AddOutcome, CredentialRecord, RegistryStore, RemoveOutcome};
use crate::error::RegistryResult;

/// In-memory registry keyed by credential id. Uniqueness falls out of
/// the map structure; intended for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryRegistry {
    data: DashMap<String, String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl RegistryStore for MemoryRegistry {
    fn initialize(&self) -> RegistryResult<()> {
        Ok(())
    }

    fn is_authorized(&self, credential_id: &str) -> RegistryResult<bool> {
        Ok(self.data.contains_key(credential_id))
    }

    fn add(&self, credential_id: &str, label: &str) -> RegistryResult<AddOutcome> {
        match self.data.entry(credential_id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Ok(AddOutcome::AlreadyExists),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(label.to_string());
                Ok(AddOutcome::Added)
            }
        }
    }

    fn remove_by_id(&self, credential_id: &str) -> RegistryResult<RemoveOutcome> {
        if self.data.remove(credential_id).is_some() {
            Ok(RemoveOutcome::Removed(1))
        } else {
            Ok(RemoveOutcome::NotFound)
        }
    }

    fn remove_by_label(&self, label: &str) -> RegistryResult<RemoveOutcome> {
        let before = self.data.len();
        self.data.retain(|_, stored| stored != label);
        let removed = before - self.data.len();
        if removed == 0 {
            Ok(RemoveOutcome::NotFound)
        } else {
            Ok(RemoveOutcome::Removed(removed))
        }
    }

    fn list_all(&self) -> RegistryResult<Vec<CredentialRecord>> {
        Ok(self
            .data
            .iter()
            .map(|entry| CredentialRecord {
                credential_id: entry.key().clone(),
                label: entry.value().clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Basic test to verify that an added credential authorizes.
    #[test]
    fn test_add_and_is_authorized() {
        let registry = MemoryRegistry::new();

        assert_eq!(
            registry.add("12345678", "Alice").unwrap(),
            AddOutcome::Added
        );
        assert!(registry.is_authorized("12345678").unwrap());
    }

    /// Ensures that an unknown credential is a normal `false`, not an error.
    #[test]
    fn test_unknown_credential_not_authorized() {
        let registry = MemoryRegistry::new();
        assert!(!registry.is_authorized("99999999").unwrap());
    }

    /// Adding the same id twice reports `AlreadyExists` and keeps the
    /// original record untouched.
    #[test]
    fn test_duplicate_add_is_reported() {
        let registry = MemoryRegistry::new();

        registry.add("12345678", "Alice").unwrap();
        assert_eq!(
            registry.add("12345678", "Bob").unwrap(),
            AddOutcome::AlreadyExists
        );

        let all = registry.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].label, "Alice");
    }

    /// Removing by id makes the credential unauthorized again.
    #[test]
    fn test_remove_by_id() {
        let registry = MemoryRegistry::new();

        registry.add("12345678", "Alice").unwrap();
        assert_eq!(
            registry.remove_by_id("12345678").unwrap(),
            RemoveOutcome::Removed(1)
        );
        assert!(!registry.is_authorized("12345678").unwrap());
    }

    /// Removing a missing id reports `NotFound`.
    #[test]
    fn test_remove_nonexistent_id() {
        let registry = MemoryRegistry::new();
        assert_eq!(
            registry.remove_by_id("nope").unwrap(),
            RemoveOutcome::NotFound
        );
    }

    /// Remove-by-label deletes every exact match and nothing else.
    #[test]
    fn test_remove_by_label_batch() {
        let registry = MemoryRegistry::new();

        registry.add("11111111", "contractor").unwrap();
        registry.add("22222222", "contractor").unwrap();
        registry.add("33333333", "staff").unwrap();

        assert_eq!(
            registry.remove_by_label("contractor").unwrap(),
            RemoveOutcome::Removed(2)
        );
        assert!(!registry.is_authorized("11111111").unwrap());
        assert!(!registry.is_authorized("22222222").unwrap());
        assert!(registry.is_authorized("33333333").unwrap());
    }

    /// Remove-by-label with no matches reports `NotFound`.
    #[test]
    fn test_remove_by_label_no_match() {
        let registry = MemoryRegistry::new();
        registry.add("11111111", "staff").unwrap();

        assert_eq!(
            registry.remove_by_label("visitor").unwrap(),
            RemoveOutcome::NotFound
        );
        assert!(registry.is_authorized("11111111").unwrap());
    }

    /// An empty label is a legal value, distinct from any other label.
    #[test]
    fn test_empty_label() {
        let registry = MemoryRegistry::new();
        registry.add("11111111", "").unwrap();
        registry.add("22222222", "staff").unwrap();

        assert_eq!(
            registry.remove_by_label("").unwrap(),
            RemoveOutcome::Removed(1)
        );
        assert!(registry.is_authorized("22222222").unwrap());
    }
}
