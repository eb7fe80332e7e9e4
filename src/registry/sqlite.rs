use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode};

use super::store::{AddOutcome, CredentialRecord, RegistryStore, RemoveOutcome};
use crate::error::RegistryResult;

/// Durable registry over a single SQLite table:
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS authorized_keys (
///     credential_id TEXT UNIQUE,
///     label         TEXT
/// )
/// ```
///
/// One connection behind a mutex; each operation is a single statement,
/// so the store stays consistent if the process dies mid-operation. The
/// UNIQUE constraint is what turns a duplicate add into a reported
/// no-op instead of a second row.
pub struct SqliteRegistry {
    conn: Mutex<Connection>,
}

impl SqliteRegistry {
    /// Opens (or creates) the registry file and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let registry = Self {
            conn: Mutex::new(Connection::open(path)?),
        };
        registry.initialize()?;
        Ok(registry)
    }

    /// Private in-memory database, one per call. Test helper.
    pub fn open_in_memory() -> RegistryResult<Self> {
        let registry = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        registry.initialize()?;
        Ok(registry)
    }
}

impl RegistryStore for SqliteRegistry {
    fn initialize(&self) -> RegistryResult<()> {
        self.conn.lock().execute(
            "CREATE TABLE IF NOT EXISTS authorized_keys (
                credential_id TEXT UNIQUE,
                label TEXT
            )",
            [],
        )?;
        Ok(())
    }

    fn is_authorized(&self, credential_id: &str) -> RegistryResult<bool> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM authorized_keys WHERE credential_id = ?1",
            params![credential_id],
            |row| row.get(0),
        )?;
        Ok(count == 1)
    }

    fn add(&self, credential_id: &str, label: &str) -> RegistryResult<AddOutcome> {
        let conn = self.conn.lock();
        match conn.execute(
            "INSERT INTO authorized_keys (credential_id, label) VALUES (?1, ?2)",
            params![credential_id, label],
        ) {
            Ok(_) => Ok(AddOutcome::Added),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(AddOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remove_by_id(&self, credential_id: &str) -> RegistryResult<RemoveOutcome> {
        let conn = self.conn.lock();
        let removed = conn.execute(
            "DELETE FROM authorized_keys WHERE credential_id = ?1",
            params![credential_id],
        )?;
        if removed == 0 {
            Ok(RemoveOutcome::NotFound)
        } else {
            Ok(RemoveOutcome::Removed(removed))
        }
    }

    fn remove_by_label(&self, label: &str) -> RegistryResult<RemoveOutcome> {
        let conn = self.conn.lock();
        let removed = conn.execute(
            "DELETE FROM authorized_keys WHERE label = ?1",
            params![label],
        )?;
        if removed == 0 {
            Ok(RemoveOutcome::NotFound)
        } else {
            Ok(RemoveOutcome::Removed(removed))
        }
    }

    fn list_all(&self) -> RegistryResult<Vec<CredentialRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT credential_id, label FROM authorized_keys")?;
        let rows = stmt.query_map([], |row| {
            Ok(CredentialRecord {
                credential_id: row.get(0)?,
                label: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            })
        })?;
        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Add followed immediately by an authorization query returns true.
    #[test]
    fn test_add_and_is_authorized() {
        let registry = SqliteRegistry::open_in_memory().unwrap();

        assert_eq!(
            registry.add("12345678", "Alice").unwrap(),
            AddOutcome::Added
        );
        assert!(registry.is_authorized("12345678").unwrap());
        assert!(!registry.is_authorized("87654321").unwrap());
    }

    /// The UNIQUE constraint turns the second add into `AlreadyExists`
    /// and the table still holds exactly one row for that id.
    #[test]
    fn test_duplicate_add() {
        let registry = SqliteRegistry::open_in_memory().unwrap();

        registry.add("12345678", "Alice").unwrap();
        assert_eq!(
            registry.add("12345678", "intruder").unwrap(),
            AddOutcome::AlreadyExists
        );

        let all = registry.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].label, "Alice");
    }

    /// Initialize is idempotent and never erases existing records.
    #[test]
    fn test_initialize_preserves_records() {
        let registry = SqliteRegistry::open_in_memory().unwrap();
        registry.add("12345678", "Alice").unwrap();

        registry.initialize().unwrap();
        registry.initialize().unwrap();

        assert!(registry.is_authorized("12345678").unwrap());
        assert_eq!(registry.list_all().unwrap().len(), 1);
    }

    /// Remove by id, then the credential no longer authorizes.
    #[test]
    fn test_remove_by_id() {
        let registry = SqliteRegistry::open_in_memory().unwrap();
        registry.add("12345678", "Alice").unwrap();

        assert_eq!(
            registry.remove_by_id("12345678").unwrap(),
            RemoveOutcome::Removed(1)
        );
        assert!(!registry.is_authorized("12345678").unwrap());
        assert_eq!(
            registry.remove_by_id("12345678").unwrap(),
            RemoveOutcome::NotFound
        );
    }

    /// Remove-by-label deletes every row with that exact label.
    #[test]
    fn test_remove_by_label_batch() {
        let registry = SqliteRegistry::open_in_memory().unwrap();

        registry.add("11111111", "contractor").unwrap();
        registry.add("22222222", "contractor").unwrap();
        registry.add("33333333", "staff").unwrap();

        assert_eq!(
            registry.remove_by_label("contractor").unwrap(),
            RemoveOutcome::Removed(2)
        );

        let all = registry.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].credential_id, "33333333");
    }

    /// Label matching is exact; near-misses remove nothing.
    #[test]
    fn test_remove_by_label_exact_match_only() {
        let registry = SqliteRegistry::open_in_memory().unwrap();
        registry.add("11111111", "staff").unwrap();

        assert_eq!(
            registry.remove_by_label("staf").unwrap(),
            RemoveOutcome::NotFound
        );
        assert_eq!(
            registry.remove_by_label("Staff").unwrap(),
            RemoveOutcome::NotFound
        );
        assert!(registry.is_authorized("11111111").unwrap());
    }

    /// A registry survives reopening the same file.
    #[test]
    fn test_reopen_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.db");

        {
            let registry = SqliteRegistry::open(&path).unwrap();
            registry.add("12345678", "Alice").unwrap();
        }

        let registry = SqliteRegistry::open(&path).unwrap();
        assert!(registry.is_authorized("12345678").unwrap());
    }
}
