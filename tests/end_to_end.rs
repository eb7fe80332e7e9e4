use std::{sync::Arc, time::Duration};

use tempfile::TempDir;

use sezam::{
    access::{AccessController, GrantPolicy},
    audit::{EventLog, Outcome},
    command::{
        AddKeyCommand, AppContext, Command, CommandExecute, ListEventsCommand, ListKeysCommand,
        RemoveKeyCommand, RemoveSelector, Reply, ScanCommand,
    },
    device::{SimulatedLock, SimulatedReader},
    registry::{RegistryStore, SqliteRegistry},
};

/// Context over a durable SQLite registry and a durable event journal,
/// with zero-length waits so the scenarios run instantly.
fn durable_context(dir: &TempDir) -> AppContext {
    let registry: Arc<dyn RegistryStore> =
        Arc::new(SqliteRegistry::open(dir.path().join("keys.db")).unwrap());
    let events = Arc::new(EventLog::with_journal(dir.path().join("events.jsonl")).unwrap());
    let controller = Arc::new(AccessController::new(
        Arc::clone(&registry),
        Arc::new(SimulatedLock::new()),
        Arc::clone(&events),
        GrantPolicy::new(Duration::ZERO, Duration::ZERO),
    ));

    AppContext {
        registry,
        controller,
        events,
        reader: Arc::new(SimulatedReader::new()),
    }
}

async fn scan(ctx: &AppContext, credential: &str) -> Outcome {
    let reply = Command::Scan(ScanCommand {
        credential: Some(credential.to_string()),
    })
    .execute(ctx)
    .await
    .unwrap();
    match reply {
        Reply::Scan { outcome, .. } => outcome,
        other => panic!("unexpected reply: {other:?}"),
    }
}

/// The simulated deployment scenario: a pre-seeded registry grants its
/// credential, denies an unknown one, and denies again after removal.
/// The event log grows by exactly one entry per decision.
#[tokio::test]
async fn test_simulated_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = durable_context(&dir);

    ctx.registry.add("12345678", "Alice").unwrap();

    assert_eq!(scan(&ctx, "12345678").await, Outcome::Granted);
    assert_eq!(ctx.events.len(), 1);

    assert_eq!(scan(&ctx, "99999999").await, Outcome::Denied);
    assert_eq!(ctx.events.len(), 2);

    ctx.registry.remove_by_id("12345678").unwrap();
    assert_eq!(scan(&ctx, "12345678").await, Outcome::Denied);
    assert_eq!(ctx.events.len(), 3);

    // The durable journal carries the same decisions, in order.
    let journal = EventLog::replay(dir.path().join("events.jsonl")).unwrap();
    assert_eq!(journal.len(), 3);
    assert_eq!(journal[0].outcome, Outcome::Granted);
    assert_eq!(journal[0].credential_id, "12345678");
    assert_eq!(journal[1].outcome, Outcome::Denied);
    assert_eq!(journal[1].credential_id, "99999999");
    assert_eq!(journal[2].outcome, Outcome::Denied);
}

/// Administrative flow through the command layer: add, duplicate add,
/// list, batch removal by label.
#[tokio::test]
async fn test_admin_flow() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = durable_context(&dir);

    let add = |credential: &str, label: &str| {
        Command::AddKey(AddKeyCommand {
            credential: credential.to_string(),
            label: label.to_string(),
        })
    };

    assert_eq!(
        add("11111111", "contractor").execute(&ctx).await.unwrap(),
        Reply::Added {
            credential_id: "11111111".to_string()
        }
    );
    assert_eq!(
        add("22222222", "contractor").execute(&ctx).await.unwrap(),
        Reply::Added {
            credential_id: "22222222".to_string()
        }
    );
    assert_eq!(
        add("11111111", "imposter").execute(&ctx).await.unwrap(),
        Reply::AlreadyExists {
            credential_id: "11111111".to_string()
        }
    );

    match Command::ListKeys(ListKeysCommand).execute(&ctx).await.unwrap() {
        Reply::Keys(keys) => assert_eq!(keys.len(), 2),
        other => panic!("unexpected reply: {other:?}"),
    }

    let remove = Command::RemoveKey(RemoveKeyCommand {
        selector: RemoveSelector::ByLabel("contractor".to_string()),
    });
    assert_eq!(remove.execute(&ctx).await.unwrap(), Reply::Removed { count: 2 });

    match Command::ListKeys(ListKeysCommand).execute(&ctx).await.unwrap() {
        Reply::Keys(keys) => assert!(keys.is_empty()),
        other => panic!("unexpected reply: {other:?}"),
    }
}

/// A restarted process sees the same registry and the same journal:
/// the durable stores are the authority.
#[tokio::test]
async fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ctx = durable_context(&dir);
        ctx.registry.add("12345678", "Alice").unwrap();
        assert_eq!(scan(&ctx, "12345678").await, Outcome::Granted);
    }

    // "Restart": a fresh context over the same files.
    let ctx = durable_context(&dir);
    assert!(ctx.registry.is_authorized("12345678").unwrap());
    assert_eq!(ctx.events.len(), 1);

    assert_eq!(scan(&ctx, "12345678").await, Outcome::Granted);
    match Command::ListEvents(ListEventsCommand { limit: None })
        .execute(&ctx)
        .await
        .unwrap()
    {
        Reply::Events(events) => assert_eq!(events.len(), 2),
        other => panic!("unexpected reply: {other:?}"),
    }
}
