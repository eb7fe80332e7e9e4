/// Access controller: the scan-to-actuation state machine.
pub mod access;
/// Append-only audit log of access decisions.
pub mod audit;
/// Front-end command dispatch (SCAN, ADDKEY, etc.).
pub mod command;
/// Controller configuration loading.
pub mod config;
/// Device capabilities: credential source and lock actuator.
pub mod device;
/// Common error types: registry, device, access cycle.
pub mod error;
/// Logging initialization (console and file sinks).
pub mod logging;
/// Authorized-credential registry (SQLite, in-memory).
pub mod registry;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Scan cycle engine: controller, decision, grant timing.
pub use access::{AccessController, Decision, GrantPolicy};
/// Audit events and the event log.
pub use audit::{AccessEvent, EventLog, Outcome};
/// Front-end commands and their replies.
pub use command::{
    AddKeyCommand, AppContext, Command, CommandExecute, ListEventsCommand, ListKeysCommand,
    RemoveKeyCommand, RemoveSelector, Reply, ScanCommand,
};
/// config
pub use config::{RegistryBackend, Settings};
/// Device seams and their simulated implementations.
pub use device::{Actuator, CredentialSource, LockState, SimulatedLock, SimulatedReader};
/// Operation errors and result types.
pub use error::{AccessError, AccessResult, DeviceError, RegistryError, RegistryResult};
/// logging
pub use logging::{init_logging, LoggingHandle};
/// Registry backends and outcomes.
pub use registry::{
    AddOutcome, CredentialRecord, MemoryRegistry, RegistryEngine, RegistryStore, RemoveOutcome,
    SqliteRegistry,
};
