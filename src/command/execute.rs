//! Command abstraction and dispatch.
//!
//! Contains the [`CommandExecute`] trait for uniform execution and the
//! [`Command`] enum encapsulating every supported operation, so front
//! ends drive the core through a single interface.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::{
    admin::{AddKeyCommand, ListEventsCommand, ListKeysCommand, RemoveKeyCommand},
    scan::ScanCommand,
};
use crate::{
    access::AccessController,
    audit::{AccessEvent, EventLog, Outcome},
    device::CredentialSource,
    error::AccessResult,
    registry::{CredentialRecord, RegistryStore},
};

/// Everything a command may touch. Handed to front ends once at
/// startup; commands borrow it per execution.
pub struct AppContext {
    pub registry: Arc<dyn RegistryStore>,
    pub controller: Arc<AccessController>,
    pub events: Arc<EventLog>,
    pub reader: Arc<dyn CredentialSource>,
}

/// Structured command result, rendered by the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Scan {
        credential_id: String,
        outcome: Outcome,
        detail: String,
    },
    Added {
        credential_id: String,
    },
    AlreadyExists {
        credential_id: String,
    },
    Removed {
        count: usize,
    },
    NotFound,
    Keys(Vec<CredentialRecord>),
    Events(Vec<AccessEvent>),
}

#[async_trait]
pub trait CommandExecute: std::fmt::Debug {
    /// Executes the command against the application context and
    /// returns its structured reply.
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply>;

    /// Command name for logging.
    fn command_name(&self) -> &'static str {
        "UNKNOWN"
    }
}

/// Every operation the core exposes to front ends.
#[derive(Debug)]
pub enum Command {
    Scan(ScanCommand),
    AddKey(AddKeyCommand),
    RemoveKey(RemoveKeyCommand),
    ListKeys(ListKeysCommand),
    ListEvents(ListEventsCommand),
}

#[async_trait]
impl CommandExecute for Command {
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply> {
        match self {
            Command::Scan(cmd) => cmd.execute(ctx).await,
            Command::AddKey(cmd) => cmd.execute(ctx).await,
            Command::RemoveKey(cmd) => cmd.execute(ctx).await,
            Command::ListKeys(cmd) => cmd.execute(ctx).await,
            Command::ListEvents(cmd) => cmd.execute(ctx).await,
        }
    }

    fn command_name(&self) -> &'static str {
        match self {
            Command::Scan(cmd) => cmd.command_name(),
            Command::AddKey(cmd) => cmd.command_name(),
            Command::RemoveKey(cmd) => cmd.command_name(),
            Command::ListKeys(cmd) => cmd.command_name(),
            Command::ListEvents(cmd) => cmd.command_name(),
        }
    }
}
