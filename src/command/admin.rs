use async_trait::async_trait;

use super::execute::{AppContext, CommandExecute, Reply};
use crate::{
    error::AccessResult,
    registry::{AddOutcome, RemoveOutcome},
};

/// Authorizes a credential, with an optional human-readable label.
#[derive(Debug)]
pub struct AddKeyCommand {
    pub credential: String,
    pub label: String,
}

#[async_trait]
impl CommandExecute for AddKeyCommand {
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply> {
        match ctx.registry.add(&self.credential, &self.label)? {
            AddOutcome::Added => {
                tracing::info!(credential = %self.credential, "credential added");
                Ok(Reply::Added {
                    credential_id: self.credential.clone(),
                })
            }
            AddOutcome::AlreadyExists => {
                tracing::info!(credential = %self.credential, "credential already registered");
                Ok(Reply::AlreadyExists {
                    credential_id: self.credential.clone(),
                })
            }
        }
    }

    fn command_name(&self) -> &'static str {
        "ADDKEY"
    }
}

/// What a removal matches on. Removal by label deletes every record
/// with that exact label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveSelector {
    ById(String),
    ByLabel(String),
}

/// Revokes credentials by id or by label.
#[derive(Debug)]
pub struct RemoveKeyCommand {
    pub selector: RemoveSelector,
}

#[async_trait]
impl CommandExecute for RemoveKeyCommand {
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply> {
        let outcome = match &self.selector {
            RemoveSelector::ById(credential) => ctx.registry.remove_by_id(credential)?,
            RemoveSelector::ByLabel(label) => ctx.registry.remove_by_label(label)?,
        };
        match outcome {
            RemoveOutcome::Removed(count) => {
                tracing::info!(selector = ?self.selector, count, "credentials removed");
                Ok(Reply::Removed { count })
            }
            RemoveOutcome::NotFound => {
                tracing::info!(selector = ?self.selector, "nothing to remove");
                Ok(Reply::NotFound)
            }
        }
    }

    fn command_name(&self) -> &'static str {
        "REMOVEKEY"
    }
}

/// Lists every authorized credential.
#[derive(Debug, Default)]
pub struct ListKeysCommand;

#[async_trait]
impl CommandExecute for ListKeysCommand {
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply> {
        Ok(Reply::Keys(ctx.registry.list_all()?))
    }

    fn command_name(&self) -> &'static str {
        "LISTKEYS"
    }
}

/// Lists recorded access events, newest last.
#[derive(Debug, Default)]
pub struct ListEventsCommand {
    pub limit: Option<usize>,
}

#[async_trait]
impl CommandExecute for ListEventsCommand {
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply> {
        let events = match self.limit {
            Some(limit) => ctx.events.tail(limit),
            None => ctx.events.list(),
        };
        Ok(Reply::Events(events))
    }

    fn command_name(&self) -> &'static str {
        "LISTEVENTS"
    }
}
