use async_trait::async_trait;

use super::execute::{AppContext, CommandExecute, Reply};
use crate::{access::Decision, audit::Outcome, error::AccessResult};

/// Triggers one scan cycle. With no credential supplied, the context's
/// credential source produces one first.
#[derive(Debug, Default)]
pub struct ScanCommand {
    pub credential: Option<String>,
}

#[async_trait]
impl CommandExecute for ScanCommand {
    async fn execute(&self, ctx: &AppContext) -> AccessResult<Reply> {
        let credential = match &self.credential {
            Some(credential) => credential.clone(),
            None => ctx.reader.read().await?,
        };

        let decision = ctx.controller.process_scan(&credential).await?;
        let (outcome, detail) = match decision {
            Decision::Granted => (Outcome::Granted, "access granted"),
            Decision::Denied => (Outcome::Denied, "access denied"),
        };

        Ok(Reply::Scan {
            credential_id: credential,
            outcome,
            detail: detail.to_string(),
        })
    }

    fn command_name(&self) -> &'static str {
        "SCAN"
    }
}
