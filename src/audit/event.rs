use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decision outcome of one scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Granted,
    Denied,
}

/// One access decision. `credential_id` holds the raw scan payload when
/// the credential was not authorized. Entries are never edited or
/// deleted; insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    pub timestamp: DateTime<Utc>,
    pub credential_id: String,
    pub outcome: Outcome,
    pub detail: String,
}

impl AccessEvent {
    pub fn granted(credential_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(credential_id, Outcome::Granted, detail)
    }

    pub fn denied(credential_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(credential_id, Outcome::Denied, detail)
    }

    fn new(credential_id: impl Into<String>, outcome: Outcome, detail: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            credential_id: credential_id.into(),
            outcome,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Granted => write!(f, "granted"),
            Outcome::Denied => write!(f, "denied"),
        }
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} ({})",
            self.timestamp.format("%d-%b-%y %H:%M:%S"),
            self.credential_id,
            self.outcome,
            self.detail
        )
    }
}
