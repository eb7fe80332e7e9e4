use std::time::Duration;

use crate::config::Settings;

/// Timing of one scan cycle: how long an authorized scan holds the
/// barrier open, and how long a denied scan throttles the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantPolicy {
    pub grant: Duration,
    pub cooldown: Duration,
}

impl GrantPolicy {
    pub fn new(grant: Duration, cooldown: Duration) -> Self {
        Self { grant, cooldown }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            grant: settings.grant_duration(),
            cooldown: settings.cooldown_duration(),
        }
    }
}

impl Default for GrantPolicy {
    fn default() -> Self {
        Self {
            grant: Duration::from_secs(3),
            cooldown: Duration::from_secs(1),
        }
    }
}
