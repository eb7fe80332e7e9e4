use std::{sync::Arc, time::Duration};

use tokio::sync::{watch, Mutex};

use super::policy::GrantPolicy;
use crate::{
    audit::{AccessEvent, EventLog},
    device::{Actuator, CredentialSource},
    error::{AccessError, AccessResult, DeviceError},
    registry::RegistryStore,
};

/// Outcome of one scan cycle, returned to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied,
}

/// Relocks the barrier on drop. Armed for the whole unlocked window, so
/// an early return, error, or cancellation still drives `engage()` as
/// the last action of the cycle.
struct RelockGuard {
    actuator: Arc<dyn Actuator>,
    armed: bool,
}

impl RelockGuard {
    fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self {
            actuator,
            armed: true,
        }
    }

    /// Explicit relock at the end of the grant window; disarms the
    /// guard and surfaces an actuator fault instead of swallowing it.
    fn engage(mut self) -> Result<(), DeviceError> {
        self.armed = false;
        self.actuator.engage()
    }
}

impl Drop for RelockGuard {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = self.actuator.engage() {
                tracing::error!(error = %err, "relock on cleanup failed");
            }
        }
    }
}

/// Runs "present credential → decide → actuate" cycles against one
/// physical door.
///
/// One cycle is in flight at a time: the cycle mutex covers decide →
/// actuate → wait → relock as a unit, so two unlock windows can never
/// interleave even when several front ends trigger scans concurrently.
/// Every exit path leaves the barrier engaged.
pub struct AccessController {
    registry: Arc<dyn RegistryStore>,
    actuator: Arc<dyn Actuator>,
    events: Arc<EventLog>,
    policy: GrantPolicy,
    cycle: Mutex<()>,
    shutdown_tx: watch::Sender<bool>,
    shutdown: watch::Receiver<bool>,
}

impl AccessController {
    pub fn new(
        registry: Arc<dyn RegistryStore>,
        actuator: Arc<dyn Actuator>,
        events: Arc<EventLog>,
        policy: GrantPolicy,
    ) -> Self {
        let (shutdown_tx, shutdown) = watch::channel(false);
        Self {
            registry,
            actuator,
            events,
            policy,
            cycle: Mutex::new(()),
            shutdown_tx,
            shutdown,
        }
    }

    /// Wakes any in-flight grant hold or denial cooldown. The cycle
    /// still relocks before returning; this only cuts the waits short.
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Pulls a credential from the source, then runs one scan cycle.
    /// A read failure is "no decision": no event is journaled and the
    /// barrier stays engaged.
    pub async fn run_cycle(&self, source: &dyn CredentialSource) -> AccessResult<Decision> {
        let credential = match source.read().await {
            Ok(credential) => credential,
            Err(err) => {
                tracing::error!(error = %err, "credential read failed, barrier stays engaged");
                return Err(AccessError::from(err));
            }
        };
        tracing::debug!(credential = %credential, "credential read");
        self.process_scan(&credential).await
    }

    /// Runs exactly one decide → actuate → wait → relock cycle for the
    /// given credential.
    pub async fn process_scan(&self, credential_id: &str) -> AccessResult<Decision> {
        let _cycle = self.cycle.lock().await;

        // Fresh query per decision; a persistence failure resolves to
        // Denied (fail-closed) with the failure named in the detail.
        let (authorized, detail) = match self.registry.is_authorized(credential_id) {
            Ok(true) => (true, "authorized credential".to_string()),
            Ok(false) => (false, "unknown credential".to_string()),
            Err(err) => {
                tracing::error!(error = %err, "registry query failed, failing closed");
                (false, format!("registry unavailable, fail-closed: {err}"))
            }
        };

        if authorized {
            self.grant(credential_id, detail).await
        } else {
            self.deny(credential_id, detail).await
        }
    }

    async fn grant(&self, credential_id: &str, detail: String) -> AccessResult<Decision> {
        self.events.record(AccessEvent::granted(credential_id, detail));
        tracing::info!(credential = %credential_id, "access granted");

        let relock = RelockGuard::new(Arc::clone(&self.actuator));
        self.actuator.release()?;
        self.interruptible_wait(self.policy.grant).await;
        relock.engage()?;

        tracing::debug!(credential = %credential_id, "barrier relocked");
        Ok(Decision::Granted)
    }

    async fn deny(&self, credential_id: &str, detail: String) -> AccessResult<Decision> {
        self.events.record(AccessEvent::denied(credential_id, detail));
        tracing::info!(credential = %credential_id, "access denied");

        self.actuator.engage()?;
        // Throttles rapid repeated scans of invalid credentials.
        self.interruptible_wait(self.policy.cooldown).await;
        Ok(Decision::Denied)
    }

    /// Sleeps for `duration`, waking early on the shutdown signal. A
    /// dropped sender never wakes the wait.
    async fn interruptible_wait(&self, duration: Duration) {
        let mut shutdown = self.shutdown.clone();
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = async {
                if shutdown.wait_for(|stop| *stop).await.is_err() {
                    std::future::pending::<()>().await;
                }
            } => {}
        }
    }
}
