use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::DeviceError;

/// Observable barrier state. The hardware baseline is fail-closed: an
/// undriven solenoid reads as `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

/// Drives the physical barrier. Both operations are idempotent and
/// side-effect only; a fault surfaces as `DeviceError::Actuator`.
pub trait Actuator: Send + Sync {
    /// Locks the barrier.
    fn engage(&self) -> Result<(), DeviceError>;

    /// Unlocks the barrier.
    fn release(&self) -> Result<(), DeviceError>;
}

/// Simulated lock: tracks state plus a timestamped transition history
/// so tests can assert the locked → unlocked → locked shape and hold
/// durations. Starts locked.
pub struct SimulatedLock {
    state: Mutex<LockState>,
    transitions: Mutex<Vec<(LockState, Instant)>>,
}

impl SimulatedLock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LockState::Locked),
            transitions: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> LockState {
        *self.state.lock()
    }

    /// State changes in order, with the instant each took effect.
    /// Idempotent re-commands do not appear.
    pub fn transitions(&self) -> Vec<(LockState, Instant)> {
        self.transitions.lock().clone()
    }

    fn drive(&self, target: LockState) {
        let mut state = self.state.lock();
        if *state != target {
            *state = target;
            self.transitions.lock().push((target, Instant::now()));
            tracing::debug!(state = ?target, "lock state changed");
        }
    }
}

impl Default for SimulatedLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Actuator for SimulatedLock {
    fn engage(&self) -> Result<(), DeviceError> {
        self.drive(LockState::Locked);
        Ok(())
    }

    fn release(&self) -> Result<(), DeviceError> {
        self.drive(LockState::Unlocked);
        Ok(())
    }
}
