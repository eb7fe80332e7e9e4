use thiserror::Error;

use super::{DeviceError, RegistryError};

pub type AccessResult<T> = Result<T, AccessError>;

/// Cycle-level failures of the access controller.
///
/// A `Read` failure means no decision was made at all. It must stay
/// distinguishable from a denied scan. Every variant resolves to the
/// locked barrier state before it surfaces to the caller.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("registry unavailable: {0}")]
    Registry(#[from] RegistryError),

    #[error("credential read failed: {0}")]
    Read(String),

    #[error("actuator fault: {0}")]
    Actuator(String),
}

impl From<DeviceError> for AccessError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::Read(msg) => AccessError::Read(msg),
            DeviceError::Actuator(msg) => AccessError::Actuator(msg),
        }
    }
}
