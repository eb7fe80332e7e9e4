pub mod access;
pub mod registry;

pub use access::{AccessError, AccessResult};
pub use registry::{RegistryError, RegistryResult};

use thiserror::Error;

/// Device capability failures: scanner reads and lock actuation.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("credential read failed: {0}")]
    Read(String),

    #[error("actuator fault: {0}")]
    Actuator(String),
}
