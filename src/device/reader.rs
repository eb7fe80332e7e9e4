use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::error::DeviceError;

/// Yields a credential identifier on demand. A hardware implementation
/// blocks until a card is presented; a read that cannot produce an id
/// is a `DeviceError::Read`, which the controller treats as "no
/// decision", never as a denial.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn read(&self) -> Result<String, DeviceError>;
}

/// Simulated scanner: returns uniformly at random from a fixed key set.
pub struct SimulatedReader {
    keys: Vec<String>,
}

impl SimulatedReader {
    /// Default test set matching the simulated deployment.
    pub fn new() -> Self {
        Self::with_keys(["12345678", "87654321", "11223344", "55667788"])
    }

    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SimulatedReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialSource for SimulatedReader {
    async fn read(&self) -> Result<String, DeviceError> {
        let key = self
            .keys
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| DeviceError::Read("no simulated credentials configured".to_string()))?;
        Ok(key.clone())
    }
}
