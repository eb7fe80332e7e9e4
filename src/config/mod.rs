pub mod settings;

pub use settings::{RegistryBackend, Settings};
