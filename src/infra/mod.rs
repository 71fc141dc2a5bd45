pub mod apple_container;
pub mod config;
mod error;
pub mod executor;
pub mod mapping;
pub mod records;

pub use apple_container::{AppleContainerRuntime, ContainerHandle, DEFAULT_BINARY};
pub use error::RuntimeError;
pub use executor::{PathProbe, ProcessExecutor};
