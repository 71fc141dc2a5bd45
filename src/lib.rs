pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    AvailabilityProbe, CommandExecutor, Container, ContainerRuntime, Image, SystemStatus,
};
pub use infra::{AppleContainerRuntime, ContainerHandle, PathProbe, ProcessExecutor, RuntimeError};
pub use services::{ContainerService, SystemService};
