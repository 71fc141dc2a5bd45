use super::{Container, Image, SystemStatus};
use anyhow::Result;
use std::fmt::Debug;

/// Runs runtime command lines on behalf of the adapter.
pub trait CommandExecutor: Send + Sync + Debug {
    /// Run a command line and capture its standard output
    fn run_with_output(&self, command: &str) -> Result<String>;

    /// Run a command line, discarding its output
    fn run(&self, command: &str) -> Result<()>;
}

/// Answers whether a runtime binary can be invoked at all.
pub trait AvailabilityProbe: Send + Sync + Debug {
    fn is_available(&self, binary: &str) -> bool;
}

/// Trait for container runtime operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// List containers known to the runtime, in runtime order
    fn list_containers(&self) -> Result<Vec<Container>>;

    /// List images known to the runtime, in runtime order
    fn list_images(&self) -> Result<Vec<Image>>;

    /// Fetch the runtime's own status document
    fn system_status(&self) -> Result<SystemStatus>;

    /// Build an image from a Dockerfile, using the current directory as context
    fn build_image(&self, tag: &str, dockerfile: &str) -> Result<()>;

    /// Create and start a container
    fn run_container(&self, name: &str, image: &str, detached: bool) -> Result<()>;

    /// Stop a container
    fn stop_container(&self, name_or_id: &str) -> Result<()>;

    /// Remove a container
    fn remove_container(&self, name_or_id: &str, force: bool) -> Result<()>;

    /// Execute a command in a running container
    fn exec_command(&self, name_or_id: &str, command: &str) -> Result<()>;

    /// Start the runtime's system services
    fn system_start(&self) -> Result<()>;

    /// Stop the runtime's system services
    fn system_stop(&self) -> Result<()>;
}
