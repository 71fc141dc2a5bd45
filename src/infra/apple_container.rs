use super::error::RuntimeError;
use super::mapping::{parse_container_list, parse_image_list};
use crate::domain::{
    AvailabilityProbe, CommandExecutor, Container, ContainerRuntime, Image, SystemStatus,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

pub const DEFAULT_BINARY: &str = "container";

/// Adapter over Apple's `container` CLI.
///
/// Every call re-reads the runtime; nothing is cached between calls.
#[derive(Debug)]
pub struct AppleContainerRuntime {
    binary: String,
    executor: Arc<dyn CommandExecutor>,
}

impl AppleContainerRuntime {
    pub fn new(executor: Arc<dyn CommandExecutor>, probe: &dyn AvailabilityProbe) -> Result<Self> {
        Self::with_binary(DEFAULT_BINARY, executor, probe)
    }

    /// Fails with [`RuntimeError::Unavailable`] if `binary` cannot be resolved.
    pub fn with_binary(
        binary: &str,
        executor: Arc<dyn CommandExecutor>,
        probe: &dyn AvailabilityProbe,
    ) -> Result<Self> {
        if !probe.is_available(binary) {
            return Err(RuntimeError::Unavailable {
                binary: binary.to_string(),
            }
            .into());
        }

        Ok(Self {
            binary: binary.to_string(),
            executor,
        })
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Ties a listed container back to this runtime for follow-up operations.
    pub fn handle<'a>(&'a self, container: &'a Container) -> ContainerHandle<'a> {
        ContainerHandle {
            runtime: self,
            container,
        }
    }

    fn command(&self, args: &str) -> String {
        format!("{} {args}", shell_words::quote(&self.binary))
    }

    fn output(&self, args: &str, what: &str) -> Result<String> {
        let cmd = self.command(args);
        self.executor.run_with_output(&cmd).map_err(|e| {
            error!("Failed to get {what} from {}: {e:#}", self.binary);
            e.context(format!("failed to get {what}"))
        })
    }

    fn run(&self, args: &str) -> Result<()> {
        self.executor.run(&self.command(args))
    }
}

impl ContainerRuntime for AppleContainerRuntime {
    fn list_containers(&self) -> Result<Vec<Container>> {
        info!("Getting containers from {}", self.binary);

        let output = self.output("ps --format json", "containers")?;
        let containers = parse_container_list(&output);

        info!("Found {} containers", containers.len());
        Ok(containers)
    }

    fn list_images(&self) -> Result<Vec<Image>> {
        info!("Getting images from {}", self.binary);

        let output = self.output("images list --format json", "images")?;
        let images = parse_image_list(&output);

        info!("Found {} images", images.len());
        Ok(images)
    }

    fn system_status(&self) -> Result<SystemStatus> {
        info!("Getting {} system status", self.binary);

        let output = self.output("system status --format json", "system status")?;
        let status: SystemStatus = serde_json::from_str(&output).map_err(|e| {
            error!("Failed to parse system status: {e}");
            RuntimeError::MalformedStatus(e)
        })?;

        Ok(status)
    }

    fn build_image(&self, tag: &str, dockerfile: &str) -> Result<()> {
        info!("Building image with tag {tag} using dockerfile {dockerfile}");
        self.run(&format!("build --tag {tag} --file {dockerfile} ."))
            .with_context(|| format!("building image {tag}"))
    }

    fn run_container(&self, name: &str, image: &str, detached: bool) -> Result<()> {
        info!("Running container {name} from image {image}");

        let mut args = format!("run --name {name}");
        if detached {
            args.push_str(" --detach");
        }
        args.push(' ');
        args.push_str(image);

        self.run(&args)
            .with_context(|| format!("running container {name}"))
    }

    fn stop_container(&self, name_or_id: &str) -> Result<()> {
        info!("Stopping container {name_or_id}");
        self.run(&format!("stop {name_or_id}"))
            .with_context(|| format!("stopping container {name_or_id}"))
    }

    fn remove_container(&self, name_or_id: &str, force: bool) -> Result<()> {
        info!("Removing container {name_or_id} (force: {force})");

        let mut args = String::from("rm");
        if force {
            args.push_str(" --force");
        }
        args.push(' ');
        args.push_str(name_or_id);

        self.run(&args)
            .with_context(|| format!("removing container {name_or_id}"))
    }

    fn exec_command(&self, name_or_id: &str, command: &str) -> Result<()> {
        info!("Executing command in container {name_or_id}: {command}");
        self.run(&format!("exec {name_or_id} {command}"))
            .with_context(|| format!("executing in container {name_or_id}"))
    }

    fn system_start(&self) -> Result<()> {
        info!("Starting {} system services", self.binary);
        self.run("system start").context("starting system services")
    }

    fn system_stop(&self) -> Result<()> {
        info!("Stopping {} system services", self.binary);
        self.run("system stop").context("stopping system services")
    }
}

/// A listed container borrowed together with the runtime it came from.
#[derive(Debug, Clone, Copy)]
pub struct ContainerHandle<'a> {
    runtime: &'a AppleContainerRuntime,
    container: &'a Container,
}

impl ContainerHandle<'_> {
    pub fn container(&self) -> &Container {
        self.container
    }

    pub fn stop(&self) -> Result<()> {
        self.runtime.stop_container(&self.container.id)
    }

    pub fn remove(&self, force: bool) -> Result<()> {
        self.runtime.remove_container(&self.container.id, force)
    }

    pub fn exec(&self, command: &str) -> Result<()> {
        self.runtime.exec_command(&self.container.id, command)
    }
}
