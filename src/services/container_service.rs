use crate::domain::{Container, ContainerRuntime, Image};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn list(&self) -> Result<Vec<Container>> {
        self.runtime.list_containers()
    }

    pub fn images(&self) -> Result<Vec<Image>> {
        self.runtime.list_images()
    }

    /// First listed container whose id or name is `name_or_id`.
    pub fn find(&self, name_or_id: &str) -> Result<Option<Container>> {
        Ok(self
            .runtime
            .list_containers()?
            .into_iter()
            .find(|c| c.matches(name_or_id)))
    }

    pub fn run(&self, name: &str, image: &str, detached: bool) -> Result<()> {
        self.runtime.run_container(name, image, detached)
    }

    /// Stops the container unless it is listed and already not running.
    /// Unlisted names are passed through so the runtime reports the error.
    pub fn stop(&self, name_or_id: &str) -> Result<()> {
        match self.find(name_or_id)? {
            Some(container) if !container.is_running() => {
                warn!("{name_or_id} is already {}", container.state);
                Ok(())
            }
            _ => {
                info!("Stopping {name_or_id}...");
                self.runtime.stop_container(name_or_id)
            }
        }
    }

    pub fn remove(&self, name_or_id: &str, force: bool) -> Result<()> {
        self.runtime.remove_container(name_or_id, force)
    }

    pub fn exec(&self, name_or_id: &str, command: &str) -> Result<()> {
        self.runtime.exec_command(name_or_id, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::AppleContainerRuntime;
    use crate::test_support::{MockExecutor, MockProbe};

    const PS: &str = "container ps --format json";

    fn service_with(ps_output: &str) -> (ContainerService, Arc<MockExecutor>) {
        let executor = Arc::new(MockExecutor::new());
        executor.set_output(PS, ps_output);
        let runtime =
            AppleContainerRuntime::new(executor.clone(), &MockProbe::available()).unwrap();
        (ContainerService::new(Arc::new(runtime)), executor)
    }

    #[test]
    fn find_matches_name_or_id() {
        let (service, _) = service_with(
            r#"{"id":"abc123","name":"web","state":"running"}
{"id":"def456","name":"db","state":"stopped"}"#,
        );

        assert_eq!(service.find("db").unwrap().unwrap().id, "def456");
        assert_eq!(service.find("abc123").unwrap().unwrap().name, "web");
        assert!(service.find("cache").unwrap().is_none());
    }

    #[test]
    fn stop_skips_exited_containers() {
        let (service, executor) = service_with(r#"{"id":"def456","name":"db","state":"stopped"}"#);

        service.stop("db").unwrap();

        assert_eq!(executor.get_commands(), vec![PS]);
    }

    #[test]
    fn stop_running_container() {
        let (service, executor) = service_with(r#"{"id":"abc123","name":"web","state":"running"}"#);

        service.stop("web").unwrap();

        assert_eq!(executor.get_commands(), vec![PS, "container stop web"]);
    }

    #[test]
    fn stop_unknown_container_defers_to_runtime() {
        let (service, executor) = service_with("");
        executor.set_fail_on("stop ghost");

        assert!(service.stop("ghost").is_err());
        assert!(
            executor
                .get_commands()
                .contains(&"container stop ghost".to_string())
        );
    }
}
