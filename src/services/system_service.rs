use crate::domain::{ContainerRuntime, SystemStatus};
use anyhow::Result;
use std::sync::Arc;

/// Runtime-wide operations (build, system services)
pub struct SystemService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl SystemService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn build_image(&self, tag: &str, dockerfile: &str) -> Result<()> {
        self.runtime.build_image(tag, dockerfile)
    }

    pub fn start(&self) -> Result<()> {
        self.runtime.system_start()
    }

    pub fn stop(&self) -> Result<()> {
        self.runtime.system_stop()
    }

    pub fn status(&self) -> Result<SystemStatus> {
        self.runtime.system_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::AppleContainerRuntime;
    use crate::test_support::{MockExecutor, MockProbe};

    fn service() -> (SystemService, Arc<MockExecutor>) {
        let executor = Arc::new(MockExecutor::new());
        let runtime =
            AppleContainerRuntime::new(executor.clone(), &MockProbe::available()).unwrap();
        (SystemService::new(Arc::new(runtime)), executor)
    }

    #[test]
    fn test_start_and_stop() {
        let (service, executor) = service();

        assert!(service.start().is_ok());
        assert!(service.stop().is_ok());

        let commands = executor.get_commands();
        assert!(commands.contains(&"container system start".to_string()));
        assert!(commands.contains(&"container system stop".to_string()));
    }

    #[test]
    fn test_build_image() {
        let (service, executor) = service();

        let result = service.build_image("test-img", "Containerfile");
        assert!(result.is_ok());

        let commands = executor.get_commands();
        assert!(
            commands.contains(&"container build --tag test-img --file Containerfile .".to_string())
        );
    }

    #[test]
    fn test_status() {
        let (service, executor) = service();
        executor.set_output(
            "container system status --format json",
            r#"{"status":"running","apiServerVersion":"0.1.0"}"#,
        );

        let status = service.status().unwrap();
        assert_eq!(status["status"], "running");
    }
}
