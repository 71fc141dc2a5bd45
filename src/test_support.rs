use crate::domain::{AvailabilityProbe, CommandExecutor};
use crate::infra::RuntimeError;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;

/// Executor that records command lines and replays canned output.
#[derive(Debug, Default)]
pub struct MockExecutor {
    outputs: RwLock<HashMap<String, String>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by `run_with_output` for exactly `command`.
    pub fn set_output(&self, command: &str, output: &str) {
        self.outputs
            .write()
            .unwrap()
            .insert(command.to_string(), output.to_string());
    }

    /// Any command line containing `fragment` fails.
    pub fn set_fail_on(&self, fragment: &str) {
        *self.fail_on.write().unwrap() = Some(fragment.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, command: &str) {
        self.commands.write().unwrap().push(command.to_string());
    }

    fn check_fail(&self, command: &str) -> Result<()> {
        if let Some(ref fragment) = *self.fail_on.read().unwrap()
            && command.contains(fragment.as_str())
        {
            return Err(RuntimeError::invocation(command, "mock failure").into());
        }
        Ok(())
    }
}

impl CommandExecutor for MockExecutor {
    fn run_with_output(&self, command: &str) -> Result<String> {
        self.record_command(command);
        self.check_fail(command)?;

        Ok(self
            .outputs
            .read()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_default())
    }

    fn run(&self, command: &str) -> Result<()> {
        self.record_command(command);
        self.check_fail(command)
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct MockProbe {
    available: bool,
}

impl MockProbe {
    pub fn available() -> Self {
        Self { available: true }
    }

    pub fn unavailable() -> Self {
        Self { available: false }
    }
}

impl AvailabilityProbe for MockProbe {
    fn is_available(&self, _binary: &str) -> bool {
        self.available
    }
}
