use super::error::RuntimeError;
use crate::domain::{AvailabilityProbe, CommandExecutor};
use anyhow::Result;
use std::env;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Runs command lines as child processes. Arguments are split with POSIX
/// shell-word rules; no shell is spawned.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn run_with_output(&self, command: &str) -> Result<String> {
        let output = spawn(command, Stdio::piped())?;
        ensure_success(command, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&self, command: &str) -> Result<()> {
        let output = spawn(command, Stdio::inherit())?;
        ensure_success(command, &output)
    }
}

fn spawn(command: &str, stdout: Stdio) -> Result<Output> {
    let args = shell_words::split(command)
        .map_err(|e| RuntimeError::invocation(command, format!("invalid command line: {e}")))?;
    let Some((program, rest)) = args.split_first() else {
        return Err(RuntimeError::invocation(command, "empty command line").into());
    };

    debug!("Executing: {command}");
    let output = Command::new(program)
        .args(rest)
        .stdout(stdout)
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| RuntimeError::Spawn {
            command: command.to_string(),
            source,
        })?;

    Ok(output)
}

fn ensure_success(command: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let reason = if stderr.is_empty() {
        format!("{}", output.status)
    } else {
        format!("{} ({stderr})", output.status)
    };
    Err(RuntimeError::invocation(command, reason).into())
}

/// Resolves a binary the way the OS would before running it: directly when
/// given a path, otherwise by searching `PATH`.
#[derive(Debug, Default)]
pub struct PathProbe;

impl PathProbe {
    pub fn new() -> Self {
        Self
    }
}

impl AvailabilityProbe for PathProbe {
    fn is_available(&self, binary: &str) -> bool {
        if binary.is_empty() {
            return false;
        }

        if binary.contains(std::path::MAIN_SEPARATOR) || binary.contains('/') {
            return is_executable(Path::new(binary));
        }

        env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).any(|dir| is_executable(&dir.join(binary))))
            .unwrap_or(false)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_line_is_an_invocation_error() {
        let err = ProcessExecutor::new().run("   ").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuntimeError>(),
            Some(RuntimeError::Invocation { .. })
        ));
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        let err = ProcessExecutor::new()
            .run_with_output("echo 'unterminated")
            .unwrap_err();
        assert!(err.to_string().contains("invalid command line"));
    }

    #[test]
    fn missing_program_keeps_io_cause() {
        let err = ProcessExecutor::new()
            .run_with_output("boxdeck-surely-not-a-real-binary --version")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuntimeError>(),
            Some(RuntimeError::Spawn { .. })
        ));

        let io = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<std::io::Error>())
            .expect("spawn failure should chain the io::Error");
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn runs_binary_whose_path_has_spaces() {
        use crate::domain::ContainerRuntime;
        use crate::infra::AppleContainerRuntime;
        use std::os::unix::fs::PermissionsExt;
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let bin_dir = dir.path().join("Application Support");
        std::fs::create_dir_all(&bin_dir).unwrap();
        let binary = bin_dir.join("container");
        std::fs::write(&binary, "#!/bin/sh\necho '{\"status\":\"ok\"}'\n").unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runtime = AppleContainerRuntime::with_binary(
            binary.to_str().unwrap(),
            Arc::new(ProcessExecutor::new()),
            &PathProbe::new(),
        )
        .unwrap();

        // a freshly written script can briefly report ETXTBSY under parallel tests
        let mut result = runtime.system_status();
        for _ in 0..5 {
            if result.is_ok() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
            result = runtime.system_status();
        }
        assert_eq!(result.unwrap()["status"], "ok");
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout() {
        let output = ProcessExecutor::new()
            .run_with_output("echo 'hello world'")
            .unwrap();
        assert_eq!(output.trim(), "hello world");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_fails() {
        assert!(ProcessExecutor::new().run("false").is_err());
    }

    #[test]
    fn probe_rejects_unknown_binaries() {
        let probe = PathProbe::new();
        assert!(!probe.is_available(""));
        assert!(!probe.is_available("boxdeck-surely-not-a-real-binary"));
        assert!(!probe.is_available("/nonexistent/dir/container"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_requires_execute_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("container");
        std::fs::write(&binary, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!PathProbe::new().is_available(binary.to_str().unwrap()));

        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(PathProbe::new().is_available(binary.to_str().unwrap()));

        assert!(!PathProbe::new().is_available(dir.path().to_str().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn probe_finds_binaries_on_path() {
        assert!(PathProbe::new().is_available("sh"));
    }
}
