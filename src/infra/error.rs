/// Failures surfaced by the runtime adapter.
///
/// Everything is still returned as `anyhow::Error`; callers that care about
/// the category use `downcast_ref::<RuntimeError>()`.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("{binary} CLI not found. Please ensure '{binary}' command is available in PATH")]
    Unavailable { binary: String },

    #[error("command `{command}` could not be started")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{command}` failed: {reason}")]
    Invocation { command: String, reason: String },

    #[error("failed to parse system status: {0}")]
    MalformedStatus(#[from] serde_json::Error),
}

impl RuntimeError {
    pub fn invocation(command: &str, reason: impl Into<String>) -> Self {
        Self::Invocation {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_names_the_binary() {
        let err = RuntimeError::Unavailable {
            binary: "container".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "container CLI not found. Please ensure 'container' command is available in PATH"
        );
    }

    #[test]
    fn spawn_chains_io_error() {
        let err: anyhow::Error = RuntimeError::Spawn {
            command: "container ps".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();

        let io = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<std::io::Error>())
            .expect("io::Error in chain");
        assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "command `container ps` could not be started");
    }

    #[test]
    fn invocation_carries_command_and_reason() {
        let err = RuntimeError::invocation("container ps", "exit status 1");
        assert_eq!(err.to_string(), "command `container ps` failed: exit status 1");
    }
}
