//! Process launching

use super::command::LaunchCommand;
use crate::error::{HandlerError, Result};
use std::process::Command;
use tracing::info;

/// Starts the IDE for a built command.
pub trait Launcher {
    /// Spawn the command, returning the child's process id.
    fn launch(&self, command: &LaunchCommand) -> Result<u32>;
}

/// Spawns a detached OS process and does not wait for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<u32> {
        let child = Command::new(command.program())
            .args(command.args())
            .spawn()
            .map_err(|e| HandlerError::Launch {
                program: command.program().to_string(),
                source: e,
            })?;

        info!("Launched {} (pid {})", command.to_shell_string(), child.id());
        Ok(child.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::open::request::OpenRequest;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_is_launch_error() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("phpstorm64.exe");
        let cmd = LaunchCommand::build(&exe, &OpenRequest::new("a.php"));

        let err = ProcessLauncher.launch(&cmd).unwrap_err();
        assert!(matches!(err, HandlerError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawns_real_process() {
        let cmd = LaunchCommand::build(std::path::Path::new("true"), &OpenRequest::new("a.php"));
        let pid = ProcessLauncher.launch(&cmd).unwrap();
        assert!(pid > 0);
    }
}
