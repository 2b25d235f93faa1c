use crate::boundary::BoundaryWarning;
use crate::error::{ReleaseError, Result};
use crate::hooks::HookContext;
use std::path::Path;
use std::process::Command;

/// Result of a successful lifecycle script
#[derive(Debug, Clone, PartialEq)]
pub struct HookOutput {
    /// Trimmed standard output
    pub stdout: String,
    /// Set when the script succeeded but wrote to stderr
    pub warning: Option<BoundaryWarning>,
}

impl HookOutput {
    /// Standard output, unless the script printed nothing
    pub fn replacement(&self) -> Option<&str> {
        Some(self.stdout.as_str()).filter(|s| !s.is_empty())
    }
}

/// Executes lifecycle scripts through the platform shell
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a script command with the given context
    ///
    /// The command runs in `workdir` with environment variables set from the
    /// context. Exit code 0 is success; any other exit code aborts the release.
    ///
    /// # Returns
    /// * `Ok(HookOutput)` - stdout of the script and a warning if it wrote to stderr
    /// * `Err` - If the shell cannot be spawned or the script fails
    pub fn execute(command: &str, context: &HookContext, workdir: &Path) -> Result<HookOutput> {
        let command_line = context.command_line(command);
        tracing::debug!(hook = %context.hook_type, %command_line, "running lifecycle script");

        let mut cmd = shell_command(&command_line);
        cmd.current_dir(workdir);

        for (key, value) in context.to_env_vars() {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| {
            ReleaseError::hook(format!(
                "cannot run {} script '{}': {}",
                context.hook_type, command, e
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ReleaseError::hook(format!(
                "{} script '{}' failed with exit code {}\nStdout: {}\nStderr: {}",
                context.hook_type,
                command,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        let warning = (!stderr.is_empty()).then(|| BoundaryWarning::CommandStderr {
            command: command_line,
            stderr,
        });

        Ok(HookOutput { stdout, warning })
    }
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}
