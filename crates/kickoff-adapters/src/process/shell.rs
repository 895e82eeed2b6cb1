//! Shell command runner using std::process.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use kickoff_core::{
    application::{SetupError, ports::CommandRunner},
    error::KickoffResult,
};

/// Production command runner.
///
/// Commands go through the system shell so composite invocations
/// (`composer require a b c`, `npm run build`) work unquoted, exactly as a
/// user would type them. No timeout is enforced; the call blocks until the
/// subprocess exits.
#[derive(Debug, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, dir: &Path, verbose: bool) -> KickoffResult<()> {
        debug!(command, dir = %dir.display(), verbose, "running external command");

        let mut cmd = shell_command(command);
        cmd.current_dir(dir);

        if verbose {
            // Stream straight through to the user's terminal.
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().map_err(|e| SetupError::CommandSpawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(SetupError::CommandFailed {
                command: command.to_string(),
                status: status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
