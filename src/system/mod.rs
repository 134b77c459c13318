//! Access to the host system: external commands, the Windows registry and
//! the checks that run before a registry file is generated.

use std::process::Command;
use thiserror::Error;
use tracing::debug;

pub mod prerequisites;
pub mod registry;

pub use prerequisites::{PrerequisiteError, PrerequisiteFailure, check_prerequisites, enforce};
pub use registry::{NoopRegistry, RegCommand, RegistryAccess, default_registry};

#[derive(Error, Debug)]
pub enum SystemError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {status:?}: {stderr}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external program to completion.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, SystemError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, SystemError> {
        debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| SystemError::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
