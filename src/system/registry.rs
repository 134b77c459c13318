use super::{CommandOutput, CommandRunner, SystemCommandRunner, SystemError};
use std::path::Path;
use tracing::{info, warn};

const REG_EXE: &str = "reg";

pub trait RegistryAccess {
    fn key_exists(&self, key: &str) -> Result<bool, SystemError>;

    /// Save `key` and everything below it to a `.reg` file.
    fn export_key(&self, key: &str, destination: &Path) -> Result<(), SystemError>;

    fn import_file(&self, source: &Path) -> Result<(), SystemError>;
}

/// Registry access through the `reg` command line tool. Every call waits
/// for `reg` to exit and turns a non-zero status into an error.
#[derive(Debug, Clone, Default)]
pub struct RegCommand<R = SystemCommandRunner> {
    runner: R,
}

impl RegCommand<SystemCommandRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemCommandRunner)
    }
}

impl<R: CommandRunner> RegCommand<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn run_checked(&self, args: &[&str]) -> Result<CommandOutput, SystemError> {
        let output = self.runner.run(REG_EXE, args)?;
        if output.success {
            Ok(output)
        } else {
            Err(SystemError::CommandFailed {
                command: format!("{REG_EXE} {}", args.join(" ")),
                status: output.status,
                stderr: output.stderr,
            })
        }
    }
}

impl<R: CommandRunner> RegistryAccess for RegCommand<R> {
    fn key_exists(&self, key: &str) -> Result<bool, SystemError> {
        // `reg query` exits with 1 when the key is absent.
        let output = self.runner.run(REG_EXE, &["query", key])?;
        Ok(output.success)
    }

    fn export_key(&self, key: &str, destination: &Path) -> Result<(), SystemError> {
        let destination = destination.to_string_lossy();
        self.run_checked(&["export", key, &destination, "/y"])?;
        info!(key, destination = %destination, "exported registry key");
        Ok(())
    }

    fn import_file(&self, source: &Path) -> Result<(), SystemError> {
        let source = source.to_string_lossy();
        self.run_checked(&["import", &source])?;
        info!(source = %source, "imported registry file");
        Ok(())
    }
}

/// Stand-in for hosts without a Windows registry. Keys never exist and
/// export or import requests fail with [`SystemError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRegistry;

impl RegistryAccess for NoopRegistry {
    fn key_exists(&self, key: &str) -> Result<bool, SystemError> {
        warn!(key, "no registry on this platform, treating key as missing");
        Ok(false)
    }

    fn export_key(&self, _key: &str, _destination: &Path) -> Result<(), SystemError> {
        Err(SystemError::Unsupported("registry export"))
    }

    fn import_file(&self, _source: &Path) -> Result<(), SystemError> {
        Err(SystemError::Unsupported("registry import"))
    }
}

/// Registry access for the current platform.
pub fn default_registry() -> Box<dyn RegistryAccess> {
    if cfg!(windows) {
        Box::new(RegCommand::new())
    } else {
        Box::new(NoopRegistry)
    }
}
