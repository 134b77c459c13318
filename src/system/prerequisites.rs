use super::registry::RegistryAccess;
use crate::regfile::PEAK_SHIFT_KEY;
use crate::settings::Settings;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteFailure {
    ApplicationMissing(PathBuf),
    RegistryKeyMissing(String),
    CheckFailed(String),
}

impl fmt::Display for PrerequisiteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrerequisiteFailure::ApplicationMissing(path) => {
                write!(f, "eco utility not found at {}", path.display())
            }
            PrerequisiteFailure::RegistryKeyMissing(key) => {
                write!(f, "registry key {key} not found")
            }
            PrerequisiteFailure::CheckFailed(message) => write!(f, "check failed: {message}"),
        }
    }
}

#[derive(Error, Debug)]
#[error("{} prerequisite check(s) failed: {}", .failures.len(), join(.failures))]
pub struct PrerequisiteError {
    pub failures: Vec<PrerequisiteFailure>,
}

fn join(failures: &[PrerequisiteFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check that the eco utility is installed (when its path is configured) and
/// that its peak shift registry key exists.
pub fn check_prerequisites(
    settings: &Settings,
    registry: &dyn RegistryAccess,
) -> Vec<PrerequisiteFailure> {
    let mut failures = Vec::new();

    if let Some(path) = &settings.eco_utility_path {
        if !path.is_file() {
            failures.push(PrerequisiteFailure::ApplicationMissing(path.clone()));
        }
    }

    match registry.key_exists(PEAK_SHIFT_KEY) {
        Ok(true) => {}
        Ok(false) => failures.push(PrerequisiteFailure::RegistryKeyMissing(
            PEAK_SHIFT_KEY.to_string(),
        )),
        Err(err) => failures.push(PrerequisiteFailure::CheckFailed(err.to_string())),
    }

    failures
}

/// Report `failures`. They are downgraded to warnings when
/// `allow_continue` is set, otherwise they abort the run.
pub fn enforce(
    failures: Vec<PrerequisiteFailure>,
    allow_continue: bool,
) -> Result<(), PrerequisiteError> {
    if failures.is_empty() {
        info!("prerequisite checks passed");
        return Ok(());
    }
    for failure in &failures {
        warn!(%failure, "prerequisite check failed");
    }
    if allow_continue {
        warn!("continuing despite failed prerequisite checks");
        Ok(())
    } else {
        Err(PrerequisiteError { failures })
    }
}
