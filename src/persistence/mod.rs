use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    Csv(csv::Error),
    Persist { path: PathBuf, source: io::Error },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::Persist { path, source } => {
                write!(f, "cannot replace {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Csv(err) => Some(err),
            PersistenceError::Persist { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{save_periods_to_csv, write_reg_file};
