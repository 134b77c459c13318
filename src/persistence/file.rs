use super::{PersistenceError, PersistenceResult};
use crate::regfile::RegFile;
use crate::walker::WorkPeriod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Write `reg` to `path`. The contents go to a temporary file in the same
/// directory first and replace `path` only once fully written, so a failed
/// write never leaves a truncated file behind.
pub fn write_reg_file<P: AsRef<Path>>(path: P, reg: &RegFile) -> PersistenceResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(reg.render().as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| PersistenceError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    info!(path = %path.display(), entries = reg.entries.len(), "wrote registry file");
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodCsvRecord {
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl PeriodCsvRecord {
    fn new(index: usize, period: &WorkPeriod) -> Self {
        Self {
            index,
            start: period.start(),
            end: period.end(),
            days: period.len_days(),
        }
    }
}

pub fn save_periods_to_csv<P: AsRef<Path>>(
    path: P,
    periods: &[WorkPeriod],
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for (i, period) in periods.iter().enumerate() {
        writer.serialize(PeriodCsvRecord::new(i + 1, period))?;
    }
    writer.flush()?;
    Ok(())
}
