use crate::regfile::{PEAK_SHIFT_COUNT, RegFile};
use crate::settings::{ConfigError, Settings};
use crate::walker::{PeriodWalker, WalkError, WorkPeriod};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// The upcoming work periods and the registry file that encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakShiftSchedule {
    periods: Vec<WorkPeriod>,
    reg_file: RegFile,
}

impl PeakShiftSchedule {
    /// Walk forward from `start` and collect the usual four periods.
    pub fn build(settings: &Settings, start: NaiveDate) -> Result<Self, ScheduleError> {
        Self::build_with_count(settings, start, PEAK_SHIFT_COUNT)
    }

    pub fn build_with_count(
        settings: &Settings,
        start: NaiveDate,
        count: usize,
    ) -> Result<Self, ScheduleError> {
        settings.validate()?;
        let mut walker = PeriodWalker::new(settings.calendar()?, start);
        let periods = walker.take_periods(count)?;
        for (i, period) in periods.iter().enumerate() {
            info!(
                index = i + 1,
                start = %period.start(),
                end = %period.end(),
                "work period"
            );
        }
        let reg_file = RegFile::from_periods(settings, &periods);
        Ok(Self { periods, reg_file })
    }

    pub fn periods(&self) -> &[WorkPeriod] {
        &self.periods
    }

    pub fn reg_file(&self) -> &RegFile {
        &self.reg_file
    }
}
