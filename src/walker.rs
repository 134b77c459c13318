//! Forward-only walk over a [`WorkCalendar`] that yields maximal runs of
//! working days.
//!
//! The walker alternates between two scans. The start scan skips forward
//! over non-working days; the end scan skips forward over working days and
//! reports the last working day it passed. Each pair of scans produces one
//! [`WorkPeriod`], and the cursor never moves backward.

use crate::calendar::WorkCalendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Upper bound on days examined by a single scan (roughly ten years).
pub const MAX_LOOKAHEAD_DAYS: u32 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanPhase {
    ScanningForStart,
    ScanningForEnd,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("no working day found within {days} days of {from}")]
    NoWorkingDay { from: NaiveDate, days: u32 },

    #[error("no non-working day found within {days} days of {from}")]
    NoNonWorkingDay { from: NaiveDate, days: u32 },

    #[error("scan called out of order, walker is {phase:?}")]
    OutOfOrder { phase: ScanPhase },

    #[error("date walk left the supported calendar range at {0}")]
    OutOfRange(NaiveDate),
}

/// First and last day of a maximal run of working days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl WorkPeriod {
    /// Returns `None` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the period, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone)]
pub struct PeriodWalker {
    calendar: WorkCalendar,
    cursor: NaiveDate,
    phase: ScanPhase,
    max_lookahead: u32,
}

impl PeriodWalker {
    pub fn new(calendar: WorkCalendar, start: NaiveDate) -> Self {
        Self {
            calendar,
            cursor: start,
            phase: ScanPhase::ScanningForStart,
            max_lookahead: MAX_LOOKAHEAD_DAYS,
        }
    }

    pub fn with_max_lookahead(mut self, days: u32) -> Self {
        self.max_lookahead = days;
        self
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    /// Skip weekend and holiday days. Returns the cursor, which is now a
    /// working day; a cursor that already sat on a working day is returned
    /// unchanged.
    pub fn advance_to_next_work_start(&mut self) -> Result<NaiveDate, WalkError> {
        self.expect_phase(ScanPhase::ScanningForStart)?;
        let from = self.cursor;
        let mut scanned = 0;
        while !self.calendar.is_working_day(self.cursor) {
            if scanned >= self.max_lookahead {
                return Err(WalkError::NoWorkingDay {
                    from,
                    days: self.max_lookahead,
                });
            }
            self.step()?;
            scanned += 1;
        }
        trace!(%from, start = %self.cursor, skipped = scanned, "found work start");
        self.phase = ScanPhase::ScanningForEnd;
        Ok(self.cursor)
    }

    /// Skip working days and return the last one. The cursor is left on the
    /// non-working day that ended the run.
    pub fn advance_to_next_work_end(&mut self) -> Result<NaiveDate, WalkError> {
        self.expect_phase(ScanPhase::ScanningForEnd)?;
        let from = self.cursor;
        let mut scanned = 0;
        while self.calendar.is_working_day(self.cursor) {
            if scanned >= self.max_lookahead {
                return Err(WalkError::NoNonWorkingDay {
                    from,
                    days: self.max_lookahead,
                });
            }
            self.step()?;
            scanned += 1;
        }
        let end = self
            .cursor
            .pred_opt()
            .ok_or(WalkError::OutOfRange(self.cursor))?;
        trace!(%from, %end, stop = %self.cursor, "found work end");
        self.phase = ScanPhase::ScanningForStart;
        Ok(end)
    }

    /// Run both scans and return the period they bound.
    pub fn next_period(&mut self) -> Result<WorkPeriod, WalkError> {
        let start = self.advance_to_next_work_start()?;
        let end = self.advance_to_next_work_end()?;
        Ok(WorkPeriod { start, end })
    }

    pub fn take_periods(&mut self, count: usize) -> Result<Vec<WorkPeriod>, WalkError> {
        (0..count).map(|_| self.next_period()).collect()
    }

    fn expect_phase(&self, phase: ScanPhase) -> Result<(), WalkError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(WalkError::OutOfOrder { phase: self.phase })
        }
    }

    fn step(&mut self) -> Result<(), WalkError> {
        self.cursor = self
            .cursor
            .succ_opt()
            .ok_or(WalkError::OutOfRange(self.cursor))?;
        Ok(())
    }
}

/// Unbounded; callers decide how many periods to pull.
impl Iterator for PeriodWalker {
    type Item = Result<WorkPeriod, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_period())
    }
}
