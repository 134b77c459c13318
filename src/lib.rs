pub mod calendar;
pub mod persistence;
pub mod regfile;
pub mod schedule;
pub mod settings;
pub mod system;
pub mod walker;

pub use calendar::{WorkCalendar, WorkCalendarConfig, weekday_from_number, weekday_number};
pub use persistence::{PersistenceError, save_periods_to_csv, write_reg_file};
pub use regfile::{PEAK_SHIFT_COUNT, PEAK_SHIFT_KEY, PeakShiftEntry, RegFile};
pub use schedule::{PeakShiftSchedule, ScheduleError};
pub use settings::{ConfigError, DEFAULT_SETTINGS_FILE, Settings, load_settings};
pub use walker::{MAX_LOOKAHEAD_DAYS, PeriodWalker, ScanPhase, WalkError, WorkPeriod};
