use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weekend weekdays plus explicit holiday dates.
///
/// Classification is a pure function of the two sets and the date, so the
/// calendar is never mutated once a walker borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    weekend: HashSet<Weekday>,
    holidays: HashSet<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    weekend: Vec<Weekday>,
    holidays: Vec<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new([Weekday::Sat, Weekday::Sun], [])
    }
}

/// Weekday for a day number where 0 is Sunday and 6 is Saturday.
pub fn weekday_from_number(number: u8) -> Option<Weekday> {
    match number {
        0 => Some(Weekday::Sun),
        1..=6 => Weekday::try_from(number - 1).ok(),
        _ => None,
    }
}

/// Inverse of [`weekday_from_number`].
pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

impl WorkCalendar {
    pub fn new<I, J>(weekend: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        Self {
            weekend: weekend.into_iter().collect(),
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn from_config(config: &WorkCalendarConfig) -> Self {
        Self::new(
            config.weekend.iter().copied(),
            config.holidays.iter().copied(),
        )
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    /// Add a single holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays at once
    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// A working day is neither a weekend weekday nor a holiday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    pub fn weekend(&self) -> &HashSet<Weekday> {
        &self.weekend
    }

    pub fn holidays(&self) -> &HashSet<NaiveDate> {
        &self.holidays
    }
}

impl WorkCalendarConfig {
    pub fn new<I, J>(weekend: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut weekend: Vec<Weekday> = weekend.into_iter().collect();
        weekend.sort_by_key(|wd| wd.num_days_from_sunday());
        weekend.dedup();

        let mut holidays: Vec<NaiveDate> = holidays.into_iter().collect();
        holidays.sort();
        holidays.dedup();

        Self { weekend, holidays }
    }

    pub fn weekend(&self) -> &[Weekday] {
        &self.weekend
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        Self::new(
            calendar.weekend.iter().copied(),
            calendar.holidays.iter().copied(),
        )
    }
}
