//! Rendering of the eco utility peak shift schedule as a `.reg` import file.
//!
//! Every value of a `PeakShiftN` entry is stored as a little-endian DWORD,
//! so each field becomes four hex bytes (`0a,00,00,00`). The ten fields of
//! one entry are concatenated into a single `hex:` value.

use crate::settings::Settings;
use crate::walker::WorkPeriod;
use chrono::Datelike;

pub const REGISTRY_EDITOR_HEADER: &str = "Windows Registry Editor Version 5.00";
pub const PEAK_SHIFT_KEY: &str = r"HKEY_LOCAL_MACHINE\SOFTWARE\Toshiba\eco Utility\PeakShift";
pub const PEAK_SHIFT_COUNT: usize = 4;
pub const ACTIVE: u8 = 1;

const LINE_ENDING: &str = "\r\n";

/// One `PeakShiftN` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakShiftEntry {
    pub index: usize,
    pub start_month: u8,
    pub start_day: u8,
    pub end_month: u8,
    pub end_day: u8,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
    pub min_charge: u8,
    pub active: u8,
}

impl PeakShiftEntry {
    /// `index` is 1-based, matching the registry value names.
    pub fn from_period(index: usize, period: &WorkPeriod, settings: &Settings) -> Self {
        Self {
            index,
            start_month: period.start().month() as u8,
            start_day: period.start().day() as u8,
            end_month: period.end().month() as u8,
            end_day: period.end().day() as u8,
            start_hour: settings.start_hour,
            start_minute: settings.start_minute,
            end_hour: settings.end_hour,
            end_minute: settings.end_minute,
            min_charge: settings.min_charge,
            active: ACTIVE,
        }
    }

    pub fn name(&self) -> String {
        format!("PeakShift{}", self.index)
    }

    /// Fields in registry order.
    pub fn fields(&self) -> [u8; 10] {
        [
            self.start_month,
            self.start_day,
            self.end_month,
            self.end_day,
            self.start_hour,
            self.start_minute,
            self.end_hour,
            self.end_minute,
            self.min_charge,
            self.active,
        ]
    }

    fn render_lines(&self) -> Vec<String> {
        let fields = self.fields();
        let last = fields.len() - 1;
        fields
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let dword = format!("{value:02x},00,00,00");
                let prefix = if i == 0 {
                    format!("\"{}\"=hex:", self.name())
                } else {
                    "  ".to_string()
                };
                let suffix = if i == last { "" } else { ",\\" };
                format!("{prefix}{dword}{suffix}")
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegFile {
    pub notify_time: u32,
    pub entries: Vec<PeakShiftEntry>,
}

impl RegFile {
    pub fn from_periods(settings: &Settings, periods: &[WorkPeriod]) -> Self {
        let entries = periods
            .iter()
            .enumerate()
            .map(|(i, period)| PeakShiftEntry::from_period(i + 1, period, settings))
            .collect();
        Self {
            notify_time: settings.notify_time,
            entries,
        }
    }

    fn preamble(&self) -> Vec<String> {
        vec![
            REGISTRY_EDITOR_HEADER.to_string(),
            String::new(),
            format!("[{PEAK_SHIFT_KEY}]"),
            dword_value("NotifyTime", self.notify_time),
            dword_value("IsSupport", 1),
            dword_value("PeakShiftCount", self.entries.len() as u32),
            dword_value("IsNotify", 1),
        ]
    }

    /// Full file contents with CRLF line endings and a trailing blank line.
    pub fn render(&self) -> String {
        let mut lines = self.preamble();
        for entry in &self.entries {
            lines.extend(entry.render_lines());
        }
        lines.push(String::new());

        let mut out = lines.join(LINE_ENDING);
        out.push_str(LINE_ENDING);
        out
    }
}

fn dword_value(name: &str, value: u32) -> String {
    format!("\"{name}\"=dword:{value:08x}")
}
