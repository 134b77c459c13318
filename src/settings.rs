use crate::calendar::{WorkCalendar, weekday_from_number};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SETTINGS_FILE: &str = "teco_peakshift_settings.yaml";

/// Default `NotifyTime` value written to the registry, in minutes.
pub const DEFAULT_NOTIFY_TIME: u32 = 60;

pub const MAX_MIN_CHARGE: u8 = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// Peak shift settings as stored in the settings file. Keys keep the
/// spelling of the existing settings files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Day numbers, 0 = Sunday through 6 = Saturday.
    pub weekend: Vec<u8>,
    #[serde(rename = "additional_holidays", default)]
    pub additional_holidays: Vec<NaiveDate>,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
    pub min_charge: u8,
    #[serde(default = "default_notify_time")]
    pub notify_time: u32,
    /// Eco utility executable checked before writing, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eco_utility_path: Option<PathBuf>,
}

fn default_notify_time() -> u32 {
    DEFAULT_NOTIFY_TIME
}

impl Settings {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(day) = self.weekend.iter().find(|d| weekday_from_number(**d).is_none()) {
            return Err(ConfigError::invalid(
                "weekend",
                format!("day number {day} is outside 0..=6"),
            ));
        }
        let calendar = self.calendar()?;
        if calendar.weekend().len() == 7 {
            return Err(ConfigError::invalid(
                "weekend",
                "every day of the week is a weekend day",
            ));
        }
        check_range("startHour", self.start_hour, 23)?;
        check_range("endHour", self.end_hour, 23)?;
        check_range("startMinute", self.start_minute, 59)?;
        check_range("endMinute", self.end_minute, 59)?;
        check_range("minCharge", self.min_charge, MAX_MIN_CHARGE)?;
        Ok(())
    }

    pub fn calendar(&self) -> Result<WorkCalendar, ConfigError> {
        let weekend = self
            .weekend
            .iter()
            .map(|day| {
                weekday_from_number(*day).ok_or_else(|| {
                    ConfigError::invalid("weekend", format!("day number {day} is outside 0..=6"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WorkCalendar::new(
            weekend,
            self.additional_holidays.iter().copied(),
        ))
    }
}

fn check_range(key: &'static str, value: u8, max: u8) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::invalid(
            key,
            format!("{value} is outside 0..={max}"),
        ));
    }
    Ok(())
}

/// Load settings from `path`. `.json` files are read as JSON, anything else
/// as YAML.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let settings = if is_json {
        Settings::from_json_str(&contents)?
    } else {
        Settings::from_yaml_str(&contents)?
    };
    debug!(
        path = %path.display(),
        weekend = ?settings.weekend,
        holidays = settings.additional_holidays.len(),
        "loaded settings"
    );
    Ok(settings)
}
