//! Calendar source: evenly spaced timestamps and their integer fields.

use crate::composer::{Atlas, AtlasComposer};
use crate::constants::periods::{DAYS_PER_MONTH, HOURS_PER_DAY, MONTHS_PER_YEAR};
use crate::error::{AtlasError, Result};
use crate::types::{PeriodSpec, TimeIndex};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sampling step of a calendar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Second,
    Minute,
    Hour,
    Day,
}

impl Frequency {
    pub fn step(self) -> Duration {
        match self {
            Frequency::Second => Duration::seconds(1),
            Frequency::Minute => Duration::minutes(1),
            Frequency::Hour => Duration::hours(1),
            Frequency::Day => Duration::days(1),
        }
    }
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| AtlasError::Calendar(format!("cannot parse '{}': {}", s, e)))
}

/// Timestamps from `start` to `end` (inclusive) and their calendar fields,
/// all aligned 1:1 with the time index.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub index: TimeIndex,
    pub year: Vec<i64>,
    pub month: Vec<i64>,
    pub day: Vec<i64>,
    pub hour: Vec<i64>,
    pub minute: Vec<i64>,
    pub second: Vec<i64>,
}

impl CalendarSeries {
    pub fn generate(start: NaiveDateTime, end: NaiveDateTime, freq: Frequency) -> Result<Self> {
        if start > end {
            return Err(AtlasError::Calendar(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        let step = freq.step();
        let mut timestamps = Vec::new();
        let mut t = start;
        while t <= end {
            timestamps.push(t);
            t = match t.checked_add_signed(step) {
                Some(next) => next,
                None => break,
            };
        }

        debug!(samples = timestamps.len(), ?freq, "Generated calendar series");
        Ok(Self::from_timestamps(timestamps))
    }

    pub fn from_timestamps(timestamps: Vec<NaiveDateTime>) -> Self {
        let field = |f: fn(&NaiveDateTime) -> i64| timestamps.iter().map(f).collect::<Vec<_>>();
        Self {
            index: TimeIndex::range(timestamps.len()),
            year: field(|t| t.year() as i64),
            month: field(|t| t.month() as i64),
            day: field(|t| t.day() as i64),
            hour: field(|t| t.hour() as i64),
            minute: field(|t| t.minute() as i64),
            second: field(|t| t.second() as i64),
            timestamps,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Year minus the first sample's year.
    pub fn relative_years(&self) -> Vec<i64> {
        let first = self.year.first().copied().unwrap_or(0);
        self.year.iter().map(|y| y - first).collect()
    }

    /// Years touched by the series, i.e. the period of the year wheel.
    pub fn year_span(&self) -> i64 {
        match (self.year.iter().min(), self.year.iter().max()) {
            (Some(lo), Some(hi)) => hi - lo + 1,
            _ => 0,
        }
    }

    /// Year, month, day and hour compasses summed into one atlas.
    ///
    /// Periods: year span, 12 months, 31 days, 24 hours. Years are counted
    /// from the first sample's year so the series starts at angle zero. The
    /// hour wheel turns with the running sample index, so every sample gets
    /// its own slot whatever the frequency.
    pub fn atlas(&self, radii: &CalendarRadii) -> Result<Atlas> {
        let year_period = self.year_span().max(1);
        AtlasComposer::new()
            .field(
                "year",
                self.relative_years(),
                PeriodSpec::new(radii.year, year_period)?,
            )
            .field(
                "month",
                self.month.clone(),
                PeriodSpec::new(radii.month, MONTHS_PER_YEAR)?,
            )
            .field(
                "day",
                self.day.clone(),
                PeriodSpec::new(radii.day, DAYS_PER_MONTH)?,
            )
            .field(
                "hour",
                self.index.as_slice().to_vec(),
                PeriodSpec::new(radii.hour, HOURS_PER_DAY)?,
            )
            .compose()
    }
}

/// Per-field radii of a calendar atlas; purely cosmetic weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarRadii {
    pub year: f64,
    pub month: f64,
    pub day: f64,
    pub hour: f64,
}

impl CalendarRadii {
    /// Nested rings: outer years, then months, days and hours.
    pub fn nested() -> Self {
        Self {
            year: 24.0,
            month: 12.0,
            day: 3.0,
            hour: 1.0,
        }
    }
}

impl Default for CalendarRadii {
    fn default() -> Self {
        Self {
            year: 1.0,
            month: 1.0,
            day: 1.0,
            hour: 1.0,
        }
    }
}
