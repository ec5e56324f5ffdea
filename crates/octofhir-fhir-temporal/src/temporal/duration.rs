// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Calendar durations and arithmetic on partial values
//!
//! Results keep the precision and offset of the value they were applied to.
//! Month and year steps clamp the day to the end of the target month.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::PartialDate;
use super::datetime::PartialDateTime;
use super::parts::{TemporalParts, days_in_month};
use super::precision::{TemporalKind, TemporalPrecision};
use super::time::PartialTime;
use crate::core::{FP0053, FP0076, FP0082, Result, TemporalError};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Calendar units usable in temporal arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    /// Year (variable length)
    Year,
    /// Month (28-31 days)
    Month,
    /// Week (exactly 7 days)
    Week,
    /// Day (exactly 24 hours)
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl CalendarUnit {
    /// Get the unit name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    /// Parse a unit name, accepting plurals and UCUM codes
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "year" | "years" | "a" => Some(Self::Year),
            "month" | "months" | "mo" => Some(Self::Month),
            "week" | "weeks" | "wk" => Some(Self::Week),
            "day" | "days" | "d" => Some(Self::Day),
            "hour" | "hours" | "h" => Some(Self::Hour),
            "minute" | "minutes" | "min" => Some(Self::Minute),
            "second" | "seconds" | "s" => Some(Self::Second),
            "millisecond" | "milliseconds" | "ms" => Some(Self::Millisecond),
            _ => None,
        }
    }

    /// Fixed length in milliseconds, `None` for months and years
    pub fn to_milliseconds(&self) -> Option<i64> {
        match self {
            Self::Year | Self::Month => None,
            Self::Week => Some(7 * MILLIS_PER_DAY),
            Self::Day => Some(MILLIS_PER_DAY),
            Self::Hour => Some(MILLIS_PER_HOUR),
            Self::Minute => Some(MILLIS_PER_MINUTE),
            Self::Second => Some(MILLIS_PER_SECOND),
            Self::Millisecond => Some(1),
        }
    }

    /// Precision of the component this unit changes
    pub fn precision(&self) -> TemporalPrecision {
        match self {
            Self::Year => TemporalPrecision::Year,
            Self::Month => TemporalPrecision::Month,
            Self::Week | Self::Day => TemporalPrecision::Day,
            Self::Hour => TemporalPrecision::Hour,
            Self::Minute => TemporalPrecision::Minute,
            Self::Second => TemporalPrecision::Second,
            Self::Millisecond => TemporalPrecision::Fraction,
        }
    }

    /// Whether values of `kind` can be shifted by this unit
    pub fn applies_to(&self, kind: TemporalKind) -> bool {
        kind.supports(self.precision())
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarUnit {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            TemporalError::arithmetic_error(FP0053, format!("Invalid calendar unit: '{s}'"))
        })
    }
}

/// A duration expressed in calendar units
///
/// Months and years have variable lengths, so they are applied to the
/// calendar fields rather than converted to a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDuration {
    /// The magnitude of the duration
    pub value: i64,
    /// The calendar unit
    pub unit: CalendarUnit,
}

impl CalendarDuration {
    pub fn new(value: i64, unit: CalendarUnit) -> Self {
        Self { value, unit }
    }

    /// Create a duration from a string like "5 days" or "2 years"
    pub fn from_string(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [value, unit] = parts.as_slice() else {
            return Err(TemporalError::arithmetic_error(
                FP0053,
                format!("Invalid calendar duration format: '{s}'. Expected format: '<number> <unit>'"),
            ));
        };

        let value = value.parse::<i64>().map_err(|_| {
            TemporalError::arithmetic_error(
                FP0053,
                format!("Invalid number in calendar duration: '{value}'"),
            )
        })?;
        let unit = unit.trim_matches('\'').parse::<CalendarUnit>()?;

        Ok(Self::new(value, unit))
    }

    /// Total milliseconds if the unit has a fixed length
    pub fn to_milliseconds(&self) -> Option<i64> {
        self.unit
            .to_milliseconds()
            .and_then(|millis| self.value.checked_mul(millis))
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn abs(&self) -> Self {
        Self::new(self.value.saturating_abs(), self.unit)
    }

    pub fn negate(&self) -> Self {
        Self::new(self.value.saturating_neg(), self.unit)
    }

    /// Shift a date by years, months, weeks or days
    pub fn add_to_date(&self, date: &PartialDate) -> Result<PartialDate> {
        self.ensure_applies(TemporalKind::Date)?;
        let shifted = self.shift_date(date.naive_date())?;
        PartialDate::from_components(TemporalParts::from_naive_date(&shifted), date.precision())
    }

    /// Shift a time by hours, minutes, seconds or milliseconds, wrapping at midnight
    pub fn add_to_time(&self, time: &PartialTime) -> Result<PartialTime> {
        self.ensure_applies(TemporalKind::Time)?;
        let delta = self.fixed_delta()?;
        let (shifted, _) = time.naive_time().overflowing_add_signed(delta);
        let mut parts = TemporalParts::from_naive_time(&shifted);
        parts.fraction_digits = time.fraction_digits();
        PartialTime::from_components(parts, time.precision(), time.offset())
    }

    /// Shift a dateTime by any calendar unit
    pub fn add_to_date_time(&self, value: &PartialDateTime) -> Result<PartialDateTime> {
        let local = value.naive_local();
        let shifted = match self.unit {
            CalendarUnit::Year | CalendarUnit::Month => {
                self.shift_date(local.date())?.and_time(local.time())
            }
            _ => {
                let shifted = local
                    .checked_add_signed(self.fixed_delta()?)
                    .ok_or_else(|| self.overflow("dateTime"))?;
                ensure_year_in_range(shifted.year()).ok_or_else(|| self.overflow("dateTime"))?;
                shifted
            }
        };

        let mut parts = TemporalParts::from_naive_date_time(&shifted);
        parts.fraction_digits = value.fraction_digits();
        PartialDateTime::from_components(parts, value.precision(), value.offset())
    }

    fn shift_date(&self, date: NaiveDate) -> Result<NaiveDate> {
        let shifted = match self.unit {
            CalendarUnit::Year | CalendarUnit::Month => {
                let months = if self.unit == CalendarUnit::Year {
                    self.value.checked_mul(12)
                } else {
                    Some(self.value)
                };
                let total = months
                    .and_then(|months| {
                        (i64::from(date.year()) * 12 + i64::from(date.month0())).checked_add(months)
                    })
                    .ok_or_else(|| self.overflow("date"))?;
                let year = i32::try_from(total.div_euclid(12)).map_err(|_| self.overflow("date"))?;
                ensure_year_in_range(year).ok_or_else(|| self.overflow("date"))?;
                let month = total.rem_euclid(12) as u32 + 1;

                let last_day = days_in_month(year, month);
                if date.day() > last_day {
                    log::debug!(
                        "Clamping day {} to {last_day} after adding {self} to {date}",
                        date.day()
                    );
                }
                NaiveDate::from_ymd_opt(year, month, date.day().min(last_day))
            }
            _ => self
                .fixed_delta()
                .ok()
                .and_then(|delta| date.checked_add_signed(delta)),
        };

        shifted
            .filter(|date| ensure_year_in_range(date.year()).is_some())
            .ok_or_else(|| self.overflow("date"))
    }

    fn fixed_delta(&self) -> Result<Duration> {
        self.to_milliseconds()
            .and_then(Duration::try_milliseconds)
            .ok_or_else(|| self.overflow("value"))
    }

    fn ensure_applies(&self, kind: TemporalKind) -> Result<()> {
        if self.unit.applies_to(kind) {
            Ok(())
        } else {
            Err(TemporalError::arithmetic_error(
                FP0082,
                format!("Cannot add {self} to a {kind}"),
            ))
        }
    }

    fn overflow(&self, target: &str) -> TemporalError {
        TemporalError::arithmetic_error(
            FP0076,
            format!("Adding {self} moves the {target} outside years 0001-9999"),
        )
    }
}

fn ensure_year_in_range(year: i32) -> Option<()> {
    (1..=9999).contains(&year).then_some(())
}

impl fmt::Display for CalendarDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for CalendarDuration {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}
