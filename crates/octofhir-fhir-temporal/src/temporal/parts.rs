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

//! Calendar components and their normalization into chrono values

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::grammar::LexicalMatch;
use super::precision::{TemporalKind, TemporalPrecision};
use crate::config::{MAX_FRACTION_DIGITS, ParseOptions};
use crate::core::{
    ErrorCode, FP0071, FP0072, FP0073, FP0074, FP0079, FP0080, Result, TemporalError,
};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Calendar and clock components of a partial value
///
/// Components finer than the value's precision are ignored; unset date
/// components default to the first month/day and unset clock components to
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemporalParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Seconds, `60` for a leap second
    pub second: u32,
    pub nanosecond: u32,
    /// Digits written for the fraction (0 when absent)
    pub fraction_digits: u8,
}

impl Default for TemporalParts {
    fn default() -> Self {
        Self {
            year: 1,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            fraction_digits: 0,
        }
    }
}

impl TemporalParts {
    /// Date components
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ..Self::default()
        }
    }

    /// Clock components
    pub fn time(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            ..Self::default()
        }
    }

    /// Replace the clock components
    pub fn with_time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Set the fraction as nanoseconds written with `digits` digits
    pub fn with_fraction(mut self, nanosecond: u32, digits: u8) -> Self {
        self.nanosecond = nanosecond;
        self.fraction_digits = digits.min(MAX_FRACTION_DIGITS);
        self
    }

    /// Set the fraction from milliseconds (three digits)
    pub fn with_millis(self, millisecond: u32) -> Self {
        self.with_fraction(millisecond.saturating_mul(1_000_000), 3)
    }

    /// Components of a chrono date
    pub fn from_naive_date(date: &NaiveDate) -> Self {
        Self::date(date.year(), date.month(), date.day())
    }

    /// Components of a chrono time; leap seconds come back as second `60`
    pub fn from_naive_time(time: &NaiveTime) -> Self {
        let (second, nanosecond) = split_leap_second(time);
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second,
            nanosecond,
            ..Self::default()
        }
    }

    /// Components of a chrono dateTime
    pub fn from_naive_date_time(value: &NaiveDateTime) -> Self {
        let time = Self::from_naive_time(&value.time());
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            ..time
        }
    }

    /// Extract components from a lexical match
    pub(crate) fn from_lexical(
        lexical: &LexicalMatch<'_>,
        options: &ParseOptions,
        input: &str,
    ) -> Result<Self> {
        let number = |text: Option<&str>, code: ErrorCode, label: &str| -> Result<Option<u32>> {
            text.map(|digits| {
                digits.parse::<u32>().map_err(|_| {
                    TemporalError::parse_error(code, format!("Invalid {label} value: '{digits}'"), input)
                })
            })
            .transpose()
        };

        let mut parts = Self::default();
        if let Some(year) = number(lexical.year, FP0073, "year")? {
            parts.year = i32::try_from(year).map_err(|_| {
                TemporalError::parse_error(FP0073, format!("Invalid year value: '{year}'"), input)
            })?;
        }
        if let Some(month) = number(lexical.month, FP0072, "month")? {
            parts.month = month;
        }
        if let Some(day) = number(lexical.day, FP0071, "day")? {
            parts.day = day;
        }
        parts.hour = number(lexical.hour, FP0074, "hour")?.unwrap_or(0);
        parts.minute = number(lexical.minute, FP0074, "minute")?.unwrap_or(0);
        parts.second = number(lexical.second, FP0074, "second")?.unwrap_or(0);

        if let Some(fraction) = lexical.fraction {
            let (nanosecond, digits) = fraction_to_nanos(fraction, options.fraction_digit_limit());
            if fraction.len() > usize::from(digits) {
                log::debug!(
                    "Truncating fraction '{fraction}' of '{input}' to {digits} digits"
                );
            }
            parts.nanosecond = nanosecond;
            parts.fraction_digits = digits;
        }

        Ok(parts)
    }

    /// Validate the date components up to `precision` and build a chrono date
    pub(crate) fn normalize_date(&self, precision: TemporalPrecision, input: &str) -> Result<NaiveDate> {
        if !(1..=9999).contains(&self.year) {
            return Err(TemporalError::parse_error(
                FP0073,
                format!("Year {} is out of valid range (0001-9999)", self.year),
                input,
            ));
        }

        let month = if precision >= TemporalPrecision::Month {
            if !(1..=12).contains(&self.month) {
                return Err(TemporalError::parse_error(
                    FP0072,
                    format!("Month {} must be between 1 and 12", self.month),
                    input,
                ));
            }
            self.month
        } else {
            1
        };

        let day = if precision >= TemporalPrecision::Day {
            if month == 2 && self.day == 29 && !is_leap_year(self.year) {
                return Err(TemporalError::parse_error(
                    FP0079,
                    format!("February 29th is not valid in non-leap year {}", self.year),
                    input,
                ));
            }
            if self.day == 0 || self.day > days_in_month(self.year, month) {
                return Err(TemporalError::parse_error(
                    FP0071,
                    format!(
                        "Day {} is not valid for month {month} in year {}",
                        self.day, self.year
                    ),
                    input,
                ));
            }
            self.day
        } else {
            1
        };

        NaiveDate::from_ymd_opt(self.year, month, day).ok_or_else(|| {
            TemporalError::parse_error(
                FP0080,
                format!("Invalid date: {:04}-{month:02}-{day:02}", self.year),
                input,
            )
        })
    }

    /// Validate the clock components up to `precision` and build a chrono time
    pub(crate) fn normalize_time(
        &self,
        precision: TemporalPrecision,
        options: &ParseOptions,
        input: &str,
    ) -> Result<NaiveTime> {
        let out_of_range = |label: &str, value: u32, range: &str| {
            TemporalError::parse_error(
                FP0074,
                format!("{label} {value} must be between {range}"),
                input,
            )
        };

        if self.hour >= 24 {
            return Err(out_of_range("Hour", self.hour, "00 and 23"));
        }
        let minute = if precision >= TemporalPrecision::Minute {
            if self.minute >= 60 {
                return Err(out_of_range("Minute", self.minute, "00 and 59"));
            }
            self.minute
        } else {
            0
        };

        let (second, nanosecond) = if precision >= TemporalPrecision::Second {
            let nanosecond = if precision == TemporalPrecision::Fraction {
                self.nanosecond
            } else {
                0
            };
            if nanosecond >= NANOS_PER_SECOND {
                return Err(out_of_range("Nanosecond", nanosecond, "0 and 999999999"));
            }
            match self.second {
                0..=59 => (self.second, nanosecond),
                60 if options.allows_leap_second() => (59, NANOS_PER_SECOND + nanosecond),
                60 => {
                    return Err(TemporalError::parse_error(
                        FP0074,
                        "Leap second 60 is not accepted; enable leap seconds to allow it",
                        input,
                    ));
                }
                other => return Err(out_of_range("Second", other, "00 and 59")),
            }
        } else {
            (0, 0)
        };

        NaiveTime::from_hms_nano_opt(self.hour, minute, second, nanosecond).ok_or_else(|| {
            TemporalError::parse_error(
                FP0080,
                format!("Invalid time: {:02}:{minute:02}:{:02}", self.hour, self.second),
                input,
            )
        })
    }
}

impl TemporalParts {
    /// Drop the fraction below `precision` and settle its digit count
    ///
    /// A fraction without an explicit digit count keeps its significant
    /// digits; digits beyond the count are truncated.
    pub(crate) fn settled(mut self, precision: TemporalPrecision) -> Self {
        if precision < TemporalPrecision::Fraction {
            self.nanosecond = 0;
            self.fraction_digits = 0;
            return self;
        }
        if self.fraction_digits == 0 {
            self.fraction_digits = significant_fraction_digits(self.nanosecond);
        }
        let digits = self.fraction_digits.min(MAX_FRACTION_DIGITS);
        let unit = 10u32.pow(9 - u32::from(digits));
        self.nanosecond -= self.nanosecond % unit;
        self.fraction_digits = digits;
        self
    }

    /// Fill every component finer than `precision` with the earliest
    /// (`high == false`) or latest value it could take
    ///
    /// The fraction is widened to at least milliseconds.
    pub(crate) fn boundary(mut self, precision: TemporalPrecision, high: bool) -> Self {
        let pick = |low: u32, high_value: u32| if high { high_value } else { low };

        if precision < TemporalPrecision::Month {
            self.month = pick(1, 12);
        }
        if precision < TemporalPrecision::Day {
            self.day = pick(1, days_in_month(self.year, self.month));
        }
        if precision < TemporalPrecision::Hour {
            self.hour = pick(0, 23);
        }
        if precision < TemporalPrecision::Minute {
            self.minute = pick(0, 59);
        }
        if precision < TemporalPrecision::Second {
            self.second = pick(0, 59);
        }

        let known = if precision == TemporalPrecision::Fraction {
            self.fraction_digits.min(MAX_FRACTION_DIGITS)
        } else {
            self.nanosecond = 0;
            0
        };
        let target = known.max(3);
        if high {
            self.nanosecond += 10u32.pow(9 - u32::from(known)) - 10u32.pow(9 - u32::from(target));
        }
        self.fraction_digits = target;
        self
    }
}

/// Reject a precision the kind cannot carry
pub(crate) fn ensure_supported(
    kind: TemporalKind,
    precision: TemporalPrecision,
    error_code: ErrorCode,
    input: &str,
) -> Result<()> {
    if kind.supports(precision) {
        Ok(())
    } else {
        Err(TemporalError::parse_error(
            error_code,
            format!("Precision '{precision}' is not applicable to {kind}"),
            input,
        ))
    }
}

/// Digits needed to write `nanosecond` without trailing zeros (at least one)
fn significant_fraction_digits(nanosecond: u32) -> u8 {
    let mut digits = MAX_FRACTION_DIGITS;
    let mut value = nanosecond;
    while digits > 1 && value % 10 == 0 {
        value /= 10;
        digits -= 1;
    }
    digits
}

/// Split chrono's leap second representation back into second `60`
pub(crate) fn split_leap_second(time: &NaiveTime) -> (u32, u32) {
    let nanosecond = time.nanosecond();
    if nanosecond >= NANOS_PER_SECOND {
        (time.second() + 1, nanosecond - NANOS_PER_SECOND)
    } else {
        (time.second(), nanosecond)
    }
}

/// Convert fraction digits to nanoseconds, keeping at most `limit` digits
fn fraction_to_nanos(fraction: &str, limit: usize) -> (u32, u8) {
    let kept = &fraction[..fraction.len().min(limit)];
    let mut nanosecond = 0u32;
    for (position, digit) in kept.bytes().enumerate() {
        let weight = 10u32.pow(8 - position as u32);
        nanosecond += u32::from(digit - b'0') * weight;
    }
    (nanosecond, kept.len() as u8)
}

/// Check if a year is a leap year
pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in a month for a given year
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeapSecondPolicy;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fraction_to_nanos() {
        assert_eq!(fraction_to_nanos("5", 9), (500_000_000, 1));
        assert_eq!(fraction_to_nanos("123", 9), (123_000_000, 3));
        assert_eq!(fraction_to_nanos("123456789", 9), (123_456_789, 9));
        assert_eq!(fraction_to_nanos("1234567891", 9), (123_456_789, 9));
        assert_eq!(fraction_to_nanos("98765", 3), (987_000_000, 3));
    }

    #[test]
    fn test_settled_fraction() {
        let parts = TemporalParts::time(1, 2, 3).with_fraction(500_000_000, 0);
        let settled = parts.settled(TemporalPrecision::Fraction);
        assert_eq!((settled.nanosecond, settled.fraction_digits), (500_000_000, 1));

        let parts = TemporalParts::time(1, 2, 3).with_fraction(123_456_789, 3);
        let settled = parts.settled(TemporalPrecision::Fraction);
        assert_eq!((settled.nanosecond, settled.fraction_digits), (123_000_000, 3));

        let settled = parts.settled(TemporalPrecision::Second);
        assert_eq!((settled.nanosecond, settled.fraction_digits), (0, 0));
        assert_eq!(significant_fraction_digits(0), 1);
    }

    #[test]
    fn test_boundaries() {
        let parts = TemporalParts::date(2020, 2, 1);
        let high = parts.boundary(TemporalPrecision::Month, true);
        assert_eq!((high.month, high.day, high.hour, high.minute, high.second), (2, 29, 23, 59, 59));
        assert_eq!((high.nanosecond, high.fraction_digits), (999_000_000, 3));

        let low = parts.boundary(TemporalPrecision::Year, false);
        assert_eq!((low.month, low.day, low.nanosecond), (1, 1, 0));

        let fraction = TemporalParts::time(10, 0, 0).with_fraction(500_000_000, 1);
        let high = fraction.boundary(TemporalPrecision::Fraction, true);
        assert_eq!((high.nanosecond, high.fraction_digits), (599_000_000, 3));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2021, 4), 30);
        assert_eq!(days_in_month(2021, 13), 0);
    }

    #[test]
    fn test_normalize_date_ignores_finer_components() {
        let parts = TemporalParts::date(2020, 7, 0);
        let date = parts.normalize_date(TemporalPrecision::Month, "2020-07").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 7, 1).unwrap());
    }

    #[test]
    fn test_normalize_date_errors() {
        let err = TemporalParts::date(2021, 2, 29)
            .normalize_date(TemporalPrecision::Day, "2021-02-29")
            .unwrap_err();
        assert_eq!(err.error_code(), &FP0079);

        let err = TemporalParts::date(0, 1, 1)
            .normalize_date(TemporalPrecision::Year, "0000")
            .unwrap_err();
        assert_eq!(err.error_code(), &FP0073);
    }

    #[test]
    fn test_leap_second_policy() {
        let parts = TemporalParts::time(23, 59, 60);
        let strict = ParseOptions::default();
        assert!(parts
            .normalize_time(TemporalPrecision::Second, &strict, "23:59:60")
            .is_err());

        let lenient = ParseOptions::default().with_leap_second(LeapSecondPolicy::Accept);
        let time = parts
            .normalize_time(TemporalPrecision::Second, &lenient, "23:59:60")
            .unwrap();
        assert_eq!(split_leap_second(&time), (60, 0));
        assert_eq!(TemporalParts::from_naive_time(&time).second, 60);
    }

    #[test]
    fn test_normalize_time_zero_fills() {
        let parts = TemporalParts::time(10, 45, 30).with_millis(250);
        let time = parts
            .normalize_time(TemporalPrecision::Minute, &ParseOptions::default(), "10:45")
            .unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(10, 45, 0).unwrap());
    }
}
