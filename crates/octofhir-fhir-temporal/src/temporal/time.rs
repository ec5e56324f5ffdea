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

//! Partial times of day with an optional offset

use chrono::{Duration, Local, NaiveTime, Timelike};

use super::compare::TemporalValue;
use super::duration::CalendarDuration;
use super::format::format_time;
use super::grammar;
use super::offset::UtcOffset;
use super::parts::{TemporalParts, ensure_supported};
use super::precision::{TemporalComponent, TemporalKind, TemporalPrecision};
use crate::config::{LeapSecondPolicy, ParseOptions};
use crate::core::{FP0074, Result, TemporalError};

/// A time of day known to hour, minute, second or fraction precision
#[derive(Debug, Clone)]
pub struct PartialTime {
    original: String,
    /// Wall-clock time as written
    time: NaiveTime,
    precision: TemporalPrecision,
    offset: Option<UtcOffset>,
    fraction_digits: u8,
}

impl PartialTime {
    /// Parse with default options
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse with explicit options
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let input = options.prepare(text);
        Self::parse_prepared(input, options)
            .inspect_err(|err| log::debug!("Failed to parse time '{input}': {err}"))
    }

    fn parse_prepared(input: &str, options: &ParseOptions) -> Result<Self> {
        if input.is_empty() {
            return Err(TemporalError::parse_error(FP0074, "Empty time string", input));
        }

        let lexical = grammar::match_time(input).ok_or_else(|| {
            TemporalError::parse_error(
                FP0074,
                format!("Invalid time format: '{input}'. Expected HH, HH:MM, HH:MM:SS or HH:MM:SS.fff"),
                input,
            )
        })?;
        let precision = lexical.precision().ok_or_else(|| {
            TemporalError::parse_error(FP0074, format!("Missing hour in '{input}'"), input)
        })?;
        let offset = lexical
            .offset
            .map(|offset| UtcOffset::from_lexical(offset, input))
            .transpose()?;

        let parts = TemporalParts::from_lexical(&lexical, options, input)?.settled(precision);
        let time = parts.normalize_time(precision, options, input)?;

        Ok(Self {
            original: input.to_string(),
            time,
            precision,
            offset,
            fraction_digits: parts.fraction_digits,
        })
    }

    /// Build from components at `precision`
    ///
    /// A fraction without a digit count is written with its significant
    /// digits.
    pub fn from_components(
        parts: TemporalParts,
        precision: TemporalPrecision,
        offset: Option<UtcOffset>,
    ) -> Result<Self> {
        Self::build(parts, precision, offset, &ParseOptions::default())
    }

    fn build(
        parts: TemporalParts,
        precision: TemporalPrecision,
        offset: Option<UtcOffset>,
        options: &ParseOptions,
    ) -> Result<Self> {
        let parts = parts.settled(precision);
        let input = format_time(&parts, precision, offset);
        ensure_supported(TemporalKind::Time, precision, FP0074, &input)?;
        let time = parts.normalize_time(precision, options, &input)?;
        Ok(Self::from_normalized(time, precision, offset, parts.fraction_digits))
    }

    pub(crate) fn from_normalized(
        time: NaiveTime,
        precision: TemporalPrecision,
        offset: Option<UtcOffset>,
        fraction_digits: u8,
    ) -> Self {
        let mut parts = TemporalParts::from_naive_time(&time);
        parts.fraction_digits = fraction_digits;
        Self {
            original: format_time(&parts, precision, offset),
            time,
            precision,
            offset,
            fraction_digits,
        }
    }

    /// Current local time with millisecond precision and the local offset
    pub fn now() -> Self {
        let now = Local::now();
        let time = now.time();
        let millis = time.nanosecond() / 1_000_000 * 1_000_000;
        let time = time.with_nanosecond(millis).unwrap_or(time);
        Self::from_normalized(
            time,
            TemporalPrecision::Fraction,
            UtcOffset::from_offset(now.offset()),
            3,
        )
    }

    /// The text the value was parsed from
    pub fn original_text(&self) -> &str {
        &self.original
    }

    /// Render the components implied by the precision, with the offset if any
    pub fn to_canonical_text(&self) -> String {
        format_time(&self.wall_clock_parts(), self.precision, self.offset)
    }

    pub fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    /// Explicit offset, `None` when the text carried none
    pub fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Minute, absent below minute precision
    pub fn minute(&self) -> Option<u32> {
        (self.precision >= TemporalPrecision::Minute).then(|| self.time.minute())
    }

    /// Second (60 for a leap second), absent below second precision
    pub fn second(&self) -> Option<u32> {
        (self.precision >= TemporalPrecision::Second).then(|| self.wall_clock_parts().second)
    }

    /// Millisecond of the fraction, absent without a fraction
    pub fn millisecond(&self) -> Option<u32> {
        self.nanosecond().map(|nanos| nanos / 1_000_000)
    }

    /// Fraction in nanoseconds, absent without a fraction
    pub fn nanosecond(&self) -> Option<u32> {
        (self.precision == TemporalPrecision::Fraction)
            .then(|| self.wall_clock_parts().nanosecond)
    }

    /// Number of fraction digits written
    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    /// Digits of precision: 2, 4, 6, or 6 plus the fraction digits
    pub fn precision_digits(&self) -> i64 {
        match self.precision {
            TemporalPrecision::Hour => 2,
            TemporalPrecision::Minute => 4,
            TemporalPrecision::Fraction => 6 + i64::from(self.fraction_digits),
            _ => 6,
        }
    }

    /// Earliest time the value covers, at millisecond precision or finer
    pub fn low_boundary(&self) -> Result<Self> {
        self.boundary(false)
    }

    /// Latest time the value covers, at millisecond precision or finer
    pub fn high_boundary(&self) -> Result<Self> {
        self.boundary(true)
    }

    fn boundary(&self, high: bool) -> Result<Self> {
        let parts = self.wall_clock_parts().boundary(self.precision, high);
        let options = ParseOptions::default().with_leap_second(LeapSecondPolicy::Accept);
        Self::build(parts, TemporalPrecision::Fraction, self.offset, &options)
    }

    /// Add a clock duration, wrapping around midnight
    pub fn add(&self, duration: &CalendarDuration) -> Result<Self> {
        duration.add_to_time(self)
    }

    /// Subtract a clock duration, wrapping around midnight
    pub fn subtract(&self, duration: &CalendarDuration) -> Result<Self> {
        duration.negate().add_to_time(self)
    }

    pub(crate) fn naive_time(&self) -> NaiveTime {
        self.time
    }

    fn wall_clock_parts(&self) -> TemporalParts {
        let mut parts = TemporalParts::from_naive_time(&self.time);
        parts.fraction_digits = self.fraction_digits;
        parts
    }
}

impl TemporalValue for PartialTime {
    const KIND: TemporalKind = TemporalKind::Time;
    const COMPONENTS: &'static [TemporalComponent] = TemporalComponent::TIME;

    fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    fn parts(&self, in_utc: bool) -> TemporalParts {
        match self.offset {
            Some(offset) if in_utc => {
                let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
                let (utc, _) = self.time.overflowing_sub_signed(shift);
                TemporalParts::from_naive_time(&utc)
            }
            _ => TemporalParts::from_naive_time(&self.time),
        }
    }
}

impl TryFrom<NaiveTime> for PartialTime {
    type Error = TemporalError;

    /// Fraction precision when the time has nanoseconds, second precision otherwise
    fn try_from(time: NaiveTime) -> Result<Self> {
        let parts = TemporalParts::from_naive_time(&time);
        let precision = if parts.nanosecond == 0 {
            TemporalPrecision::Second
        } else {
            TemporalPrecision::Fraction
        };
        Self::from_components(parts, precision, None)
    }
}

impl_text_value!(PartialTime);
