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

//! Partial dateTimes: a partial date with an optional time part and offset

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use super::compare::TemporalValue;
use super::date::PartialDate;
use super::duration::CalendarDuration;
use super::format::format_date_time;
use super::grammar;
use super::offset::{UtcOffset, utc_fixed};
use super::parts::{TemporalParts, ensure_supported};
use super::precision::{TemporalComponent, TemporalKind, TemporalPrecision};
use super::time::PartialTime;
use crate::config::{LeapSecondPolicy, ParseOptions};
use crate::core::{FP0075, FP0080, Result, TemporalError};

/// A dateTime known to any precision from year down to fraction
///
/// The instant is anchored at the written offset, or at UTC when the text
/// carried none. The anchor of an offset-free value is never exposed.
#[derive(Debug, Clone)]
pub struct PartialDateTime {
    original: String,
    instant: DateTime<FixedOffset>,
    precision: TemporalPrecision,
    offset: Option<UtcOffset>,
    fraction_digits: u8,
}

impl PartialDateTime {
    /// Parse with default options
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse with explicit options
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let input = options.prepare(text);
        Self::parse_prepared(input, options)
            .inspect_err(|err| log::debug!("Failed to parse dateTime '{input}': {err}"))
    }

    fn parse_prepared(input: &str, options: &ParseOptions) -> Result<Self> {
        if input.is_empty() {
            return Err(TemporalError::parse_error(FP0075, "Empty dateTime string", input));
        }

        let lexical = grammar::match_date_time(input).ok_or_else(|| {
            TemporalError::parse_error(
                FP0075,
                format!("Invalid dateTime format: '{input}'. Expected YYYY[-MM[-DD[THH[:MM[:SS[.fff]]][offset]]]]"),
                input,
            )
        })?;
        if lexical.has_time() && lexical.date_precision() != Some(TemporalPrecision::Day) {
            return Err(TemporalError::parse_error(
                FP0075,
                format!("Time part in '{input}' requires a full date"),
                input,
            ));
        }
        let precision = lexical.precision().ok_or_else(|| {
            TemporalError::parse_error(FP0075, format!("Missing year in '{input}'"), input)
        })?;
        let offset = lexical
            .offset
            .map(|offset| UtcOffset::from_lexical(offset, input))
            .transpose()?;

        let parts = TemporalParts::from_lexical(&lexical, options, input)?.settled(precision);
        let instant = normalize(&parts, precision, offset, options, input)?;

        Ok(Self {
            original: input.to_string(),
            instant,
            precision,
            offset,
            fraction_digits: parts.fraction_digits,
        })
    }

    /// Build from components at `precision`
    ///
    /// An offset is only accepted when the precision reaches the time part.
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
        let input = format_date_time(&parts, precision, offset);
        ensure_supported(TemporalKind::DateTime, precision, FP0075, &input)?;
        if offset.is_some() && !precision.is_time_precision() {
            return Err(TemporalError::parse_error(
                FP0075,
                format!("An offset requires a time part, precision is '{precision}'"),
                input,
            ));
        }
        let instant = normalize(&parts, precision, offset, options, &input)?;
        Ok(Self::from_normalized(instant, precision, offset, parts.fraction_digits))
    }

    fn from_normalized(
        instant: DateTime<FixedOffset>,
        precision: TemporalPrecision,
        offset: Option<UtcOffset>,
        fraction_digits: u8,
    ) -> Self {
        let mut parts = TemporalParts::from_naive_date_time(&instant.naive_local());
        parts.fraction_digits = fraction_digits;
        Self {
            original: format_date_time(&parts, precision, offset),
            instant,
            precision,
            offset,
            fraction_digits,
        }
    }

    pub(crate) fn from_date(date: &PartialDate) -> Self {
        let naive = date.naive_date().and_time(NaiveTime::MIN);
        Self::from_normalized(naive.and_utc().fixed_offset(), date.precision(), None, 0)
    }

    /// Current local dateTime with millisecond precision and the local offset
    pub fn now() -> Self {
        let now = Local::now();
        let millis = now.nanosecond() / 1_000_000 * 1_000_000;
        let now = now.with_nanosecond(millis).unwrap_or(now);
        Self::from_normalized(
            now.fixed_offset(),
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
        format_date_time(&self.wall_clock_parts(), self.precision, self.offset)
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

    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    pub fn month(&self) -> Option<u32> {
        self.gated(TemporalPrecision::Month, |parts| parts.month)
    }

    pub fn day(&self) -> Option<u32> {
        self.gated(TemporalPrecision::Day, |parts| parts.day)
    }

    pub fn hour(&self) -> Option<u32> {
        self.gated(TemporalPrecision::Hour, |parts| parts.hour)
    }

    pub fn minute(&self) -> Option<u32> {
        self.gated(TemporalPrecision::Minute, |parts| parts.minute)
    }

    /// Second (60 for a leap second)
    pub fn second(&self) -> Option<u32> {
        self.gated(TemporalPrecision::Second, |parts| parts.second)
    }

    pub fn millisecond(&self) -> Option<u32> {
        self.nanosecond().map(|nanos| nanos / 1_000_000)
    }

    pub fn nanosecond(&self) -> Option<u32> {
        self.gated(TemporalPrecision::Fraction, |parts| parts.nanosecond)
    }

    /// Number of fraction digits written
    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    fn gated(
        &self,
        precision: TemporalPrecision,
        component: impl FnOnce(&TemporalParts) -> u32,
    ) -> Option<u32> {
        (self.precision >= precision).then(|| component(&self.wall_clock_parts()))
    }

    /// Digits of precision: 4, 6, 8, 10, 12, 14, or 14 plus the fraction digits
    pub fn precision_digits(&self) -> i64 {
        match self.precision {
            TemporalPrecision::Fraction => 14 + i64::from(self.fraction_digits),
            precision => precision.precision_digits(),
        }
    }

    /// The date part at the value's date precision
    pub fn date_part(&self) -> PartialDate {
        PartialDate::from_normalized(
            self.instant.date_naive(),
            self.precision.min(TemporalPrecision::Day),
        )
    }

    /// The time part with the offset, absent below hour precision
    pub fn time_part(&self) -> Option<PartialTime> {
        self.precision.is_time_precision().then(|| {
            PartialTime::from_normalized(
                self.instant.time(),
                self.precision,
                self.offset,
                self.fraction_digits,
            )
        })
    }

    /// Earliest instant the value covers, at millisecond precision or finer
    pub fn low_boundary(&self) -> Result<Self> {
        self.boundary(false)
    }

    /// Latest instant the value covers, at millisecond precision or finer
    pub fn high_boundary(&self) -> Result<Self> {
        self.boundary(true)
    }

    fn boundary(&self, high: bool) -> Result<Self> {
        let parts = self.wall_clock_parts().boundary(self.precision, high);
        let options = ParseOptions::default().with_leap_second(LeapSecondPolicy::Accept);
        Self::build(parts, TemporalPrecision::Fraction, self.offset, &options)
    }

    /// Add a calendar duration
    pub fn add(&self, duration: &CalendarDuration) -> Result<Self> {
        duration.add_to_date_time(self)
    }

    /// Subtract a calendar duration
    pub fn subtract(&self, duration: &CalendarDuration) -> Result<Self> {
        duration.negate().add_to_date_time(self)
    }

    /// Wall-clock dateTime as written
    pub(crate) fn naive_local(&self) -> NaiveDateTime {
        self.instant.naive_local()
    }

    pub(crate) fn wall_clock_parts(&self) -> TemporalParts {
        let mut parts = TemporalParts::from_naive_date_time(&self.instant.naive_local());
        parts.fraction_digits = self.fraction_digits;
        parts
    }
}

fn normalize(
    parts: &TemporalParts,
    precision: TemporalPrecision,
    offset: Option<UtcOffset>,
    options: &ParseOptions,
    input: &str,
) -> Result<DateTime<FixedOffset>> {
    let date = parts.normalize_date(precision.min(TemporalPrecision::Day), input)?;
    let time = if precision.is_time_precision() {
        parts.normalize_time(precision, options, input)?
    } else {
        NaiveTime::MIN
    };

    let anchor = offset.map_or_else(utc_fixed, |offset| offset.fixed_offset());
    anchor
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| {
            TemporalError::parse_error(
                FP0080,
                format!("Cannot place '{input}' at offset {anchor}"),
                input,
            )
        })
}

impl TemporalValue for PartialDateTime {
    const KIND: TemporalKind = TemporalKind::DateTime;
    const COMPONENTS: &'static [TemporalComponent] = TemporalComponent::DATE_TIME;

    fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    fn parts(&self, in_utc: bool) -> TemporalParts {
        if in_utc && self.offset.is_some() {
            TemporalParts::from_naive_date_time(&self.instant.naive_utc())
        } else {
            TemporalParts::from_naive_date_time(&self.instant.naive_local())
        }
    }
}

impl TryFrom<DateTime<FixedOffset>> for PartialDateTime {
    type Error = TemporalError;

    /// Fraction precision when the instant has nanoseconds, second precision otherwise
    fn try_from(value: DateTime<FixedOffset>) -> Result<Self> {
        let parts = TemporalParts::from_naive_date_time(&value.naive_local());
        let precision = if parts.nanosecond == 0 {
            TemporalPrecision::Second
        } else {
            TemporalPrecision::Fraction
        };
        let offset = UtcOffset::from_offset(value.offset()).ok_or_else(|| {
            TemporalError::parse_error(
                crate::core::FP0077,
                format!("Offset {} is out of range", value.offset()),
                value.to_rfc3339(),
            )
        })?;
        Self::from_components(parts, precision, Some(offset))
    }
}

impl_text_value!(PartialDateTime);
