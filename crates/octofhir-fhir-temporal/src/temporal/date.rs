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

//! Partial dates (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`)

use chrono::{Datelike, Local, NaiveDate};

use super::compare::TemporalValue;
use super::datetime::PartialDateTime;
use super::duration::CalendarDuration;
use super::format::format_date;
use super::grammar;
use super::offset::UtcOffset;
use super::parts::{TemporalParts, ensure_supported};
use super::precision::{TemporalComponent, TemporalKind, TemporalPrecision};
use crate::config::ParseOptions;
use crate::core::{FP0070, Result, TemporalError};

/// A date known to year, month or day precision
///
/// The stored date fills components finer than the precision with the first
/// month or day; those are never exposed.
#[derive(Debug, Clone)]
pub struct PartialDate {
    original: String,
    date: NaiveDate,
    precision: TemporalPrecision,
}

impl PartialDate {
    /// Parse with default options
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse with explicit options
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let input = options.prepare(text);
        Self::parse_prepared(input, options)
            .inspect_err(|err| log::debug!("Failed to parse date '{input}': {err}"))
    }

    fn parse_prepared(input: &str, options: &ParseOptions) -> Result<Self> {
        if input.is_empty() {
            return Err(TemporalError::parse_error(FP0070, "Empty date string", input));
        }

        let lexical = grammar::match_date(input).ok_or_else(|| {
            TemporalError::parse_error(
                FP0070,
                format!("Invalid date format: '{input}'. Expected YYYY, YYYY-MM or YYYY-MM-DD"),
                input,
            )
        })?;
        let precision = lexical.date_precision().ok_or_else(|| {
            TemporalError::parse_error(FP0070, format!("Missing year in '{input}'"), input)
        })?;

        let parts = TemporalParts::from_lexical(&lexical, options, input)?;
        let date = parts.normalize_date(precision, input)?;

        Ok(Self {
            original: input.to_string(),
            date,
            precision,
        })
    }

    /// Build from components; `month` and `day` are optional and set the precision
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Result<Self> {
        let precision = match (month, day) {
            (None, None) => TemporalPrecision::Year,
            (Some(_), None) => TemporalPrecision::Month,
            (Some(_), Some(_)) => TemporalPrecision::Day,
            (None, Some(day)) => {
                return Err(TemporalError::parse_error(
                    FP0070,
                    format!("Day {day} given without a month"),
                    format!("{year:04}"),
                ));
            }
        };
        let parts = TemporalParts::date(year, month.unwrap_or(1), day.unwrap_or(1));
        Self::from_components(parts, precision)
    }

    /// Build from components at `precision`
    pub fn from_components(parts: TemporalParts, precision: TemporalPrecision) -> Result<Self> {
        let input = format_date(&parts, precision);
        ensure_supported(TemporalKind::Date, precision, FP0070, &input)?;
        let date = parts.normalize_date(precision, &input)?;
        Ok(Self::from_normalized(date, precision))
    }

    /// Today's local date at day precision
    pub fn today() -> Self {
        Self::from_normalized(Local::now().date_naive(), TemporalPrecision::Day)
    }

    pub(crate) fn from_normalized(date: NaiveDate, precision: TemporalPrecision) -> Self {
        Self {
            original: format_date(&TemporalParts::from_naive_date(&date), precision),
            date,
            precision,
        }
    }

    /// The text the value was parsed from
    pub fn original_text(&self) -> &str {
        &self.original
    }

    /// Render the components implied by the precision
    pub fn to_canonical_text(&self) -> String {
        format_date(&TemporalParts::from_naive_date(&self.date), self.precision)
    }

    pub fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month, absent below month precision
    pub fn month(&self) -> Option<u32> {
        (self.precision >= TemporalPrecision::Month).then(|| self.date.month())
    }

    /// Day of month, absent below day precision
    pub fn day(&self) -> Option<u32> {
        (self.precision >= TemporalPrecision::Day).then(|| self.date.day())
    }

    /// Digits of precision (4, 6 or 8)
    pub fn precision_digits(&self) -> i64 {
        self.precision.precision_digits()
    }

    /// Earliest day the value covers
    pub fn low_boundary(&self) -> Result<Self> {
        self.boundary(false)
    }

    /// Latest day the value covers
    pub fn high_boundary(&self) -> Result<Self> {
        self.boundary(true)
    }

    fn boundary(&self, high: bool) -> Result<Self> {
        let parts = TemporalParts::from_naive_date(&self.date).boundary(self.precision, high);
        Self::from_components(parts, TemporalPrecision::Day)
    }

    /// The same date as a dateTime without a time part
    pub fn to_date_time(&self) -> PartialDateTime {
        PartialDateTime::from_date(self)
    }

    /// Add a calendar duration (year, month, week or day)
    pub fn add(&self, duration: &CalendarDuration) -> Result<Self> {
        duration.add_to_date(self)
    }

    /// Subtract a calendar duration (year, month, week or day)
    pub fn subtract(&self, duration: &CalendarDuration) -> Result<Self> {
        duration.negate().add_to_date(self)
    }

    pub(crate) fn naive_date(&self) -> NaiveDate {
        self.date
    }
}

impl TemporalValue for PartialDate {
    const KIND: TemporalKind = TemporalKind::Date;
    const COMPONENTS: &'static [TemporalComponent] = TemporalComponent::DATE;

    fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    fn offset(&self) -> Option<UtcOffset> {
        None
    }

    fn parts(&self, _in_utc: bool) -> TemporalParts {
        TemporalParts::from_naive_date(&self.date)
    }
}

impl TryFrom<NaiveDate> for PartialDate {
    type Error = TemporalError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::from_components(TemporalParts::from_naive_date(&date), TemporalPrecision::Day)
    }
}

impl_text_value!(PartialDate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FP0071, FP0072, FP0073};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_precisions() {
        assert_eq!(PartialDate::parse("2020").unwrap().precision(), TemporalPrecision::Year);
        assert_eq!(PartialDate::parse("2020-01").unwrap().precision(), TemporalPrecision::Month);
        assert_eq!(PartialDate::parse("2020-01-15").unwrap().precision(), TemporalPrecision::Day);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(PartialDate::parse("2020-13-01").unwrap_err().error_code(), &FP0072);
        assert_eq!(PartialDate::parse("2020-01-32").unwrap_err().error_code(), &FP0071);
        assert_eq!(PartialDate::parse("0000").unwrap_err().error_code(), &FP0073);
        assert_eq!(PartialDate::parse("").unwrap_err().error_code(), &FP0070);
        assert_eq!(PartialDate::parse("2020-1-1").unwrap_err().error_code(), &FP0070);
    }

    #[test]
    fn test_gated_accessors() {
        let year = PartialDate::parse("2020").unwrap();
        assert_eq!(year.year(), 2020);
        assert_eq!(year.month(), None);
        assert_eq!(year.day(), None);

        let day = PartialDate::parse("2020-03-04").unwrap();
        assert_eq!(day.month(), Some(3));
        assert_eq!(day.day(), Some(4));
    }

    #[test]
    fn test_new_from_optional_components() {
        let date = PartialDate::new(2020, Some(2), None).unwrap();
        assert_eq!(date.to_canonical_text(), "2020-02");
        assert_eq!(date.original_text(), "2020-02");
        assert!(PartialDate::new(2020, None, Some(3)).is_err());
        assert!(PartialDate::new(2021, Some(2), Some(29)).is_err());
    }

    #[test]
    fn test_from_components_rejects_time_precision() {
        let err = PartialDate::from_components(TemporalParts::date(2020, 1, 1), TemporalPrecision::Hour)
            .unwrap_err();
        assert_eq!(err.error_code(), &FP0070);
    }

    #[test]
    fn test_boundaries() {
        let date = PartialDate::parse("2020-02").unwrap();
        assert_eq!(date.low_boundary().unwrap().to_canonical_text(), "2020-02-01");
        assert_eq!(date.high_boundary().unwrap().to_canonical_text(), "2020-02-29");
        assert_eq!(
            PartialDate::parse("2021").unwrap().high_boundary().unwrap().to_canonical_text(),
            "2021-12-31"
        );
    }

    #[test]
    fn test_try_from_naive_date() {
        let date = PartialDate::try_from(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()).unwrap();
        assert_eq!(date.to_string(), "2024-07-04");
    }

    #[test]
    fn test_today_has_day_precision() {
        let today = PartialDate::today();
        assert_eq!(today.precision(), TemporalPrecision::Day);
        assert!(today.day().is_some());
    }
}
