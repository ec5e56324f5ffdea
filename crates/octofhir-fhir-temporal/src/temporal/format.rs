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

//! Canonical text rendering
//!
//! The canonical form writes exactly the components implied by the precision,
//! followed by the offset when one is present. Parsing a canonical text gives
//! back a value with the same components.

use std::fmt::{self, Write};

use super::offset::UtcOffset;
use super::parts::TemporalParts;
use super::precision::{TemporalKind, TemporalPrecision};

/// Display adapter producing the canonical text of a set of components
#[derive(Debug, Clone, Copy)]
pub struct Canonical<'a> {
    kind: TemporalKind,
    parts: &'a TemporalParts,
    precision: TemporalPrecision,
    offset: Option<UtcOffset>,
}

impl<'a> Canonical<'a> {
    pub fn new(
        kind: TemporalKind,
        parts: &'a TemporalParts,
        precision: TemporalPrecision,
        offset: Option<UtcOffset>,
    ) -> Self {
        Self {
            kind,
            parts,
            precision,
            offset,
        }
    }
}

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TemporalKind::Date => write_date(f, self.parts, self.precision),
            TemporalKind::Time => {
                write_time(f, self.parts, self.precision)?;
                write_offset(f, self.offset)
            }
            TemporalKind::DateTime => {
                write_date(f, self.parts, self.precision.min(TemporalPrecision::Day))?;
                if self.precision.is_time_precision() {
                    f.write_char('T')?;
                    write_time(f, self.parts, self.precision)?;
                    write_offset(f, self.offset)?;
                }
                Ok(())
            }
        }
    }
}

/// Render a date at `precision` (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`)
pub fn format_date(parts: &TemporalParts, precision: TemporalPrecision) -> String {
    Canonical::new(TemporalKind::Date, parts, precision, None).to_string()
}

/// Render a time at `precision` with an optional offset
pub fn format_time(
    parts: &TemporalParts,
    precision: TemporalPrecision,
    offset: Option<UtcOffset>,
) -> String {
    Canonical::new(TemporalKind::Time, parts, precision, offset).to_string()
}

/// Render a dateTime at `precision` with an optional offset
pub fn format_date_time(
    parts: &TemporalParts,
    precision: TemporalPrecision,
    offset: Option<UtcOffset>,
) -> String {
    Canonical::new(TemporalKind::DateTime, parts, precision, offset).to_string()
}

fn write_date(
    f: &mut fmt::Formatter<'_>,
    parts: &TemporalParts,
    precision: TemporalPrecision,
) -> fmt::Result {
    write!(f, "{:04}", parts.year)?;
    if precision >= TemporalPrecision::Month {
        write!(f, "-{:02}", parts.month)?;
    }
    if precision >= TemporalPrecision::Day {
        write!(f, "-{:02}", parts.day)?;
    }
    Ok(())
}

fn write_time(
    f: &mut fmt::Formatter<'_>,
    parts: &TemporalParts,
    precision: TemporalPrecision,
) -> fmt::Result {
    write!(f, "{:02}", parts.hour)?;
    if precision >= TemporalPrecision::Minute {
        write!(f, ":{:02}", parts.minute)?;
    }
    if precision >= TemporalPrecision::Second {
        write!(f, ":{:02}", parts.second)?;
    }
    if precision == TemporalPrecision::Fraction {
        let digits = parts.fraction_digits.clamp(1, 9);
        let scaled = parts.nanosecond / 10u32.pow(9 - u32::from(digits));
        write!(f, ".{scaled:0width$}", width = usize::from(digits))?;
    }
    Ok(())
}

fn write_offset(f: &mut fmt::Formatter<'_>, offset: Option<UtcOffset>) -> fmt::Result {
    match offset {
        Some(offset) => write!(f, "{offset}"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_date_precisions() {
        let parts = TemporalParts::date(2020, 1, 5);
        assert_eq!(format_date(&parts, TemporalPrecision::Year), "2020");
        assert_eq!(format_date(&parts, TemporalPrecision::Month), "2020-01");
        assert_eq!(format_date(&parts, TemporalPrecision::Day), "2020-01-05");
    }

    #[test]
    fn test_format_time_fraction_digits() {
        let parts = TemporalParts::time(9, 5, 7).with_fraction(50_000_000, 2);
        assert_eq!(format_time(&parts, TemporalPrecision::Fraction, None), "09:05:07.05");
        assert_eq!(format_time(&parts, TemporalPrecision::Second, None), "09:05:07");
        assert_eq!(format_time(&parts, TemporalPrecision::Hour, Some(UtcOffset::Utc)), "09Z");

        let nanos = TemporalParts::time(0, 0, 0).with_fraction(123_456_789, 9);
        assert_eq!(
            format_time(&nanos, TemporalPrecision::Fraction, None),
            "00:00:00.123456789"
        );
    }

    #[test]
    fn test_format_date_time() {
        let parts = TemporalParts::date(2020, 1, 15)
            .with_time(10, 30, 0)
            .with_millis(5);
        let offset = UtcOffset::from_hours_minutes(true, 5, 0);
        assert_eq!(
            format_date_time(&parts, TemporalPrecision::Fraction, offset),
            "2020-01-15T10:30:00.005-05:00"
        );
        assert_eq!(format_date_time(&parts, TemporalPrecision::Month, None), "2020-01");
        assert_eq!(
            format_date_time(&parts, TemporalPrecision::Hour, Some(UtcOffset::Utc)),
            "2020-01-15T10Z"
        );
    }

    #[test]
    fn test_leap_second_renders_as_sixty() {
        let parts = TemporalParts::time(23, 59, 60);
        assert_eq!(format_time(&parts, TemporalPrecision::Second, None), "23:59:60");
    }
}
