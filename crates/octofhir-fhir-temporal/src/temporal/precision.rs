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

//! Precision levels and temporal kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precision levels for temporal values
///
/// Dates use `Year..=Day`, times use `Hour..=Fraction` and dateTimes span the
/// whole range, with `Day` and `Hour` adjacent in the combined ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TemporalPrecision {
    /// Year precision (YYYY)
    Year,
    /// Month precision (YYYY-MM)
    Month,
    /// Day precision (YYYY-MM-DD)
    Day,
    /// Hour precision (HH)
    Hour,
    /// Minute precision (HH:MM)
    Minute,
    /// Second precision (HH:MM:SS)
    Second,
    /// Fractional second precision (HH:MM:SS.fff...)
    Fraction,
}

impl TemporalPrecision {
    /// All precisions from coarsest to finest
    pub const ALL: [TemporalPrecision; 7] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Fraction,
    ];

    /// Whether this precision belongs to the date part
    pub fn is_date_precision(&self) -> bool {
        *self <= Self::Day
    }

    /// Whether this precision belongs to the time part
    pub fn is_time_precision(&self) -> bool {
        *self >= Self::Hour
    }

    /// The finer of two precisions
    pub fn finer(self, other: Self) -> Self {
        self.max(other)
    }

    /// Number of significant digits of a dateTime at this precision,
    /// assuming millisecond fractions
    pub fn precision_digits(&self) -> i64 {
        match self {
            Self::Year => 4,      // YYYY
            Self::Month => 6,     // YYYY-MM (ignoring separator)
            Self::Day => 8,       // YYYY-MM-DD (ignoring separators)
            Self::Hour => 10,     // YYYY-MM-DDTHH (ignoring separators)
            Self::Minute => 12,   // YYYY-MM-DDTHH:MM (ignoring separators)
            Self::Second => 14,   // YYYY-MM-DDTHH:MM:SS (ignoring separators)
            Self::Fraction => 17, // YYYY-MM-DDTHH:MM:SS.sss (ignoring separators)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Fraction => "fraction",
        }
    }
}

impl fmt::Display for TemporalPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemporalPrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            "fraction" | "millisecond" => Ok(Self::Fraction),
            _ => Err(format!("Invalid temporal precision: {s}")),
        }
    }
}

/// Components walked by the comparison engine, coarsest first
///
/// Seconds and fraction form one component: `10:00:00` and `10:00:00.0`
/// carry the same seconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemporalComponent {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TemporalComponent {
    /// Date components in walk order
    pub const DATE: &'static [TemporalComponent] = &[Self::Year, Self::Month, Self::Day];

    /// Time components in walk order
    pub const TIME: &'static [TemporalComponent] = &[Self::Hour, Self::Minute, Self::Second];

    /// DateTime components in walk order
    pub const DATE_TIME: &'static [TemporalComponent] = &[
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Coarsest precision at which this component has a value
    pub fn precision(&self) -> TemporalPrecision {
        match self {
            Self::Year => TemporalPrecision::Year,
            Self::Month => TemporalPrecision::Month,
            Self::Day => TemporalPrecision::Day,
            Self::Hour => TemporalPrecision::Hour,
            Self::Minute => TemporalPrecision::Minute,
            Self::Second => TemporalPrecision::Second,
        }
    }

    /// Whether a value at `precision` defines this component
    pub fn is_defined_at(&self, precision: TemporalPrecision) -> bool {
        precision >= self.precision()
    }
}

/// The three concrete partial-value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
}

impl TemporalKind {
    /// Coarsest precision a value of this kind can carry
    pub fn coarsest_precision(&self) -> TemporalPrecision {
        match self {
            Self::Date | Self::DateTime => TemporalPrecision::Year,
            Self::Time => TemporalPrecision::Hour,
        }
    }

    /// Finest precision a value of this kind can carry
    pub fn finest_precision(&self) -> TemporalPrecision {
        match self {
            Self::Date => TemporalPrecision::Day,
            Self::Time | Self::DateTime => TemporalPrecision::Fraction,
        }
    }

    /// Whether `precision` is meaningful for this kind
    pub fn supports(&self, precision: TemporalPrecision) -> bool {
        (self.coarsest_precision()..=self.finest_precision()).contains(&precision)
    }

    /// FHIR type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for TemporalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "datetime" | "date-time" => Ok(Self::DateTime),
            _ => Err(format!("Invalid temporal kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_precision_ordering() {
        assert!(TemporalPrecision::Year < TemporalPrecision::Month);
        assert!(TemporalPrecision::Day < TemporalPrecision::Hour);
        assert!(TemporalPrecision::Second < TemporalPrecision::Fraction);
        assert_eq!(
            TemporalPrecision::Day.finer(TemporalPrecision::Minute),
            TemporalPrecision::Minute
        );
    }

    #[test]
    fn test_precision_digits() {
        assert_eq!(TemporalPrecision::Year.precision_digits(), 4);
        assert_eq!(TemporalPrecision::Month.precision_digits(), 6);
        assert_eq!(TemporalPrecision::Day.precision_digits(), 8);
        assert_eq!(TemporalPrecision::Second.precision_digits(), 14);
        assert_eq!(TemporalPrecision::Fraction.precision_digits(), 17);
    }

    #[test]
    fn test_component_definition() {
        assert!(TemporalComponent::Second.is_defined_at(TemporalPrecision::Fraction));
        assert!(!TemporalComponent::Day.is_defined_at(TemporalPrecision::Month));
        assert!(TemporalComponent::Year.is_defined_at(TemporalPrecision::Year));
        assert_eq!(TemporalComponent::DATE_TIME.len(), 6);
    }

    #[test]
    fn test_kind_supports() {
        assert!(TemporalKind::Date.supports(TemporalPrecision::Day));
        assert!(!TemporalKind::Date.supports(TemporalPrecision::Hour));
        assert!(!TemporalKind::Time.supports(TemporalPrecision::Day));
        assert!(TemporalKind::DateTime.supports(TemporalPrecision::Year));
        assert!(TemporalKind::DateTime.supports(TemporalPrecision::Fraction));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Month".parse::<TemporalPrecision>(), Ok(TemporalPrecision::Month));
        assert_eq!("millisecond".parse::<TemporalPrecision>(), Ok(TemporalPrecision::Fraction));
        assert_eq!("dateTime".parse::<TemporalKind>(), Ok(TemporalKind::DateTime));
        assert!("week".parse::<TemporalPrecision>().is_err());
    }
}
