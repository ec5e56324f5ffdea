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

//! A partial value of any kind, for callers that only learn the kind at runtime

use std::cmp::Ordering;

use super::compare::{ComparisonResult, TemporalValue};
use super::date::PartialDate;
use super::datetime::PartialDateTime;
use super::duration::CalendarDuration;
use super::offset::UtcOffset;
use super::precision::{TemporalKind, TemporalPrecision};
use super::time::PartialTime;
use crate::config::ParseOptions;
use crate::core::{Result, TemporalError};

/// A date, time or dateTime
///
/// Comparing two values of different kinds is a type mismatch, never an
/// incomparable outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartialTemporal {
    Date(PartialDate),
    Time(PartialTime),
    DateTime(PartialDateTime),
}

impl PartialTemporal {
    /// Parse, detecting the kind from the shape of the text
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse with explicit options, detecting the kind from the shape of the text
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let kind = Self::detect_kind(options.prepare(text));
        Self::parse_as_with(kind, text, options)
    }

    /// Parse as a given kind
    pub fn parse_as(kind: TemporalKind, text: &str) -> Result<Self> {
        Self::parse_as_with(kind, text, &ParseOptions::default())
    }

    /// Parse as a given kind with explicit options
    pub fn parse_as_with(kind: TemporalKind, text: &str, options: &ParseOptions) -> Result<Self> {
        Ok(match kind {
            TemporalKind::Date => Self::Date(PartialDate::parse_with(text, options)?),
            TemporalKind::Time => Self::Time(PartialTime::parse_with(text, options)?),
            TemporalKind::DateTime => Self::DateTime(PartialDateTime::parse_with(text, options)?),
        })
    }

    /// Guess the kind of `text`
    ///
    /// A `T` means a dateTime. Two leading digits not followed by a third
    /// digit mean a time. Anything else is read as a date.
    pub fn detect_kind(text: &str) -> TemporalKind {
        let bytes = text.as_bytes();
        if text.contains('T') {
            TemporalKind::DateTime
        } else if bytes.len() >= 2
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes.get(2).is_none_or(|byte| !byte.is_ascii_digit())
        {
            TemporalKind::Time
        } else {
            TemporalKind::Date
        }
    }

    /// Current value of the given kind
    pub fn now(kind: TemporalKind) -> Self {
        match kind {
            TemporalKind::Date => Self::Date(PartialDate::today()),
            TemporalKind::Time => Self::Time(PartialTime::now()),
            TemporalKind::DateTime => Self::DateTime(PartialDateTime::now()),
        }
    }

    pub fn kind(&self) -> TemporalKind {
        match self {
            Self::Date(_) => TemporalKind::Date,
            Self::Time(_) => TemporalKind::Time,
            Self::DateTime(_) => TemporalKind::DateTime,
        }
    }

    pub fn precision(&self) -> TemporalPrecision {
        match self {
            Self::Date(value) => value.precision(),
            Self::Time(value) => value.precision(),
            Self::DateTime(value) => value.precision(),
        }
    }

    pub fn offset(&self) -> Option<UtcOffset> {
        match self {
            Self::Date(_) => None,
            Self::Time(value) => value.offset(),
            Self::DateTime(value) => value.offset(),
        }
    }

    pub fn original_text(&self) -> &str {
        match self {
            Self::Date(value) => value.original_text(),
            Self::Time(value) => value.original_text(),
            Self::DateTime(value) => value.original_text(),
        }
    }

    pub fn to_canonical_text(&self) -> String {
        match self {
            Self::Date(value) => value.to_canonical_text(),
            Self::Time(value) => value.to_canonical_text(),
            Self::DateTime(value) => value.to_canonical_text(),
        }
    }

    pub fn precision_digits(&self) -> i64 {
        match self {
            Self::Date(value) => value.precision_digits(),
            Self::Time(value) => value.precision_digits(),
            Self::DateTime(value) => value.precision_digits(),
        }
    }

    pub fn as_date(&self) -> Option<&PartialDate> {
        match self {
            Self::Date(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&PartialTime> {
        match self {
            Self::Time(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&PartialDateTime> {
        match self {
            Self::DateTime(value) => Some(value),
            _ => None,
        }
    }

    /// Three-valued comparison, failing when the kinds differ
    pub fn try_compare(&self, other: &Self) -> Result<ComparisonResult> {
        match (self, other) {
            (Self::Date(left), Self::Date(right)) => Ok(left.try_compare(right)),
            (Self::Time(left), Self::Time(right)) => Ok(left.try_compare(right)),
            (Self::DateTime(left), Self::DateTime(right)) => Ok(left.try_compare(right)),
            _ => Err(TemporalError::type_mismatch(self.kind(), other.kind())),
        }
    }

    /// Equality, `Ok(None)` when undetermined and an error when the kinds differ
    pub fn try_equals(&self, other: &Self) -> Result<Option<bool>> {
        self.try_compare(other).map(ComparisonResult::to_equality)
    }

    /// Equivalence; values of different kinds are never equivalent
    pub fn is_equivalent(&self, other: &Self) -> bool {
        matches!(self.try_equals(other), Ok(Some(true)))
    }

    pub fn try_lt(&self, other: &Self) -> Result<bool> {
        self.checked_ordering(other).map(Ordering::is_lt)
    }

    pub fn try_le(&self, other: &Self) -> Result<bool> {
        self.checked_ordering(other).map(Ordering::is_le)
    }

    pub fn try_gt(&self, other: &Self) -> Result<bool> {
        self.checked_ordering(other).map(Ordering::is_gt)
    }

    pub fn try_ge(&self, other: &Self) -> Result<bool> {
        self.checked_ordering(other).map(Ordering::is_ge)
    }

    fn checked_ordering(&self, other: &Self) -> Result<Ordering> {
        self.try_compare(other)?
            .to_ordering()
            .ok_or_else(|| TemporalError::incomparable(self.original_text(), other.original_text()))
    }

    pub fn low_boundary(&self) -> Result<Self> {
        Ok(match self {
            Self::Date(value) => Self::Date(value.low_boundary()?),
            Self::Time(value) => Self::Time(value.low_boundary()?),
            Self::DateTime(value) => Self::DateTime(value.low_boundary()?),
        })
    }

    pub fn high_boundary(&self) -> Result<Self> {
        Ok(match self {
            Self::Date(value) => Self::Date(value.high_boundary()?),
            Self::Time(value) => Self::Time(value.high_boundary()?),
            Self::DateTime(value) => Self::DateTime(value.high_boundary()?),
        })
    }

    pub fn add(&self, duration: &CalendarDuration) -> Result<Self> {
        Ok(match self {
            Self::Date(value) => Self::Date(value.add(duration)?),
            Self::Time(value) => Self::Time(value.add(duration)?),
            Self::DateTime(value) => Self::DateTime(value.add(duration)?),
        })
    }

    pub fn subtract(&self, duration: &CalendarDuration) -> Result<Self> {
        self.add(&duration.negate())
    }
}

impl From<PartialDate> for PartialTemporal {
    fn from(value: PartialDate) -> Self {
        Self::Date(value)
    }
}

impl From<PartialTime> for PartialTemporal {
    fn from(value: PartialTime) -> Self {
        Self::Time(value)
    }
}

impl From<PartialDateTime> for PartialTemporal {
    fn from(value: PartialDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl_text_value!(@text PartialTemporal);
