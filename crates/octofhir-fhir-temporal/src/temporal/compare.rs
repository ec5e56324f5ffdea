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

//! Precision-aware three-valued comparison
//!
//! Values are compared component by component from the coarsest down. A
//! difference decides the order, running out of components on both sides
//! means equal, and running out on one side only means the values cannot be
//! ordered at their precisions.
//!
//! When both operands carry an offset the components are taken in UTC.
//! Otherwise wall-clock components are compared directly: reading the
//! offset-less operand at the other's offset shifts both by the same amount,
//! and skipping the shift keeps a coarse value from being moved by a fraction
//! of its own precision (`2020-01-15T10` vs `2020-01-15T10:45+05:30` stays
//! incomparable).
//!
//! An hour-precision value whose offset is not a whole number of hours
//! covers an hour that straddles two UTC hours. Such comparisons use the
//! UTC spans both operands cover instead of the component walk: disjoint
//! spans are ordered, identical spans are equal and overlapping spans are
//! incomparable.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::offset::UtcOffset;
use super::parts::TemporalParts;
use super::precision::{TemporalComponent, TemporalKind, TemporalPrecision};
use crate::core::{Result, TemporalError};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND as i128;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

/// Outcome of comparing two partial values of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonResult {
    Less,
    Equal,
    Greater,
    /// The precisions do not overlap far enough to decide
    Incomparable,
}

impl ComparisonResult {
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }

    /// The ordering, `None` when incomparable
    pub fn to_ordering(self) -> Option<Ordering> {
        match self {
            Self::Less => Some(Ordering::Less),
            Self::Equal => Some(Ordering::Equal),
            Self::Greater => Some(Ordering::Greater),
            Self::Incomparable => None,
        }
    }

    /// Equality outcome: `Some(true)` when equal, `Some(false)` when ordered
    /// apart and `None` when undetermined
    pub fn to_equality(self) -> Option<bool> {
        self.to_ordering().map(Ordering::is_eq)
    }

    pub fn is_incomparable(self) -> bool {
        self == Self::Incomparable
    }

    /// Swap the operands
    pub fn reverse(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::Greater => Self::Less,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Less => "less",
            Self::Equal => "equal",
            Self::Greater => "greater",
            Self::Incomparable => "incomparable",
        }
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial temporal value the comparison engine can walk
///
/// Implementors supply their component extraction and the components their
/// kind walks; comparison, equality and the ordering operators are shared.
pub trait TemporalValue: fmt::Display {
    /// The concrete kind
    const KIND: TemporalKind;

    /// Components compared, coarsest first
    const COMPONENTS: &'static [TemporalComponent];

    /// Finest component present in the value
    fn precision(&self) -> TemporalPrecision;

    /// Explicit offset, `None` when the text carried none
    fn offset(&self) -> Option<UtcOffset>;

    /// Components in UTC (`in_utc`) or as written
    fn parts(&self, in_utc: bool) -> TemporalParts;

    /// Three-valued comparison
    fn try_compare(&self, other: &Self) -> ComparisonResult
    where
        Self: Sized,
    {
        compare(self, other)
    }

    /// Equality that reports `None` when precisions prevent a decision
    fn try_equals(&self, other: &Self) -> Option<bool>
    where
        Self: Sized,
    {
        self.try_compare(other).to_equality()
    }

    /// Equivalence: undetermined equality counts as not equivalent
    fn is_equivalent(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.try_equals(other) == Some(true)
    }

    /// `self < other`, failing when the values cannot be ordered
    fn try_lt(&self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        checked_ordering(self, other).map(Ordering::is_lt)
    }

    /// `self <= other`, failing when the values cannot be ordered
    fn try_le(&self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        checked_ordering(self, other).map(Ordering::is_le)
    }

    /// `self > other`, failing when the values cannot be ordered
    fn try_gt(&self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        checked_ordering(self, other).map(Ordering::is_gt)
    }

    /// `self >= other`, failing when the values cannot be ordered
    fn try_ge(&self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        checked_ordering(self, other).map(Ordering::is_ge)
    }
}

/// Compare two values of the same kind
pub fn try_compare<T: TemporalValue>(left: &T, right: &T) -> ComparisonResult {
    left.try_compare(right)
}

/// Equality of two values of the same kind, `None` when undetermined
pub fn try_equals<T: TemporalValue>(left: &T, right: &T) -> Option<bool> {
    left.try_equals(right)
}

fn compare<T: TemporalValue>(left: &T, right: &T) -> ComparisonResult {
    let in_utc = left.offset().is_some() && right.offset().is_some();
    let (left_parts, right_parts) = (left.parts(in_utc), right.parts(in_utc));
    let (left_precision, right_precision) = (left.precision(), right.precision());

    let by_span = in_utc
        && left_precision.is_time_precision()
        && right_precision.is_time_precision()
        && (straddles_utc_hour(left) || straddles_utc_hour(right));
    let result = if by_span {
        match (
            utc_span(&left_parts, left_precision),
            utc_span(&right_parts, right_precision),
        ) {
            (Some(lhs), Some(rhs)) => compare_spans(lhs, rhs),
            _ => ComparisonResult::Incomparable,
        }
    } else {
        walk_components(
            T::COMPONENTS,
            (&left_parts, left_precision),
            (&right_parts, right_precision),
        )
    };

    log::trace!("{} '{left}' vs '{right}': {result}", T::KIND);
    result
}

fn walk_components(
    components: &[TemporalComponent],
    (left_parts, left_precision): (&TemporalParts, TemporalPrecision),
    (right_parts, right_precision): (&TemporalParts, TemporalPrecision),
) -> ComparisonResult {
    for &component in components {
        let lhs = component_value(left_parts, component, left_precision);
        let rhs = component_value(right_parts, component, right_precision);
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) if lhs == rhs => continue,
            (Some(lhs), Some(rhs)) => return ComparisonResult::from_ordering(lhs.cmp(&rhs)),
            (None, None) => return ComparisonResult::Equal,
            _ => return ComparisonResult::Incomparable,
        }
    }
    ComparisonResult::Equal
}

/// Hour precision at an offset with non-zero minutes
fn straddles_utc_hour<T: TemporalValue>(value: &T) -> bool {
    value.precision() < TemporalPrecision::Minute
        && value
            .offset()
            .is_some_and(|offset| offset.local_minus_utc() % 3600 != 0)
}

/// Inclusive nanosecond range a value covers on the UTC timeline
///
/// Seconds and fractions are points, matching the decimal treatment of the
/// seconds component in the walk.
fn utc_span(parts: &TemporalParts, precision: TemporalPrecision) -> Option<(i128, i128)> {
    let days = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)?.num_days_from_ce();
    let start = i128::from(days) * NANOS_PER_DAY
        + i128::from(parts.hour) * NANOS_PER_HOUR
        + i128::from(parts.minute) * NANOS_PER_MINUTE
        + i128::from(parts.second) * i128::from(NANOS_PER_SECOND)
        + i128::from(parts.nanosecond);
    let width = match precision {
        TemporalPrecision::Hour => NANOS_PER_HOUR - 1,
        TemporalPrecision::Minute => NANOS_PER_MINUTE - 1,
        _ => 0,
    };
    Some((start, start + width))
}

fn compare_spans(
    (left_low, left_high): (i128, i128),
    (right_low, right_high): (i128, i128),
) -> ComparisonResult {
    if left_high < right_low {
        ComparisonResult::Less
    } else if left_low > right_high {
        ComparisonResult::Greater
    } else if left_low == right_low && left_high == right_high {
        ComparisonResult::Equal
    } else {
        ComparisonResult::Incomparable
    }
}

/// Value of `component`, `None` when `precision` does not reach it
fn component_value(
    parts: &TemporalParts,
    component: TemporalComponent,
    precision: TemporalPrecision,
) -> Option<i64> {
    if !component.is_defined_at(precision) {
        return None;
    }
    let value = match component {
        TemporalComponent::Year => i64::from(parts.year),
        TemporalComponent::Month => i64::from(parts.month),
        TemporalComponent::Day => i64::from(parts.day),
        TemporalComponent::Hour => i64::from(parts.hour),
        TemporalComponent::Minute => i64::from(parts.minute),
        TemporalComponent::Second => {
            i64::from(parts.second) * NANOS_PER_SECOND + i64::from(parts.nanosecond)
        }
    };
    Some(value)
}

fn checked_ordering<T: TemporalValue>(left: &T, right: &T) -> Result<Ordering> {
    left.try_compare(right)
        .to_ordering()
        .ok_or_else(|| TemporalError::incomparable(left.to_string(), right.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{PartialDate, PartialDateTime, PartialTime};
    use pretty_assertions::assert_eq;

    fn date(text: &str) -> PartialDate {
        PartialDate::parse(text).unwrap()
    }

    fn time(text: &str) -> PartialTime {
        PartialTime::parse(text).unwrap()
    }

    fn date_time(text: &str) -> PartialDateTime {
        PartialDateTime::parse(text).unwrap()
    }

    #[test]
    fn test_result_conversions() {
        assert_eq!(ComparisonResult::Less.to_ordering(), Some(Ordering::Less));
        assert_eq!(ComparisonResult::Incomparable.to_ordering(), None);
        assert_eq!(ComparisonResult::Equal.to_equality(), Some(true));
        assert_eq!(ComparisonResult::Greater.to_equality(), Some(false));
        assert_eq!(ComparisonResult::Incomparable.to_equality(), None);
        assert_eq!(ComparisonResult::Less.reverse(), ComparisonResult::Greater);
        assert_eq!(ComparisonResult::Incomparable.to_string(), "incomparable");
    }

    #[test]
    fn test_date_walk() {
        assert_eq!(try_compare(&date("2020-01-15"), &date("2020-01-16")), ComparisonResult::Less);
        assert_eq!(try_compare(&date("2021"), &date("2020-12-31")), ComparisonResult::Greater);
        assert_eq!(try_compare(&date("2020-01"), &date("2020-01-15")), ComparisonResult::Incomparable);
        assert_eq!(try_compare(&date("2020-02"), &date("2020-01-15")), ComparisonResult::Greater);
        assert_eq!(try_compare(&date("2020"), &date("2020")), ComparisonResult::Equal);
    }

    #[test]
    fn test_seconds_and_fraction_are_one_component() {
        assert_eq!(try_compare(&time("10:00:00"), &time("10:00:00.0")), ComparisonResult::Equal);
        assert_eq!(try_compare(&time("10:00:00"), &time("10:00:00.5")), ComparisonResult::Less);
        assert_eq!(try_compare(&time("10:00"), &time("10:00:00")), ComparisonResult::Incomparable);
    }

    #[test]
    fn test_offsets_normalize_to_utc() {
        assert_eq!(
            try_equals(&date_time("2020-01-15T10:00:00Z"), &date_time("2020-01-15T12:00:00+02:00")),
            Some(true)
        );
        assert_eq!(
            try_compare(&date_time("2020-01-15T23:00:00-02:00"), &date_time("2020-01-16T00:30:00Z")),
            ComparisonResult::Greater
        );
        assert_eq!(try_equals(&time("10:00Z"), &time("11:00+01:00")), Some(true));
    }

    #[test]
    fn test_one_sided_offset_compares_wall_clock() {
        assert_eq!(
            try_compare(&date_time("2020-01-15T10:00:00"), &date_time("2020-01-15T10:00:00+05:00")),
            ComparisonResult::Equal
        );
    }

    #[test]
    fn test_half_hour_offset_spans_two_utc_hours() {
        let coarse = date_time("2020-01-15T10+05:30");
        assert_eq!(try_compare(&coarse, &date_time("2020-01-15T04Z")), ComparisonResult::Incomparable);
        assert_eq!(
            try_compare(&coarse, &date_time("2020-01-15T05:10Z")),
            ComparisonResult::Incomparable
        );
        assert_eq!(try_compare(&coarse, &date_time("2020-01-15T03Z")), ComparisonResult::Greater);
        assert_eq!(try_compare(&coarse, &date_time("2020-01-15T05:30Z")), ComparisonResult::Less);
        assert_eq!(try_compare(&coarse, &date_time("2020-01-15T11+06:30")), ComparisonResult::Equal);
    }

    #[test]
    fn test_span_comparison() {
        assert_eq!(compare_spans((0, 9), (10, 19)), ComparisonResult::Less);
        assert_eq!(compare_spans((10, 19), (0, 9)), ComparisonResult::Greater);
        assert_eq!(compare_spans((0, 9), (0, 9)), ComparisonResult::Equal);
        assert_eq!(compare_spans((0, 9), (5, 5)), ComparisonResult::Incomparable);
        assert_eq!(compare_spans((0, 9), (5, 14)), ComparisonResult::Incomparable);
    }

    #[test]
    fn test_ordering_operators() {
        let early = date("2020-01-15");
        let late = date("2020-01-16");
        assert!(early.try_lt(&late).unwrap());
        assert!(early.try_le(&early).unwrap());
        assert!(!early.try_gt(&late).unwrap());
        assert!(late.try_ge(&early).unwrap());

        let err = date("2020-01").try_lt(&early).unwrap_err();
        assert!(err.is_incomparable());
    }

    #[test]
    fn test_equivalence_collapses_undetermined() {
        assert!(date("2020-01").is_equivalent(&date("2020-01")));
        assert!(!date("2020-01").is_equivalent(&date("2020-01-15")));
        assert_eq!(date("2020-01").try_equals(&date("2020-01-15")), None);
    }
}
