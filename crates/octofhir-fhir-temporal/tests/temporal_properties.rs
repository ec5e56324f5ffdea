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

//! Behaviour of partial values through the public API

use octofhir_fhir_temporal::prelude::*;
use octofhir_fhir_temporal::{try_compare, try_equals};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("2020")]
#[case("2020-01")]
#[case("2020-01-15")]
#[case("1999-12-31")]
fn canonical_date_round_trips(#[case] text: &str) {
    assert_eq!(PartialDate::parse(text).unwrap().to_canonical_text(), text);
}

#[rstest]
#[case("10")]
#[case("10:30")]
#[case("10:30:15")]
#[case("10:30:15.1")]
#[case("10:30:15.123456789")]
#[case("10:30Z")]
#[case("00:00:00.000-11:30")]
fn canonical_time_round_trips(#[case] text: &str) {
    assert_eq!(PartialTime::parse(text).unwrap().to_canonical_text(), text);
}

#[rstest]
#[case("2020")]
#[case("2020-01-15")]
#[case("2020-01-15T10")]
#[case("2020-01-15T10Z")]
#[case("2020-01-15T10:30+05:30")]
#[case("2020-01-15T10:30:00")]
#[case("2020-01-15T10:30:00.250Z")]
fn canonical_date_time_round_trips(#[case] text: &str) {
    let value = PartialDateTime::parse(text).unwrap();
    assert_eq!(value.to_canonical_text(), text);
    assert_eq!(PartialDateTime::parse(&value.to_canonical_text()).unwrap(), value);
}

#[test]
fn precision_is_monotonic_in_components() {
    let year = PartialDate::parse("2020").unwrap().precision();
    let month = PartialDate::parse("2020-01").unwrap().precision();
    let day = PartialDate::parse("2020-01-15").unwrap().precision();
    assert!(year < month);
    assert!(month < day);
}

#[rstest]
#[case("2020")]
#[case("2020-06-30T23:59:59.999+14:00")]
#[case("2020-06-30T10")]
#[case("2020-02")]
fn equality_is_reflexive(#[case] text: &str) {
    let value = PartialDateTime::parse(text).unwrap();
    assert_eq!(value.try_equals(&value), Some(true));
}

#[rstest]
#[case("2020")]
#[case("2020-02")]
#[case("2020-02-29")]
fn date_equality_is_reflexive(#[case] text: &str) {
    let value = PartialDate::parse(text).unwrap();
    assert_eq!(value.try_equals(&value), Some(true));
}

#[rstest]
#[case("10")]
#[case("10:30")]
#[case("10:30:15.250")]
#[case("10+05:30")]
#[case("23:59:59.999-11:00")]
fn time_equality_is_reflexive(#[case] text: &str) {
    let value = PartialTime::parse(text).unwrap();
    assert_eq!(value.try_equals(&value), Some(true));
}

#[test]
fn accepted_leap_seconds_equal_themselves() {
    let options = ParseOptions::default().with_leap_second(LeapSecondPolicy::Accept);
    let time = PartialTime::parse_with("23:59:60Z", &options).unwrap();
    assert_eq!(time.try_equals(&time), Some(true));

    let date_time = PartialDateTime::parse_with("2016-12-31T23:59:60.5+01:00", &options).unwrap();
    assert_eq!(date_time.try_equals(&date_time), Some(true));
}

#[test]
fn partial_month_and_full_day_are_incomparable() {
    let month = PartialDate::parse("2020-01").unwrap();
    let day = PartialDate::parse("2020-01-15").unwrap();
    assert_eq!(try_compare(&month, &day), ComparisonResult::Incomparable);
    assert_eq!(try_equals(&month, &day), None);
}

#[test]
fn offsets_are_normalized_before_comparing() {
    let utc = PartialDateTime::parse("2020-01-15T10:00:00Z").unwrap();
    let plus_two = PartialDateTime::parse("2020-01-15T12:00:00+02:00").unwrap();
    assert_eq!(try_equals(&utc, &plus_two), Some(true));
    // Structural identity still follows the original text
    assert_ne!(utc, plus_two);
}

#[test]
fn hour_at_half_hour_offset_overlaps_two_utc_hours() {
    // 10+05:30 covers 04:30Z to 05:29Z
    let coarse = PartialDateTime::parse("2020-01-15T10+05:30").unwrap();
    let overlapping = PartialDateTime::parse("2020-01-15T04Z").unwrap();
    let inside = PartialDateTime::parse("2020-01-15T05:10Z").unwrap();
    assert_eq!(try_compare(&coarse, &overlapping), ComparisonResult::Incomparable);
    assert_eq!(try_compare(&coarse, &inside), ComparisonResult::Incomparable);
    assert_eq!(try_compare(&inside, &coarse), ComparisonResult::Incomparable);
    assert!(coarse.try_lt(&inside).unwrap_err().is_incomparable());

    let after = PartialDateTime::parse("2020-01-15T06Z").unwrap();
    let same_span = PartialDateTime::parse("2020-01-15T11+06:30").unwrap();
    assert_eq!(try_compare(&coarse, &after), ComparisonResult::Less);
    assert_eq!(try_equals(&coarse, &same_span), Some(true));
}

#[test]
fn time_hour_at_half_hour_offset_overlaps_two_utc_hours() {
    let coarse = PartialTime::parse("10+05:30").unwrap();
    assert_eq!(
        try_compare(&coarse, &PartialTime::parse("04Z").unwrap()),
        ComparisonResult::Incomparable
    );
    assert_eq!(
        try_compare(&coarse, &PartialTime::parse("05:00:00Z").unwrap()),
        ComparisonResult::Incomparable
    );
    assert_eq!(
        try_compare(&coarse, &PartialTime::parse("06Z").unwrap()),
        ComparisonResult::Less
    );
    assert_eq!(
        try_compare(&coarse, &PartialTime::parse("03:59Z").unwrap()),
        ComparisonResult::Greater
    );
}

#[test]
fn one_sided_offset_keeps_coarse_hour_incomparable() {
    let coarse = PartialDateTime::parse("2020-01-15T10").unwrap();
    let fine = PartialDateTime::parse("2020-01-15T10:45+05:30").unwrap();
    assert_eq!(try_compare(&coarse, &fine), ComparisonResult::Incomparable);
    assert_eq!(try_equals(&fine, &coarse), None);
}

#[test]
fn boundaries_keep_offset_and_kind() {
    let time = PartialTemporal::parse("10+05:30").unwrap();
    assert_eq!(time.low_boundary().unwrap().to_canonical_text(), "10:00:00.000+05:30");
    assert_eq!(time.high_boundary().unwrap().to_canonical_text(), "10:59:59.999+05:30");

    let last_year = PartialDate::parse("9999").unwrap();
    assert_eq!(last_year.high_boundary().unwrap().to_canonical_text(), "9999-12-31");

    let latest = PartialDateTime::parse("9999-12-31T23-12:00").unwrap();
    assert_eq!(
        latest.high_boundary().unwrap().to_canonical_text(),
        "9999-12-31T23:59:59.999-12:00"
    );
}

#[test]
fn strict_ordering_of_days() {
    let first = PartialDate::parse("2020-01-15").unwrap();
    let second = PartialDate::parse("2020-01-16").unwrap();
    assert_eq!(try_compare(&first, &second), ComparisonResult::Less);
    assert_eq!(try_compare(&second, &first), ComparisonResult::Greater);
}

#[rstest]
#[case::invalid_month("2020-13-01")]
#[case::invalid_day("2020-01-32")]
#[case::month_zero("2020-00")]
#[case::day_zero("2020-01-00")]
#[case::april_31("2021-04-31")]
#[case::not_leap("2019-02-29")]
fn invalid_dates_are_parse_errors(#[case] text: &str) {
    assert!(PartialDate::parse(text).unwrap_err().is_parse_error());
}

#[rstest]
#[case("25:00:00")]
#[case("24")]
#[case("12:60")]
#[case("12:00:60")]
fn invalid_times_are_parse_errors(#[case] text: &str) {
    assert!(PartialTime::parse(text).unwrap_err().is_parse_error());
}

#[test]
fn comparing_date_with_time_is_a_type_mismatch() {
    let date = PartialTemporal::parse("2020-01-15").unwrap();
    let time = PartialTemporal::parse("10:00:00").unwrap();
    let err = date.try_compare(&time).unwrap_err();
    assert!(err.is_type_mismatch());
    assert!(!err.is_incomparable());
}

#[test]
fn components_are_gated_by_precision() {
    let year = PartialDateTime::parse("2020").unwrap();
    assert_eq!(year.year(), 2020);
    assert_eq!(year.month(), None);
    assert_eq!(year.second(), None);
    assert_eq!(year.millisecond(), None);
    assert_eq!(year.offset(), None);
}

#[test]
fn ordering_operators_report_incomparable_values() {
    let coarse = PartialDateTime::parse("2020-01-15T10").unwrap();
    let fine = PartialDateTime::parse("2020-01-15T10:30").unwrap();
    assert!(coarse.try_lt(&fine).unwrap_err().is_incomparable());

    let later = PartialDateTime::parse("2020-01-15T11:00").unwrap();
    assert!(coarse.try_lt(&later).unwrap());
    assert!(fine.try_lt(&later).unwrap());
}

#[test]
fn coarse_difference_decides_before_precision() {
    let year = PartialDateTime::parse("2019").unwrap();
    let instant = PartialDateTime::parse("2020-01-15T10:30:00Z").unwrap();
    assert_eq!(try_compare(&year, &instant), ComparisonResult::Less);
}

#[test]
fn time_offsets_wrap_around_midnight() {
    let late = PartialTime::parse("23:30-02:00").unwrap();
    let early = PartialTime::parse("01:30Z").unwrap();
    assert_eq!(try_equals(&late, &early), Some(true));
}

#[test]
fn options_control_trimming_and_fraction_digits() {
    let options = ParseOptions::new().with_trim(true).with_max_fraction_digits(3);
    let value = PartialTime::parse_with("  10:00:00.123456 ", &options).unwrap();
    assert_eq!(value.to_canonical_text(), "10:00:00.123");
    assert!(PartialTime::parse(" 10:00").is_err());
}

#[test]
fn serde_uses_the_text_form() {
    let date = PartialDate::parse("2020-02").unwrap();
    assert_eq!(serde_json::to_string(&date).unwrap(), "\"2020-02\"");

    let parsed: PartialDateTime = serde_json::from_str("\"2020-01-15T10:00Z\"").unwrap();
    assert_eq!(parsed.precision(), TemporalPrecision::Minute);
    assert!(serde_json::from_str::<PartialDate>("\"2020-13\"").is_err());
}
