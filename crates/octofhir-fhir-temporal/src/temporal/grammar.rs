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

//! Lexical grammar for date, time and dateTime text
//!
//! ```text
//! date      := YYYY ( "-" MM ( "-" DD )? )?
//! time      := HH ( ":" MM ( ":" SS ( "." FRACTION )? )? )?
//! offset    := "Z" | ("+"|"-") HH ":" MM
//! datetime  := date ( "T" time offset? )?
//! ```
//!
//! Matching is anchored and case-sensitive. The patterns only check digit
//! counts: `2020-13-45` and `25:64` match lexically and are rejected later
//! by calendar normalization.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::precision::TemporalPrecision;

/// Unanchored date pattern with named groups `year`, `month`, `day`
pub const DATE_PATTERN: &str =
    r"(?P<year>[0-9]{4})(?:-(?P<month>[0-9]{2})(?:-(?P<day>[0-9]{2}))?)?";

/// Unanchored time pattern with named groups `hour`, `minute`, `second`, `fraction`
pub const TIME_PATTERN: &str = r"(?P<hour>[0-9]{2})(?::(?P<minute>[0-9]{2})(?::(?P<second>[0-9]{2})(?:\.(?P<fraction>[0-9]+))?)?)?";

/// Unanchored offset pattern with named groups `offset`, `offset_sign`,
/// `offset_hours`, `offset_minutes`
pub const OFFSET_PATTERN: &str = r"(?P<offset>Z|(?P<offset_sign>[+\-])(?P<offset_hours>[0-9]{2}):(?P<offset_minutes>[0-9]{2}))";

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| anchored(DATE_PATTERN));

static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| anchored(&format!("{TIME_PATTERN}{OFFSET_PATTERN}?")));

static DATE_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    anchored(&format!(
        "{DATE_PATTERN}(?:T{TIME_PATTERN}{OFFSET_PATTERN}?)?"
    ))
});

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{pattern}$")).expect("temporal grammar pattern is valid")
}

/// Offset as it appeared in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalOffset<'a> {
    /// The `Z` designator
    Zulu,
    /// `+HH:MM` or `-HH:MM`
    Signed {
        negative: bool,
        hours: &'a str,
        minutes: &'a str,
    },
}

/// Components captured by a successful match; absent groups are `None`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexicalMatch<'a> {
    pub year: Option<&'a str>,
    pub month: Option<&'a str>,
    pub day: Option<&'a str>,
    pub hour: Option<&'a str>,
    pub minute: Option<&'a str>,
    pub second: Option<&'a str>,
    pub fraction: Option<&'a str>,
    pub offset: Option<LexicalOffset<'a>>,
}

impl<'a> LexicalMatch<'a> {
    fn from_captures(captures: &Captures<'a>) -> Self {
        let group = |name: &str| captures.name(name).map(|m| m.as_str());

        let offset = group("offset").map(|designator| {
            if designator == "Z" {
                LexicalOffset::Zulu
            } else {
                LexicalOffset::Signed {
                    negative: group("offset_sign") == Some("-"),
                    hours: group("offset_hours").unwrap_or("00"),
                    minutes: group("offset_minutes").unwrap_or("00"),
                }
            }
        });

        Self {
            year: group("year"),
            month: group("month"),
            day: group("day"),
            hour: group("hour"),
            minute: group("minute"),
            second: group("second"),
            fraction: group("fraction"),
            offset,
        }
    }

    /// Precision implied by the deepest group that matched
    pub fn precision(&self) -> Option<TemporalPrecision> {
        let present = [
            (self.fraction, TemporalPrecision::Fraction),
            (self.second, TemporalPrecision::Second),
            (self.minute, TemporalPrecision::Minute),
            (self.hour, TemporalPrecision::Hour),
            (self.day, TemporalPrecision::Day),
            (self.month, TemporalPrecision::Month),
            (self.year, TemporalPrecision::Year),
        ];
        present
            .into_iter()
            .find_map(|(group, precision)| group.map(|_| precision))
    }

    /// Precision of the date part alone
    pub fn date_precision(&self) -> Option<TemporalPrecision> {
        match (self.year, self.month, self.day) {
            (_, _, Some(_)) => Some(TemporalPrecision::Day),
            (_, Some(_), None) => Some(TemporalPrecision::Month),
            (Some(_), None, None) => Some(TemporalPrecision::Year),
            (None, None, None) => None,
        }
    }

    /// Whether any time component matched
    pub fn has_time(&self) -> bool {
        self.hour.is_some()
    }
}

/// Match `text` against the anchored date grammar
pub fn match_date(text: &str) -> Option<LexicalMatch<'_>> {
    DATE_REGEX
        .captures(text)
        .map(|captures| LexicalMatch::from_captures(&captures))
}

/// Match `text` against the anchored time grammar (offset allowed)
pub fn match_time(text: &str) -> Option<LexicalMatch<'_>> {
    TIME_REGEX
        .captures(text)
        .map(|captures| LexicalMatch::from_captures(&captures))
}

/// Match `text` against the anchored dateTime grammar
pub fn match_date_time(text: &str) -> Option<LexicalMatch<'_>> {
    DATE_TIME_REGEX
        .captures(text)
        .map(|captures| LexicalMatch::from_captures(&captures))
}
