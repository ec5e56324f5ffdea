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

//! Parsing configuration

use serde::{Deserialize, Serialize};

/// Largest number of fraction digits a value can carry (nanosecond resolution)
pub const MAX_FRACTION_DIGITS: u8 = 9;

/// How a seconds value of `60` is treated during normalization
///
/// The grammar admits `60` lexically; whether it survives normalization is a
/// compliance decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeapSecondPolicy {
    /// Reject `:60` with a parse error
    #[default]
    Reject,
    /// Accept `:60` and keep it as a leap second
    Accept,
}

/// Options controlling how text is normalized into partial values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Treatment of a `60` seconds value
    pub leap_second: LeapSecondPolicy,
    /// Fraction digits kept before truncation (1..=9)
    pub max_fraction_digits: u8,
    /// Trim surrounding whitespace before matching
    pub trim: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            leap_second: LeapSecondPolicy::Reject,
            max_fraction_digits: MAX_FRACTION_DIGITS,
            trim: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leap second policy
    pub fn with_leap_second(mut self, policy: LeapSecondPolicy) -> Self {
        self.leap_second = policy;
        self
    }

    /// Set the number of fraction digits kept, clamped to 1..=9
    pub fn with_max_fraction_digits(mut self, digits: u8) -> Self {
        self.max_fraction_digits = digits.clamp(1, MAX_FRACTION_DIGITS);
        self
    }

    /// Enable or disable whitespace trimming
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub(crate) fn allows_leap_second(&self) -> bool {
        self.leap_second == LeapSecondPolicy::Accept
    }

    /// Effective fraction digit limit, tolerating out-of-range deserialized values
    pub(crate) fn fraction_digit_limit(&self) -> usize {
        usize::from(self.max_fraction_digits.clamp(1, MAX_FRACTION_DIGITS))
    }

    pub(crate) fn prepare<'a>(&self, text: &'a str) -> &'a str {
        if self.trim { text.trim() } else { text }
    }
}
