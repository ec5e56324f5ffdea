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

//! UTC offsets attached to times and dateTimes

use chrono::{FixedOffset, Offset, Utc};
use std::fmt;

use super::grammar::LexicalOffset;
use crate::core::{FP0077, Result, TemporalError};

const SECONDS_PER_HOUR: i32 = 3600;

/// Largest offset accepted, in seconds (14 hours either side of UTC)
pub const MAX_OFFSET_SECONDS: i32 = 14 * SECONDS_PER_HOUR;

/// An explicit UTC offset
///
/// `Z` and `+00:00` denote the same instant but are kept apart so the
/// canonical text reproduces the designator that was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtcOffset {
    /// The `Z` designator
    Utc,
    /// A signed `±HH:MM` offset
    Fixed(FixedOffset),
}

impl UtcOffset {
    /// Offset from signed hours and minutes, `None` when out of range
    pub fn from_hours_minutes(negative: bool, hours: u32, minutes: u32) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        let total = hours.checked_mul(3600)?.checked_add(minutes * 60)?;
        let magnitude = i32::try_from(total).ok()?;
        let seconds = if negative { -magnitude } else { magnitude };
        Self::from_seconds(seconds)
    }

    /// Offset east of UTC in seconds, `None` beyond ±14:00
    pub fn from_seconds(seconds: i32) -> Option<Self> {
        if seconds.abs() > MAX_OFFSET_SECONDS {
            return None;
        }
        FixedOffset::east_opt(seconds).map(Self::Fixed)
    }

    /// Offset of a chrono timezone value
    pub fn from_offset<O: Offset>(offset: &O) -> Option<Self> {
        Self::from_seconds(offset.fix().local_minus_utc())
    }

    /// The chrono offset used for instant arithmetic
    pub fn fixed_offset(&self) -> FixedOffset {
        match self {
            Self::Utc => utc_fixed(),
            Self::Fixed(offset) => *offset,
        }
    }

    /// Seconds east of UTC
    pub fn local_minus_utc(&self) -> i32 {
        self.fixed_offset().local_minus_utc()
    }

    /// Whether the offset was written as `Z`
    pub fn is_zulu(&self) -> bool {
        matches!(self, Self::Utc)
    }

    pub(crate) fn from_lexical(offset: LexicalOffset<'_>, input: &str) -> Result<Self> {
        match offset {
            LexicalOffset::Zulu => Ok(Self::Utc),
            LexicalOffset::Signed {
                negative,
                hours,
                minutes,
            } => {
                let invalid = || {
                    TemporalError::parse_error(
                        FP0077,
                        format!(
                            "Offset {}{hours}:{minutes} must be within -14:00..+14:00 with minutes below 60",
                            if negative { '-' } else { '+' }
                        ),
                        input,
                    )
                };
                let hours = hours.parse::<u32>().map_err(|_| invalid())?;
                let minutes = minutes.parse::<u32>().map_err(|_| invalid())?;
                Self::from_hours_minutes(negative, hours, minutes).ok_or_else(invalid)
            }
        }
    }
}

/// Anchor offset used internally when a value carries none
pub(crate) fn utc_fixed() -> FixedOffset {
    Utc.fix()
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("Z"),
            Self::Fixed(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.abs() / 60;
                write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
            }
        }
    }
}
