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

//! Partial dates, times and dateTimes
//!
//! Text flows through the lexical grammar, component extraction and calendar
//! normalization into an immutable value tagged with its precision.

/// Text-backed traits shared by the value types
///
/// `Display` shows the original text, `FromStr`/`TryFrom<&str>` parse it and
/// serde reads and writes it as a string. The plain form also bases
/// `PartialEq`/`Eq`/`Hash` on the original text; the `@text` form leaves
/// those to the caller.
macro_rules! impl_text_value {
    (@text $ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.original_text())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::core::TemporalError;

            fn from_str(s: &str) -> $crate::core::Result<Self> {
                Self::parse(s)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = $crate::core::TemporalError;

            fn try_from(s: &str) -> $crate::core::Result<Self> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.original_text())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&text).map_err(serde::de::Error::custom)
            }
        }
    };
    ($ty:ident) => {
        impl_text_value!(@text $ty);

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.original_text() == other.original_text()
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(self.original_text(), state);
            }
        }
    };
}

pub mod any;
pub mod compare;
pub mod date;
pub mod datetime;
pub mod duration;
pub mod format;
pub mod grammar;
pub mod offset;
pub mod parts;
pub mod precision;
pub mod time;

pub use any::PartialTemporal;
pub use compare::{ComparisonResult, TemporalValue, try_compare, try_equals};
pub use date::PartialDate;
pub use datetime::PartialDateTime;
pub use duration::{CalendarDuration, CalendarUnit};
pub use format::{Canonical, format_date, format_date_time, format_time};
pub use offset::UtcOffset;
pub use parts::TemporalParts;
pub use precision::{TemporalComponent, TemporalKind, TemporalPrecision};
pub use time::PartialTime;
