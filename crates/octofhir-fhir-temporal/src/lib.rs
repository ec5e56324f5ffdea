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

//! Partial FHIR temporal values in Rust
//!
//! Dates, times and dateTimes that may be known only to a limited precision
//! (`2020`, `2020-01`, `2020-01-15T10:30+02:00`, ...), with parsing,
//! canonical formatting and a precision-aware comparison that distinguishes
//! "not equal" from "cannot be decided".
//!
//! ```
//! use octofhir_fhir_temporal::prelude::*;
//!
//! let month = PartialDate::parse("2020-01")?;
//! let day = PartialDate::parse("2020-01-15")?;
//! assert_eq!(month.try_compare(&day), ComparisonResult::Incomparable);
//! assert_eq!(month.try_equals(&day), None);
//!
//! let utc = PartialDateTime::parse("2020-01-15T10:00:00Z")?;
//! let local = PartialDateTime::parse("2020-01-15T12:00:00+02:00")?;
//! assert_eq!(utc.try_equals(&local), Some(true));
//! # Ok::<(), octofhir_fhir_temporal::TemporalError>(())
//! ```

pub mod config;
pub mod core;
pub mod temporal;

pub use crate::config::{LeapSecondPolicy, MAX_FRACTION_DIGITS, ParseOptions};
pub use crate::core::{ErrorCode, ErrorInfo, Result, TemporalError};
pub use crate::temporal::{
    CalendarDuration, CalendarUnit, ComparisonResult, PartialDate, PartialDateTime, PartialTemporal,
    PartialTime, TemporalComponent, TemporalKind, TemporalParts, TemporalPrecision, TemporalValue,
    UtcOffset, try_compare, try_equals,
};

/// Commonly used types and the comparison trait
pub mod prelude {
    pub use crate::config::{LeapSecondPolicy, ParseOptions};
    pub use crate::core::{Result, TemporalError};
    pub use crate::temporal::{
        CalendarDuration, CalendarUnit, ComparisonResult, PartialDate, PartialDateTime,
        PartialTemporal, PartialTime, TemporalKind, TemporalParts, TemporalPrecision,
        TemporalValue, UtcOffset,
    };
}
