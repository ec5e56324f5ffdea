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

//! Error code system in the style of the Rust compiler (E0001, E0002, ...)
//!
//! Temporal errors share the FHIRPath `FPxxxx` numbering so that codes
//! surfaced here line up with the ones reported by the FHIRPath engine.

use std::fmt;

/// Error categories for organizing error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Usage and evaluation errors (FP0051-FP0069)
    Evaluation,
    /// Temporal parsing, comparison and arithmetic errors (FP0070-FP0089)
    Temporal,
    /// Codes outside the registered ranges
    Unknown,
}

/// Error code following the compiler pattern (FP0070, FP0071, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    pub code: u16,
}

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self { code }
    }

    /// Get the full error code string (e.g., "FP0070")
    pub fn code_str(&self) -> String {
        format!("FP{:04}", self.code)
    }

    /// Get error information from the registry
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_REGISTRY.get_error_info(self)
    }

    /// Get documentation URL for this error code
    pub fn docs_url(&self) -> String {
        format!(
            "https://octofhir.github.io/fhirpath-rs/errors/FP{:04}",
            self.code
        )
    }

    /// Get error category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code {
            51..=69 => ErrorCategory::Evaluation,
            70..=89 => ErrorCategory::Temporal,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Get human-readable description for this error code
    pub fn description(&self) -> &'static str {
        self.info().title
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FP{:04}", self.code)
    }
}

/// Error information with documentation links
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Error code number
    pub code: u16,
    /// Human-readable error title
    pub title: &'static str,
    /// Detailed description of the error
    pub description: &'static str,
    /// Help information and suggested solutions
    pub help: &'static str,
}

impl ErrorInfo {
    pub const fn new(
        code: u16,
        title: &'static str,
        description: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            code,
            title,
            description,
            help,
        }
    }
}

/// Central error registry containing all error definitions
pub struct ErrorRegistry;

impl ErrorRegistry {
    /// Get error information for a given error code
    pub fn get_error_info(&self, error_code: &ErrorCode) -> &'static ErrorInfo {
        match error_code.code {
            51 => &FP0051_INFO,
            53 => &FP0053_INFO,

            70 => &FP0070_INFO,
            71 => &FP0071_INFO,
            72 => &FP0072_INFO,
            73 => &FP0073_INFO,
            74 => &FP0074_INFO,
            75 => &FP0075_INFO,
            76 => &FP0076_INFO,
            77 => &FP0077_INFO,
            78 => &FP0078_INFO,
            79 => &FP0079_INFO,
            80 => &FP0080_INFO,
            82 => &FP0082_INFO,

            _ => &UNKNOWN_ERROR_INFO,
        }
    }
}

/// Global error registry instance
pub static ERROR_REGISTRY: ErrorRegistry = ErrorRegistry;

// ========== Error Code Definitions ==========

pub const FP0051: ErrorCode = ErrorCode::new(51); // Type mismatch in operation
pub const FP0053: ErrorCode = ErrorCode::new(53); // Invalid calendar duration

pub const FP0070: ErrorCode = ErrorCode::new(70); // Invalid date format
pub const FP0071: ErrorCode = ErrorCode::new(71); // Invalid day value
pub const FP0072: ErrorCode = ErrorCode::new(72); // Invalid month value
pub const FP0073: ErrorCode = ErrorCode::new(73); // Invalid year value
pub const FP0074: ErrorCode = ErrorCode::new(74); // Invalid time format or value
pub const FP0075: ErrorCode = ErrorCode::new(75); // Invalid datetime format
pub const FP0076: ErrorCode = ErrorCode::new(76); // Date out of valid range
pub const FP0077: ErrorCode = ErrorCode::new(77); // Invalid timezone offset
pub const FP0078: ErrorCode = ErrorCode::new(78); // Temporal precision mismatch (incomparable)
pub const FP0079: ErrorCode = ErrorCode::new(79); // Invalid leap year date
pub const FP0080: ErrorCode = ErrorCode::new(80); // Temporal normalization error
pub const FP0082: ErrorCode = ErrorCode::new(82); // Calendar unit not applicable to value

// ========== Error Information Definitions ==========

static FP0051_INFO: ErrorInfo = ErrorInfo::new(
    51,
    "Type mismatch in operation",
    "A comparison or equality check was attempted between different temporal kinds.",
    "Dates, times and dateTimes are never comparable with each other. Convert one side first, e.g. take the date part of a dateTime.",
);

static FP0053_INFO: ErrorInfo = ErrorInfo::new(
    53,
    "Invalid calendar duration",
    "The calendar duration could not be read as '<number> <unit>'.",
    "Use an integer followed by a calendar unit, for example '3 months' or '90 min'.",
);

static FP0070_INFO: ErrorInfo = ErrorInfo::new(
    70,
    "Invalid date format",
    "The date string does not match the FHIR date format.",
    "Use YYYY, YYYY-MM or YYYY-MM-DD. Check for typos and surrounding whitespace.",
);

static FP0071_INFO: ErrorInfo = ErrorInfo::new(
    71,
    "Invalid day value",
    "The day component is outside the days of its month.",
    "Ensure the day is between 1 and the length of the month (e.g., April has 30 days).",
);

static FP0072_INFO: ErrorInfo = ErrorInfo::new(
    72,
    "Invalid month value",
    "The month component is outside 01-12.",
    "Use a two-digit month between 01 and 12.",
);

static FP0073_INFO: ErrorInfo = ErrorInfo::new(
    73,
    "Invalid year value",
    "The year component cannot be represented.",
    "Use a four-digit year between 0001 and 9999.",
);

static FP0074_INFO: ErrorInfo = ErrorInfo::new(
    74,
    "Invalid time",
    "The time string does not match HH[:MM[:SS[.fff]]] or has an out-of-range component.",
    "Hours run 00-23, minutes and seconds 00-59. A seconds value of 60 is only accepted when leap seconds are enabled.",
);

static FP0075_INFO: ErrorInfo = ErrorInfo::new(
    75,
    "Invalid datetime format",
    "The dateTime string does not match the FHIR dateTime format.",
    "Use YYYY[-MM[-DD[THH[:MM[:SS[.fff]]][Z|+HH:MM|-HH:MM]]]]. A time part requires a full date.",
);

static FP0076_INFO: ErrorInfo = ErrorInfo::new(
    76,
    "Date out of valid range",
    "Calendar arithmetic produced a value that cannot be represented.",
    "Check the magnitude of the duration being added or subtracted.",
);

static FP0077_INFO: ErrorInfo = ErrorInfo::new(
    77,
    "Invalid timezone offset",
    "The UTC offset is malformed or outside -14:00..+14:00.",
    "Use 'Z' or a signed offset such as '+02:00' with minutes below 60.",
);

static FP0078_INFO: ErrorInfo = ErrorInfo::new(
    78,
    "Temporal precision mismatch",
    "The two values are known to different precisions and cannot be ordered.",
    "Compare values of the same precision, or use equivalence if a false result is acceptable.",
);

static FP0079_INFO: ErrorInfo = ErrorInfo::new(
    79,
    "Invalid leap year date",
    "February 29th was given for a year that is not a leap year.",
    "Leap years are divisible by 4, except centuries not divisible by 400.",
);

static FP0080_INFO: ErrorInfo = ErrorInfo::new(
    80,
    "Temporal normalization error",
    "The components matched the grammar but do not form a valid calendar value.",
    "Check each component against its calendar range.",
);

static FP0082_INFO: ErrorInfo = ErrorInfo::new(
    82,
    "Invalid temporal arithmetic",
    "The calendar unit cannot be applied to this kind of temporal value.",
    "Dates accept year, month, week and day; times accept hour, minute, second and millisecond.",
);

static UNKNOWN_ERROR_INFO: ErrorInfo = ErrorInfo::new(
    0,
    "Unknown error",
    "An unknown error occurred that is not registered in the error code system.",
    "This may indicate a bug in the library. Please report this issue with the error details.",
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_code_formatting() {
        assert_eq!(FP0070.to_string(), "FP0070");
        assert_eq!(FP0051.code_str(), "FP0051");
        assert!(FP0078.docs_url().ends_with("/FP0078"));
    }

    #[test]
    fn test_categories() {
        assert_eq!(FP0051.category(), ErrorCategory::Evaluation);
        assert_eq!(FP0053.category(), ErrorCategory::Evaluation);
        for code in 70..=80 {
            assert_eq!(ErrorCode::new(code).category(), ErrorCategory::Temporal);
        }
        assert_eq!(ErrorCode::new(500).category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_all_temporal_codes_registered() {
        for code in 70..=80 {
            let error_code = ErrorCode::new(code);
            assert_eq!(error_code.info().code, code);
            assert!(!error_code.description().is_empty());
        }
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(ErrorCode::new(999).info().code, 0);
    }
}
