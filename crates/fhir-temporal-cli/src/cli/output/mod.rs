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

//! Output formatting for CLI commands

mod json;
mod pretty;
mod raw;

use clap::ValueEnum;
use octofhir_fhir_temporal::{
    ComparisonResult, PartialTemporal, TemporalError, TemporalKind, TemporalPrecision,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use json::JsonFormatter;
pub use pretty::PrettyFormatter;
pub use raw::RawFormatter;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored human-readable output (default)
    Pretty,
    /// JSON structured output for tooling
    Json,
    /// Canonical text only
    Raw,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Raw => write!(f, "raw"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Components of a value, present only up to its precision
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<u32>,
}

impl Components {
    fn of(value: &PartialTemporal) -> Self {
        match value {
            PartialTemporal::Date(date) => Self {
                year: Some(date.year()),
                month: date.month(),
                day: date.day(),
                ..Self::default()
            },
            PartialTemporal::Time(time) => Self {
                hour: Some(time.hour()),
                minute: time.minute(),
                second: time.second(),
                millisecond: time.millisecond(),
                ..Self::default()
            },
            PartialTemporal::DateTime(date_time) => Self {
                year: Some(date_time.year()),
                month: date_time.month(),
                day: date_time.day(),
                hour: date_time.hour(),
                minute: date_time.minute(),
                second: date_time.second(),
                millisecond: date_time.millisecond(),
            },
        }
    }

    /// Named components in calendar order
    pub fn entries(&self) -> Vec<(&'static str, i64)> {
        [
            ("year", self.year.map(i64::from)),
            ("month", self.month.map(i64::from)),
            ("day", self.day.map(i64::from)),
            ("hour", self.hour.map(i64::from)),
            ("minute", self.minute.map(i64::from)),
            ("second", self.second.map(i64::from)),
            ("millisecond", self.millisecond.map(i64::from)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
    }
}

/// Description of a single partial value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReport {
    pub kind: TemporalKind,
    pub precision: TemporalPrecision,
    pub precision_digits: i64,
    pub original: String,
    pub canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    pub components: Components,
}

impl From<&PartialTemporal> for ValueReport {
    fn from(value: &PartialTemporal) -> Self {
        Self {
            kind: value.kind(),
            precision: value.precision(),
            precision_digits: value.precision_digits(),
            original: value.original_text().to_string(),
            canonical: value.to_canonical_text(),
            offset: value.offset().map(|offset| offset.to_string()),
            components: Components::of(value),
        }
    }
}

/// Output of `parse`, `now`, `add` and `boundary`
#[derive(Debug, Clone, Serialize)]
pub struct ValueOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub value: ValueReport,
}

impl ValueOutput {
    pub fn new(command: &'static str, input: Option<String>, value: &PartialTemporal) -> Self {
        Self {
            command,
            input,
            value: ValueReport::from(value),
        }
    }
}

/// Output of `compare`
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutput {
    pub left: ValueReport,
    pub right: ValueReport,
    pub result: ComparisonResult,
    /// Equality as a three-valued answer; `None` when undecidable
    pub equal: Option<bool>,
}

impl ComparisonOutput {
    pub fn new(left: &PartialTemporal, right: &PartialTemporal, result: ComparisonResult) -> Self {
        Self {
            left: ValueReport::from(left),
            right: ValueReport::from(right),
            result,
            equal: result.to_equality(),
        }
    }
}

/// A failed command
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl ErrorOutput {
    /// Describe an error, extracting the code when it comes from the library
    pub fn from_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<TemporalError>() {
            Some(temporal) => Self {
                code: Some(temporal.error_code().code_str()),
                message: temporal.to_string(),
                help: Some(temporal.error_info().help.to_string()),
            },
            None => Self {
                code: None,
                message: format!("{error:#}"),
                help: None,
            },
        }
    }
}

/// Everything a command can print
#[derive(Debug, Clone)]
pub enum CommandOutput {
    Value(ValueOutput),
    Comparison(ComparisonOutput),
    /// Preformatted text printed as is
    Text(String),
}

pub trait OutputFormatter {
    fn format_value(&self, output: &ValueOutput) -> Result<String, FormatError>;
    fn format_comparison(&self, output: &ComparisonOutput) -> Result<String, FormatError>;
    fn format_error(&self, output: &ErrorOutput) -> Result<String, FormatError>;

    fn format_output(&self, output: &CommandOutput) -> Result<String, FormatError> {
        match output {
            CommandOutput::Value(value) => self.format_value(value),
            CommandOutput::Comparison(comparison) => self.format_comparison(comparison),
            CommandOutput::Text(text) => Ok(text.clone()),
        }
    }
}

pub struct FormatterFactory {
    no_color: bool,
}

impl FormatterFactory {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    pub fn create_formatter(&self, format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Raw => Box::new(RawFormatter::new()),
            OutputFormat::Pretty => Box::new(PrettyFormatter::new(!self.no_color)),
        }
    }
}

impl Default for FormatterFactory {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn components_stop_at_precision() {
        let value = PartialTemporal::parse("2020-01-15T10").unwrap();
        let report = ValueReport::from(&value);
        assert_eq!(
            report.components.entries(),
            vec![("year", 2020), ("month", 1), ("day", 15), ("hour", 10)]
        );
        assert_eq!(report.offset, None);
    }

    #[test]
    fn library_errors_keep_their_code() {
        let err = PartialTemporal::parse("2020-13").unwrap_err();
        let output = ErrorOutput::from_error(&anyhow::Error::from(err));
        assert_eq!(output.code.as_deref(), Some("FP0072"));
    }
}
