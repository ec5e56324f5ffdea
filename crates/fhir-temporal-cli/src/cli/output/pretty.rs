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

//! Pretty output formatter with colors and symbols

use super::{
    ComparisonOutput, ErrorOutput, FormatError, OutputFormatter, ValueOutput, ValueReport,
};
use colored::{Color, Colorize};
use octofhir_fhir_temporal::ComparisonResult;

pub struct PrettyFormatter {
    colored: bool,
}

impl PrettyFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn success_icon(&self) -> String {
        if self.colored {
            "✅".to_string()
        } else {
            "[OK]".to_string()
        }
    }

    fn error_icon(&self) -> String {
        if self.colored {
            "❌".to_string()
        } else {
            "[ERROR]".to_string()
        }
    }

    fn write_report(&self, out: &mut String, report: &ValueReport, indent: &str) {
        out.push_str(&format!(
            "{indent}{}: {} ({} precision, {} digits)\n",
            self.colorize(report.kind.type_name(), Color::Green),
            self.colorize(&report.canonical, Color::Blue),
            self.colorize(report.precision.as_str(), Color::Yellow),
            report.precision_digits
        ));
        for (name, value) in report.components.entries() {
            out.push_str(&format!(
                "{indent}   {}: {value}\n",
                self.colorize(name, Color::Cyan)
            ));
        }
        if let Some(ref offset) = report.offset {
            out.push_str(&format!(
                "{indent}   {}: {offset}\n",
                self.colorize("offset", Color::Cyan)
            ));
        }
    }

    fn result_color(result: ComparisonResult) -> Color {
        match result {
            ComparisonResult::Less | ComparisonResult::Greater => Color::Blue,
            ComparisonResult::Equal => Color::Green,
            ComparisonResult::Incomparable => Color::Yellow,
        }
    }
}

impl OutputFormatter for PrettyFormatter {
    fn format_value(&self, output: &ValueOutput) -> Result<String, FormatError> {
        let mut result = String::new();
        match output.input {
            Some(ref input) => result.push_str(&format!(
                "{} {} {}\n",
                self.success_icon(),
                self.bold(output.command),
                self.colorize(input, Color::Blue)
            )),
            None => result.push_str(&format!(
                "{} {}\n",
                self.success_icon(),
                self.bold(output.command)
            )),
        }
        self.write_report(&mut result, &output.value, "   ");
        Ok(result.trim_end().to_string())
    }

    fn format_comparison(&self, output: &ComparisonOutput) -> Result<String, FormatError> {
        let mut result = String::new();
        result.push_str(&format!(
            "{} {} {} {}\n",
            self.success_icon(),
            self.colorize(&output.left.original, Color::Blue),
            self.bold("vs"),
            self.colorize(&output.right.original, Color::Blue)
        ));
        result.push_str(&format!(
            "   result: {}\n",
            self.colorize(output.result.as_str(), Self::result_color(output.result))
        ));
        let equal = match output.equal {
            Some(true) => "true",
            Some(false) => "false",
            None => "unknown",
        };
        result.push_str(&format!("   equal:  {equal}\n"));
        if output.result.is_incomparable() {
            result.push_str(&format!(
                "   {}\n",
                self.colorize(
                    &format!(
                        "precisions differ ({} vs {}) and the shared components are equal",
                        output.left.precision, output.right.precision
                    ),
                    Color::Yellow
                )
            ));
        }
        Ok(result.trim_end().to_string())
    }

    fn format_error(&self, output: &ErrorOutput) -> Result<String, FormatError> {
        let mut result = format!(
            "{} {}",
            self.error_icon(),
            self.colorize(&output.message, Color::Red)
        );
        if let Some(ref help) = output.help {
            result.push_str(&format!("\n   help: {help}"));
        }
        Ok(result)
    }
}
