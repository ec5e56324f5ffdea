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

//! JSON output formatter

use super::{ComparisonOutput, ErrorOutput, FormatError, OutputFormatter, ValueOutput};
use serde_json::{Value as JsonValue, json};

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render(&self, value: JsonValue) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_value(&self, output: &ValueOutput) -> Result<String, FormatError> {
        let mut value = serde_json::to_value(output)?;
        if let JsonValue::Object(map) = &mut value {
            map.insert("success".to_string(), JsonValue::Bool(true));
        }
        self.render(value)
    }

    fn format_comparison(&self, output: &ComparisonOutput) -> Result<String, FormatError> {
        let mut value = serde_json::to_value(output)?;
        if let JsonValue::Object(map) = &mut value {
            map.insert("success".to_string(), JsonValue::Bool(true));
        }
        self.render(value)
    }

    fn format_error(&self, output: &ErrorOutput) -> Result<String, FormatError> {
        self.render(json!({
            "success": false,
            "error": output,
        }))
    }
}
