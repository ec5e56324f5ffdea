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

//! Raw output formatter: bare canonical text

use super::{ComparisonOutput, ErrorOutput, FormatError, OutputFormatter, ValueOutput};

pub struct RawFormatter;

impl RawFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RawFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for RawFormatter {
    fn format_value(&self, output: &ValueOutput) -> Result<String, FormatError> {
        Ok(output.value.canonical.clone())
    }

    fn format_comparison(&self, output: &ComparisonOutput) -> Result<String, FormatError> {
        Ok(output.result.as_str().to_string())
    }

    fn format_error(&self, output: &ErrorOutput) -> Result<String, FormatError> {
        Ok(output.message.clone())
    }
}
