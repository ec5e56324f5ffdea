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

//! CLI configuration file support

use octofhir_fhir_temporal::{LeapSecondPolicy, ParseOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Cli;
use super::output::OutputFormat;

const RC_FILE: &str = ".fhirtemporalrc";

/// CLI configuration loaded from ~/.fhirtemporalrc or .fhirtemporalrc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Default output format
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    /// Disable colored output by default
    #[serde(default)]
    pub no_color: bool,

    /// Parsing options applied to every command
    #[serde(default)]
    pub parse: ParseOptions,
}

impl CliConfig {
    /// Load configuration from standard locations
    ///
    /// Search order:
    /// 1. ./.fhirtemporalrc (current directory)
    /// 2. ~/.fhirtemporalrc (home directory)
    /// 3. ~/.config/fhir-temporal/config.toml
    pub fn load() -> anyhow::Result<Self> {
        match Self::find() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// First existing configuration file in the search order
    pub fn find() -> Option<PathBuf> {
        let local = PathBuf::from(RC_FILE);
        if local.is_file() {
            return Some(local);
        }

        let home = dirs::home_dir()?;
        let home_rc = home.join(RC_FILE);
        if home_rc.is_file() {
            return Some(home_rc);
        }

        let config_file = home.join(".config").join("fhir-temporal").join("config.toml");
        config_file.is_file().then_some(config_file)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {}: {e}", path.display())
        })?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load the file named by `--config`, or search the standard locations
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        match cli.config {
            Some(ref path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Merge with CLI arguments (CLI args take precedence)
    pub fn merge_with_cli(&self, cli: &Cli) -> Self {
        let mut merged = self.clone();

        if cli.output_format.is_some() {
            merged.output_format = cli.output_format;
        }

        if cli.no_color {
            merged.no_color = true;
        }

        if cli.accept_leap_second {
            merged.parse = merged.parse.with_leap_second(LeapSecondPolicy::Accept);
        }

        if cli.trim {
            merged.parse = merged.parse.with_trim(true);
        }

        merged
    }

    /// Output format to use once all sources are merged
    pub fn effective_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Pretty)
    }

    /// Create a sample configuration file with helpful comments
    pub fn sample_config() -> String {
        r#"# fhir-temporal CLI Configuration
# This file can be placed at:
#   - ./.fhirtemporalrc (current directory)
#   - ~/.fhirtemporalrc (home directory)
#   - ~/.config/fhir-temporal/config.toml

# Default output format (pretty, json, raw)
output_format = "pretty"

# Disable colored output
no_color = false

# Parsing options
[parse]
# Seconds value of 60: "reject" or "accept"
leap_second = "reject"
# Fraction digits kept before truncation (1-9)
max_fraction_digits = 9
# Trim surrounding whitespace before parsing
trim = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_config_parses() {
        let config: CliConfig = toml::from_str(&CliConfig::sample_config()).unwrap();
        assert_eq!(config.output_format, Some(OutputFormat::Pretty));
        assert_eq!(config.parse, ParseOptions::default());
    }

    #[test]
    fn missing_tables_use_defaults() {
        let config: CliConfig = toml::from_str("[parse]\ntrim = true\n").unwrap();
        assert_eq!(config.output_format, None);
        assert!(config.parse.trim);
        assert_eq!(config.parse.max_fraction_digits, 9);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let file = CliConfig {
            output_format: Some(OutputFormat::Raw),
            ..CliConfig::default()
        };
        let cli = Cli::parse_from([
            "fhir-temporal",
            "--output-format",
            "json",
            "--accept-leap-second",
            "parse",
            "2020",
        ]);

        let merged = file.merge_with_cli(&cli);
        assert_eq!(merged.effective_format(), OutputFormat::Json);
        assert_eq!(merged.parse.leap_second, LeapSecondPolicy::Accept);
    }
}
