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

//! Command handlers

use super::Commands;
use super::config::CliConfig;
use super::output::{CommandOutput, ComparisonOutput, ValueOutput};
use octofhir_fhir_temporal::{CalendarDuration, ParseOptions, PartialTemporal, TemporalKind};

/// Run a subcommand with the merged configuration
pub fn handle_command(command: &Commands, config: &CliConfig) -> anyhow::Result<CommandOutput> {
    let options = &config.parse;
    match command {
        Commands::Parse { text, kind } => {
            let value = parse_value(text, kind.map(TemporalKind::from), options)?;
            Ok(CommandOutput::Value(ValueOutput::new(
                "parse",
                Some(text.clone()),
                &value,
            )))
        }
        Commands::Compare { left, right, kind } => {
            let kind = kind.map(TemporalKind::from);
            let left = parse_value(left, kind, options)?;
            let right = parse_value(right, kind, options)?;
            let result = left.try_compare(&right)?;
            tracing::info!(left = %left, right = %right, result = %result, "compared");
            Ok(CommandOutput::Comparison(ComparisonOutput::new(
                &left, &right, result,
            )))
        }
        Commands::Now { kind } => {
            let value = PartialTemporal::now((*kind).into());
            Ok(CommandOutput::Value(ValueOutput::new("now", None, &value)))
        }
        Commands::Add {
            value,
            duration,
            subtract,
            kind,
        } => {
            let parsed = parse_value(value, kind.map(TemporalKind::from), options)?;
            let duration = CalendarDuration::from_string(duration)?;
            let shifted = if *subtract {
                parsed.subtract(&duration)?
            } else {
                parsed.add(&duration)?
            };
            tracing::info!(from = %parsed, duration = %duration, to = %shifted, "shifted");
            let command = if *subtract { "subtract" } else { "add" };
            Ok(CommandOutput::Value(ValueOutput::new(
                command,
                Some(format!("{value} {} {duration}", if *subtract { '-' } else { '+' })),
                &shifted,
            )))
        }
        Commands::Boundary {
            value, high, kind, ..
        } => {
            let parsed = parse_value(value, kind.map(TemporalKind::from), options)?;
            let (command, boundary) = if *high {
                ("high boundary", parsed.high_boundary()?)
            } else {
                ("low boundary", parsed.low_boundary()?)
            };
            Ok(CommandOutput::Value(ValueOutput::new(
                command,
                Some(value.clone()),
                &boundary,
            )))
        }
        Commands::Config { sample } => {
            if *sample {
                Ok(CommandOutput::Text(CliConfig::sample_config()))
            } else {
                Ok(CommandOutput::Text(toml::to_string_pretty(config)?))
            }
        }
    }
}

fn parse_value(
    text: &str,
    kind: Option<TemporalKind>,
    options: &ParseOptions,
) -> anyhow::Result<PartialTemporal> {
    let value = match kind {
        Some(kind) => PartialTemporal::parse_as_with(kind, text, options)?,
        None => {
            let value = PartialTemporal::parse_with(text, options)?;
            tracing::debug!(text, kind = %value.kind(), "detected kind");
            value
        }
    };
    Ok(value)
}
