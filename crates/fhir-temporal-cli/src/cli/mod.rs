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

//! CLI module for inspecting and comparing partial temporal values

pub mod config;
pub mod handlers;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use octofhir_fhir_temporal::TemporalKind;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(name = "fhir-temporal")]
#[command(about = "Parse, compare and shift partial FHIR dates, times and dateTimes")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
pub struct Cli {
    /// Output format (defaults to the configured format, then pretty)
    #[arg(long, short = 'o', value_enum, global = true)]
    pub output_format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output with additional details
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the standard locations
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Accept a seconds value of 60 as a leap second
    #[arg(long, global = true)]
    pub accept_leap_second: bool,

    /// Trim surrounding whitespace before parsing
    #[arg(long, global = true)]
    pub trim: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Parse a value and show its precision and components
    Parse {
        /// Text to parse, e.g. 2020-01 or 10:30Z
        text: String,
        /// Kind to parse as (detected from the text when omitted)
        #[arg(long, short, value_enum)]
        kind: Option<KindArg>,
    },
    /// Compare two values of the same kind
    Compare {
        left: String,
        right: String,
        /// Kind to parse both values as (detected from the text when omitted)
        #[arg(long, short, value_enum)]
        kind: Option<KindArg>,
    },
    /// Show the current date, time or dateTime
    Now {
        #[arg(long, short, value_enum, default_value = "date-time")]
        kind: KindArg,
    },
    /// Add a calendar duration such as "3 months" to a value
    Add {
        value: String,
        /// Duration as "<number> <unit>", e.g. "2 weeks" or "-90 min"
        #[arg(allow_hyphen_values = true)]
        duration: String,
        /// Subtract the duration instead of adding it
        #[arg(long)]
        subtract: bool,
        #[arg(long, short, value_enum)]
        kind: Option<KindArg>,
    },
    /// Show the earliest or latest value a partial value covers
    Boundary {
        value: String,
        /// Earliest covered value
        #[arg(long, conflicts_with = "high", required_unless_present = "high")]
        low: bool,
        /// Latest covered value
        #[arg(long)]
        high: bool,
        #[arg(long, short, value_enum)]
        kind: Option<KindArg>,
    },
    /// Show the effective configuration
    Config {
        /// Print a commented sample configuration file instead
        #[arg(long)]
        sample: bool,
    },
}

/// Value kind as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Date,
    Time,
    DateTime,
}

impl From<KindArg> for TemporalKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Date => TemporalKind::Date,
            KindArg::Time => TemporalKind::Time,
            KindArg::DateTime => TemporalKind::DateTime,
        }
    }
}
