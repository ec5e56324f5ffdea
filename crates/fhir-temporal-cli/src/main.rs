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

//! Command-line tool for partial FHIR temporal values
//!
//! Parses dates, times and dateTimes, compares them with precision-aware
//! semantics and applies calendar arithmetic.

use clap::Parser;
use fhir_temporal_cli::cli::config::CliConfig;
use fhir_temporal_cli::cli::handlers::handle_command;
use fhir_temporal_cli::cli::output::{ErrorOutput, FormatterFactory, OutputFormat};
use fhir_temporal_cli::cli::Cli;
use std::process;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, loaded) = match CliConfig::resolve(&cli) {
        Ok(file_config) => (file_config.merge_with_cli(&cli), Ok(())),
        Err(e) => (CliConfig::default().merge_with_cli(&cli), Err(e)),
    };
    let format = config.effective_format();
    let formatter = FormatterFactory::new(config.no_color).create_formatter(format);

    let result = loaded.and_then(|()| handle_command(&cli.command, &config));
    match result.and_then(|output| Ok(formatter.format_output(&output)?)) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let error = ErrorOutput::from_error(&e);
            match formatter.format_error(&error) {
                Ok(text) if format == OutputFormat::Json => println!("{text}"),
                Ok(text) => eprintln!("{text}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
            process::exit(1);
        }
    }
}
