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

//! End-to-end tests for the fhir-temporal binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command running in an empty directory with an empty home, so no config file is picked up
fn fhir_temporal(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fhir-temporal").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_parse_shows_precision_and_components() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["parse", "2020-01-15T10:30+02:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DateTime: 2020-01-15T10:30+02:00"))
        .stdout(predicate::str::contains("minute precision"))
        .stdout(predicate::str::contains("offset: +02:00"));
}

#[test]
fn test_parse_raw_prints_canonical_text() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["-o", "raw", "parse", "10:30:00.5"])
        .assert()
        .success()
        .stdout("10:30:00.5\n");
}

#[test]
fn test_parse_json_output() {
    let home = TempDir::new().unwrap();
    let output = fhir_temporal(&home)
        .args(["--output-format", "json", "parse", "2020-02"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["value"]["kind"], "date");
    assert_eq!(json["value"]["precision"], "month");
    assert_eq!(json["value"]["precision_digits"], 6);
    assert_eq!(json["value"]["components"]["month"], 2);
    assert!(json["value"]["components"].get("day").is_none());
}

#[test]
fn test_parse_invalid_value_fails() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["parse", "2020-13-01"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("FP0072"));
}

#[test]
fn test_compare_incomparable_is_success() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["-o", "raw", "compare", "2020-01", "2020-01-15"])
        .assert()
        .success()
        .stdout("incomparable\n");
}

#[test]
fn test_compare_normalizes_offsets() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args([
            "-o",
            "raw",
            "compare",
            "2020-01-15T10:00:00Z",
            "2020-01-15T12:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout("equal\n");
}

#[test]
fn test_compare_type_mismatch_fails() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["compare", "2020-01-15", "10:00"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("FP0051"));
}

#[test]
fn test_compare_json_error_goes_to_stdout() {
    let home = TempDir::new().unwrap();
    let output = fhir_temporal(&home)
        .args(["-o", "json", "compare", "2020-01-15", "10:00"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "FP0051");
}

#[test]
fn test_add_months() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["-o", "raw", "add", "2020-01-31", "1 month"])
        .assert()
        .success()
        .stdout("2020-02-29\n");
}

#[test]
fn test_subtract_hours_wraps_time() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["-o", "raw", "add", "--subtract", "01:30", "2 hours"])
        .assert()
        .success()
        .stdout("23:30\n");
}

#[test]
fn test_add_time_unit_to_date_fails() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["add", "2020-01-15", "3 hours"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FP0082"));
}

#[test]
fn test_boundaries() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["-o", "raw", "boundary", "2020-02", "--high"])
        .assert()
        .success()
        .stdout("2020-02-29\n");
    fhir_temporal(&home)
        .args(["-o", "raw", "boundary", "2020", "--kind", "date-time", "--low"])
        .assert()
        .success()
        .stdout("2020-01-01T00:00:00.000\n");
}

#[test]
fn test_now_date() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["-o", "raw", "now", "--kind", "date"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}\n$").unwrap());
}

#[test]
fn test_leap_second_flag() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["parse", "2016-12-31T23:59:60Z"])
        .assert()
        .failure();
    fhir_temporal(&home)
        .args(["-o", "raw", "--accept-leap-second", "parse", "2016-12-31T23:59:60Z"])
        .assert()
        .success()
        .stdout("2016-12-31T23:59:60Z\n");
}

#[test]
fn test_config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".fhirtemporalrc"),
        "output_format = \"raw\"\n\n[parse]\ntrim = true\nmax_fraction_digits = 3\n",
    )
    .unwrap();

    fhir_temporal(&home)
        .args(["parse", " 10:00:00.123456 "])
        .assert()
        .success()
        .stdout("10:00:00.123\n");
}

#[test]
fn test_explicit_config_path() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(&path, "output_format = \"raw\"\n").unwrap();

    fhir_temporal(&home)
        .arg("--config")
        .arg(&path)
        .args(["parse", "2020"])
        .assert()
        .success()
        .stdout("2020\n");
}

#[test]
fn test_invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.toml");
    std::fs::write(&path, "output_format = 42\n").unwrap();

    fhir_temporal(&home)
        .arg("--config")
        .arg(&path)
        .args(["parse", "2020"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_config_sample() {
    let home = TempDir::new().unwrap();
    fhir_temporal(&home)
        .args(["config", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[parse]"))
        .stdout(predicate::str::contains("leap_second = \"reject\""));
}
