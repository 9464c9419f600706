//! Tests for CLI argument parsing and configuration layering
//!
//! These tests verify that command line arguments are parsed, merged over a
//! configuration file and validated the way the binary uses them.

use auto_body_shop_simulator::types::config::{CliArgs, ConfigError, ShopConfig};
use auto_body_shop_simulator::types::OutputFormat;
use clap::Parser;
use std::io::Write;
use tempfile::Builder;

/// Test parsing with no arguments leaves every override unset
#[test]
fn test_default_arguments() {
    let cli_args = CliArgs::try_parse_from(vec!["test"]).unwrap();
    assert!(cli_args.config.is_none());
    assert!(cli_args.num_replications.is_none());
    assert!(!cli_args.quiet_replications);
    assert!(!cli_args.trace);

    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config, ShopConfig::default());
}

/// Test numeric overrides and short flags
#[test]
fn test_override_arguments() {
    let args = vec![
        "test",
        "-n",
        "25",
        "--num-stalls",
        "2",
        "--num-mechanics",
        "3",
        "--mechanic-refer-rate",
        "0.25",
        "--balk-min",
        "2",
        "--balk-max",
        "5",
        "--base-seed",
        "7",
        "--confidence-level",
        "0.9",
        "-v",
    ];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.verbose);

    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.num_replications, 25);
    assert_eq!(config.num_stalls, 2);
    assert_eq!(config.num_mechanics, 3);
    assert_eq!(config.mechanic_refer_rate, 0.25);
    assert_eq!((config.balk_min, config.balk_max), (2, 5));
    assert_eq!(config.replication_seed(1), 9);
    assert_eq!(config.confidence_level, 0.9);
    config.validate().unwrap();
}

/// Test the boolean switches
#[test]
fn test_flag_arguments() {
    let args = vec!["test", "--quiet-replications", "--trace", "--dry-run", "--output", "out.json"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.dry_run);
    assert_eq!(cli_args.output.as_deref(), Some("out.json"));

    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert!(!config.include_output_per_replication);
    assert!(config.record_trace);
}

/// Test wage overrides reach the configuration
#[test]
fn test_wage_arguments() {
    let args = vec![
        "test",
        "--mechanic-salary",
        "120",
        "--mechanic-commission",
        "12.5",
        "--specialist-salary",
        "350",
        "--specialist-commission",
        "90",
    ];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();

    assert_eq!(config.mechanic_salary, 120.0);
    assert_eq!(config.mechanic_commission, 12.5);
    assert_eq!(config.specialist_salary, 350.0);
    assert_eq!(config.specialist_commission, 90.0);
    config.validate().unwrap();

    let cli_args = CliArgs::try_parse_from(vec!["test", "--specialist-salary=-5"]).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());
}

/// Test the report format switch
#[test]
fn test_format_argument() {
    let cli_args = CliArgs::try_parse_from(vec!["test", "--format", "json"]).unwrap();
    assert_eq!(cli_args.format, Some(OutputFormat::Json));
    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.output_format, OutputFormat::Json);

    let cli_args = CliArgs::try_parse_from(vec!["test", "-f", "table"]).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.output_format, OutputFormat::Table);

    let config = ShopConfig::from_cli_args(CliArgs::try_parse_from(vec!["test"]).unwrap()).unwrap();
    assert_eq!(config.output_format, OutputFormat::Table);

    assert!(CliArgs::try_parse_from(vec!["test", "--format", "csv"]).is_err());
}

/// Test malformed values are rejected by the parser
#[test]
fn test_invalid_argument_values() {
    assert!(CliArgs::try_parse_from(vec!["test", "-n", "many"]).is_err());
    assert!(CliArgs::try_parse_from(vec!["test", "--balk-min", "-1"]).is_err());
    assert!(CliArgs::try_parse_from(vec!["test", "--no-such-flag"]).is_err());
}

/// Test out-of-range values parse but fail validation
#[test]
fn test_validation_after_parsing() {
    let cli_args = CliArgs::try_parse_from(vec!["test", "-n", "0"]).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());

    let cli_args = CliArgs::try_parse_from(vec!["test", "--mechanic-refer-rate", "1.5"]).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());

    let cli_args =
        CliArgs::try_parse_from(vec!["test", "--balk-min", "6", "--balk-max", "3"]).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());
}

/// Test command line values win over the configuration file
#[test]
fn test_cli_overrides_config_file() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        temp_file,
        r#"{{ "num_stalls": 4, "num_replications": 12, "loss_cost": 250.0, "output_format": "json", "mechanic_salary": 90.0 }}"#
    )
    .unwrap();
    let path = temp_file.path().to_str().unwrap().to_string();

    let args = vec!["test", "--config", path.as_str(), "--num-stalls", "1", "--mechanic-salary", "80"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    let config = ShopConfig::from_cli_args(cli_args).unwrap();

    assert_eq!(config.num_stalls, 1);
    assert_eq!(config.num_replications, 12);
    assert_eq!(config.loss_cost, 250.0);
    assert_eq!(config.output_format, OutputFormat::Json);
    assert_eq!(config.mechanic_salary, 80.0);
    assert_eq!(config.operation_hours, ShopConfig::default().operation_hours);
}

/// Test a missing configuration file is reported as such
#[test]
fn test_missing_config_file() {
    let cli_args =
        CliArgs::try_parse_from(vec!["test", "--config", "/no/such/shop.json"]).unwrap();
    match ShopConfig::from_cli_args(cli_args) {
        Err(ConfigError::FileNotFound(path)) => assert!(path.contains("shop.json")),
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

/// Test the printed default configuration loads back as a file
#[test]
fn test_print_config_template_loads() {
    let json = ShopConfig::default().print_json().unwrap();
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    temp_file.write_all(json.as_bytes()).unwrap();

    let loaded = ShopConfig::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded, ShopConfig::default());
}
