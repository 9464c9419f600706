//! Configuration structures for the auto body shop simulator
//!
//! This module contains the shop configuration structure and validation logic
//! used to control the business rules of one simulated day and the shape of a
//! replication batch. Values are layered: defaults, then an optional JSON
//! configuration file, then command line overrides.

use super::OutputFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "auto-body-shop-simulator",
    version = "1.0.0",
    about = "Auto Body Shop Simulator - Estimates daily cost and service levels of a two-stage repair shop",
    long_about = "Runs independent replications of a simulated business day at an auto body shop with generalist mechanics and stall-bound specialists, then reports per-metric confidence intervals.

EXAMPLES:
    # Run with default settings (100 replications)
    auto-body-shop-simulator

    # Use a configuration file
    auto-body-shop-simulator --config shop.json

    # Try a second stall and two mechanics
    auto-body-shop-simulator --num-stalls 2 --num-mechanics 2

    # Generate configuration template
    auto-body-shop-simulator --print-config > my-shop.json

    # Validate configuration without running
    auto-body-shop-simulator --config my-shop.json --dry-run

    # Write a machine-readable report
    auto-body-shop-simulator --output results.json

    # Print the report as JSON instead of tables
    auto-body-shop-simulator --format json --quiet-replications

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Hours the shop accepts new customers
    #[arg(
        long,
        help = "Hours the shop accepts arrivals",
        long_help = "Length of the arrival window in simulated hours. The day continues past it until every customer has left. Default: 6"
    )]
    pub operation_hours: Option<f64>,

    /// Number of mechanics on duty
    #[arg(long, help = "Number of mechanics")]
    pub num_mechanics: Option<usize>,

    /// Number of specialists on duty
    #[arg(long, help = "Number of specialists")]
    pub num_specialists: Option<usize>,

    /// Number of specialist stalls
    #[arg(
        long,
        help = "Number of specialist stalls",
        long_help = "Number of stalls a referred car can occupy. Zero is allowed: every referral is then lost. Default: 1"
    )]
    pub num_stalls: Option<usize>,

    /// Fixed daily cost per stall
    #[arg(long, help = "Daily cost per stall")]
    pub stall_cost: Option<f64>,

    /// Cost of losing a customer
    #[arg(long, help = "Cost charged per lost or balked customer")]
    pub loss_cost: Option<f64>,

    /// Daily mechanic salary
    #[arg(long, help = "Daily salary per mechanic")]
    pub mechanic_salary: Option<f64>,

    /// Mechanic commission per served car
    #[arg(long, help = "Commission paid to a mechanic per car served")]
    pub mechanic_commission: Option<f64>,

    /// Daily specialist salary
    #[arg(long, help = "Daily salary per specialist")]
    pub specialist_salary: Option<f64>,

    /// Specialist commission per repaired car
    #[arg(long, help = "Commission paid to a specialist per car repaired")]
    pub specialist_commission: Option<f64>,

    /// Probability that a mechanic refers a car to a specialist
    #[arg(long, help = "Mechanic referral probability (0.0-1.0)")]
    pub mechanic_refer_rate: Option<f64>,

    /// Lower bound of the balk threshold
    #[arg(long, help = "Minimum balk threshold")]
    pub balk_min: Option<u32>,

    /// Upper bound of the balk threshold
    #[arg(long, help = "Maximum balk threshold")]
    pub balk_max: Option<u32>,

    /// Number of replications in the batch
    #[arg(
        short = 'n',
        long,
        help = "Number of replications",
        long_help = "Number of independent simulated days. Must be greater than 0. Default: 100"
    )]
    pub num_replications: Option<usize>,

    /// Base seed; replication i uses base + 2i
    #[arg(long, help = "Base random seed for reproducible results")]
    pub base_seed: Option<u64>,

    /// Confidence level of the reported intervals
    #[arg(long, help = "Confidence level (0.0-1.0, exclusive)")]
    pub confidence_level: Option<f64>,

    /// Suppress the per-replication table
    #[arg(long, help = "Do not print one line per replication")]
    pub quiet_replications: bool,

    /// Record a life-cycle trace for every replication
    #[arg(long, help = "Record a life-cycle event trace per replication")]
    pub trace: bool,

    /// Format of the report printed to stdout
    #[arg(
        short = 'f',
        long,
        help = "Report format printed to stdout (table or json)",
        long_help = "Report format printed to stdout. `table` prints the replication lines and \
                     the interval table, `json` prints the full batch report. Default: table"
    )]
    pub format: Option<OutputFormat>,

    /// Output path for the JSON batch report
    #[arg(long, help = "Write the batch report as JSON to this path")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Hours the shop accepts new customers
    pub operation_hours: Option<f64>,
    /// Fixed daily cost per stall
    pub stall_cost: Option<f64>,
    /// Cost of losing a customer
    pub loss_cost: Option<f64>,
    /// Mean interarrival time during the first two hours
    pub arrival_mean_early: Option<f64>,
    /// Mean interarrival time from hour two to hour eight
    pub arrival_mean_peak: Option<f64>,
    /// Mean interarrival time after hour eight
    pub arrival_mean_late: Option<f64>,
    /// Number of mechanics
    pub num_mechanics: Option<usize>,
    /// Daily mechanic salary
    pub mechanic_salary: Option<f64>,
    /// Mechanic commission per served car
    pub mechanic_commission: Option<f64>,
    /// Mean mechanic service time
    pub mechanic_fix_time: Option<f64>,
    /// Mechanic referral probability
    pub mechanic_refer_rate: Option<f64>,
    /// Number of specialists
    pub num_specialists: Option<usize>,
    /// Number of specialist stalls
    pub num_stalls: Option<usize>,
    /// Daily specialist salary
    pub specialist_salary: Option<f64>,
    /// Specialist commission per repaired car
    pub specialist_commission: Option<f64>,
    /// Mean specialist service time
    pub specialist_fix_time: Option<f64>,
    /// Lower bound of the balk threshold
    pub balk_min: Option<u32>,
    /// Upper bound of the balk threshold
    pub balk_max: Option<u32>,
    /// Longest a referred customer is willing to have waited
    pub referral_patience: Option<f64>,
    /// Number of replications
    pub num_replications: Option<usize>,
    /// Base random seed
    pub base_seed: Option<u64>,
    /// Print one line per replication
    pub include_output_per_replication: Option<bool>,
    /// Confidence level of the reported intervals
    pub confidence_level: Option<f64>,
    /// Record a life-cycle trace
    pub record_trace: Option<bool>,
    /// Report format printed to stdout
    pub output_format: Option<OutputFormat>,
}

/// Configuration for the shop and the replication batch
///
/// Times are in simulated hours, money in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Hours the shop accepts new customers
    pub operation_hours: f64,
    /// Fixed daily cost per stall, charged up front
    pub stall_cost: f64,
    /// Cost charged for every balked or lost customer
    pub loss_cost: f64,
    /// Mean interarrival time during the first two hours
    pub arrival_mean_early: f64,
    /// Mean interarrival time from hour two to hour eight
    pub arrival_mean_peak: f64,
    /// Mean interarrival time after hour eight
    pub arrival_mean_late: f64,
    /// Number of mechanics
    pub num_mechanics: usize,
    /// Daily mechanic salary
    pub mechanic_salary: f64,
    /// Mechanic commission per served car
    pub mechanic_commission: f64,
    /// Mean mechanic service time
    pub mechanic_fix_time: f64,
    /// Probability that a mechanic refers a car to a specialist
    pub mechanic_refer_rate: f64,
    /// Number of specialists
    pub num_specialists: usize,
    /// Number of specialist stalls
    pub num_stalls: usize,
    /// Daily specialist salary
    pub specialist_salary: f64,
    /// Specialist commission per repaired car
    pub specialist_commission: f64,
    /// Mean specialist service time
    pub specialist_fix_time: f64,
    /// Lower bound of the balk threshold
    pub balk_min: u32,
    /// Upper bound of the balk threshold
    pub balk_max: u32,
    /// Longest a referred customer is willing to have waited since arrival
    pub referral_patience: f64,
    /// Number of replications in the batch
    pub num_replications: usize,
    /// Base random seed; replication i is seeded with base + 2i
    pub base_seed: u64,
    /// Print one line per replication
    pub include_output_per_replication: bool,
    /// Confidence level of the reported intervals
    pub confidence_level: f64,
    /// Record a life-cycle trace for each replication
    pub record_trace: bool,
    /// Report format printed to stdout
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for shop configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// A count that must be positive is zero
    #[error("{field} must be greater than 0")]
    ZeroCount {
        /// Name of the offending field
        field: String,
    },

    /// A duration that must be positive is not
    #[error("{field} must be a positive finite number of hours, got {value}")]
    InvalidDuration {
        /// Name of the offending field
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Probability value is out of range
    #[error("Invalid probability for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability {
        /// Name of the field with invalid probability
        field: String,
        /// The invalid probability value
        value: f64,
    },

    /// Confidence level is not strictly between 0 and 1
    #[error("Confidence level must be strictly between 0.0 and 1.0, got {0}")]
    InvalidConfidenceLevel(f64),

    /// Money value is negative or not finite
    #[error("Invalid amount for {field}: {value} (must be a non-negative number)")]
    InvalidAmount {
        /// Name of the offending field
        field: String,
        /// The invalid amount
        value: f64,
    },

    /// Balk range is invalid
    #[error("Invalid balk range: min ({0}) must be >= 1 and <= max ({1})")]
    InvalidBalkRange(u32, u32),
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            operation_hours: 6.0,
            stall_cost: 100.0,
            loss_cost: 400.0,
            arrival_mean_early: 15.0 / 60.0,
            arrival_mean_peak: 6.0 / 60.0,
            arrival_mean_late: 9.0 / 60.0,
            num_mechanics: 1,
            mechanic_salary: 100.0,
            mechanic_commission: 10.0,
            mechanic_fix_time: 8.0 / 60.0,
            mechanic_refer_rate: 0.4,
            num_specialists: 1,
            num_stalls: 1,
            specialist_salary: 300.0,
            specialist_commission: 100.0,
            specialist_fix_time: 25.0 / 60.0,
            balk_min: 1,
            balk_max: 8,
            referral_patience: 0.5,
            num_replications: 100,
            base_seed: 979,
            include_output_per_replication: true,
            confidence_level: 0.95,
            record_trace: false,
            output_format: OutputFormat::Table,
        }
    }
}

impl ShopConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let d = Self::default();

        Self {
            operation_hours: file.operation_hours.unwrap_or(d.operation_hours),
            stall_cost: file.stall_cost.unwrap_or(d.stall_cost),
            loss_cost: file.loss_cost.unwrap_or(d.loss_cost),
            arrival_mean_early: file.arrival_mean_early.unwrap_or(d.arrival_mean_early),
            arrival_mean_peak: file.arrival_mean_peak.unwrap_or(d.arrival_mean_peak),
            arrival_mean_late: file.arrival_mean_late.unwrap_or(d.arrival_mean_late),
            num_mechanics: file.num_mechanics.unwrap_or(d.num_mechanics),
            mechanic_salary: file.mechanic_salary.unwrap_or(d.mechanic_salary),
            mechanic_commission: file.mechanic_commission.unwrap_or(d.mechanic_commission),
            mechanic_fix_time: file.mechanic_fix_time.unwrap_or(d.mechanic_fix_time),
            mechanic_refer_rate: file.mechanic_refer_rate.unwrap_or(d.mechanic_refer_rate),
            num_specialists: file.num_specialists.unwrap_or(d.num_specialists),
            num_stalls: file.num_stalls.unwrap_or(d.num_stalls),
            specialist_salary: file.specialist_salary.unwrap_or(d.specialist_salary),
            specialist_commission: file.specialist_commission.unwrap_or(d.specialist_commission),
            specialist_fix_time: file.specialist_fix_time.unwrap_or(d.specialist_fix_time),
            balk_min: file.balk_min.unwrap_or(d.balk_min),
            balk_max: file.balk_max.unwrap_or(d.balk_max),
            referral_patience: file.referral_patience.unwrap_or(d.referral_patience),
            num_replications: file.num_replications.unwrap_or(d.num_replications),
            base_seed: file.base_seed.unwrap_or(d.base_seed),
            include_output_per_replication: file
                .include_output_per_replication
                .unwrap_or(d.include_output_per_replication),
            confidence_level: file.confidence_level.unwrap_or(d.confidence_level),
            record_trace: file.record_trace.unwrap_or(d.record_trace),
            output_format: file.output_format.unwrap_or(d.output_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.operation_hours {
            config.operation_hours = value;
        }
        if let Some(value) = args.num_mechanics {
            config.num_mechanics = value;
        }
        if let Some(value) = args.num_specialists {
            config.num_specialists = value;
        }
        if let Some(value) = args.num_stalls {
            config.num_stalls = value;
        }
        if let Some(value) = args.stall_cost {
            config.stall_cost = value;
        }
        if let Some(value) = args.loss_cost {
            config.loss_cost = value;
        }
        if let Some(value) = args.mechanic_salary {
            config.mechanic_salary = value;
        }
        if let Some(value) = args.mechanic_commission {
            config.mechanic_commission = value;
        }
        if let Some(value) = args.specialist_salary {
            config.specialist_salary = value;
        }
        if let Some(value) = args.specialist_commission {
            config.specialist_commission = value;
        }
        if let Some(value) = args.mechanic_refer_rate {
            config.mechanic_refer_rate = value;
        }
        if let Some(value) = args.balk_min {
            config.balk_min = value;
        }
        if let Some(value) = args.balk_max {
            config.balk_max = value;
        }
        if let Some(value) = args.num_replications {
            config.num_replications = value;
        }
        if let Some(value) = args.base_seed {
            config.base_seed = value;
        }
        if let Some(value) = args.confidence_level {
            config.confidence_level = value;
        }
        if let Some(value) = args.format {
            config.output_format = value;
        }

        // Flags can only switch behavior on or off relative to the file
        if args.quiet_replications {
            config.include_output_per_replication = false;
        }
        if args.trace {
            config.record_trace = true;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        Self::validate_count("num_replications", self.num_replications)?;
        Self::validate_count("num_mechanics", self.num_mechanics)?;
        Self::validate_count("num_specialists", self.num_specialists)?;

        Self::validate_duration("operation_hours", self.operation_hours)?;
        Self::validate_duration("arrival_mean_early", self.arrival_mean_early)?;
        Self::validate_duration("arrival_mean_peak", self.arrival_mean_peak)?;
        Self::validate_duration("arrival_mean_late", self.arrival_mean_late)?;
        Self::validate_duration("mechanic_fix_time", self.mechanic_fix_time)?;
        Self::validate_duration("specialist_fix_time", self.specialist_fix_time)?;
        if !self.referral_patience.is_finite() || self.referral_patience < 0.0 {
            return Err(ConfigValidationError::InvalidDuration {
                field: "referral_patience".to_string(),
                value: self.referral_patience,
            });
        }

        Self::validate_probability("mechanic_refer_rate", self.mechanic_refer_rate)?;

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigValidationError::InvalidConfidenceLevel(self.confidence_level));
        }

        Self::validate_amount("stall_cost", self.stall_cost)?;
        Self::validate_amount("loss_cost", self.loss_cost)?;
        Self::validate_amount("mechanic_salary", self.mechanic_salary)?;
        Self::validate_amount("mechanic_commission", self.mechanic_commission)?;
        Self::validate_amount("specialist_salary", self.specialist_salary)?;
        Self::validate_amount("specialist_commission", self.specialist_commission)?;

        if self.balk_min < 1 || self.balk_min > self.balk_max {
            return Err(ConfigValidationError::InvalidBalkRange(self.balk_min, self.balk_max));
        }

        Ok(())
    }

    fn validate_count(field: &str, value: usize) -> Result<(), ConfigValidationError> {
        if value == 0 {
            return Err(ConfigValidationError::ZeroCount { field: field.to_string() });
        }
        Ok(())
    }

    fn validate_duration(field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigValidationError::InvalidDuration { field: field.to_string(), value });
        }
        Ok(())
    }

    fn validate_probability(field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidProbability {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn validate_amount(field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigValidationError::InvalidAmount { field: field.to_string(), value });
        }
        Ok(())
    }

    /// Seed of replication `index` (1-based)
    pub fn replication_seed(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(2 * index as u64)
    }

    /// Cost charged up front for the stalls
    pub fn total_stall_cost(&self) -> f64 {
        self.num_stalls as f64 * self.stall_cost
    }
}
