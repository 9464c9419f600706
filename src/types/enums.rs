//! Enumeration types for the shop simulator
//!
//! This module contains the enumerations shared across the simulation: service
//! stages, terminal customer outcomes, the metrics reported across
//! replications, and report output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two service stages of the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStage {
    /// Generalist first stage
    Mechanic,
    /// Stall-bound second stage
    Specialist,
}

impl fmt::Display for ServiceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStage::Mechanic => write!(f, "Mechanic"),
            ServiceStage::Specialist => write!(f, "Specialist"),
        }
    }
}

/// Terminal outcome of a customer; exactly one per customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerOutcome {
    /// Left on arrival because the waiting room looked too full
    Balked,
    /// Referred, but waited too long and went to a competitor
    LostAfterReferral,
    /// Referred, but every specialist stall was occupied
    LostAtStall,
    /// Repaired at the given stage
    Fixed(ServiceStage),
}

impl CustomerOutcome {
    /// Whether the outcome charges the loss cost
    pub fn is_loss(&self) -> bool {
        !matches!(self, CustomerOutcome::Fixed(_))
    }
}

impl fmt::Display for CustomerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerOutcome::Balked => write!(f, "Balked"),
            CustomerOutcome::LostAfterReferral => write!(f, "Lost After Referral"),
            CustomerOutcome::LostAtStall => write!(f, "Lost At Stall"),
            CustomerOutcome::Fixed(stage) => write!(f, "Fixed by {}", stage),
        }
    }
}

/// Per-replication metrics aggregated across a batch, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total operating cost of the day
    DailyOperatingCost,
    /// Customers that arrived
    TotalCustomers,
    /// Customers that balked
    BalkedCustomers,
    /// Customers lost after referral or at the stall check
    LostCustomers,
    /// Customers fully repaired
    FullyFixed,
    /// Mean time from arrival to repair completion
    ResponseTime,
    /// Busy-fraction proxy for mechanics
    MechanicUtilization,
    /// Busy-fraction proxy for specialists
    SpecialistUtilization,
    /// Time-average length of the waiting-for-mechanic queue
    WaitingForMechanic,
}

impl Metric {
    /// Every metric in report order
    pub const ALL: [Metric; 9] = [
        Metric::DailyOperatingCost,
        Metric::TotalCustomers,
        Metric::BalkedCustomers,
        Metric::LostCustomers,
        Metric::FullyFixed,
        Metric::ResponseTime,
        Metric::MechanicUtilization,
        Metric::SpecialistUtilization,
        Metric::WaitingForMechanic,
    ];
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::DailyOperatingCost => write!(f, "Daily Operating Cost"),
            Metric::TotalCustomers => write!(f, "Average Total Customers"),
            Metric::BalkedCustomers => write!(f, "Average Balked Customers"),
            Metric::LostCustomers => write!(f, "Average Lost Customers"),
            Metric::FullyFixed => write!(f, "Average Fully Fixed"),
            Metric::ResponseTime => write!(f, "Average Response Time"),
            Metric::MechanicUtilization => write!(f, "Mechanic Utilization Rate"),
            Metric::SpecialistUtilization => write!(f, "Specialist Utilization Rate"),
            Metric::WaitingForMechanic => write!(f, "Average in Waiting Room"),
        }
    }
}

/// Output format for batch reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
