//! Batch reporting
//!
//! Text tables for the console and a JSON document for machines. Nothing in
//! here feeds back into the simulation.

use crate::simulation::{BatchResults, ReplicationSnapshot, SimulationResult};
use crate::statistics::ConfidenceSummary;
use crate::types::{BatchId, OutputFormat, ShopConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Header matching [`replication_line`]
pub fn replication_header() -> String {
    format!(
        "{:>6}: {:<6} {:<9}  {:<9}  {:<9}  {:<14}  {:<12} {:<15}",
        "RUN", "COST", "CUSTOMERS", "BALKED", "LOST", "FULLY FIXED", "RESPONSE", "WAITING ROOM"
    )
}

/// One diagnostic line per replication
pub fn replication_line(snapshot: &ReplicationSnapshot) -> String {
    format!(
        "{:>6}: {:<6.0} {:<9}  {:<9}  {:<9}  {:<14}  {:<12.3} {:<15.3}",
        snapshot.replication,
        snapshot.total_cost,
        snapshot.total_customers,
        snapshot.balked,
        snapshot.lost,
        snapshot.fully_fixed,
        snapshot.mean_response_time,
        snapshot.mean_waiting_for_mechanic
    )
}

/// Final results table across replications
pub fn summary_table(summaries: &[ConfidenceSummary]) -> String {
    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<30} {:>6} {:>12} {:>12} {:>12} {:>12} {:>11} {:>12} {:>12}",
        "TITLE", "OBS", "MEAN", "STD. DEV", "MIN", "MAX", "CONF. LEVEL", "CONF. LOWER", "CONF. UPPER"
    );
    let _ = writeln!(table, "{}", "-".repeat(129));
    for summary in summaries {
        let _ = writeln!(table, "{}", summary);
    }
    table
}

/// Machine-readable batch report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Identifier of the batch
    pub batch_id: BatchId,
    /// When the batch finished
    pub generated_at: DateTime<Utc>,
    /// Configuration the batch ran with
    pub config: ShopConfig,
    /// One summary per metric in report order
    pub summaries: Vec<ConfidenceSummary>,
    /// Per-replication snapshots, when they were kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replications: Vec<ReplicationSnapshot>,
}

impl From<&BatchResults> for BatchReport {
    fn from(results: &BatchResults) -> Self {
        Self {
            batch_id: results.batch_id,
            generated_at: results.generated_at,
            config: results.config.clone(),
            summaries: results.summaries(),
            replications: results.snapshots.clone(),
        }
    }
}

/// Render a batch in the requested format
pub fn render(results: &BatchResults, format: OutputFormat) -> SimulationResult<String> {
    match format {
        OutputFormat::Table => {
            let mut out = String::new();
            if !results.snapshots.is_empty() {
                let _ = writeln!(out, "{}", replication_header());
                for snapshot in &results.snapshots {
                    let _ = writeln!(out, "{}", replication_line(snapshot));
                }
                out.push('\n');
            }
            out.push_str(&summary_table(&results.summaries()));
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&BatchReport::from(results))?),
    }
}

/// Write the JSON report of a batch to `path`
pub fn write_json_report<P: AsRef<Path>>(results: &BatchResults, path: P) -> SimulationResult<()> {
    let path = path.as_ref();
    fs::write(path, render(results, OutputFormat::Json)?)?;
    info!("Wrote batch report {} to {}", results.batch_id, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RunOutcome;
    use crate::simulation::Utilization;
    use crate::statistics::ConfidenceCalculator;

    fn snapshot() -> ReplicationSnapshot {
        ReplicationSnapshot {
            replication: 12,
            seed: 1003,
            end_time: 6.7,
            run_outcome: RunOutcome::StopConditionMet,
            in_system_at_end: 0,
            steps: 300,
            total_cost: 1760.0,
            total_customers: 51,
            balked: 4,
            lost: 6,
            fully_fixed: 41,
            mean_response_time: 0.41234,
            mean_waiting_for_mechanic: 1.5,
            mechanic_utilization: Utilization::Defined(0.9),
            specialist_utilization: Utilization::Defined(0.6),
        }
    }

    #[test]
    fn test_replication_line_layout() {
        let line = replication_line(&snapshot());
        assert!(line.starts_with("    12: 1760   51"));
        assert!(line.contains("0.412"));
        assert!(line.ends_with("1.500          "));
    }

    #[test]
    fn test_summary_table_lists_every_row() {
        let mut cost = ConfidenceCalculator::new("Daily Operating Cost", 0.95);
        cost.update(1000.0);
        cost.update(1200.0);
        let table = summary_table(&[cost.summary()]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("TITLE"));
        assert!(lines[2].starts_with("Daily Operating Cost"));
    }
}
