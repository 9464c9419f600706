//! Replication driver
//!
//! Runs the configured number of independent replications, replication `i`
//! seeded with `base_seed + 2i`, validates every snapshot and feeds it into
//! one [`ConfidenceCalculator`] per [`Metric`]. The first rejected snapshot
//! aborts the whole batch.

use crate::shop::Trace;
use crate::simulation::{ReplicationSnapshot, ShopReplication, SimulationError, SimulationResult};
use crate::statistics::{ConfidenceCalculator, ConfidenceSummary};
use crate::types::{BatchId, Metric, ShopConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Aggregated outcome of a batch of replications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Identifier of this batch
    pub batch_id: BatchId,
    /// When the batch finished
    pub generated_at: DateTime<Utc>,
    /// Configuration the batch ran with
    pub config: ShopConfig,
    /// One calculator per metric, in report order
    pub calculators: Vec<(Metric, ConfidenceCalculator)>,
    /// Snapshots of every replication, kept when per-replication output is on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<ReplicationSnapshot>,
    /// Event logs of every replication, kept when tracing is on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<Trace>,
}

impl BatchResults {
    fn new(config: ShopConfig) -> Self {
        let calculators = Metric::ALL
            .iter()
            .map(|metric| {
                (*metric, ConfidenceCalculator::new(metric.to_string(), config.confidence_level))
            })
            .collect();
        Self {
            batch_id: BatchId::new(),
            generated_at: Utc::now(),
            config,
            calculators,
            snapshots: Vec::new(),
            traces: Vec::new(),
        }
    }

    /// Calculator of one metric
    pub fn calculator(&self, metric: Metric) -> Option<&ConfidenceCalculator> {
        self.calculators.iter().find(|(m, _)| *m == metric).map(|(_, calculator)| calculator)
    }

    /// Summaries of every metric in report order
    pub fn summaries(&self) -> Vec<ConfidenceSummary> {
        self.calculators.iter().map(|(_, calculator)| calculator.summary()).collect()
    }

    /// Number of replications aggregated
    pub fn replications(&self) -> u64 {
        self.calculator(Metric::DailyOperatingCost).map_or(0, |c| c.observations())
    }

    fn absorb(&mut self, snapshot: &ReplicationSnapshot) {
        for (metric, calculator) in &mut self.calculators {
            match snapshot.metric(*metric) {
                Some(value) => calculator.update(value),
                None => warn!(
                    replication = snapshot.replication,
                    metric = %metric,
                    "undefined value left out of the interval"
                ),
            }
        }
    }
}

/// Runs batches of replications for one configuration
#[derive(Debug, Clone)]
pub struct ReplicationDriver {
    config: ShopConfig,
}

impl ReplicationDriver {
    /// Create a driver after validating the configuration
    pub fn new(config: ShopConfig) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration of the batch
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Run every replication and aggregate the results
    pub fn run(&self) -> SimulationResult<BatchResults> {
        self.run_with(|_| {})
    }

    /// Run every replication, handing each valid snapshot to `on_replication`
    /// as soon as it is aggregated
    #[instrument(skip(self, on_replication), fields(replications = self.config.num_replications, base_seed = self.config.base_seed))]
    pub fn run_with<F>(&self, on_replication: F) -> SimulationResult<BatchResults>
    where
        F: FnMut(&ReplicationSnapshot),
    {
        let config = &self.config;
        self.run_batch(
            |index| {
                let mut replication = ShopReplication::for_batch(config, index)?;
                let snapshot = replication.run()?;
                Ok((snapshot, replication.take_trace()))
            },
            on_replication,
        )
    }

    /// Drive `simulate` for replications `1..=n`, validating and aggregating
    /// each snapshot it returns
    fn run_batch<S, F>(
        &self,
        mut simulate: S,
        mut on_replication: F,
    ) -> SimulationResult<BatchResults>
    where
        S: FnMut(usize) -> SimulationResult<(ReplicationSnapshot, Trace)>,
        F: FnMut(&ReplicationSnapshot),
    {
        let mut results = BatchResults::new(self.config.clone());
        info!("Starting batch {} of {} replications", results.batch_id, self.config.num_replications);

        for index in 1..=self.config.num_replications {
            let (snapshot, trace) = simulate(index)?;

            if let Err(reason) = snapshot.validate(self.config.operation_hours) {
                warn!(replication = index, seed = snapshot.seed, %reason, "replication rejected, aborting batch");
                return Err(SimulationError::rejected(index, reason));
            }

            results.absorb(&snapshot);
            on_replication(&snapshot);

            if self.config.record_trace {
                results.traces.push(trace);
            }
            if self.config.include_output_per_replication {
                results.snapshots.push(snapshot);
            }
        }

        results.generated_at = Utc::now();
        info!("Batch {} finished after {} replications", results.batch_id, results.replications());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Utilization;

    fn small_config() -> ShopConfig {
        ShopConfig { num_replications: 5, ..ShopConfig::default() }
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let config = ShopConfig { num_replications: 0, ..ShopConfig::default() };
        let err = ReplicationDriver::new(config).unwrap_err();
        assert!(matches!(err, SimulationError::ConfigValidation(_)));
    }

    #[test]
    fn test_batch_aggregates_every_replication() {
        let driver = ReplicationDriver::new(small_config()).unwrap();
        let mut seen = Vec::new();
        let results = driver.run_with(|snapshot| seen.push(snapshot.seed)).unwrap();

        assert_eq!(seen, vec![981, 983, 985, 987, 989]);
        assert_eq!(results.replications(), 5);
        assert_eq!(results.snapshots.len(), 5);
        assert!(results.traces.is_empty());
        assert_eq!(results.summaries().len(), Metric::ALL.len());
    }

    #[test]
    fn test_undefined_utilization_is_skipped() {
        let mut results = BatchResults::new(small_config());
        let driver = ReplicationDriver::new(small_config()).unwrap();
        let mut snapshot = ShopReplication::for_batch(driver.config(), 1).unwrap().run().unwrap();
        snapshot.specialist_utilization = Utilization::Undefined;
        results.absorb(&snapshot);

        assert_eq!(results.calculator(Metric::SpecialistUtilization).unwrap().observations(), 0);
        assert_eq!(results.calculator(Metric::MechanicUtilization).unwrap().observations(), 1);
    }

    #[test]
    fn test_quiet_batch_keeps_no_snapshots() {
        let config = ShopConfig { include_output_per_replication: false, ..small_config() };
        let results = ReplicationDriver::new(config).unwrap().run().unwrap();
        assert!(results.snapshots.is_empty());
        assert_eq!(results.replications(), 5);
    }

    #[test]
    fn test_invalid_snapshot_aborts_batch() {
        let driver = ReplicationDriver::new(small_config()).unwrap();
        let config = driver.config().clone();
        let mut delivered = Vec::new();

        let result = driver.run_batch(
            |index| {
                let mut replication = ShopReplication::for_batch(&config, index)?;
                let mut snapshot = replication.run()?;
                if index == 3 {
                    // Ending before closing time cannot happen in a real day
                    snapshot.end_time = config.operation_hours - 1.0;
                }
                Ok((snapshot, replication.take_trace()))
            },
            |snapshot| delivered.push(snapshot.replication),
        );

        match result {
            Err(SimulationError::ReplicationRejected { replication, reason }) => {
                assert_eq!(replication, 3);
                assert!(!reason.is_empty());
            }
            other => panic!("Expected ReplicationRejected, got {:?}", other.map(|_| ())),
        }
        assert_eq!(delivered, vec![1, 2]);
    }

    #[test]
    fn test_scheduler_failure_aborts_batch() {
        let driver = ReplicationDriver::new(small_config()).unwrap();
        let config = driver.config().clone();
        let mut calls = 0;

        let result = driver.run_batch(
            |index| {
                calls += 1;
                if index == 2 {
                    return Err(crate::engine::SchedulerError::NonFiniteTime(f64::NAN).into());
                }
                let mut replication = ShopReplication::for_batch(&config, index)?;
                let snapshot = replication.run()?;
                Ok((snapshot, replication.take_trace()))
            },
            |_| {},
        );

        assert!(matches!(result, Err(SimulationError::Scheduler(_))));
        assert_eq!(calls, 2);
    }
}
