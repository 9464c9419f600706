//! Single-replication model
//!
//! A [`ShopReplication`] wires one [`Shop`] context to a fresh scheduler, seeds
//! it with the fixed staff and the arrival generator, runs one business day
//! and extracts a [`ReplicationSnapshot`].

use crate::engine::{RunOutcome, Scheduler};
use crate::shop::{Generator, Mechanic, Shop, ShopProcess, Specialist, Trace};
use crate::statistics::TimeWeightedQueueStats;
use crate::types::{Metric, ProcessId, ShopConfig};
use crate::simulation::SimulationResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// Busy-fraction proxy derived from an idle queue
///
/// Computed as `(max idle - mean idle) / max idle`. When the idle queue never
/// held anyone the ratio has no meaning and the value is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Utilization {
    /// A usable ratio
    Defined(f64),
    /// The idle queue was never occupied
    Undefined,
}

impl Utilization {
    /// Derive the proxy from an idle queue's statistics at time `now`
    pub fn from_idle_queue(stats: &TimeWeightedQueueStats, now: f64) -> Self {
        let max = stats.max_length() as f64;
        if max == 0.0 {
            return Utilization::Undefined;
        }
        Utilization::Defined((max - stats.average_length(now)) / max)
    }

    /// The ratio, if defined
    pub fn value(&self) -> Option<f64> {
        match self {
            Utilization::Defined(value) => Some(*value),
            Utilization::Undefined => None,
        }
    }
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utilization::Defined(value) => write!(f, "{:.3}", value),
            Utilization::Undefined => write!(f, "undefined"),
        }
    }
}

/// Final metric values of one completed replication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSnapshot {
    /// 1-based replication index
    pub replication: usize,
    /// Seed the replication ran with
    pub seed: u64,
    /// Simulated time at which the run stopped
    pub end_time: f64,
    /// Why the scheduler stopped
    pub run_outcome: RunOutcome,
    /// Customers still in the system when the run stopped
    pub in_system_at_end: usize,
    /// Events processed
    pub steps: u64,
    /// Total operating cost of the day
    pub total_cost: f64,
    /// Customers that arrived
    pub total_customers: u64,
    /// Customers that balked
    pub balked: u64,
    /// Customers lost after referral or at the stall check
    pub lost: u64,
    /// Customers fully repaired
    pub fully_fixed: u64,
    /// Mean arrival-to-repair time of fixed customers, 0 when none was fixed
    pub mean_response_time: f64,
    /// Time-average length of the waiting room
    pub mean_waiting_for_mechanic: f64,
    /// Mechanic busy-fraction proxy
    pub mechanic_utilization: Utilization,
    /// Specialist busy-fraction proxy
    pub specialist_utilization: Utilization,
}

impl ReplicationSnapshot {
    /// Value this snapshot contributes to `metric`, `None` when undefined
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::DailyOperatingCost => Some(self.total_cost),
            Metric::TotalCustomers => Some(self.total_customers as f64),
            Metric::BalkedCustomers => Some(self.balked as f64),
            Metric::LostCustomers => Some(self.lost as f64),
            Metric::FullyFixed => Some(self.fully_fixed as f64),
            Metric::ResponseTime => Some(self.mean_response_time),
            Metric::MechanicUtilization => self.mechanic_utilization.value(),
            Metric::SpecialistUtilization => self.specialist_utilization.value(),
            Metric::WaitingForMechanic => Some(self.mean_waiting_for_mechanic),
        }
    }

    /// Check the snapshot is usable; the error explains why it is not
    pub fn validate(&self, operation_hours: f64) -> Result<(), String> {
        if self.end_time < operation_hours {
            return Err(format!(
                "end time {:.4} is before closing time {}",
                self.end_time, operation_hours
            ));
        }
        if self.run_outcome == RunOutcome::AgendaExhausted && self.in_system_at_end > 0 {
            return Err(format!(
                "event list ran dry with {} customers still in the system",
                self.in_system_at_end
            ));
        }
        for metric in Metric::ALL {
            if let Some(value) = self.metric(metric) {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!("{} has invalid value {}", metric, value));
                }
            }
        }
        Ok(())
    }
}

/// One independent simulated business day
#[derive(Debug)]
pub struct ShopReplication {
    replication: usize,
    seed: u64,
    shop: Shop,
    scheduler: Scheduler<ShopProcess>,
    mechanics: Vec<ProcessId>,
    specialists: Vec<ProcessId>,
    generator: ProcessId,
}

impl ShopReplication {
    /// Build the shop for replication `replication` with its own seed
    ///
    /// Every mechanic and specialist starts in its idle queue and is activated
    /// at time zero, followed by the arrival generator. The stall cost is
    /// charged before anything runs.
    pub fn new(config: ShopConfig, replication: usize, seed: u64) -> SimulationResult<Self> {
        let mut shop = Shop::new(config, seed)?;
        let mut scheduler = Scheduler::new();

        let stall_cost = shop.config().total_stall_cost();
        shop.charge(stall_cost);

        let mut mechanics = Vec::with_capacity(shop.config().num_mechanics);
        for _ in 0..shop.config().num_mechanics {
            let id = scheduler.spawn(ShopProcess::Mechanic(Mechanic::new()));
            shop.queues.idle_mechanics.push_back(0.0, id);
            scheduler.activate(id, 0.0)?;
            mechanics.push(id);
        }

        let mut specialists = Vec::with_capacity(shop.config().num_specialists);
        for _ in 0..shop.config().num_specialists {
            let id = scheduler.spawn(ShopProcess::Specialist(Specialist::new()));
            shop.queues.idle_specialists.push_back(0.0, id);
            scheduler.activate(id, 0.0)?;
            specialists.push(id);
        }

        let generator = scheduler.spawn(ShopProcess::Generator(Generator::new()));
        scheduler.activate(generator, 0.0)?;

        Ok(Self { replication, seed, shop, scheduler, mechanics, specialists, generator })
    }

    /// Build replication `replication` seeded the way a batch seeds it
    pub fn for_batch(config: &ShopConfig, replication: usize) -> SimulationResult<Self> {
        Self::new(config.clone(), replication, config.replication_seed(replication))
    }

    /// 1-based replication index
    pub fn replication(&self) -> usize {
        self.replication
    }

    /// Seed the replication runs with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shared shop context
    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// The scheduler driving this replication
    pub fn scheduler(&self) -> &Scheduler<ShopProcess> {
        &self.scheduler
    }

    /// Handles of the mechanics
    pub fn mechanics(&self) -> &[ProcessId] {
        &self.mechanics
    }

    /// Handles of the specialists
    pub fn specialists(&self) -> &[ProcessId] {
        &self.specialists
    }

    /// Handle of the arrival generator
    pub fn generator(&self) -> ProcessId {
        self.generator
    }

    /// Run the day until arrivals have stopped and the shop is empty
    #[instrument(skip(self), fields(replication = self.replication, seed = self.seed))]
    pub fn run(&mut self) -> SimulationResult<ReplicationSnapshot> {
        let span = crate::perf_span!("replication", replication = self.replication);
        let _enter = span.enter();

        let closing = self.shop.config().operation_hours;
        let run_outcome = self
            .scheduler
            .run(&mut self.shop, |now, shop| now > closing && shop.is_drained())?;

        let snapshot = self.snapshot(run_outcome);
        debug!(
            end_time = snapshot.end_time,
            steps = snapshot.steps,
            customers = snapshot.total_customers,
            cost = snapshot.total_cost,
            "replication finished"
        );
        if run_outcome == RunOutcome::AgendaExhausted {
            info!(in_system = snapshot.in_system_at_end, "event list exhausted before the stop condition held");
        }
        Ok(snapshot)
    }

    /// Take the event log recorded so far
    pub fn take_trace(&mut self) -> Trace {
        self.shop.take_trace()
    }

    fn snapshot(&self, run_outcome: RunOutcome) -> ReplicationSnapshot {
        let now = self.scheduler.now();
        let shop = &self.shop;
        let responses = shop.response_times();
        ReplicationSnapshot {
            replication: self.replication,
            seed: self.seed,
            end_time: now,
            run_outcome,
            in_system_at_end: shop.queues.in_system.len(),
            steps: self.scheduler.steps(),
            total_cost: shop.total_cost(),
            total_customers: shop.total_customers(),
            balked: shop.balked(),
            lost: shop.lost(),
            fully_fixed: shop.fully_fixed(),
            mean_response_time: if responses.count() == 0 { 0.0 } else { responses.mean() },
            mean_waiting_for_mechanic: shop.queues.waiting_for_mechanic.stats().average_length(now),
            mechanic_utilization: Utilization::from_idle_queue(
                shop.queues.idle_mechanics.stats(),
                now,
            ),
            specialist_utilization: Utilization::from_idle_queue(
                shop.queues.idle_specialists.stats(),
                now,
            ),
        }
    }
}
