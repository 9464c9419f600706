//! Per-replication shop context and the process variants it runs
//!
//! [`Shop`] is the single mutable context every life cycle of one replication
//! reads and updates: configuration, variate streams, queues, the stall pool,
//! customer tickets and the statistics trackers. [`ShopProcess`] is the closed
//! set of life cycles the scheduler dispatches to.

use crate::engine::{Context, Process, SchedulerError, SchedulerResult, Suspend};
use crate::shop::{
    Customer, Generator, Mechanic, ShopQueues, ShopVariates, Specialist, StallPool, Trace,
    TraceEntry, TraceKind,
};
use crate::statistics::{Aggregate, Counter, Tally};
use crate::types::{ConfigValidationError, CustomerOutcome, ProcessId, ServiceStage, ShopConfig};
use std::collections::HashMap;

/// Where a customer stands between suspension points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Waiting for or being served by a mechanic
    AwaitingMechanic,
    /// Referred by a mechanic to the specialist stage
    Referred,
    /// Reached a terminal outcome; nothing left but to leave
    Finished(CustomerOutcome),
}

/// Bookkeeping the shop keeps for every customer that arrived
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerTicket {
    /// Simulated arrival time
    pub arrival: f64,
    /// Current disposition
    pub disposition: Disposition,
}

/// Shared state of one replication
#[derive(Debug)]
pub struct Shop {
    config: ShopConfig,
    /// Random streams
    pub variates: ShopVariates,
    /// Queueing structures
    pub queues: ShopQueues,
    /// Specialist stalls
    pub stalls: StallPool,
    customers: HashMap<ProcessId, CustomerTicket>,
    outcomes: HashMap<CustomerOutcome, u64>,
    total_customers: Counter,
    balked: Counter,
    lost: Counter,
    fully_fixed: Counter,
    response_times: Tally,
    cost: Aggregate,
    trace: Trace,
}

impl Shop {
    /// Create the context for one replication seeded with `seed`
    pub fn new(config: ShopConfig, seed: u64) -> Result<Self, ConfigValidationError> {
        let variates = ShopVariates::new(&config, seed)?;
        Ok(Self {
            variates,
            queues: ShopQueues::new(0.0),
            stalls: StallPool::new(config.num_stalls),
            customers: HashMap::new(),
            outcomes: HashMap::new(),
            total_customers: Counter::new("Total Customers"),
            balked: Counter::new("Balked Customers"),
            lost: Counter::new("Lost Customers"),
            fully_fixed: Counter::new("Fully Fixed"),
            response_times: Tally::new("Response Time"),
            cost: Aggregate::new("Daily Operating Cost"),
            trace: Trace::new(config.record_trace),
            config,
        })
    }

    /// Configuration of this replication
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Register an arriving customer
    pub fn admit(&mut self, now: f64, customer: ProcessId) {
        self.total_customers.increment();
        self.customers.insert(
            customer,
            CustomerTicket { arrival: now, disposition: Disposition::AwaitingMechanic },
        );
        self.queues.in_system.push_back(now, customer);
        self.record(now, customer, TraceKind::Arrived);
    }

    /// Ticket of a customer, if it ever arrived
    pub fn ticket(&self, customer: ProcessId) -> Option<&CustomerTicket> {
        self.customers.get(&customer)
    }

    /// Current disposition of a customer
    pub fn disposition(&self, customer: ProcessId) -> SchedulerResult<Disposition> {
        self.ticket(customer)
            .map(|ticket| ticket.disposition)
            .ok_or_else(|| SchedulerError::fault(customer, "customer has no ticket"))
    }

    /// Mark a customer as referred to the specialist stage
    pub fn refer(&mut self, now: f64, customer: ProcessId) -> SchedulerResult<()> {
        let ticket = self.ticket_mut(customer)?;
        if ticket.disposition != Disposition::AwaitingMechanic {
            return Err(SchedulerError::fault(customer, "only a customer at the mechanic stage can be referred"));
        }
        ticket.disposition = Disposition::Referred;
        self.record(now, customer, TraceKind::Referred);
        Ok(())
    }

    /// Settle a customer's terminal outcome and update every tracker it feeds
    ///
    /// A customer can be finished exactly once.
    pub fn finish(
        &mut self,
        now: f64,
        customer: ProcessId,
        outcome: CustomerOutcome,
    ) -> SchedulerResult<()> {
        let ticket = self.ticket_mut(customer)?;
        if let Disposition::Finished(previous) = ticket.disposition {
            return Err(SchedulerError::fault(
                customer,
                format!("customer already finished as {}", previous),
            ));
        }
        ticket.disposition = Disposition::Finished(outcome);
        let arrival = ticket.arrival;

        match outcome {
            CustomerOutcome::Balked => self.balked.increment(),
            CustomerOutcome::LostAfterReferral | CustomerOutcome::LostAtStall => {
                self.lost.increment()
            }
            CustomerOutcome::Fixed(_) => {
                self.fully_fixed.increment();
                self.response_times.record(now - arrival);
            }
        }
        if outcome.is_loss() {
            self.cost.add(self.config.loss_cost);
        }
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        self.record(now, customer, TraceKind::Outcome(outcome));
        Ok(())
    }

    /// Remove a customer from the in-system set
    pub fn depart(&mut self, now: f64, customer: ProcessId) -> SchedulerResult<()> {
        if !self.queues.in_system.remove(now, customer) {
            return Err(SchedulerError::fault(customer, "departing customer was not in the system"));
        }
        self.record(now, customer, TraceKind::Departed);
        Ok(())
    }

    /// Add a non-negative amount to the operating cost
    pub fn charge(&mut self, amount: f64) {
        self.cost.add(amount);
    }

    /// Append a trace entry carrying the current stall occupancy and cost
    pub fn record(&mut self, now: f64, customer: ProcessId, kind: TraceKind) {
        if self.trace.is_enabled() {
            self.trace.record(TraceEntry {
                time: now,
                customer,
                kind,
                stalls_in_use: self.stalls.in_use(),
                cost: self.cost.total(),
            });
        }
    }

    /// Customers that arrived
    pub fn total_customers(&self) -> u64 {
        self.total_customers.value()
    }

    /// Customers that balked
    pub fn balked(&self) -> u64 {
        self.balked.value()
    }

    /// Customers lost after referral or at the stall check
    pub fn lost(&self) -> u64 {
        self.lost.value()
    }

    /// Customers fully repaired
    pub fn fully_fixed(&self) -> u64 {
        self.fully_fixed.value()
    }

    /// Number of customers that ended with `outcome`
    pub fn outcome_count(&self, outcome: CustomerOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Customers fixed at the given stage
    pub fn fixed_by(&self, stage: ServiceStage) -> u64 {
        self.outcome_count(CustomerOutcome::Fixed(stage))
    }

    /// Response times of every fixed customer
    pub fn response_times(&self) -> &Tally {
        &self.response_times
    }

    /// Operating cost so far
    pub fn total_cost(&self) -> f64 {
        self.cost.total()
    }

    /// Whether no customer is left in the system
    pub fn is_drained(&self) -> bool {
        self.queues.in_system.is_empty()
    }

    /// The event log
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Take the event log, leaving an empty one behind
    pub fn take_trace(&mut self) -> Trace {
        std::mem::replace(&mut self.trace, Trace::new(false))
    }

    fn ticket_mut(&mut self, customer: ProcessId) -> SchedulerResult<&mut CustomerTicket> {
        self.customers
            .get_mut(&customer)
            .ok_or_else(|| SchedulerError::fault(customer, "customer has no ticket"))
    }
}

/// Every life cycle a shop replication runs
#[derive(Debug)]
pub enum ShopProcess {
    /// Arrival generator
    Generator(Generator),
    /// One customer
    Customer(Customer),
    /// One mechanic
    Mechanic(Mechanic),
    /// One specialist
    Specialist(Specialist),
}

impl Process for ShopProcess {
    type Model = Shop;

    fn resume(
        &mut self,
        me: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, Self>,
    ) -> SchedulerResult<Suspend> {
        match self {
            ShopProcess::Generator(generator) => generator.resume(me, shop, cx),
            ShopProcess::Customer(customer) => customer.resume(me, shop, cx),
            ShopProcess::Mechanic(mechanic) => mechanic.resume(me, shop, cx),
            ShopProcess::Specialist(specialist) => specialist.resume(me, shop, cx),
        }
    }
}
