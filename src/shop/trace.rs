//! Life-cycle event log
//!
//! When enabled, a replication appends one [`TraceEntry`] per customer
//! transition. The log carries enough state (stall occupancy, running cost) to
//! replay and check the shop's invariants after the fact.

use crate::types::{CustomerOutcome, ProcessId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of customer transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceKind {
    /// Customer entered the shop
    Arrived,
    /// A mechanic started working on the car
    MechanicStarted,
    /// The mechanic referred the car to a specialist
    Referred,
    /// The referred customer occupied a stall
    StallClaimed,
    /// A specialist started working on the car
    SpecialistStarted,
    /// The specialist finished and the stall was freed
    StallReleased,
    /// The customer reached a terminal outcome
    Outcome(CustomerOutcome),
    /// The customer left the system
    Departed,
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceKind::Arrived => write!(f, "arrived"),
            TraceKind::MechanicStarted => write!(f, "mechanic started"),
            TraceKind::Referred => write!(f, "referred"),
            TraceKind::StallClaimed => write!(f, "stall claimed"),
            TraceKind::SpecialistStarted => write!(f, "specialist started"),
            TraceKind::StallReleased => write!(f, "stall released"),
            TraceKind::Outcome(outcome) => write!(f, "{}", outcome),
            TraceKind::Departed => write!(f, "departed"),
        }
    }
}

/// One line of the event log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Simulated time of the transition
    pub time: f64,
    /// Customer the transition belongs to
    pub customer: ProcessId,
    /// What happened
    pub kind: TraceKind,
    /// Stalls occupied right after the transition
    pub stalls_in_use: usize,
    /// Operating cost accumulated right after the transition
    pub cost: f64,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>9.4}  {:<9} {:<22} stalls={} cost={:.2}",
            self.time, self.customer, self.kind, self.stalls_in_use, self.cost
        )
    }
}

/// Append-only event log; a disabled trace drops every entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    enabled: bool,
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Create a trace that records only when `enabled`
    pub fn new(enabled: bool) -> Self {
        Self { enabled, entries: Vec::new() }
    }

    /// Whether entries are being kept
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append an entry if recording
    pub fn record(&mut self, entry: TraceEntry) {
        if self.enabled {
            self.entries.push(entry);
        }
    }

    /// Recorded entries in order
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Take the recorded entries
    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}
