//! Cooperative process abstraction
//!
//! A process is a resumable state machine. Each time the scheduler resumes it,
//! the process runs until its next suspension point and reports how it wants
//! to be suspended through [`Suspend`]. Nothing pre-empts a running process, so
//! every mutation between two suspension points is atomic with respect to the
//! rest of the model.

use crate::engine::{Scheduler, SchedulerResult};
use crate::types::ProcessId;
use serde::{Deserialize, Serialize};

/// Scheduling state of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    /// Not on the event list; waits for an explicit activation
    Passive,
    /// Has exactly one pending resumption on the event list
    Scheduled,
    /// Life cycle finished; the process is never resumed again
    Terminated,
}

/// How a resumed process gives control back to the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Suspend {
    /// Resume again after the given simulated duration
    Hold(f64),
    /// Wait until another process activates this one
    Passivate,
    /// End the life cycle
    Terminate,
}

/// A life cycle the scheduler can resume
pub trait Process: Sized {
    /// Shared per-replication state every process reads and mutates
    type Model;

    /// Run from the last suspension point to the next one
    fn resume(
        &mut self,
        me: ProcessId,
        model: &mut Self::Model,
        cx: &mut Context<'_, Self>,
    ) -> SchedulerResult<Suspend>;
}

/// Scheduler access granted to a running process
///
/// The running process itself is detached from the scheduler while this
/// context exists, so it can freely spawn and activate other processes.
#[derive(Debug)]
pub struct Context<'a, P> {
    scheduler: &'a mut Scheduler<P>,
}

impl<'a, P: Process> Context<'a, P> {
    pub(crate) fn new(scheduler: &'a mut Scheduler<P>) -> Self {
        Self { scheduler }
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Schedule `process` to resume at absolute time `at`
    pub fn activate(&mut self, process: ProcessId, at: f64) -> SchedulerResult<()> {
        self.scheduler.activate(process, at)
    }

    /// Schedule `process` to resume at the current instant, after every event
    /// already due now
    pub fn activate_now(&mut self, process: ProcessId) -> SchedulerResult<()> {
        let now = self.scheduler.now();
        self.scheduler.activate(process, now)
    }

    /// Hand a new process to the scheduler; it starts out passive
    pub fn spawn(&mut self, body: P) -> ProcessId {
        self.scheduler.spawn(body)
    }

    /// Scheduling state of another process
    pub fn state(&self, process: ProcessId) -> Option<ProcessState> {
        self.scheduler.state(process)
    }
}
