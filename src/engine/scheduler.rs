//! Event-list scheduler
//!
//! The scheduler owns the simulated clock, the event list and every process of
//! one replication. It is strictly single-threaded: [`Scheduler::step`] resumes
//! exactly one process and returns once that process suspends or terminates.

use crate::engine::{
    Context, Event, Process, ProcessState, SchedulerError, SchedulerResult, SimClock, Suspend,
};
use crate::types::ProcessId;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use tracing::{trace, warn};

/// Why [`Scheduler::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The stop condition evaluated true after a step
    StopConditionMet,
    /// The event list ran dry before the stop condition held
    AgendaExhausted,
}

#[derive(Debug)]
struct Slot<P> {
    state: ProcessState,
    /// `None` while the process is running or after it terminated
    body: Option<P>,
}

/// Cooperative discrete-event scheduler
#[derive(Debug)]
pub struct Scheduler<P> {
    clock: SimClock,
    agenda: BinaryHeap<Event>,
    next_seq: u64,
    slots: Vec<Slot<P>>,
    current: Option<ProcessId>,
    steps: u64,
}

impl<P> Default for Scheduler<P> {
    fn default() -> Self {
        Self {
            clock: SimClock::new(),
            agenda: BinaryHeap::new(),
            next_seq: 0,
            slots: Vec::new(),
            current: None,
            steps: 0,
        }
    }
}

impl<P: Process> Scheduler<P> {
    /// Create an empty scheduler with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Number of events processed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of resumptions still on the event list
    pub fn pending_events(&self) -> usize {
        self.agenda.len()
    }

    /// Number of processes that have not terminated
    pub fn live_processes(&self) -> usize {
        self.slots.iter().filter(|slot| slot.state != ProcessState::Terminated).count()
    }

    /// Take ownership of a new process; it starts out passive
    pub fn spawn(&mut self, body: P) -> ProcessId {
        let id = ProcessId::from_index(self.slots.len());
        self.slots.push(Slot { state: ProcessState::Passive, body: Some(body) });
        id
    }

    /// Scheduling state of a process, `None` for a foreign handle
    pub fn state(&self, process: ProcessId) -> Option<ProcessState> {
        self.slots.get(process.index()).map(|slot| slot.state)
    }

    /// Borrow a process body, unless it is running or terminated
    pub fn process(&self, process: ProcessId) -> Option<&P> {
        self.slots.get(process.index()).and_then(|slot| slot.body.as_ref())
    }

    /// Insert a resumption event for `process` at `at`
    ///
    /// Activating a process that is already scheduled leaves its pending
    /// resumption untouched.
    pub fn activate(&mut self, process: ProcessId, at: f64) -> SchedulerResult<()> {
        if !at.is_finite() {
            return Err(SchedulerError::NonFiniteTime(at));
        }
        let now = self.now();
        if at < now {
            return Err(SchedulerError::ActivationInPast { process, at, now });
        }
        if self.current == Some(process) {
            return Err(SchedulerError::fault(process, "a running process cannot activate itself"));
        }

        let slot =
            self.slots.get_mut(process.index()).ok_or(SchedulerError::UnknownProcess(process))?;
        match slot.state {
            ProcessState::Terminated => return Err(SchedulerError::ProcessTerminated(process)),
            ProcessState::Scheduled => {
                warn!(%process, at, "activation ignored, process is already scheduled");
                return Ok(());
            }
            ProcessState::Passive => slot.state = ProcessState::Scheduled,
        }

        self.enqueue(process, at);
        Ok(())
    }

    /// Schedule `process` to resume after `duration` simulated hours
    pub fn hold(&mut self, process: ProcessId, duration: f64) -> SchedulerResult<()> {
        if !duration.is_finite() {
            return Err(SchedulerError::NonFiniteTime(duration));
        }
        if duration < 0.0 {
            return Err(SchedulerError::NegativeHold { process, duration });
        }

        let slot =
            self.slots.get_mut(process.index()).ok_or(SchedulerError::UnknownProcess(process))?;
        if slot.state == ProcessState::Terminated {
            return Err(SchedulerError::ProcessTerminated(process));
        }
        slot.state = ProcessState::Scheduled;

        let due = self.now() + duration;
        self.enqueue(process, due);
        Ok(())
    }

    /// Suspend `process` until some other process activates it
    pub fn passivate(&mut self, process: ProcessId) -> SchedulerResult<()> {
        let slot =
            self.slots.get_mut(process.index()).ok_or(SchedulerError::UnknownProcess(process))?;
        if slot.state == ProcessState::Terminated {
            return Err(SchedulerError::ProcessTerminated(process));
        }
        slot.state = ProcessState::Passive;
        Ok(())
    }

    /// Pop the earliest event, advance the clock and resume that process
    ///
    /// Returns `false` when the event list is empty.
    pub fn step(&mut self, model: &mut P::Model) -> SchedulerResult<bool> {
        let Some(event) = self.agenda.pop() else {
            return Ok(false);
        };
        self.clock.advance_to(event.due)?;
        self.steps += 1;

        let id = event.process;
        let slot = self.slots.get_mut(id.index()).ok_or(SchedulerError::UnknownProcess(id))?;
        let mut body = slot.body.take().ok_or(SchedulerError::ProcessTerminated(id))?;
        slot.state = ProcessState::Passive;

        trace!(process = %id, time = event.due, seq = event.seq, "resuming process");

        self.current = Some(id);
        let suspend = {
            let mut cx = Context::new(self);
            body.resume(id, model, &mut cx)
        };
        self.current = None;

        match suspend? {
            Suspend::Hold(duration) => {
                self.slots[id.index()].body = Some(body);
                self.hold(id, duration)?;
            }
            Suspend::Passivate => {
                self.slots[id.index()].body = Some(body);
                self.passivate(id)?;
            }
            Suspend::Terminate => {
                self.slots[id.index()].state = ProcessState::Terminated;
                trace!(process = %id, time = self.now(), "process terminated");
            }
        }
        Ok(true)
    }

    /// Step until `stop` holds or the event list is empty
    ///
    /// The stop condition is evaluated once after every step, with the clock
    /// already advanced to that step's time.
    pub fn run<F>(&mut self, model: &mut P::Model, mut stop: F) -> SchedulerResult<RunOutcome>
    where
        F: FnMut(f64, &P::Model) -> bool,
    {
        loop {
            if !self.step(model)? {
                return Ok(RunOutcome::AgendaExhausted);
            }
            if stop(self.now(), model) {
                return Ok(RunOutcome::StopConditionMet);
            }
        }
    }

    fn enqueue(&mut self, process: ProcessId, due: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.agenda.push(Event { due, seq, process });
    }
}
