//! Scheduler invariant violations
//!
//! Every variant here is a programming error in a life cycle or in the code
//! driving the scheduler. None of them is retried.

use crate::types::ProcessId;
use thiserror::Error;

/// Errors raised by the scheduler core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// A resumption was requested before the current simulated instant
    #[error("Cannot activate {process} at t={at}: clock is already at t={now}")]
    ActivationInPast {
        /// Process that was to be activated
        process: ProcessId,
        /// Requested resumption time
        at: f64,
        /// Clock value when the request was made
        now: f64,
    },

    /// A process asked to hold for a negative duration
    #[error("Process {process} requested a negative hold of {duration}")]
    NegativeHold {
        /// Process that asked to hold
        process: ProcessId,
        /// The rejected duration
        duration: f64,
    },

    /// A NaN or infinite time value reached the scheduler
    #[error("Non-finite simulated time value: {0}")]
    NonFiniteTime(f64),

    /// The clock was asked to move backwards
    #[error("Clock cannot move backwards from t={now} to t={target}")]
    ClockRegression {
        /// Clock value before the request
        now: f64,
        /// Requested (earlier) time
        target: f64,
    },

    /// The handle does not belong to this scheduler
    #[error("Unknown process {0}")]
    UnknownProcess(ProcessId),

    /// The process has already finished its life cycle
    #[error("Process {0} has already terminated")]
    ProcessTerminated(ProcessId),

    /// A life cycle detected that its own invariants no longer hold
    #[error("Life-cycle fault in {process}: {reason}")]
    ProcessFault {
        /// Process whose life cycle failed
        process: ProcessId,
        /// What went wrong
        reason: String,
    },
}

impl SchedulerError {
    /// Create a life-cycle fault for the given process
    pub fn fault(process: ProcessId, reason: impl Into<String>) -> Self {
        Self::ProcessFault { process, reason: reason.into() }
    }
}

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
