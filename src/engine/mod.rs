//! Process-oriented discrete-event scheduler
//!
//! This module contains the scheduler core every life cycle in the shop runs
//! on: the simulated clock, the time-ordered event list and the cooperative
//! process abstraction.
//!
//! # Overview
//!
//! - **SimClock**: simulated hours, advanced only by stepping the event list
//! - **Event**: (due time, insertion sequence, process); FIFO among equal times
//! - **Process**: a resumable state machine that suspends by returning
//!   [`Suspend::Hold`], [`Suspend::Passivate`] or [`Suspend::Terminate`]
//! - **Scheduler**: owns all processes of one replication and resumes them one
//!   at a time
//!
//! # Usage Example
//!
//! ```rust
//! use auto_body_shop_simulator::engine::*;
//! use auto_body_shop_simulator::types::ProcessId;
//!
//! #[derive(Debug)]
//! struct Ticker;
//!
//! impl Process for Ticker {
//!     type Model = u32;
//!
//!     fn resume(
//!         &mut self,
//!         _me: ProcessId,
//!         ticks: &mut u32,
//!         _cx: &mut Context<'_, Self>,
//!     ) -> SchedulerResult<Suspend> {
//!         *ticks += 1;
//!         Ok(Suspend::Hold(1.0))
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new();
//! let ticker = scheduler.spawn(Ticker);
//! scheduler.activate(ticker, 0.0)?;
//!
//! let mut ticks = 0;
//! scheduler.run(&mut ticks, |now, _| now >= 3.0)?;
//! assert_eq!(ticks, 4);
//! # Ok::<(), SchedulerError>(())
//! ```

pub mod clock;
pub mod error;
pub mod event;
pub mod process;
pub mod scheduler;

pub use clock::*;
pub use error::*;
pub use event::*;
pub use process::*;
pub use scheduler::*;
