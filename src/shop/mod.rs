//! The auto body shop queueing model
//!
//! This module contains everything one simulated business day is made of: the
//! random streams, the queues, the stall pool, the four life cycles and the
//! shared context they all work on.
//!
//! # Overview
//!
//! - **Generator**: spawns customers with band-dependent interarrival gaps
//! - **Customer**: arrives, balks or waits, claims a stall when referred
//! - **Mechanic**: first stage; fixes, refers, or loses the customer
//! - **Specialist**: second stage; fixes every car it takes and frees the stall
//! - **Shop**: per-replication context (queues, stalls, trackers, trace)
//!
//! Life cycles are explicit state machines. The scheduler resumes a
//! [`ShopProcess`] with `&mut Shop`; the process mutates the shop and reports
//! how it suspends.
//!
//! # Usage Example
//!
//! ```rust
//! use auto_body_shop_simulator::engine::Scheduler;
//! use auto_body_shop_simulator::shop::*;
//! use auto_body_shop_simulator::types::ShopConfig;
//!
//! let mut shop = Shop::new(ShopConfig::default(), 981)?;
//! let mut scheduler = Scheduler::new();
//! let generator = scheduler.spawn(ShopProcess::Generator(Generator::new()));
//! scheduler.activate(generator, 0.0)?;
//!
//! // No mechanics: customers pile up or balk, but arrivals still stop at closing
//! scheduler.run(&mut shop, |_, _| false)?;
//! assert!(scheduler.now() >= shop.config().operation_hours);
//! assert!(shop.total_customers() > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod customer;
pub mod generator;
pub mod mechanic;
pub mod model;
pub mod queues;
pub mod specialist;
pub mod stalls;
pub mod trace;
pub mod variates;

pub use customer::*;
pub use generator::*;
pub use mechanic::*;
pub use model::*;
pub use queues::*;
pub use specialist::*;
pub use stalls::*;
pub use trace::*;
pub use variates::*;
