//! Core types and identifiers for the auto body shop simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: process handles inside one replication, batch identifiers
//! - **Enums**: service stages, customer outcomes, reported metrics
//! - **Configuration**: shop configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use auto_body_shop_simulator::types::*;
//!
//! let config = ShopConfig {
//!     num_stalls: 2,
//!     num_replications: 10,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let outcome = CustomerOutcome::Fixed(ServiceStage::Mechanic);
//! assert!(!outcome.is_loss());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
