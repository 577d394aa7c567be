//! Lazily regenerating energy resource.
//!
//! This crate provides the [`Energy`] type, a bounded quantity that is
//! depleted by use and recovers a fixed quantity per interval of elapsed time:
//!
//! - [`Energy`] - Thread-safe resource, shareable through an `Arc`
//! - [`EnergyBuilder`] - Validated construction
//! - [`EnergyConfig`] - Construction parameters deserialized from JSON
//! - [`EnergySnapshot`] - Value and timings captured at one instant
//! - [`EnergyError`] - Failed consumption and invalid configuration
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use energy_core::Energy;
//!
//! let energy = Energy::new(10, 10, Duration::from_secs(3600));
//! assert_eq!(energy.to_string(), "<Energy 10/10>");
//!
//! assert!(energy.use_amount(4));
//! assert_eq!(energy.current_energy(), 6);
//! assert!(energy.fully_recovers_in() <= Duration::from_secs(4 * 3600));
//! ```
//!
//! # Deterministic Time
//!
//! Every resource reads time through an [`energy_clock::Clock`]. Tests inject
//! an `energy_clock::MockClock` (feature `test-utils`) and advance it by hand.

mod builder;
mod config;
mod energy;
mod error;
mod ledger;

pub use builder::EnergyBuilder;
pub use config::EnergyConfig;
pub use energy::{Energy, EnergySnapshot};
pub use error::EnergyError;
