//! A lazily regenerating energy resource for gating actions in games.
//!
//! The value of an [`Energy`] is never advanced by a timer. It is derived on
//! every read from the time elapsed since the resource was last depleted.
//!
//! ```
//! use std::time::Duration;
//! use energy::prelude::*;
//!
//! let stamina = Energy::new(10, 10, Duration::from_secs(1));
//! assert!(stamina.use_energy());
//! assert_eq!(stamina.current_energy(), 9);
//! ```

pub use energy_clock as clock;
pub use energy_core::*;

/// Subscriber setup for `tracing` output.
#[cfg(feature = "tracing-subscriber")]
pub use energy_tracing as tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use energy_clock::{Clock, ClockProvider};
    pub use energy_core::{Energy, EnergyBuilder, EnergyConfig, EnergyError, EnergySnapshot};
}
