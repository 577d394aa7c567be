//! Deserializable construction parameters.

use crate::builder::validate;
use crate::{Energy, EnergyError};
use energy_clock::Clock;
use serde::Deserialize;
use std::time::Duration;

/// Construction parameters for an [`Energy`], typically read from JSON.
///
/// # Example
///
/// ```
/// use energy_core::EnergyConfig;
///
/// let config = EnergyConfig::from_json(
///     r#"{ "capacity": 10, "initial": 4, "recovery_interval_ms": 1000 }"#,
/// )?;
/// let energy = config.build()?;
/// assert_eq!(energy.current_energy(), 4);
/// # Ok::<(), energy_core::EnergyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyConfig {
    /// Maximum energy.
    pub capacity: i64,
    /// Starting value; a full resource when omitted.
    #[serde(default)]
    pub initial: Option<i64>,
    /// Milliseconds between recovery ticks.
    pub recovery_interval_ms: u64,
    /// Energy restored per tick.
    #[serde(default = "default_recovery_quantity")]
    pub recovery_quantity: u32,
}

fn default_recovery_quantity() -> u32 {
    1
}

impl EnergyConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::Config`] if the document is malformed, has
    /// unknown fields or misses a required one.
    pub fn from_json(json: &str) -> Result<Self, EnergyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the recovery interval.
    #[must_use]
    pub fn recovery_interval(&self) -> Duration {
        Duration::from_millis(self.recovery_interval_ms)
    }

    /// Checks the same rules as [`EnergyBuilder::build`](crate::EnergyBuilder::build).
    ///
    /// # Errors
    ///
    /// See [`EnergyBuilder::build`](crate::EnergyBuilder::build).
    pub fn validate(&self) -> Result<(), EnergyError> {
        validate(
            self.capacity,
            self.initial.unwrap_or(self.capacity),
            self.recovery_interval(),
        )
    }

    /// Creates a resource reading the system clock.
    ///
    /// # Errors
    ///
    /// See [`EnergyConfig::validate`].
    pub fn build(&self) -> Result<Energy, EnergyError> {
        self.build_with_clock(Clock::default())
    }

    /// Creates a resource reading time from `clock`.
    ///
    /// # Errors
    ///
    /// See [`EnergyConfig::validate`].
    pub fn build_with_clock(&self, clock: Clock) -> Result<Energy, EnergyError> {
        let mut builder = Energy::builder(self.capacity, self.recovery_interval())
            .recovery_quantity(self.recovery_quantity)
            .clock(clock);
        if let Some(initial) = self.initial {
            builder = builder.initial(initial);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_clock::MockClock;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn optional_fields_take_defaults() {
        let config =
            EnergyConfig::from_json(r#"{ "capacity": 5, "recovery_interval_ms": 250 }"#).unwrap();

        assert_eq!(config.initial, None);
        assert_eq!(config.recovery_quantity, 1);
        assert_eq!(config.recovery_interval(), Duration::from_millis(250));
        assert_eq!(config.build().unwrap().current_energy(), 5);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = EnergyConfig::from_json(
            r#"{ "capacity": 5, "recovery_interval_ms": 250, "pools": 2 }"#,
        );
        assert!(matches!(result, Err(EnergyError::Config(_))));
    }

    #[test]
    fn missing_interval_is_rejected() {
        let result = EnergyConfig::from_json(r#"{ "capacity": 5 }"#);
        assert!(matches!(result, Err(EnergyError::Config(_))));
    }

    #[test]
    fn zero_interval_fails_validation() {
        let config =
            EnergyConfig::from_json(r#"{ "capacity": 5, "recovery_interval_ms": 0 }"#).unwrap();

        assert!(matches!(config.validate(), Err(EnergyError::ZeroInterval)));
        assert!(matches!(config.build(), Err(EnergyError::ZeroInterval)));
    }

    #[test]
    fn recovery_quantity_is_applied() {
        let config = EnergyConfig::from_json(
            r#"{ "capacity": 9, "initial": 0, "recovery_interval_ms": 1000, "recovery_quantity": 3 }"#,
        )
        .unwrap();

        let mock = Arc::new(MockClock::new(Instant::now()));
        let energy = config.build_with_clock(Clock::with_provider(mock)).unwrap();
        assert_eq!(energy.recovery_quantity(), 3);
        assert_eq!(energy.fully_recovers_in(), Duration::from_secs(3));
    }
}
