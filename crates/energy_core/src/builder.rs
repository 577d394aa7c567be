//! Validated construction of [`Energy`].

use crate::{Energy, EnergyError};
use energy_clock::Clock;
use std::time::Duration;

/// Builder for an [`Energy`] resource that rejects invalid settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use energy_core::Energy;
///
/// let energy = Energy::builder(20, Duration::from_secs(30))
///     .initial(5)
///     .recovery_quantity(2)
///     .build()?;
/// assert_eq!(energy.current_energy(), 5);
/// # Ok::<(), energy_core::EnergyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnergyBuilder {
    capacity: i64,
    initial: Option<i64>,
    recovery_interval: Duration,
    recovery_quantity: u32,
    clock: Option<Clock>,
}

impl EnergyBuilder {
    /// Creates a builder for a full resource recovering one unit per interval.
    #[must_use]
    pub fn new(capacity: i64, recovery_interval: Duration) -> Self {
        Self {
            capacity,
            initial: None,
            recovery_interval,
            recovery_quantity: 1,
            clock: None,
        }
    }

    /// Sets the starting value. Defaults to the capacity.
    ///
    /// Values above capacity start the resource overfilled.
    #[must_use]
    pub fn initial(mut self, initial: i64) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Sets how much energy each recovery tick restores. Defaults to 1.
    #[must_use]
    pub fn recovery_quantity(mut self, recovery_quantity: u32) -> Self {
        self.recovery_quantity = recovery_quantity;
        self
    }

    /// Reads time from `clock` instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validates the settings and creates the resource.
    ///
    /// # Errors
    ///
    /// - [`EnergyError::NegativeCapacity`] if the capacity is below zero
    /// - [`EnergyError::NegativeInitial`] if the initial value is below zero
    /// - [`EnergyError::ZeroInterval`] if the recovery interval is zero
    pub fn build(self) -> Result<Energy, EnergyError> {
        let initial = self.initial.unwrap_or(self.capacity);
        validate(self.capacity, initial, self.recovery_interval)?;
        Ok(Energy::from_parts(
            initial,
            self.capacity,
            self.recovery_interval,
            self.recovery_quantity,
            self.clock.unwrap_or_default(),
        ))
    }
}

pub(crate) fn validate(
    capacity: i64,
    initial: i64,
    recovery_interval: Duration,
) -> Result<(), EnergyError> {
    if capacity < 0 {
        return Err(EnergyError::NegativeCapacity(capacity));
    }
    if initial < 0 {
        return Err(EnergyError::NegativeInitial(initial));
    }
    if recovery_interval.is_zero() {
        return Err(EnergyError::ZeroInterval);
    }
    Ok(())
}
