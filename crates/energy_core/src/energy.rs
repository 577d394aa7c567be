//! The shared, lazily regenerating [`Energy`] resource.

use crate::builder::EnergyBuilder;
use crate::error::EnergyError;
use crate::ledger::Ledger;
use energy_clock::Clock;
use parking_lot::RwLock;
use std::fmt;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Energy
// ─────────────────────────────────────────────────────────────────────────────

/// A consumable resource that regenerates over time.
///
/// Energy is bounded by a capacity, drops when used and recovers
/// `recovery_quantity` units every `recovery_interval`. No timer runs in the
/// background: the value is computed on every read from the time elapsed
/// since the resource last dropped below capacity.
///
/// # Thread Safety
///
/// All state sits behind a single [`RwLock`]. Queries share the read lock and
/// mutators hold the write lock for their whole read-check-write, so callers
/// can share an `Arc<Energy>` freely between threads.
///
/// # Overfill
///
/// [`set_energy`](Self::set_energy) may push the value above capacity. An
/// overfilled resource does not recover; once it is used back below capacity,
/// recovery starts from that moment.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use energy_core::Energy;
///
/// let energy = Energy::new(5, 10, Duration::from_secs(1));
/// assert!(energy.use_amount(5));
/// assert!(!energy.use_energy());
/// assert_eq!(energy.current_energy(), 0);
/// ```
pub struct Energy {
    ledger: RwLock<Ledger>,
    clock: Clock,
}

impl Energy {
    /// Creates an energy resource holding `initial` out of `capacity`,
    /// recovering one unit every `recovery_interval`.
    ///
    /// No validation is performed. Use [`Energy::builder`] to reject negative
    /// or zero-interval configurations.
    #[must_use]
    pub fn new(initial: i64, capacity: i64, recovery_interval: Duration) -> Self {
        Self::with_clock(initial, capacity, recovery_interval, Clock::default())
    }

    /// Same as [`Energy::new`], reading time from `clock`.
    #[must_use]
    pub fn with_clock(
        initial: i64,
        capacity: i64,
        recovery_interval: Duration,
        clock: Clock,
    ) -> Self {
        Self::from_parts(initial, capacity, recovery_interval, 1, clock)
    }

    /// Returns a builder that validates its configuration.
    #[must_use]
    pub fn builder(capacity: i64, recovery_interval: Duration) -> EnergyBuilder {
        EnergyBuilder::new(capacity, recovery_interval)
    }

    pub(crate) fn from_parts(
        initial: i64,
        capacity: i64,
        recovery_interval: Duration,
        recovery_quantity: u32,
        clock: Clock,
    ) -> Self {
        let ledger = Ledger::new(
            initial,
            capacity,
            recovery_interval,
            recovery_quantity,
            clock.now(),
        );
        Self {
            ledger: RwLock::new(ledger),
            clock,
        }
    }

    /// Returns the energy currently available.
    #[must_use]
    pub fn current_energy(&self) -> i64 {
        self.ledger.read().current(self.clock.now())
    }

    /// Uses a single unit of energy.
    ///
    /// Returns `false` and changes nothing if no energy is available.
    pub fn use_energy(&self) -> bool {
        self.use_amount(1)
    }

    /// Uses `amount` units of energy.
    ///
    /// Returns `false` and changes nothing if less than `amount` is available.
    pub fn use_amount(&self, amount: i64) -> bool {
        self.try_use_amount(amount).is_ok()
    }

    /// Uses `amount` units of energy, reporting why it could not.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::Insufficient`] if less than `amount` is
    /// available. The resource is left untouched in that case.
    pub fn try_use_amount(&self, amount: i64) -> Result<(), EnergyError> {
        let now = self.clock.now();
        let mut ledger = self.ledger.write();
        match ledger.consume(amount, now) {
            Ok(()) => {
                tracing::debug!(
                    amount,
                    current = ledger.current(now),
                    capacity = ledger.capacity,
                    "energy used"
                );
                Ok(())
            }
            Err(err) => {
                tracing::trace!(amount, error = %err, "energy use rejected");
                Err(err)
            }
        }
    }

    /// Returns the time until the next recovery tick.
    ///
    /// Zero when nothing is recovering: the resource is full or overfilled,
    /// the recovery already earned covers the whole deficit, or recovery is
    /// disabled by a zero interval or quantity.
    #[must_use]
    pub fn recovers_in(&self) -> Duration {
        self.ledger.read().recovers_in(self.clock.now())
    }

    /// Returns the time until the resource is back at capacity.
    #[must_use]
    pub fn fully_recovers_in(&self) -> Duration {
        self.ledger.read().fully_recovers_in(self.clock.now())
    }

    /// Sets the current energy, possibly above capacity.
    ///
    /// Values below capacity restart recovery timing from now.
    pub fn set_energy(&self, value: i64) {
        let now = self.clock.now();
        let mut ledger = self.ledger.write();
        ledger.set(value, now);
        tracing::debug!(value, capacity = ledger.capacity, "energy set");
    }

    /// Refills the resource to exactly its capacity.
    pub fn reset_energy(&self) {
        let now = self.clock.now();
        let mut ledger = self.ledger.write();
        let capacity = ledger.capacity;
        ledger.set(capacity, now);
        tracing::debug!(capacity, "energy reset");
    }

    /// Changes the capacity.
    ///
    /// A capacity below the current value clamps the value down to it and
    /// stops recovery. Otherwise the current value is kept and recovery
    /// carries on toward the new capacity.
    pub fn set_max(&self, capacity: i64) {
        let now = self.clock.now();
        let mut ledger = self.ledger.write();
        let previous = ledger.capacity;
        ledger.set_capacity(capacity, now);
        tracing::debug!(
            previous,
            capacity,
            current = ledger.current(now),
            "energy capacity changed"
        );
    }

    /// Changes how often a recovery tick lands.
    ///
    /// Ticks completed under the old interval are kept; progress into the
    /// current tick carries over as elapsed time.
    pub fn set_interval(&self, recovery_interval: Duration) {
        let now = self.clock.now();
        self.ledger.write().set_interval(recovery_interval, now);
        tracing::debug!(?recovery_interval, "energy recovery interval changed");
    }

    /// Changes how much energy each recovery tick restores.
    pub fn set_recovery_quantity(&self, recovery_quantity: u32) {
        let now = self.clock.now();
        self.ledger.write().set_quantity(recovery_quantity, now);
        tracing::debug!(recovery_quantity, "energy recovery quantity changed");
    }

    /// Returns the maximum energy.
    #[must_use]
    pub fn capacity(&self) -> i64 {
        self.ledger.read().capacity
    }

    /// Returns the time between recovery ticks.
    #[must_use]
    pub fn recovery_interval(&self) -> Duration {
        self.ledger.read().interval
    }

    /// Returns the energy restored per recovery tick.
    #[must_use]
    pub fn recovery_quantity(&self) -> u32 {
        self.ledger.read().quantity
    }

    /// Returns `true` if the resource is at or above capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        let ledger = self.ledger.read();
        ledger.current(self.clock.now()) >= ledger.capacity
    }

    /// Returns the clock this resource reads time from.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Captures value and timings at a single instant.
    #[must_use]
    pub fn snapshot(&self) -> EnergySnapshot {
        let now = self.clock.now();
        let ledger = self.ledger.read();
        EnergySnapshot {
            current: ledger.current(now),
            capacity: ledger.capacity,
            recovers_in: ledger.recovers_in(now),
            fully_recovers_in: ledger.fully_recovers_in(now),
        }
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl fmt::Debug for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.ledger.read();
        f.debug_struct("Energy")
            .field("capacity", &ledger.capacity)
            .field("deficit", &ledger.deficit)
            .field("depleted_at", &ledger.depleted_at)
            .field("recovery_interval", &ledger.interval)
            .field("recovery_quantity", &ledger.quantity)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EnergySnapshot
// ─────────────────────────────────────────────────────────────────────────────

/// A consistent view of an [`Energy`] at one instant.
///
/// Renders as `<Energy current/capacity>`, with a ` recover in MM:SS` suffix
/// while below capacity. Minutes are not wrapped at 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergySnapshot {
    /// Energy available.
    pub current: i64,
    /// Maximum energy.
    pub capacity: i64,
    /// Time until the next recovery tick.
    pub recovers_in: Duration,
    /// Time until the value is back at capacity.
    pub fully_recovers_in: Duration,
}

impl fmt::Display for EnergySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Energy {}/{}", self.current, self.capacity)?;
        if self.current < self.capacity {
            let secs = self.recovers_in.as_secs();
            write!(f, " recover in {:02}:{:02}", secs / 60, secs % 60)?;
        }
        f.write_str(">")
    }
}
