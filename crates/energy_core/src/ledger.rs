//! Lock-free bookkeeping behind [`Energy`](crate::Energy).
//!
//! A [`Ledger`] never reads a clock. Every method takes the instant to
//! evaluate at, which keeps the arithmetic deterministic and lets the owner
//! read the clock exactly once per operation.

use crate::EnergyError;
use std::time::{Duration, Instant};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Converts a nanosecond count into a [`Duration`], saturating at
/// [`Duration::MAX`].
fn duration_from_nanos(nanos: u128) -> Duration {
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}

/// Whole recovery ticks elapsed and the progress into the next one.
#[derive(Debug, Clone, Copy)]
struct Progress {
    ticks: u128,
    partial: Duration,
}

/// Deficit-based energy state.
///
/// The stored `deficit` is measured against `capacity` and excludes credit
/// earned since `depleted_at`. `depleted_at` is `Some` exactly when the
/// deficit is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ledger {
    pub(crate) capacity: i64,
    pub(crate) deficit: i64,
    pub(crate) depleted_at: Option<Instant>,
    pub(crate) interval: Duration,
    pub(crate) quantity: u32,
}

impl Ledger {
    /// Creates a ledger holding `initial` out of `capacity`.
    ///
    /// Recovery of a partial initial value starts at `now`; no credit is
    /// granted for time before construction.
    pub(crate) fn new(
        initial: i64,
        capacity: i64,
        interval: Duration,
        quantity: u32,
        now: Instant,
    ) -> Self {
        let mut ledger = Self {
            capacity,
            deficit: capacity.saturating_sub(initial),
            depleted_at: None,
            interval,
            quantity,
        };
        ledger.reconcile(now);
        ledger
    }

    fn recovery_enabled(&self) -> bool {
        self.quantity > 0 && !self.interval.is_zero()
    }

    /// Recovery progress at `now`, or `None` when nothing is accruing.
    fn progress(&self, now: Instant) -> Option<Progress> {
        let since = self.depleted_at?;
        if self.deficit <= 0 || !self.recovery_enabled() {
            return None;
        }
        let elapsed = now.saturating_duration_since(since).as_nanos();
        let interval = self.interval.as_nanos();
        Some(Progress {
            ticks: elapsed / interval,
            partial: duration_from_nanos(elapsed % interval),
        })
    }

    /// Ticks required to repay the whole deficit.
    fn ticks_to_full(&self) -> u128 {
        if self.deficit <= 0 || self.quantity == 0 {
            return 0;
        }
        u128::from(self.deficit.unsigned_abs()).div_ceil(u128::from(self.quantity))
    }

    /// Credit earned since `depleted_at`, never more than the deficit.
    fn recovered(&self, now: Instant) -> i64 {
        let Some(progress) = self.progress(now) else {
            return 0;
        };
        if progress.ticks >= self.ticks_to_full() {
            return self.deficit;
        }
        let credit = progress.ticks * u128::from(self.quantity);
        i64::try_from(credit).unwrap_or(self.deficit)
    }

    /// Energy available at `now`.
    pub(crate) fn current(&self, now: Instant) -> i64 {
        self.capacity
            .saturating_sub(self.deficit)
            .saturating_add(self.recovered(now))
    }

    /// Time until the next tick lands, zero when nothing more is pending.
    pub(crate) fn recovers_in(&self, now: Instant) -> Duration {
        match self.progress(now) {
            Some(progress) if progress.ticks < self.ticks_to_full() => {
                self.interval.saturating_sub(progress.partial)
            }
            _ => Duration::ZERO,
        }
    }

    /// Time until the value is back at capacity.
    pub(crate) fn fully_recovers_in(&self, now: Instant) -> Duration {
        let next = self.recovers_in(now);
        if next.is_zero() {
            return Duration::ZERO;
        }
        let Some(progress) = self.progress(now) else {
            return Duration::ZERO;
        };
        let remaining = self.ticks_to_full() - progress.ticks - 1;
        let whole = duration_from_nanos(self.interval.as_nanos().saturating_mul(remaining));
        next.saturating_add(whole)
    }

    /// Folds whole ticks earned up to `now` into the deficit.
    ///
    /// Observable values are unchanged; only the reference point moves, so
    /// later edits to the deficit, interval or quantity never re-interpret
    /// credit that was already earned. Partial-tick progress is preserved.
    pub(crate) fn settle(&mut self, now: Instant) {
        if self.deficit <= 0 {
            self.depleted_at = None;
            return;
        }
        if !self.recovery_enabled() {
            // nothing accrues while disabled
            self.depleted_at = Some(now);
            return;
        }
        let Some(progress) = self.progress(now) else {
            self.depleted_at = Some(now);
            return;
        };
        if progress.ticks >= self.ticks_to_full() {
            self.deficit = 0;
            self.depleted_at = None;
        } else if progress.ticks > 0 {
            self.deficit -= self.recovered(now);
            self.depleted_at = Some(now.checked_sub(progress.partial).unwrap_or(now));
        }
    }

    /// Restores the `depleted_at` invariant after the deficit changed.
    fn reconcile(&mut self, now: Instant) {
        if self.deficit <= 0 {
            self.depleted_at = None;
        } else if self.depleted_at.is_none() {
            self.depleted_at = Some(now);
        }
    }

    /// Removes `amount` from the settled value.
    ///
    /// Crossing from at-or-above capacity to below it (or `restart`) starts
    /// recovery timing fresh at `now`. Drawing down further while already
    /// below capacity keeps the running tick.
    fn draw(&mut self, amount: i64, restart: bool, now: Instant) {
        let current = self.current(now);
        let remaining = current.saturating_sub(amount);
        let crossed = current >= self.capacity && remaining < self.capacity;

        self.deficit = self.capacity.saturating_sub(remaining);
        if restart || crossed {
            self.depleted_at = Some(now);
        }
        self.reconcile(now);
    }

    /// Consumes `amount`, leaving the ledger untouched if it is not available.
    pub(crate) fn consume(&mut self, amount: i64, now: Instant) -> Result<(), EnergyError> {
        self.settle(now);
        let available = self.current(now);
        if amount > available {
            return Err(EnergyError::Insufficient {
                requested: amount,
                available,
            });
        }
        self.draw(amount, false, now);
        Ok(())
    }

    /// Sets the value outright; values at or above capacity stop recovery.
    pub(crate) fn set(&mut self, value: i64, now: Instant) {
        if value >= self.capacity {
            self.deficit = self.capacity.saturating_sub(value);
            self.depleted_at = None;
        } else {
            self.settle(now);
            let current = self.current(now);
            self.draw(current.saturating_sub(value), true, now);
        }
    }

    /// Changes capacity, clamping the value down or keeping it as is.
    pub(crate) fn set_capacity(&mut self, capacity: i64, now: Instant) {
        self.settle(now);
        let current = self.current(now);
        if capacity < current {
            self.deficit = 0;
            self.depleted_at = None;
        } else {
            self.deficit = self
                .deficit
                .saturating_add(capacity.saturating_sub(self.capacity));
        }
        self.capacity = capacity;
        self.reconcile(now);
    }

    pub(crate) fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.settle(now);
        self.interval = interval;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32, now: Instant) {
        self.settle(now);
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn ledger(initial: i64, capacity: i64) -> (Ledger, Instant) {
        let now = Instant::now();
        (Ledger::new(initial, capacity, SECOND, 1, now), now)
    }

    #[test]
    fn full_ledger_has_no_depletion() {
        let (ledger, now) = ledger(10, 10);

        assert_eq!(ledger.deficit, 0);
        assert!(ledger.depleted_at.is_none());
        assert_eq!(ledger.current(now), 10);
    }

    #[test]
    fn partial_ledger_starts_recovering_at_construction() {
        let (ledger, now) = ledger(4, 10);

        assert_eq!(ledger.depleted_at, Some(now));
        assert_eq!(ledger.current(now), 4);
        assert_eq!(ledger.current(now + SECOND * 3), 7);
        assert_eq!(ledger.current(now + SECOND * 100), 10);
    }

    #[test]
    fn duration_from_nanos_splits_seconds() {
        assert_eq!(duration_from_nanos(1_500_000_000), Duration::from_millis(1500));
        assert_eq!(duration_from_nanos(u128::MAX), Duration::MAX);
    }

    #[test]
    fn settle_keeps_value_and_partial_progress() {
        let (mut ledger, start) = ledger(0, 10);
        let now = start + Duration::from_millis(3_400);
        let before = (ledger.current(now), ledger.recovers_in(now));

        ledger.settle(now);

        assert_eq!(ledger.deficit, 7);
        assert_eq!(ledger.depleted_at, Some(start + SECOND * 3));
        assert_eq!((ledger.current(now), ledger.recovers_in(now)), before);
    }

    #[test]
    fn settle_clears_completed_recovery() {
        let (mut ledger, start) = ledger(8, 10);

        ledger.settle(start + SECOND * 5);

        assert_eq!(ledger.deficit, 0);
        assert!(ledger.depleted_at.is_none());
    }

    #[test]
    fn consume_failure_leaves_ledger_untouched() {
        let (mut ledger, now) = ledger(3, 10);
        let before = ledger;

        let result = ledger.consume(4, now);

        assert!(matches!(
            result,
            Err(EnergyError::Insufficient {
                requested: 4,
                available: 3
            })
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn recovery_quantity_rounds_ticks_up() {
        let now = Instant::now();
        let ledger = Ledger::new(0, 5, SECOND, 2, now);

        // 5 missing at 2 per tick takes 3 ticks
        assert_eq!(ledger.fully_recovers_in(now), SECOND * 3);
        assert_eq!(ledger.current(now + SECOND * 2), 4);
        assert_eq!(ledger.current(now + SECOND * 3), 5);
    }

    #[test]
    fn zero_interval_disables_recovery() {
        let now = Instant::now();
        let ledger = Ledger::new(2, 10, Duration::ZERO, 1, now);

        assert_eq!(ledger.current(now + SECOND * 60), 2);
        assert_eq!(ledger.recovers_in(now), Duration::ZERO);
        assert_eq!(ledger.fully_recovers_in(now), Duration::ZERO);
    }

    #[test]
    fn clock_behind_depletion_counts_as_no_time() {
        let (ledger, now) = ledger(5, 10);
        let earlier = now.checked_sub(SECOND).unwrap_or(now);

        assert_eq!(ledger.current(earlier), 5);
        assert_eq!(ledger.recovers_in(earlier), SECOND);
    }
}
