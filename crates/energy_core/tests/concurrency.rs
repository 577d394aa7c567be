//! Tests for sharing one energy resource between threads.


use energy_core::Energy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use test_utils::{HOUR, SECOND, mock_energy};

#[test]
fn concurrent_use_never_overdraws() {
    let energy = Energy::new(100, 100, HOUR);
    let successes = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..20 {
                    if energy.use_energy() {
                        successes.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(successes.load(Ordering::Relaxed), 100);
    assert_eq!(energy.current_energy(), 0);
}

#[test]
fn readers_never_observe_torn_state() {
    let (energy, _mock) = mock_energy(50, 50, SECOND);

    thread::scope(|scope| {
        scope.spawn(|| {
            for round in 0..200 {
                if round % 2 == 0 {
                    energy.set_energy(60);
                } else {
                    energy.use_amount(25);
                }
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let snapshot = energy.snapshot();
                    assert!(
                        matches!(snapshot.current, 35 | 50 | 60),
                        "unexpected value {}",
                        snapshot.current
                    );
                    if snapshot.current >= snapshot.capacity {
                        assert!(snapshot.recovers_in.is_zero());
                    } else {
                        assert_eq!(snapshot.recovers_in, SECOND);
                    }
                }
            });
        }
    });

    assert_eq!(energy.current_energy(), 35);
}

#[test]
fn mixed_mutators_keep_capacity_consistent() {
    let (energy, mock) = mock_energy(10, 10, SECOND);

    thread::scope(|scope| {
        scope.spawn(|| {
            for capacity in 10..40 {
                energy.set_max(capacity);
            }
        });
        scope.spawn(|| {
            for _ in 0..30 {
                energy.reset_energy();
            }
        });
        scope.spawn(|| {
            for _ in 0..30 {
                energy.use_energy();
            }
        });
    });

    mock.advance(HOUR);
    assert_eq!(energy.capacity(), 39);
    assert_eq!(energy.current_energy(), 39);
}
