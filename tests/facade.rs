//! Tests for the root re-exports.

use energy::clock::MockClock;
use energy::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn prelude_covers_common_workflow() {
    let mock = Arc::new(MockClock::new(Instant::now()));
    let energy = Energy::builder(3, Duration::from_secs(60))
        .initial(1)
        .clock(Clock::with_provider(mock.clone()))
        .build()
        .unwrap();

    assert!(energy.use_energy());
    assert!(matches!(
        energy.try_use_amount(1),
        Err(EnergyError::Insufficient { .. })
    ));
    assert_eq!(energy.to_string(), "<Energy 0/3 recover in 01:00>");

    mock.advance(Duration::from_secs(180));
    let snapshot: EnergySnapshot = energy.snapshot();
    assert_eq!(snapshot.current, 3);
}
