//! Example stamina loop.
//!
//! Spends energy on a fixed action cost until the pool runs dry, waits for a
//! few recovery ticks, and spends again.
//!
//! # Usage
//!
//! ```bash
//! drain [config.json]
//! ```
//!
//! # Example
//!
//! ```bash
//! echo '{ "capacity": 6, "recovery_interval_ms": 300, "recovery_quantity": 2 }' > stamina.json
//! RUST_LOG=debug drain stamina.json
//! ```

use energy_core::{Energy, EnergyConfig, EnergyError};
use energy_tracing::{TracingConfig, TracingFormat};
use tracing::Level;

const ACTION_COST: i64 = 2;
const ROUNDS: usize = 3;

fn default_config() -> EnergyConfig {
    EnergyConfig {
        capacity: 10,
        initial: None,
        recovery_interval_ms: 250,
        recovery_quantity: 1,
    }
}

fn load_config(path: Option<&str>) -> Result<EnergyConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(default_config());
    };
    let json = std::fs::read_to_string(path)?;
    Ok(EnergyConfig::from_json(&json)?)
}

/// Spends energy until an action is refused, returning how many succeeded.
fn spend_until_empty(energy: &Energy) -> usize {
    let mut actions = 0;
    loop {
        match energy.try_use_amount(ACTION_COST) {
            Ok(()) => {
                actions += 1;
                tracing::info!(action = actions, energy = %energy, "action performed");
            }
            Err(EnergyError::Insufficient { available, .. }) => {
                tracing::info!(available, "too tired to act");
                return actions;
            }
            Err(err) => {
                tracing::warn!(error = %err, "unexpected energy error");
                return actions;
            }
        }
    }
}

fn main() {
    let level = if std::env::var_os("RUST_LOG").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    TracingConfig::default()
        .with_level(level)
        .with_format(TracingFormat::Compact)
        .init();

    let path = std::env::args().nth(1);
    let config = match load_config(path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: cannot load configuration: {err}");
            std::process::exit(1);
        }
    };

    let energy = match config.build() {
        Ok(energy) => energy,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    for round in 1..=ROUNDS {
        let actions = spend_until_empty(&energy);
        let snapshot = energy.snapshot();
        tracing::info!(
            round,
            actions,
            fully_recovers_in = ?snapshot.fully_recovers_in,
            "round finished: {snapshot}"
        );

        // rest long enough for one action's worth of recovery
        let ticks = u32::try_from(ACTION_COST).unwrap_or(1);
        let rest = energy.recovers_in() + energy.recovery_interval() * ticks.saturating_sub(1);
        std::thread::sleep(rest);
    }

    energy.reset_energy();
    tracing::info!(energy = %energy, "rested to full");
}
