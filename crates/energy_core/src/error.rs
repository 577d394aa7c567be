//! Error types for energy consumption and configuration.

/// Error raised by fallible energy operations.
#[derive(Debug, thiserror::Error)]
pub enum EnergyError {
    /// More energy was requested than is currently available.
    #[error("insufficient energy: requested {requested}, available {available}")]
    Insufficient {
        /// Amount the caller tried to consume.
        requested: i64,
        /// Energy available at the time of the request.
        available: i64,
    },

    /// Capacity must not be negative.
    #[error("invalid capacity {0}: must not be negative")]
    NegativeCapacity(i64),

    /// Initial energy must not be negative.
    #[error("invalid initial energy {0}: must not be negative")]
    NegativeInitial(i64),

    /// Recovery interval must be longer than zero.
    #[error("invalid recovery interval: must be greater than zero")]
    ZeroInterval,

    /// The configuration document could not be parsed.
    #[error("invalid energy configuration: {0}")]
    Config(#[from] serde_json::Error),
}
