use crate::common::UInt;

/// Raised when a [`RollConfig`](crate::RollConfig) is built by hand with values the
/// notation grammar would never produce.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: dice need at least 2 sides, found {0}")]
    TooFewSides(UInt),
    #[error("invalid configuration: at least one die must be rolled per group")]
    ZeroCount,
    #[error("invalid configuration: at least one roll group is required")]
    ZeroTimes,
}
