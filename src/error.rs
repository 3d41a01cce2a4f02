//! Error types for pubsuffix.

use thiserror::Error;

/// Error type for pubsuffix operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading a rule source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No well-formed rules survived compilation
    #[error("rule set is empty: no well-formed rules were compiled")]
    EmptyRuleSet,
}

/// Result type alias for pubsuffix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for a single malformed rule line.
///
/// These are reported and the offending line is skipped; they never abort
/// compilation of the remaining rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleLineError {
    /// Unbalanced or nested brace groups
    #[error("unbalanced braces")]
    UnbalancedBraces,

    /// `*` or `!` used as the TLD token
    #[error("`{0}` cannot be used as a TLD label")]
    MarkerTld(String),

    /// A label containing a dot, a marker byte, or NUL
    #[error("label `{0}` contains a reserved byte")]
    ReservedByte(String),
}
