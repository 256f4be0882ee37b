//! Search configuration errors.

/// Errors from validating a [`SearchConfig`](crate::SearchConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Iterative deepening must start at depth 1 or more.
    #[error("start depth must be at least 1")]
    ZeroStartDepth,

    /// The starting depth lies beyond the depth ceiling.
    #[error("start depth {start} exceeds max depth {max}")]
    StartBeyondMax {
        /// Configured starting depth.
        start: u32,
        /// Configured depth ceiling.
        max: u32,
    },

    /// An iteration policy name was not recognized.
    #[error("unknown iteration policy: {name}")]
    UnknownPolicy {
        /// The name that failed to parse.
        name: String,
    },
}
