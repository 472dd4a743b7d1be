/// Failures a search can end with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The threshold was negative, not an integer, or too large for the numeric type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// F(index) does not fit in the numeric type the search runs on.
    #[error("fibonacci value at index {index} overflows the numeric type")]
    NumericOverflow { index: u64 },

    /// The search passed its configured index cap without finding a result.
    #[error("no prime fibonacci found up to index {max_index}")]
    LimitExceeded { max_index: u64 },
}
