use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Rejected construction or configuration input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("percentile index {index} out of bounds (configured percentiles: {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl StatsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StatsError::InvalidArgument(msg.into())
    }
}
