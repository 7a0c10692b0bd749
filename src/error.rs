use thiserror::Error;

/// Errors returned when building or querying an
/// [`IntervalStabber`](crate::IntervalStabber).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The interval lower bound is greater than its upper bound.
    #[error("invalid interval: start {start} must not exceed end {end}")]
    InvalidRange { start: u16, end: u16 },

    /// The interval has no tag.
    #[error("invalid interval: missing tag")]
    MissingTag,

    /// The interval upper bound lies beyond the configured domain.
    #[error("interval end {end} lies outside the domain 0..={domain_max}")]
    OutsideDomain { end: u16, domain_max: u16 },

    /// More intervals were provided than can be addressed.
    #[error("too many intervals: {0}")]
    TooManyIntervals(usize),

    /// The stabber was queried before it was built.
    #[error("stabber must be built before querying")]
    NotInitialized,

    /// The query point lies beyond the configured domain.
    #[error("query {query} is outside the domain 0..={domain_max}")]
    OutOfRange { query: u16, domain_max: u16 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
