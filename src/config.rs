/// Construction parameters for an [`IntervalStabber`](crate::IntervalStabber).
///
/// ```
/// use intstab::Config;
///
/// let config = Config::default()
///     .with_domain_max(1_000)
///     .with_pool_capacity(8);
///
/// assert_eq!(config.domain_max(), 1_000);
/// assert_eq!(config.buffer_capacity(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    domain_max: u16,
    pool_capacity: usize,
    buffer_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain_max: u16::MAX,
            pool_capacity: 100,
            buffer_capacity: 250,
        }
    }
}

impl Config {
    /// Set the largest coordinate (inclusive) that intervals may end at, and
    /// that may be queried.
    ///
    /// The index allocates one slot per coordinate in `0..=domain_max`.
    pub const fn with_domain_max(mut self, domain_max: u16) -> Self {
        self.domain_max = domain_max;
        self
    }

    /// Set the maximum number of idle query buffers retained for reuse.
    pub const fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }

    /// Set the initial capacity of a freshly allocated query buffer.
    pub const fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub const fn domain_max(&self) -> u16 {
        self.domain_max
    }

    pub const fn pool_capacity(&self) -> usize {
        self.pool_capacity
    }

    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}
