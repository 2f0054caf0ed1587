//! Dispatcher configuration.
//!
//! [`DispatcherConfig`] is a small builder for the knobs that change how a
//! [`Dispatcher`](crate::Dispatcher) answers batch calls.
//!
//! # Example
//!
//! ```
//! use smart_video_info::{BatchEntryPolicy, DispatcherConfig};
//!
//! let config = DispatcherConfig::new().with_batch_entry_policy(BatchEntryPolicy::Placeholder);
//! assert_eq!(config.batch_entry_policy(), BatchEntryPolicy::Placeholder);
//! ```

/// What a batch call does with list elements that are not strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchEntryPolicy {
    /// Drop the element. The result list can be shorter than the input
    /// list. This is the default.
    #[default]
    Skip,
    /// Emit a failure report in the element's position, so results line up
    /// with the input list one to one.
    Placeholder,
}

/// Error message used for [`BatchEntryPolicy::Placeholder`] entries.
pub const NON_STRING_PATH_MESSAGE: &str = "path must be a string";

/// Settings for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    pub(crate) batch_entry_policy: BatchEntryPolicy,
    #[cfg(feature = "rayon")]
    pub(crate) parallel_batch: bool,
}

impl DispatcherConfig {
    /// Defaults: skip non-string batch entries, extract sequentially.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_batch_entry_policy(mut self, policy: BatchEntryPolicy) -> Self {
        self.batch_entry_policy = policy;
        self
    }

    pub fn batch_entry_policy(&self) -> BatchEntryPolicy {
        self.batch_entry_policy
    }

    /// Extract batch entries on the rayon thread pool.
    ///
    /// Every worker starts its own framework session. Results keep the
    /// input order.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn with_parallel_batch(mut self, parallel: bool) -> Self {
        self.parallel_batch = parallel;
        self
    }

    #[cfg(feature = "rayon")]
    pub fn parallel_batch(&self) -> bool {
        self.parallel_batch
    }
}
