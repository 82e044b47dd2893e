//! Error types for widget configuration and usage.
//!
//! Every variant describes a programming error at the call site. Nothing in
//! the toolkit catches or retries these; construction-time errors are
//! expected to abort screen setup, runtime errors are the caller's to log.
//! Continuous values (sliders, knobs, meters, gauges) are clamped instead.

use thiserror_no_std::Error;

/// Error types for widget operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// Icon or member index outside `0..count`
    #[error("Invalid index {index} (count: {count})")]
    InvalidIndex {
        /// The rejected index
        index: usize,
        /// Number of valid entries
        count: usize,
    },

    /// A radio-style group does not have exactly one selected member
    #[error("Radio group has {selected} selected members, expected exactly one")]
    InvariantViolation {
        /// Number of members found selected
        selected: usize,
    },

    /// The widget was configured with contradictory or unsupported options
    #[error("Configuration error: {0}")]
    Configuration(&'static str),
}

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Check `index` against `count`.
pub(crate) fn check_index(index: usize, count: usize) -> WidgetResult<()> {
    if index < count {
        Ok(())
    } else {
        Err(WidgetError::InvalidIndex { index, count })
    }
}
