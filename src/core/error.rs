//! Unified error handling for the filter registry
//!
//! All registry operations are pure in-memory state mutations, so every
//! error here is local and synchronous: nothing is retried internally, and
//! a failed registration simply leaves no entry behind (downstream query
//! translation treats absence as "filter not active").

use crate::core::key::ContextId;
use thiserror::Error;

/// Unified error type for filter registration and lifecycle binding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter name must not be empty")]
    InvalidName,

    /// The context could not yield a stable identity. Never produced by the
    /// crate's own [`Session`](crate::session::Session), whose identity is
    /// assigned at construction; external [`FilterContext`](crate::lifecycle::FilterContext)
    /// implementations whose identity resolution can fail return this.
    #[error("invalid context: {0}")]
    InvalidContext(String),

    #[error("context {0} has already ended")]
    ContextEnded(ContextId),

    #[error("context type does not support lifecycle notifications: {0}")]
    UnsupportedLifecycleHook(String),
}

/// Unified result type
pub type FilterResult<T> = Result<T, FilterError>;

/// Validates a caller-supplied filter name.
pub fn validate_filter_name(name: &str) -> FilterResult<()> {
    if name.trim().is_empty() {
        return Err(FilterError::InvalidName);
    }
    Ok(())
}
