//! Identity types for scoping filter state to a single session
//!
//! A filter's state belongs to exactly one live context. Context identity is
//! an assigned sequence number, not a pointer: two distinct contexts must
//! never share filter state even if they are otherwise indistinguishable,
//! and an id handed out once is never reused for the process lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global context id counter, used to assign unique per-instance identities
static CONTEXT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stable per-instance identity of an owning context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(u64);

impl ContextId {
    /// Assigns the next process-unique context id.
    pub fn next() -> Self {
        ContextId(CONTEXT_ID_COUNTER.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn from_raw(raw: u64) -> Self {
        ContextId(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite registry key: (filter name, owning context identity)
///
/// Two keys are equal iff both components are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    name: String,
    context: ContextId,
}

impl FilterKey {
    pub fn new(name: impl Into<String>, context: ContextId) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> ContextId {
        self.context
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.context)
    }
}
