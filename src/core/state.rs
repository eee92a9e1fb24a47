//! Per-key filter state: an immutable name plus a toggleable enabled flag

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// State of one named filter within one owning context
///
/// Shared as `Arc<FilterState>`; the registry guarantees at most one live
/// instance per key. The enabled flag is a single atomic field with
/// last-writer-wins semantics, so toggling never requires a lock.
#[derive(Debug)]
pub struct FilterState {
    name: String,
    enabled: AtomicBool,
}

impl FilterState {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Renders the state the way the diagnostic report prints it.
    pub fn status_label(&self) -> &'static str {
        if self.is_enabled() {
            "Enabled"
        } else {
            "Disabled"
        }
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t[{}]", self.name, self.status_label())
    }
}
