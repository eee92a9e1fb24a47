//! A concrete owning context with an explicit end-of-life notification
//!
//! Any type can own filter state by implementing [`FilterContext`]; this
//! session is the crate's reference implementation, suitable as a
//! unit-of-work object in its own right. Identity comes from the global
//! context id counter, so two sessions never compare equal even when their
//! contents are indistinguishable.

use crate::core::error::{FilterError, FilterResult};
use crate::core::key::ContextId;
use crate::lifecycle::{EndCallback, FilterContext};
use log::info;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;
use uuid::Uuid;

/// A unit-of-work session that filter state can be scoped to
pub struct Session {
    id: ContextId,
    label: String,
    created_at: SystemTime,
    ended: AtomicBool,
    end_callbacks: Mutex<Vec<EndCallback>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: ContextId::next(),
            label: Uuid::new_v4().to_string(),
            created_at: SystemTime::now(),
            ended: AtomicBool::new(false),
            end_callbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Ends the session and fires registered end-of-life callbacks.
    ///
    /// Idempotent: only the call that flips the ended flag drains the
    /// callback list, so each callback runs at most once even if `end` is
    /// invoked concurrently or repeatedly. Callbacks are drained out of the
    /// lock before they run, so a callback touching the registry cannot
    /// deadlock against a concurrent enable/disable.
    pub fn end(&self) {
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }

        let callbacks = {
            let mut guard = self.end_callbacks.lock();
            std::mem::take(&mut *guard)
        };

        let fired = callbacks.len();
        for callback in callbacks {
            callback();
        }

        info!("session {} ended, {} cleanup callbacks fired", self.id, fired);
    }

    /// Number of callbacks waiting for `end` (test/diagnostic hook).
    pub fn pending_end_callbacks(&self) -> usize {
        self.end_callbacks.lock().len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // A session dropped without an explicit end() must still fire its
        // cleanup callbacks, or its registry entries would outlive it for
        // the process lifetime. end() is idempotent, so an already-ended
        // session drops as a no-op.
        self.end();
    }
}

impl FilterContext for Session {
    fn context_id(&self) -> ContextId {
        self.id
    }

    fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    fn on_end(&self, callback: EndCallback) -> FilterResult<()> {
        // The ended check happens under the callback lock: end() flips the
        // flag before draining, so a subscriber that got past the check here
        // is guaranteed to be seen by the drain.
        let mut guard = self.end_callbacks.lock();
        if self.ended.load(Ordering::SeqCst) {
            return Err(FilterError::ContextEnded(self.id));
        }
        guard.push(callback);
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("ended", &self.is_ended())
            .finish()
    }
}
