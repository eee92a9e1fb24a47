//! Lifecycle binding between owning contexts and the filter registry
//!
//! A context participates in filter scoping by declaring the capability
//! explicitly: it yields a stable per-instance identity and accepts
//! end-of-life callbacks. The binder bridges that notification to registry
//! removal, registering at most one cleanup subscription per key so that
//! toggling a filter many times over a context's lifetime does not
//! accumulate handlers.

use crate::core::error::FilterResult;
use crate::core::key::{ContextId, FilterKey};
use crate::registry::FilterRegistry;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

/// Callback fired when an owning context ends
pub type EndCallback = Box<dyn FnOnce() + Send>;

/// Capability a session/context type must declare to own filter state
///
/// `context_id` must be stable for the instance's lifetime and unique across
/// concurrently live contexts. `on_end` subscribes a callback to the
/// context's end-of-life notification; implementations that cannot provide
/// one return [`FilterError::UnsupportedLifecycleHook`], never silently
/// drop the subscription (silent failure would grow the registry without
/// bound).
///
/// [`FilterError::UnsupportedLifecycleHook`]: crate::core::error::FilterError::UnsupportedLifecycleHook
pub trait FilterContext {
    fn context_id(&self) -> ContextId;

    fn is_ended(&self) -> bool;

    fn on_end(&self, callback: EndCallback) -> FilterResult<()>;
}

/// Bridges context end-of-life notifications to registry removal
#[derive(Debug)]
pub struct LifecycleBinder {
    registry: Arc<FilterRegistry>,
    bound: Arc<DashMap<FilterKey, ()>>,
}

impl LifecycleBinder {
    pub fn new(registry: Arc<FilterRegistry>) -> Self {
        Self {
            registry,
            bound: Arc::new(DashMap::new()),
        }
    }

    /// Subscribes registry removal of `key` to `context`'s end notification.
    ///
    /// Deduped: only the first call per key registers a callback. The
    /// callback itself is idempotent with respect to the registry (removing
    /// an already-removed key is a no-op), so a notification that fires more
    /// than once stays harmless. If the subscription is rejected the dedupe
    /// marker is rolled back and the error surfaces to the caller.
    pub fn bind_cleanup<C>(&self, context: &C, key: FilterKey) -> FilterResult<()>
    where
        C: FilterContext + ?Sized,
    {
        if self.bound.insert(key.clone(), ()).is_some() {
            // Already bound for this key, nothing to register.
            return Ok(());
        }

        let registry = Arc::clone(&self.registry);
        let bound = Arc::clone(&self.bound);
        let cleanup_key = key.clone();

        let subscribed = context.on_end(Box::new(move || {
            bound.remove(&cleanup_key);
            if registry.remove(&cleanup_key).is_some() {
                debug!("removed filter state {} on context end", cleanup_key);
            }
        }));

        if let Err(err) = subscribed {
            self.bound.remove(&key);
            return Err(err);
        }

        debug!("bound cleanup for filter state {}", key);
        Ok(())
    }

    /// Number of keys with a live cleanup subscription.
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::FilterState;
    use crate::session::Session;

    #[test]
    fn test_bind_cleanup_removes_entry_on_end() {
        let registry = Arc::new(FilterRegistry::new());
        let binder = LifecycleBinder::new(Arc::clone(&registry));
        let session = Session::new();
        let key = FilterKey::new("SoftDelete", session.context_id());

        registry.get_or_create(key.clone(), || FilterState::new("SoftDelete", true));
        binder
            .bind_cleanup(&session, key.clone())
            .expect("binding should succeed on a live session");
        assert_eq!(binder.bound_count(), 1);

        session.end();
        assert!(!registry.contains(&key));
        assert_eq!(binder.bound_count(), 0);
    }

    #[test]
    fn test_bind_cleanup_dedupes_per_key() {
        let registry = Arc::new(FilterRegistry::new());
        let binder = LifecycleBinder::new(Arc::clone(&registry));
        let session = Session::new();
        let key = FilterKey::new("Tenant", session.context_id());

        for _ in 0..5 {
            binder
                .bind_cleanup(&session, key.clone())
                .expect("binding should succeed on a live session");
        }
        assert_eq!(binder.bound_count(), 1);
        assert_eq!(session.pending_end_callbacks(), 1);
    }

    #[test]
    fn test_bind_cleanup_rejected_on_ended_session() {
        let registry = Arc::new(FilterRegistry::new());
        let binder = LifecycleBinder::new(Arc::clone(&registry));
        let session = Session::new();
        session.end();

        let key = FilterKey::new("SoftDelete", session.context_id());
        assert!(binder.bind_cleanup(&session, key).is_err());
        assert_eq!(binder.bound_count(), 0);
    }
}
