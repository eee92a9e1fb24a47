//! Request-time filter toggling
//!
//! `FilterService` is the composition point: it owns the shared registry
//! reference and the lifecycle binder, and exposes the enable/disable
//! operations that query code calls per request. Both go through one
//! get-or-create path, so repeated toggles on the same (context, name) pair
//! reuse a single `FilterState` and a single cleanup subscription.

use crate::config::RegistryConfig;
use crate::core::error::{validate_filter_name, FilterError, FilterResult};
use crate::core::key::FilterKey;
use crate::core::state::FilterState;
use crate::lifecycle::{FilterContext, LifecycleBinder};
use crate::registry::FilterRegistry;
use log::{debug, warn};
use std::sync::Arc;

pub struct FilterService {
    registry: Arc<FilterRegistry>,
    binder: LifecycleBinder,
    warn_capacity: usize,
}

impl FilterService {
    pub fn new(registry: Arc<FilterRegistry>) -> Self {
        Self::with_config(registry, &RegistryConfig::default())
    }

    pub fn with_config(registry: Arc<FilterRegistry>, config: &RegistryConfig) -> Self {
        let binder = LifecycleBinder::new(Arc::clone(&registry));
        Self {
            registry,
            binder,
            warn_capacity: config.warn_capacity,
        }
    }

    pub fn registry(&self) -> &Arc<FilterRegistry> {
        &self.registry
    }

    /// Enables `name` for the given context and returns the state handle.
    pub fn enable_filter<C>(&self, context: &C, name: &str) -> FilterResult<Arc<FilterState>>
    where
        C: FilterContext + ?Sized,
    {
        self.set_filter_enabled(context, name, true)
    }

    /// Disables `name` for the given context.
    ///
    /// Disabling is an explicit state, not a removal: the entry stays
    /// registered (and listed) until the context ends.
    pub fn disable_filter<C>(&self, context: &C, name: &str) -> FilterResult<()>
    where
        C: FilterContext + ?Sized,
    {
        self.set_filter_enabled(context, name, false).map(|_| ())
    }

    fn set_filter_enabled<C>(
        &self,
        context: &C,
        name: &str,
        enabled: bool,
    ) -> FilterResult<Arc<FilterState>>
    where
        C: FilterContext + ?Sized,
    {
        validate_filter_name(name)?;
        if context.is_ended() {
            return Err(FilterError::ContextEnded(context.context_id()));
        }

        let key = FilterKey::new(name, context.context_id());

        let mut created = false;
        let state = self.registry.get_or_create(key.clone(), || {
            created = true;
            FilterState::new(name, enabled)
        });
        // Applies to a pre-existing state too; last writer wins.
        state.set_enabled(enabled);

        if let Err(err) = self.binder.bind_cleanup(context, key.clone()) {
            // The context ended between the liveness check and the
            // subscription. A leaked entry would outlive its owner, so take
            // it back out and report the failure.
            self.registry.remove(&key);
            return Err(err);
        }

        if created {
            debug!("registered filter state {} (enabled={})", key, enabled);
            let len = self.registry.len();
            if len > self.warn_capacity {
                warn!(
                    "filter registry holds {} entries (warn threshold {}); \
                     check that owning contexts fire their end-of-life notification",
                    len, self.warn_capacity
                );
            }
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn create_test_service() -> FilterService {
        FilterService::new(Arc::new(FilterRegistry::new()))
    }

    #[test]
    fn test_enable_then_lookup_reports_enabled() {
        let service = create_test_service();
        let session = Session::new();

        let state = service
            .enable_filter(&session, "SoftDelete")
            .expect("enable should succeed");
        assert_eq!(state.name(), "SoftDelete");
        assert!(state.is_enabled());

        let key = FilterKey::new("SoftDelete", session.context_id());
        let looked_up = service.registry().get(&key).expect("entry should exist");
        assert!(looked_up.is_enabled());
    }

    #[test]
    fn test_disable_then_lookup_reports_disabled() {
        let service = create_test_service();
        let session = Session::new();

        service
            .disable_filter(&session, "SoftDelete")
            .expect("disable should succeed");

        let key = FilterKey::new("SoftDelete", session.context_id());
        let state = service.registry().get(&key).expect("entry should exist");
        assert!(!state.is_enabled());
    }

    #[test]
    fn test_repeated_enable_is_identity_stable() {
        let service = create_test_service();
        let session = Session::new();

        let first = service
            .enable_filter(&session, "Tenant")
            .expect("enable should succeed");
        let second = service
            .enable_filter(&session, "Tenant")
            .expect("enable should succeed");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_enabled());
        assert_eq!(service.registry().len(), 1);
        // toggling many times still holds a single cleanup subscription
        assert_eq!(session.pending_end_callbacks(), 1);
    }

    #[test]
    fn test_toggle_reuses_state_object() {
        let service = create_test_service();
        let session = Session::new();

        let state = service
            .enable_filter(&session, "SoftDelete")
            .expect("enable should succeed");
        service
            .disable_filter(&session, "SoftDelete")
            .expect("disable should succeed");

        assert!(!state.is_enabled());
        service
            .enable_filter(&session, "SoftDelete")
            .expect("enable should succeed");
        assert!(state.is_enabled());
        assert_eq!(session.pending_end_callbacks(), 1);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let service = create_test_service();
        let first = Session::new();
        let second = Session::new();

        service
            .enable_filter(&first, "Tenant")
            .expect("enable should succeed");

        let other_key = FilterKey::new("Tenant", second.context_id());
        assert!(service.registry().get(&other_key).is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        let service = create_test_service();
        let session = Session::new();

        let result = service.enable_filter(&session, "");
        assert!(matches!(result, Err(FilterError::InvalidName)));
        assert!(service.registry().is_empty());
    }

    #[test]
    fn test_ended_context_rejected_without_leak() {
        let service = create_test_service();
        let session = Session::new();
        session.end();

        let result = service.enable_filter(&session, "SoftDelete");
        assert!(matches!(
            result,
            Err(FilterError::ContextEnded(id)) if id == session.context_id()
        ));
        assert!(service.registry().is_empty());
    }

    #[test]
    fn test_session_end_evicts_entries() {
        let service = create_test_service();
        let session = Session::new();

        service
            .enable_filter(&session, "SoftDelete")
            .expect("enable should succeed");
        service
            .enable_filter(&session, "Tenant")
            .expect("enable should succeed");
        assert_eq!(service.registry().len(), 2);

        session.end();
        assert!(service.registry().is_empty());
    }
}
