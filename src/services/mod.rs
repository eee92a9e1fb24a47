//! Service layer
//!
//! High-level entry points over the registry: request-time enable/disable
//! and diagnostic listings.

pub mod diagnostics;
pub mod filters;

pub use diagnostics::FilterDescription;
pub use filters::FilterService;
