//! Session Filters - named, per-session query filters for Rust persistence layers
//!
//! This crate provides the state side of conditional query narrowing: filters
//! are registered per (name, owning session) pair in a shared concurrent
//! registry, toggled at request time, and reclaimed automatically when the
//! owning session ends. Applying an enabled filter's predicate to a query is
//! the job of the surrounding query-translation layer.

pub mod config;
pub mod core;
pub mod declaration;
pub mod lifecycle;
pub mod registry;
pub mod services;
pub mod session;
pub mod utils;

pub use crate::core::error::{FilterError, FilterResult};
pub use crate::core::key::{ContextId, FilterKey};
pub use crate::core::state::FilterState;
pub use crate::lifecycle::FilterContext;
pub use crate::registry::FilterRegistry;
pub use crate::services::filters::FilterService;
pub use crate::session::Session;
