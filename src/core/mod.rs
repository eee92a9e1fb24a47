pub mod error;
pub mod key;
pub mod state;

pub use error::{FilterError, FilterResult};
pub use key::{ContextId, FilterKey};
pub use state::FilterState;
