//! Declarative endpoint descriptions
//!
//! The path engine: endpoint descriptors ([`Path`]), per-call argument
//! binding ([`CallContext`]) and the validator set.

pub mod context;
pub mod path;
pub mod validators;

pub use context::{CallContext, Extended};
pub use path::Path;
pub use validators::{
    is_date, PerArgValidator, Validator, ALL_FILTERS, COMMON_FILTERS, MOVIES_FILTERS,
    MULTI_FILTERS, SHOWS_FILTERS,
};
