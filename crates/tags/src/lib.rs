//! Tag bookkeeping shared by the template compiler and the tagging session.
//!
//! - [`TagsContainer`]: a sorted, case-insensitive registry of named counters
//!   with monotonic update operations.
//! - [`ConditionalTagger`]: trigger tag name -> shared dependent registry, used
//!   to apply or retract dependent tags when a trigger is toggled.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod conditional;
mod container;

#[cfg(test)]
mod property_tests;

pub use conditional::ConditionalTagger;
pub use container::{Tag, TagsContainer};

/// Canonical lookup form of a tag name.
pub(crate) fn canonical(name: &str) -> String {
    name.to_lowercase()
}
