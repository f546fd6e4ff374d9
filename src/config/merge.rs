//! Merge rules: structural deep merge for agent documents, builder defaults for the global one.

pub mod deep_merge;
pub mod merge_policy;

pub use deep_merge::{deep_merge, merge_maps};
