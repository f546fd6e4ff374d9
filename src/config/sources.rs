//! Config sources: the global document and per-agent override documents.

pub mod global_file;
pub mod override_file;
