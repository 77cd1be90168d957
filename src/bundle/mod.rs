//! Helpers for turning a resolved file set into the written bundle artifact.

pub mod concat;
pub mod write;

pub use concat::{SOURCE_SEPARATOR, concatenate_sources};
pub use write::write_atomically;
