//! Persistence implementations
//!
//! File-backed and built-in implementations of the record store trait.

mod json_dir_store;
mod sample_store;

pub use json_dir_store::JsonDirStore;
pub use sample_store::SampleStore;
