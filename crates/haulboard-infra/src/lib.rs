//! Infrastructure layer: record store implementations and file loaders

pub mod logistics_csv;
pub mod persistence;
pub mod sample_data;

pub use persistence::{JsonDirStore, SampleStore};
