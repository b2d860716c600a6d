//! Domain layer: record models, the record store seam, and the
//! derived-view pipeline (filter, sort, aggregate, paginate)

pub mod model;
pub mod repository;
pub mod service;
