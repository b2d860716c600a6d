//! Application service layer - config, backend lifecycle, view controller,
//! queries, export

pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod export;
pub mod notify;
pub mod repository;
pub mod view;
