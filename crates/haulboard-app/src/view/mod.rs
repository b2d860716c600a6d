//! View Controller: explicit view state, a pure reducer, and the async
//! runner that performs its fetch effects

mod controller;
mod runner;

pub use controller::{
    validation_title, Effect, FetchTicket, ViewAction, ViewController, ViewStatus,
};
pub use runner::{ViewRunner, DEFAULT_FETCH_TIMEOUT};
