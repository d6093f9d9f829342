//! Resource-reallocation engine for accelerating a priority initiative.
//!
//! Every calculator in this crate is a pure function over immutable
//! reference data and an explicit allocation snapshot. The only mutable
//! state lives in [`scenario::ScenarioSession`], which plays the host.

pub mod allocation;
pub mod command;
pub mod config;
pub mod coverage;
pub mod demand;
pub mod engine;
pub mod error;
pub mod event;
pub mod impact;
pub mod scenario;
pub mod snapshot;
pub mod tradeoff;
pub mod types;
