//! Check execution engine
//!
//! Runs the check suite sequentially and aggregates the results.

mod runner;

pub use runner::{CheckEvent, CheckRunner};
