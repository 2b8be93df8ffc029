//! Core - error types, logging, zero-cost indexing macros

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;
pub mod error;
pub mod logging;

pub use error::FluidError;
