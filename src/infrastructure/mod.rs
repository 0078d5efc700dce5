//! Infrastructure layer providing external service integrations.
//!
//! This module contains the file-backed pieces: the JSON data file, CSV
//! contact exchange, command line settings and log output.

pub mod config;
pub mod errors;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use errors::*;
pub use logging::*;
pub use persistence::*;
