//! Application layer managing state and business workflows.
//!
//! This module holds the store, the router and the screen state machines,
//! and the `App` that wires them together for the presentation layer.

pub mod contacts;
pub mod profile;
pub mod router;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use contacts::*;
pub use profile::*;
pub use router::*;
pub use state::*;
pub use store::*;
