//! tinvoice - Terminal Invoicing Library
//!
//! Contact management and the sender step of an invoice wizard, built as a
//! terminal application in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
