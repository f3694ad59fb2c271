//! Tasklist Types - Pure data definitions
//!
//! Shared by the store port and the HTTP server; no async runtime here.

pub mod api;
pub mod task;

pub use api::*;
pub use task::*;
