//! Tasklist Core Library
//!
//! The task store port and its error type.

// Re-export pure types from tasklist-types
pub use tasklist_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, StoreError};
pub use ports::TaskStore;
