//! HTTP handlers

pub mod api;
pub mod health;
pub mod pages;

pub use health::health;

#[cfg(test)]
pub(crate) mod test_support;
