//! Request body extractors with this server's error shapes

pub mod body;

pub use body::{ApiJson, PageForm};
