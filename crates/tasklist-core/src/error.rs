//! Error types for the task store

use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Failure reported by the underlying store, passed through untouched
    #[error("Store error: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Table {0} did not become active")]
    TableNotReady(String),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StoreError::backend(io);

        assert_eq!(err.to_string(), "Store error: refused");
        let source = err.source().expect("source should be preserved");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }
}
