//! Storage layer
//!
//! DynamoDB is the production table. SQLite (embedded) and DashMap
//! (in-memory) stand in for it locally and in tests.

pub mod db;
pub mod dynamo;
pub mod memory;

pub use db::SqliteTaskStore;
pub use dynamo::DynamoTaskStore;
pub use memory::MemoryTaskStore;
