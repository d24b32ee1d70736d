//! Store backends for the codemint service.
//!
//! Both backends implement the conditional-insert contract of
//! [`CodeStore`](codemint_core::CodeStore): the in-memory backend for tests
//! and single-process deployments, the MySQL backend for durable storage.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
