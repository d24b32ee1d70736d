//! Disposable infrastructure fixtures for codemint integration tests.

pub mod error;
pub mod mysql;

pub use error::{Result, TestInfraError};
