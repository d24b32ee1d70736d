//! Unique-code issuing service.
//!
//! This crate provides the candidate-code generator and the issuer service
//! that negotiates uniqueness with a [`CodeStore`](codemint_core::CodeStore)
//! through a conditional-insert-or-retry loop.

pub mod generator;
pub mod service;

pub use generator::random::RandomGenerator;
pub use generator::Generator;
pub use service::{IssuerService, ATTEMPT_LIMIT};
