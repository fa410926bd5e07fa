//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Result records themselves are domain types and are
//! serialized as-is.

pub mod batch;
pub mod export;
pub mod health;
