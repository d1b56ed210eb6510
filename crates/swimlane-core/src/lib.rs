//! Swimlane Core Types and Definitions
//!
//! This crate provides the foundational types for swimlane process diagrams.
//! It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Process**: The process graph model with its diagram geometry ([`process`] module)
//! - **Errors**: Integrity errors raised while assembling a model ([`ModelError`])

pub mod geometry;
pub mod identifier;
pub mod process;

mod error;

pub use error::ModelError;
