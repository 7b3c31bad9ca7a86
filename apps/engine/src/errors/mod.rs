//! Error handling for the Thousand engine.

pub mod domain;

pub use domain::{ConfigKind, DomainError, ValidationKind};
