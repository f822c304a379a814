//! Core domain concepts shared across modules

pub mod error;

pub use error::DomainError;
