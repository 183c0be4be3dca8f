//! Core types for Maya: configuration, errors and the template system.

pub mod config;
pub mod error;
pub mod templates;

pub use error::Error;
