//! Template system for project generation.
//!
//! This module owns the template bundle Maya renders: where its files come
//! from ([`EmbeddedTemplateStore`], [`DirectoryTemplateStore`]), how variants
//! are declared ([`TemplateManifest`]) and how placeholders are substituted
//! ([`Placeholder`]).

pub mod dir;
pub mod embedded;
pub mod manifest;
pub mod placeholder;
pub mod repository;
pub mod types;

pub use dir::*;
pub use embedded::*;
pub use manifest::*;
pub use placeholder::*;
pub use repository::*;
pub use types::*;
