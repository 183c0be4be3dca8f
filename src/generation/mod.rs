//! Generation module - turns a template store and a configuration into a project
//!
//! [`ProjectGenerator`] renders every entry in memory and hands the result to
//! [`FileSystemOutput`], which owns the destination directory for the
//! duration of the run.

pub mod generator;
pub mod output;

pub use generator::*;
pub use output::*;
