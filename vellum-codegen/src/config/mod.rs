//! Configuration documents
//!
//! Loads a TOML document, validates every display buffer entry against one
//! shared id registry and emits a program per entry.

pub mod loader;
pub mod report;

pub use loader::{load_file, load_str, ConfigErrors, LoadError, Loader};
pub use report::boxed_report;
