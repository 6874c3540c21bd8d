//! Configuration compiler for the display buffer component
//!
//! Turns a declarative TOML document into ordered emit programs:
//!
//! ```text
//! TOML document -> loader -> BufferSchema -> BufferConfig -> BufferEmitter -> EmitProgram
//! ```
//!
//! Each `[[display_buffer]]` entry is validated and emitted independently.
//! Collaborators (display subsystem, component lifecycle, lambda compiler)
//! are passed in explicitly.

#![deny(unsafe_code)]

pub mod buffer;
pub mod config;

pub use buffer::{BufferConfig, BufferEmitter, BufferSchema};
pub use config::{load_file, load_str, ConfigErrors, LoadError, Loader};
