//! Component-agnostic building blocks for Vellum configuration compilers
//!
//! This crate contains everything a component adapter needs that does not
//! depend on a specific component:
//!
//! - Raw value validators and the field chain that applies them
//! - Identifier declaration and generation
//! - Time period parsing
//! - The generic component / polling lifecycle
//! - The lambda compiler seam
//!
//! Raw configuration is represented with `toml::Value`.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod ids;
pub mod lambda;
pub mod lifecycle;
pub mod schema;
pub mod time;
pub mod traits;

pub use error::{ConfigPath, ErrorKind, ValidationError};
pub use ids::{Id, IdRegistry, MAX_ID_LEN};
pub use lambda::{InlineLambdaCompiler, Lambda};
pub use lifecycle::StandardLifecycle;
pub use schema::Fields;
pub use time::{TimePeriod, UpdateInterval};
pub use traits::{ComponentLifecycle, LambdaCompiler};
