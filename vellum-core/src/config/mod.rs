//! Configuration types
//!
//! Record fragments contributed by the generic component lifecycle. Each
//! fragment serializes back to the raw keys it was validated from.

pub mod component;

pub use component::*;
