//! Collaborator abstraction traits
//!
//! These traits define the contracts component adapters rely on. Default
//! implementations live in this crate; hosts can substitute their own.

pub mod component;
pub mod lambda;

pub use component::ComponentLifecycle;
pub use lambda::LambdaCompiler;
