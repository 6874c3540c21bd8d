//! Emit operation model for Vellum component code generation
//!
//! A validated component configuration is turned into an ordered list of
//! abstract operations. A downstream code generator materializes them; this
//! crate only describes them.
//!
//! # Operations
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────┐
//! │ Instantiate  │ new Class<TemplateArg>() bound to an id      │
//! │ CallSetter   │ id->setter(literal)                          │
//! │ Register     │ hand the instance to a lifecycle/subsystem   │
//! │ SetCallback  │ id->setter(compiled lambda)                  │
//! └──────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Programs can be rendered to C++ statement text or encoded into a compact
//! binary form for tools that run later in the build.

#![deny(unsafe_code)]

pub mod codec;
pub mod lambda;
pub mod ops;
pub mod program;
pub mod render;

pub use codec::{decode, encode, CodecError, FORMAT_VERSION, PROGRAM_MAGIC};
pub use lambda::{CompiledLambda, Parameter, ReturnType};
pub use ops::{
    ComponentRegistration, DisplayRegistration, EmitOp, Literal, PageInstance, Registration,
    TemplateArg, TypeRef,
};
pub use program::EmitProgram;
pub use render::{render_op, NEVER_UPDATE_MS};
