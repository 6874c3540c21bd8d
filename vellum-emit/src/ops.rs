//! Emit operations
//!
//! Operations are divided into two categories:
//! - Construction: instantiate the runtime object, call plain setters
//! - Wiring: hand the instance to a collaborator, install callbacks

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::lambda::CompiledLambda;

/// Fully qualified runtime type name (e.g. `display_buffer::Buffer`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    /// Create a type reference from its qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Qualified name as written in generated code
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base used for generated identifiers
    ///
    /// `display_buffer::Buffer` becomes `display_buffer_buffer`.
    pub fn id_base(&self) -> String {
        self.0
            .replace("::", "_")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Template parameterization of an instantiated class
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemplateArg {
    /// No explicit argument, the runtime class picks its default
    #[default]
    Default,
    /// Explicit type argument
    Type(TypeRef),
}

/// Literal value passed to a setter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    UInt(u64),
    Float(f32),
    Bool(bool),
    /// Named constant or enum value (e.g. `display::DISPLAY_ROTATION_90_DEGREES`)
    Symbol(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::UInt(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{:?}f", v),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Symbol(s) => f.write_str(s),
        }
    }
}

/// Registration with the generic component lifecycle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentRegistration {
    /// Setup priority override
    pub setup_priority: Option<f32>,
    /// Polling interval in milliseconds (`u32::MAX` means never)
    pub update_interval_ms: Option<u32>,
}

/// A display page created during display registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInstance {
    /// Variable name of the page
    pub id: String,
    /// Runtime page class
    pub class: TypeRef,
    /// Page drawing callback
    pub writer: CompiledLambda,
}

/// Registration with the display subsystem
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayRegistration {
    /// Rotation constant
    pub rotation: Option<Literal>,
    /// Clear the buffer before each update
    pub auto_clear: Option<bool>,
    /// Pages, in declaration order
    pub pages: Vec<PageInstance>,
    /// Draw the built-in test card instead of user content
    pub show_test_card: bool,
}

/// Collaborator an instance is registered with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Registration {
    /// Periodic component lifecycle
    Component(ComponentRegistration),
    /// Display subsystem
    Display(DisplayRegistration),
}

/// A single emitted operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmitOp {
    /// Instantiate `class<template>` and bind it to `id`
    Instantiate {
        id: String,
        class: TypeRef,
        template: TemplateArg,
    },
    /// Call `target->setter(value)`
    CallSetter {
        target: String,
        setter: String,
        value: Literal,
    },
    /// Register `target` with a collaborator
    Register {
        target: String,
        registration: Registration,
    },
    /// Install a compiled callback via `target->setter(lambda)`
    SetCallback {
        target: String,
        setter: String,
        lambda: CompiledLambda,
    },
}

impl EmitOp {
    /// Build a setter call
    pub fn setter(target: &str, setter: &str, value: Literal) -> Self {
        EmitOp::CallSetter {
            target: target.into(),
            setter: setter.into(),
            value,
        }
    }

    /// Variable the operation acts on
    pub fn target(&self) -> &str {
        match self {
            EmitOp::Instantiate { id, .. } => id,
            EmitOp::CallSetter { target, .. }
            | EmitOp::Register { target, .. }
            | EmitOp::SetCallback { target, .. } => target,
        }
    }

    /// Returns true if this operation creates the instance
    pub fn is_instantiation(&self) -> bool {
        matches!(self, EmitOp::Instantiate { .. })
    }
}
