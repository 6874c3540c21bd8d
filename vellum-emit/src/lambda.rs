//! Compiled callback descriptions
//!
//! A lambda is kept as opaque source text until emit time, when a compiler
//! collaborator fixes its signature.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ops::TypeRef;

/// A callback parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter type as written in generated code (e.g. `display::DisplayBuffer &`)
    pub ty: String,
    /// Parameter name visible to the user expression
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Callback return type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReturnType {
    #[default]
    Void,
    Type(TypeRef),
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("void"),
            ReturnType::Type(t) => write!(f, "{}", t),
        }
    }
}

/// A user expression with its fixed calling signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledLambda {
    pub params: Vec<Parameter>,
    pub return_type: ReturnType,
    /// User expression, unchanged
    pub body: String,
}

impl CompiledLambda {
    /// Render as a C++ closure capturing by value
    ///
    /// Body lines are indented by two spaces.
    pub fn render(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| {
                if p.ty.ends_with('&') || p.ty.ends_with('*') {
                    format!("{}{}", p.ty, p.name)
                } else {
                    format!("{} {}", p.ty, p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!(
            "[=]({}) -> {} {{\n",
            params,
            self.return_type
        );
        for line in self.body.trim_matches('\n').lines() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('}');
        out
    }
}
