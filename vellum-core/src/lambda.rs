//! User lambdas
//!
//! Validation keeps the expression as opaque text. Compilation into a typed
//! callable happens at emit time through a [`LambdaCompiler`].

use core::fmt;

use serde::{Serialize, Serializer};
use toml::Value;
use vellum_emit::{CompiledLambda, Parameter, ReturnType};

use crate::error::ErrorKind;
use crate::traits::LambdaCompiler;

/// Source text of a user expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lambda(String);

impl Lambda {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Lambda {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Validate a raw value as a lambda
pub fn lambda(value: &Value) -> Result<Lambda, ErrorKind> {
    match value {
        Value::String(s) => Ok(Lambda::new(s.as_str())),
        other => Err(ErrorKind::WrongType {
            expected: "lambda string",
            found: other.type_str(),
        }),
    }
}

/// Compiles lambdas into closures that embed the expression verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineLambdaCompiler;

impl LambdaCompiler for InlineLambdaCompiler {
    fn compile(
        &self,
        lambda: &Lambda,
        params: &[Parameter],
        return_type: ReturnType,
    ) -> CompiledLambda {
        CompiledLambda {
            params: params.to_vec(),
            return_type,
            body: lambda.source().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambda_requires_string() {
        assert_eq!(
            lambda(&Value::String("it.fill(COLOR_ON);".into())).unwrap(),
            Lambda::new("it.fill(COLOR_ON);")
        );
        assert!(matches!(
            lambda(&Value::Integer(3)),
            Err(ErrorKind::WrongType { .. })
        ));
    }

    #[test]
    fn test_inline_compiler_keeps_body() {
        let compiler = InlineLambdaCompiler::default();
        let compiled = compiler.compile(
            &Lambda::new("it.line(0, 0, 10, 10);"),
            &[Parameter::new("display::DisplayBuffer &", "it")],
            ReturnType::Void,
        );
        assert_eq!(compiled.params.len(), 1);
        assert_eq!(compiled.params[0].name, "it");
        assert_eq!(compiled.return_type, ReturnType::Void);
        assert_eq!(compiled.body, "it.line(0, 0, 10, 10);");
    }
}
