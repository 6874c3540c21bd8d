//! Lambda compiler trait

use vellum_emit::{CompiledLambda, Parameter, ReturnType};

use crate::lambda::Lambda;

/// Turns opaque lambda text into a callable with a fixed signature
pub trait LambdaCompiler {
    /// Compile `lambda` into a closure taking `params` and returning
    /// `return_type`
    fn compile(
        &self,
        lambda: &Lambda,
        params: &[Parameter],
        return_type: ReturnType,
    ) -> CompiledLambda;
}
