//! Display buffer emitter

use tracing::debug;
use vellum_core::{ComponentLifecycle, LambdaCompiler};
use vellum_display::subsystem::DRAW_ARG;
use vellum_display::DisplaySubsystem;
use vellum_emit::{EmitOp, EmitProgram, Literal, Parameter, ReturnType, TemplateArg, TypeRef};

use super::{BufferConfig, BUFFER_CLASS, COMPONENT_KEY};

/// Setter installing the drawing callback
pub const SET_WRITER: &str = "set_writer";

/// Turns a validated buffer into its emit program
pub struct BufferEmitter<'c> {
    display: &'c dyn DisplaySubsystem,
    lifecycle: &'c dyn ComponentLifecycle,
    lambdas: &'c dyn LambdaCompiler,
}

impl<'c> BufferEmitter<'c> {
    pub fn new(
        display: &'c dyn DisplaySubsystem,
        lifecycle: &'c dyn ComponentLifecycle,
        lambdas: &'c dyn LambdaCompiler,
    ) -> Self {
        Self {
            display,
            lifecycle,
            lambdas,
        }
    }

    /// Emit, in order: instantiation, size setters, component and display
    /// registration, and the writer if a lambda was configured
    pub fn emit(&self, config: &BufferConfig) -> EmitProgram {
        let id = config.id.as_str();
        let mut program = EmitProgram::new(COMPONENT_KEY);

        let template = match config.format {
            Some(format) => TemplateArg::Type(TypeRef::new(format.cpp_type())),
            None => TemplateArg::Default,
        };
        program.push(EmitOp::Instantiate {
            id: id.into(),
            class: TypeRef::new(BUFFER_CLASS),
            template,
        });
        program.push(EmitOp::setter(id, "set_width", Literal::UInt(config.width.into())));
        program.push(EmitOp::setter(id, "set_height", Literal::UInt(config.height.into())));

        program.push(self.lifecycle.register_component(
            &config.id,
            &config.component,
            Some(&config.polling),
        ));
        program.push(
            self.display
                .register_display(&config.id, &config.display, self.lambdas),
        );

        if let Some(lambda) = &config.display.lambda {
            let params = [Parameter::new(self.display.buffer_ref().as_str(), DRAW_ARG)];
            program.push(EmitOp::SetCallback {
                target: id.into(),
                setter: SET_WRITER.into(),
                lambda: self.lambdas.compile(lambda, &params, ReturnType::Void),
            });
        }

        debug!("{}: emitted {} operations", id, program.len());
        program
    }
}
