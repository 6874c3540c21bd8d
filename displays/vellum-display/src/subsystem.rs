//! Display subsystem seam

use vellum_core::{Fields, Id, IdRegistry, LambdaCompiler, ValidationError};
use vellum_emit::{
    DisplayRegistration, EmitOp, Literal, PageInstance, Parameter, Registration, ReturnType,
    TypeRef,
};

use crate::config::{DisplayConfig, DISPLAY_PAGE_CLASS};
use crate::pixel::{PixelFormat, PIXEL_TYPES};

/// Reference type drawing callbacks receive when they draw into a buffer
pub const DISPLAY_BUFFER_REF: &str = "display::DisplayBuffer &";

/// Reference type page callbacks receive
pub const DISPLAY_REF: &str = "display::Display &";

/// Name of the callback parameter
pub const DRAW_ARG: &str = "it";

/// Capabilities the display subsystem provides to display components
pub trait DisplaySubsystem {
    /// Pixel formats accepted in configuration, by canonical name
    fn pixel_formats(&self) -> &[(&'static str, PixelFormat)];

    /// Consume the base display keys
    fn display_schema(
        &self,
        fields: &mut Fields<'_>,
        ids: &mut IdRegistry,
    ) -> Result<DisplayConfig, ValidationError>;

    /// Parameter type of a buffer drawing callback
    fn buffer_ref(&self) -> TypeRef;

    /// Parameter type of a page callback
    fn display_ref(&self) -> TypeRef;

    /// Register an instance as a display target
    fn register_display(
        &self,
        id: &Id,
        config: &DisplayConfig,
        lambdas: &dyn LambdaCompiler,
    ) -> EmitOp;
}

/// The display subsystem as shipped with the runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDisplay;

impl DisplaySubsystem for StandardDisplay {
    fn pixel_formats(&self) -> &[(&'static str, PixelFormat)] {
        PIXEL_TYPES
    }

    fn display_schema(
        &self,
        fields: &mut Fields<'_>,
        ids: &mut IdRegistry,
    ) -> Result<DisplayConfig, ValidationError> {
        DisplayConfig::validate(fields, ids)
    }

    fn buffer_ref(&self) -> TypeRef {
        TypeRef::new(DISPLAY_BUFFER_REF)
    }

    fn display_ref(&self) -> TypeRef {
        TypeRef::new(DISPLAY_REF)
    }

    fn register_display(
        &self,
        id: &Id,
        config: &DisplayConfig,
        lambdas: &dyn LambdaCompiler,
    ) -> EmitOp {
        let page_params = [Parameter::new(self.display_ref().as_str(), DRAW_ARG)];
        let pages = config
            .pages
            .iter()
            .map(|page| PageInstance {
                id: page.id.to_string(),
                class: TypeRef::new(DISPLAY_PAGE_CLASS),
                writer: lambdas.compile(&page.lambda, &page_params, ReturnType::Void),
            })
            .collect();

        EmitOp::Register {
            target: id.to_string(),
            registration: Registration::Display(DisplayRegistration {
                rotation: config
                    .rotation
                    .map(|r| Literal::Symbol(r.cpp_constant())),
                auto_clear: config.auto_clear_enabled,
                pages,
                show_test_card: config.show_test_card.unwrap_or(false),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::rotation::Rotation;
    use vellum_core::{InlineLambdaCompiler, Lambda};

    #[test]
    fn test_register_plain_display() {
        let id = Id::new("fb").unwrap();
        let op = StandardDisplay.register_display(
            &id,
            &DisplayConfig::default(),
            &InlineLambdaCompiler::default(),
        );
        assert_eq!(
            op,
            EmitOp::Register {
                target: "fb".into(),
                registration: Registration::Display(DisplayRegistration::default()),
            }
        );
    }

    #[test]
    fn test_register_pages() {
        let id = Id::new("fb").unwrap();
        let config = DisplayConfig {
            pages: vec![PageConfig {
                id: Id::new("home").unwrap(),
                lambda: Lambda::new("it.fill(COLOR_OFF);"),
            }],
            rotation: Some(Rotation::Deg180),
            auto_clear_enabled: Some(true),
            show_test_card: Some(true),
            ..Default::default()
        };
        let op = StandardDisplay.register_display(&id, &config, &InlineLambdaCompiler::default());

        let EmitOp::Register {
            registration: Registration::Display(reg),
            ..
        } = op
        else {
            panic!("expected display registration");
        };
        assert_eq!(
            reg.rotation,
            Some(Literal::Symbol("display::DISPLAY_ROTATION_180_DEGREES".into()))
        );
        assert_eq!(reg.auto_clear, Some(true));
        assert!(reg.show_test_card);
        assert_eq!(reg.pages.len(), 1);
        assert_eq!(reg.pages[0].id, "home");
        assert_eq!(reg.pages[0].writer.params[0].ty, DISPLAY_REF);
        assert_eq!(reg.pages[0].writer.body, "it.fill(COLOR_OFF);");
    }

    #[test]
    fn test_formats_include_rgb565() {
        assert!(StandardDisplay
            .pixel_formats()
            .iter()
            .any(|(name, f)| *name == "RGB565" && *f == PixelFormat::Rgb565));
    }
}
