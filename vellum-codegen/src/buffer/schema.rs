//! Display buffer schema

use toml::value::Table;
use tracing::{debug, warn};
use vellum_core::schema::{enum_upper, has_at_most_one_key, positive_int};
use vellum_core::{ComponentLifecycle, ConfigPath, Fields, IdRegistry, ValidationError};
use vellum_display::{DisplaySubsystem, CONF_LAMBDA, CONF_PAGES};
use vellum_emit::TypeRef;

use super::{
    BufferConfig, BUFFER_CLASS, CONF_FORMAT, CONF_HEIGHT, CONF_WIDTH, DEFAULT_HEIGHT,
    DEFAULT_UPDATE_INTERVAL, DEFAULT_WIDTH,
};

/// Validates raw display buffer mappings
///
/// The field chain runs in a fixed order: id, own keys, then the display,
/// component and polling fragments. Keys no fragment consumed are
/// rejected, after which `pages` and `lambda` are checked for exclusivity.
pub struct BufferSchema<'c> {
    display: &'c dyn DisplaySubsystem,
    lifecycle: &'c dyn ComponentLifecycle,
}

impl<'c> BufferSchema<'c> {
    pub fn new(display: &'c dyn DisplaySubsystem, lifecycle: &'c dyn ComponentLifecycle) -> Self {
        Self { display, lifecycle }
    }

    /// Validate one raw mapping
    ///
    /// Ids are declared in `ids`, which is shared by every component of
    /// the document.
    pub fn validate(
        &self,
        raw: &Table,
        path: ConfigPath,
        ids: &mut IdRegistry,
    ) -> Result<BufferConfig, ValidationError> {
        let mut fields = Fields::new(raw, path.clone());

        let id = fields.declare_id(ids, &TypeRef::new(BUFFER_CLASS))?;
        let width = fields.optional_or(CONF_WIDTH, DEFAULT_WIDTH, positive_int)?;
        let height = fields.optional_or(CONF_HEIGHT, DEFAULT_HEIGHT, positive_int)?;
        let format = fields.optional(CONF_FORMAT, enum_upper(self.display.pixel_formats()))?;

        let display = self.display.display_schema(&mut fields, ids)?;
        let component = self.lifecycle.component_schema(&mut fields)?;
        let polling = self
            .lifecycle
            .polling_schema(&mut fields, DEFAULT_UPDATE_INTERVAL)?;
        fields.finish()?;

        has_at_most_one_key(raw, &path, &[CONF_PAGES, CONF_LAMBDA])?;

        if let Some(format) = format.filter(|f| f.is_packed()) {
            warn!(
                "{}: {} packs {} pixels per byte, the buffer stores one pixel per unit",
                path.key(CONF_FORMAT),
                format,
                format.details().pixels
            );
        }
        debug!("{}: validated buffer '{}' ({}x{})", path, id, width, height);

        Ok(BufferConfig {
            id,
            width,
            height,
            format,
            display,
            component,
            polling,
        })
    }
}
