//! Base display schema fragment
//!
//! Keys shared by every display-type component. The fragment consumes its
//! keys from the component's own [`Fields`], so a display component is one
//! flat mapping.

use serde::Serialize;
use toml::value::Table;
use vellum_core::lambda::{lambda as validate_lambda, Lambda};
use vellum_core::schema::{boolean, table_list, Fields};
use vellum_core::{ConfigPath, Id, IdRegistry, ValidationError};
use vellum_emit::TypeRef;

use crate::rotation::{rotation, Rotation};

pub const CONF_LAMBDA: &str = "lambda";
pub const CONF_PAGES: &str = "pages";
pub const CONF_ROTATION: &str = "rotation";
pub const CONF_AUTO_CLEAR_ENABLED: &str = "auto_clear_enabled";
pub const CONF_SHOW_TEST_CARD: &str = "show_test_card";

/// Runtime class of a display page
pub const DISPLAY_PAGE_CLASS: &str = "display::DisplayPage";

/// One page of a multi-page display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageConfig {
    pub id: Id,
    pub lambda: Lambda,
}

/// Validated display keys
///
/// At most one of `lambda` and `pages` is set once the component's
/// cross-key check has run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DisplayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<Lambda>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_clear_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_test_card: Option<bool>,
}

impl DisplayConfig {
    /// Consume the display keys from `fields`
    ///
    /// Page ids are declared in `ids` in order.
    pub fn validate(fields: &mut Fields<'_>, ids: &mut IdRegistry) -> Result<Self, ValidationError> {
        let lambda = fields.optional(CONF_LAMBDA, validate_lambda)?;
        let pages = fields
            .optional_nested(CONF_PAGES, |value, path| {
                table_list(value, &path, 1, |page, page_path| {
                    validate_page(page, page_path, ids)
                })
            })?
            .unwrap_or_default();
        let rotation = fields.optional(CONF_ROTATION, rotation)?;
        let auto_clear_enabled = fields.optional(CONF_AUTO_CLEAR_ENABLED, boolean)?;
        let show_test_card = fields.optional(CONF_SHOW_TEST_CARD, boolean)?;

        Ok(Self {
            lambda,
            pages,
            rotation,
            auto_clear_enabled,
            show_test_card,
        })
    }
}

fn validate_page(
    table: &Table,
    path: ConfigPath,
    ids: &mut IdRegistry,
) -> Result<PageConfig, ValidationError> {
    let mut fields = Fields::new(table, path);
    let id = fields.declare_id(ids, &TypeRef::new(DISPLAY_PAGE_CLASS))?;
    let lambda = fields.required(CONF_LAMBDA, validate_lambda)?;
    fields.finish()?;
    Ok(PageConfig { id, lambda })
}
