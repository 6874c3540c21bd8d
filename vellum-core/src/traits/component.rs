//! Component lifecycle trait

use vellum_emit::EmitOp;

use crate::config::{ComponentConfig, PollingConfig};
use crate::error::ValidationError;
use crate::ids::Id;
use crate::schema::Fields;
use crate::time::UpdateInterval;

/// Generic lifecycle every runtime component is registered with
///
/// Supplies the schema fragments shared by all components and the
/// registration that schedules setup and periodic updates.
pub trait ComponentLifecycle {
    /// Consume the keys every component accepts
    fn component_schema(&self, fields: &mut Fields<'_>) -> Result<ComponentConfig, ValidationError>;

    /// Consume the polling keys, using `default_interval` when absent
    fn polling_schema(
        &self,
        fields: &mut Fields<'_>,
        default_interval: UpdateInterval,
    ) -> Result<PollingConfig, ValidationError>;

    /// Register an instance
    ///
    /// `polling` is `None` for components without periodic updates.
    fn register_component(
        &self,
        id: &Id,
        component: &ComponentConfig,
        polling: Option<&PollingConfig>,
    ) -> EmitOp;
}
