//! Generic component configuration

use serde::Serialize;

use crate::time::UpdateInterval;

/// Key of the setup priority override
pub const CONF_SETUP_PRIORITY: &str = "setup_priority";

/// Key of the polling interval
pub const CONF_UPDATE_INTERVAL: &str = "update_interval";

/// Settings every component accepts
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComponentConfig {
    /// Override of the runtime setup order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_priority: Option<f32>,
}

/// Settings of components updated on a fixed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollingConfig {
    pub update_interval: UpdateInterval,
}
